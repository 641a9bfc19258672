pub mod auth;
pub mod breathe;
pub mod config;
pub mod dashboard;
pub mod journal;
pub mod mood;
pub mod quiz;
