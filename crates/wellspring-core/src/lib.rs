//! # Wellspring Core Library
//!
//! This library provides the core business logic for the Wellspring wellness
//! companion. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary; any GUI layer is a thin shell over
//! the same core library.
//!
//! ## Architecture
//!
//! - **Breathing Timer**: a caller-driven cyclic state machine (`tick()` once
//!   per second) plus an async driver that owns the recurring tick and its
//!   cancellation handle
//! - **Assessment Engine**: fixed 8-question sequencing, answer accumulation
//!   and score classification
//! - **Persistence Gateway**: session-gated record writes with a local
//!   fallback store for records that cannot reach the database
//! - **Storage**: SQLite-based record store and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`BreathingEngine`] / [`BreathingDriver`]: breathing-cycle state machine
//! - [`AssessmentEngine`]: wellness check sequencing and scoring
//! - [`PersistenceGateway`]: authenticated saves with degraded fallback
//! - [`DashboardAggregator`]: read-only history retrieval for display
//! - [`Database`]: record store and key-value persistence
//! - [`Config`]: application configuration management

pub mod assessment;
pub mod auth;
pub mod breathing;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod gateway;
pub mod notify;
pub mod records;
pub mod storage;

pub use assessment::{AssessmentEngine, AssessmentOutcome, Question, Severity};
pub use auth::{LocalAuth, Session, SessionProvider};
pub use breathing::{BreathingDriver, BreathingEngine, Phase};
pub use dashboard::{DashboardAggregator, DashboardData};
pub use error::{AuthError, ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use gateway::{FallbackStore, PersistenceGateway, RecordKind, SaveOutcome};
pub use notify::{ConsoleNotifier, Notifier, NoticeKind};
pub use records::{JournalEntry, Mood, MoodEntry, QuizResult, Trigger, Weather};
pub use storage::{Config, Database, RecordStore};
