mod config;
pub mod database;

pub use config::Config;
pub use database::Database;

use std::path::PathBuf;

use uuid::Uuid;

use crate::error::DatabaseError;
use crate::records::{JournalEntry, MoodEntry, QuizResult};

/// Returns `~/.config/wellspring[-dev]/` based on WELLSPRING_ENV.
///
/// Set WELLSPRING_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("WELLSPRING_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("wellspring-dev")
    } else {
        base_dir.join("wellspring")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Row read/write contract of the record store.
///
/// Inserts take the owning `user_id` explicitly, so an unauthenticated
/// record cannot reach the store by construction. Reads filter by user and
/// return newest-first.
pub trait RecordStore {
    fn insert_mood(&self, user_id: Uuid, entry: &MoodEntry) -> Result<(), DatabaseError>;
    fn insert_journal(&self, user_id: Uuid, entry: &JournalEntry) -> Result<(), DatabaseError>;
    fn insert_quiz(&self, user_id: Uuid, result: &QuizResult) -> Result<(), DatabaseError>;

    fn moods_for(&self, user_id: Uuid) -> Result<Vec<MoodEntry>, DatabaseError>;
    fn journals_for(&self, user_id: Uuid) -> Result<Vec<JournalEntry>, DatabaseError>;
    fn quizzes_for(&self, user_id: Uuid) -> Result<Vec<QuizResult>, DatabaseError>;
}
