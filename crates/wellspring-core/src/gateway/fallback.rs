//! Local fallback store for records that could not reach the record store.
//!
//! One JSON file, one slot per record kind, last-write-wins. A stashed
//! record carries its stored-at timestamp; re-sync happens through
//! [`super::PersistenceGateway::resync`].

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::storage::data_dir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Mood,
    Journal,
    Quiz,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Mood => "mood",
            RecordKind::Journal => "journal",
            RecordKind::Quiz => "quiz",
        }
    }
}

/// A record held locally until it can be written remotely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StashedRecord {
    pub kind: RecordKind,
    pub payload: serde_json::Value,
    pub stored_at: DateTime<Utc>,
}

/// Process-wide keyed store, persisted to `fallback.json` in the data dir.
pub struct FallbackStore {
    path: PathBuf,
    entries: HashMap<RecordKind, StashedRecord>,
}

impl FallbackStore {
    /// Open the store at the default location, loading any existing file.
    pub fn open_default() -> Result<Self, CoreError> {
        let path = data_dir()?.join("fallback.json");
        Self::open(path)
    }

    /// Open the store at a specific path (for testing).
    ///
    /// A missing file is an empty store; any other read failure is an
    /// error, so an unreadable file cannot be mistaken for empty and
    /// overwritten by the next stash.
    pub fn open(path: PathBuf) -> Result<Self, CoreError> {
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    /// Hold the most recent unsynced record of `kind`, replacing any prior
    /// one.
    pub fn stash<T: Serialize>(&mut self, kind: RecordKind, record: &T) -> Result<(), CoreError> {
        self.entries.insert(
            kind,
            StashedRecord {
                kind,
                payload: serde_json::to_value(record)?,
                stored_at: Utc::now(),
            },
        );
        self.persist()
    }

    /// Remove and return the stashed record of `kind`, if any.
    pub fn take(&mut self, kind: RecordKind) -> Result<Option<StashedRecord>, CoreError> {
        let taken = self.entries.remove(&kind);
        if taken.is_some() {
            self.persist()?;
        }
        Ok(taken)
    }

    pub fn peek(&self, kind: RecordKind) -> Option<&StashedRecord> {
        self.entries.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) -> Result<(), CoreError> {
        let data = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::QuizResult;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn sample_result() -> QuizResult {
        QuizResult {
            id: Uuid::new_v4(),
            user_id: None,
            created_at: Utc::now(),
            score: 8,
            level: "Mild".into(),
            recommendations: vec!["Track your mood".into()],
        }
    }

    #[test]
    fn stash_and_take() {
        let dir = TempDir::new().unwrap();
        let mut store = FallbackStore::open(dir.path().join("fallback.json")).unwrap();
        assert!(store.is_empty());

        store.stash(RecordKind::Quiz, &sample_result()).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.peek(RecordKind::Quiz).is_some());
        assert!(store.peek(RecordKind::Mood).is_none());

        let taken = store.take(RecordKind::Quiz).unwrap().unwrap();
        assert_eq!(taken.kind, RecordKind::Quiz);
        assert_eq!(taken.payload["level"], "Mild");
        assert!(store.is_empty());
    }

    #[test]
    fn last_write_wins_per_kind() {
        let dir = TempDir::new().unwrap();
        let mut store = FallbackStore::open(dir.path().join("fallback.json")).unwrap();

        let first = sample_result();
        let mut second = sample_result();
        second.score = 21;
        store.stash(RecordKind::Quiz, &first).unwrap();
        store.stash(RecordKind::Quiz, &second).unwrap();

        assert_eq!(store.len(), 1);
        let held = store.peek(RecordKind::Quiz).unwrap();
        assert_eq!(held.payload["score"], 21);
    }

    #[test]
    fn survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fallback.json");

        let mut store = FallbackStore::open(path.clone()).unwrap();
        store.stash(RecordKind::Quiz, &sample_result()).unwrap();
        drop(store);

        let mut reopened = FallbackStore::open(path).unwrap();
        assert_eq!(reopened.len(), 1);
        let taken = reopened.take(RecordKind::Quiz).unwrap().unwrap();
        assert_eq!(taken.payload["level"], "Mild");
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FallbackStore::open(dir.path().join("absent.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn unreadable_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        // A directory at the path fails the read without being NotFound.
        assert!(FallbackStore::open(dir.path().to_path_buf()).is_err());
    }
}
