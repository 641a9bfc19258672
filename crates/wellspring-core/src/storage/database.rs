//! SQLite-based record storage.
//!
//! Provides persistent storage for:
//! - Mood entries, journal entries and saved quiz results, per user
//! - Local user accounts (see [`crate::auth::LocalAuth`])
//! - Key-value store for application state (engine snapshots, session)

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::error::DatabaseError;
use crate::records::{JournalEntry, Mood, MoodEntry, QuizResult, Trigger, Weather};

use super::data_dir;

/// A stored user account row. Password material stays hex-encoded at rest.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub pass_salt: String,
    pub pass_hash: String,
    pub created_at: DateTime<Utc>,
}

/// SQLite database for record storage.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/wellspring/wellspring.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, DatabaseError> {
        let path = data_dir()?.join("wellspring.db");
        let conn = Connection::open(&path).map_err(|source| DatabaseError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS users (
                    id         TEXT PRIMARY KEY,
                    email      TEXT NOT NULL UNIQUE,
                    pass_salt  TEXT NOT NULL,
                    pass_hash  TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS mood_entries (
                    id         TEXT PRIMARY KEY,
                    user_id    TEXT NOT NULL,
                    created_at TEXT NOT NULL,
                    mood       TEXT NOT NULL,
                    triggers   TEXT NOT NULL DEFAULT '[]',
                    notes      TEXT,
                    weather    TEXT
                );

                CREATE TABLE IF NOT EXISTS journal_entries (
                    id         TEXT PRIMARY KEY,
                    user_id    TEXT NOT NULL,
                    created_at TEXT NOT NULL,
                    content    TEXT NOT NULL,
                    prompt     TEXT
                );

                CREATE TABLE IF NOT EXISTS quiz_results (
                    id              TEXT PRIMARY KEY,
                    user_id         TEXT NOT NULL,
                    created_at      TEXT NOT NULL,
                    score           INTEGER NOT NULL,
                    level           TEXT NOT NULL,
                    recommendations TEXT NOT NULL DEFAULT '[]'
                );

                CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                -- Reads always filter by user and order by recency
                CREATE INDEX IF NOT EXISTS idx_mood_user_created
                    ON mood_entries(user_id, created_at);
                CREATE INDEX IF NOT EXISTS idx_journal_user_created
                    ON journal_entries(user_id, created_at);
                CREATE INDEX IF NOT EXISTS idx_quiz_user_created
                    ON quiz_results(user_id, created_at);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    // ── Users ────────────────────────────────────────────────────────

    pub fn insert_user(&self, user: &UserRow) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO users (id, email, pass_salt, pass_hash, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.id.to_string(),
                user.email,
                user.pass_salt,
                user.pass_hash,
                user.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn user_by_email(&self, email: &str) -> Result<Option<UserRow>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, email, pass_salt, pass_hash, created_at
             FROM users WHERE email = ?1",
        )?;
        let row = stmt
            .query_row(params![email], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })
            .optional()?;

        match row {
            None => Ok(None),
            Some((id, email, pass_salt, pass_hash, created_at)) => Ok(Some(UserRow {
                id: parse_uuid("users", &id)?,
                email,
                pass_salt,
                pass_hash,
                created_at: parse_timestamp("users", &created_at)?,
            })),
        }
    }

    // ── Key-value store ──────────────────────────────────────────────

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let value = stmt
            .query_row(params![key], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(value)
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

impl super::RecordStore for Database {
    fn insert_mood(&self, user_id: Uuid, entry: &MoodEntry) -> Result<(), DatabaseError> {
        let triggers = serde_json::to_string(&entry.triggers)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        self.conn.execute(
            "INSERT INTO mood_entries (id, user_id, created_at, mood, triggers, notes, weather)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                entry.id.to_string(),
                user_id.to_string(),
                entry.created_at.to_rfc3339(),
                entry.mood.as_str(),
                triggers,
                entry.notes,
                entry.weather.map(|w| w.as_str()),
            ],
        )?;
        Ok(())
    }

    fn insert_journal(&self, user_id: Uuid, entry: &JournalEntry) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO journal_entries (id, user_id, created_at, content, prompt)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.id.to_string(),
                user_id.to_string(),
                entry.created_at.to_rfc3339(),
                entry.content,
                entry.prompt,
            ],
        )?;
        Ok(())
    }

    fn insert_quiz(&self, user_id: Uuid, result: &QuizResult) -> Result<(), DatabaseError> {
        let recommendations = serde_json::to_string(&result.recommendations)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        self.conn.execute(
            "INSERT INTO quiz_results (id, user_id, created_at, score, level, recommendations)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                result.id.to_string(),
                user_id.to_string(),
                result.created_at.to_rfc3339(),
                result.score,
                result.level,
                recommendations,
            ],
        )?;
        Ok(())
    }

    fn moods_for(&self, user_id: Uuid) -> Result<Vec<MoodEntry>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, created_at, mood, triggers, notes, weather
             FROM mood_entries WHERE user_id = ?1
             ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map(params![user_id.to_string()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, Option<String>>(5)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, created_at, mood, triggers, notes, weather) = row?;
            entries.push(MoodEntry {
                id: parse_uuid("mood_entries", &id)?,
                user_id: Some(user_id),
                created_at: parse_timestamp("mood_entries", &created_at)?,
                mood: mood
                    .parse::<Mood>()
                    .map_err(|e| corrupt("mood_entries", &e))?,
                triggers: serde_json::from_str(&triggers)
                    .map_err(|e| corrupt("mood_entries", &e))?,
                notes,
                weather: weather
                    .map(|w| w.parse::<Weather>())
                    .transpose()
                    .map_err(|e| corrupt("mood_entries", &e))?,
            });
        }
        Ok(entries)
    }

    fn journals_for(&self, user_id: Uuid) -> Result<Vec<JournalEntry>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, created_at, content, prompt
             FROM journal_entries WHERE user_id = ?1
             ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map(params![user_id.to_string()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, created_at, content, prompt) = row?;
            entries.push(JournalEntry {
                id: parse_uuid("journal_entries", &id)?,
                user_id: Some(user_id),
                created_at: parse_timestamp("journal_entries", &created_at)?,
                content,
                prompt,
            });
        }
        Ok(entries)
    }

    fn quizzes_for(&self, user_id: Uuid) -> Result<Vec<QuizResult>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, created_at, score, level, recommendations
             FROM quiz_results WHERE user_id = ?1
             ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map(params![user_id.to_string()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u32>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut results = Vec::new();
        for row in rows {
            let (id, created_at, score, level, recommendations) = row?;
            results.push(QuizResult {
                id: parse_uuid("quiz_results", &id)?,
                user_id: Some(user_id),
                created_at: parse_timestamp("quiz_results", &created_at)?,
                score,
                level,
                recommendations: serde_json::from_str(&recommendations)
                    .map_err(|e| corrupt("quiz_results", &e))?,
            });
        }
        Ok(results)
    }
}

fn corrupt(table: &str, err: &dyn std::fmt::Display) -> DatabaseError {
    DatabaseError::CorruptRow {
        table: table.to_string(),
        message: err.to_string(),
    }
}

fn parse_uuid(table: &str, raw: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(raw).map_err(|e| corrupt(table, &e))
}

fn parse_timestamp(table: &str, raw: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| corrupt(table, &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RecordStore;
    use std::collections::BTreeSet;

    #[test]
    fn mood_round_trip() {
        let db = Database::open_memory().unwrap();
        let user = Uuid::new_v4();
        let mut triggers = BTreeSet::new();
        triggers.insert(Trigger::Work);
        triggers.insert(Trigger::Sleep);
        let entry = MoodEntry::new(
            Mood::Low,
            triggers.clone(),
            Some("long day".into()),
            Some(Weather::Rainy),
        );
        db.insert_mood(user, &entry).unwrap();

        let loaded = db.moods_for(user).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, entry.id);
        assert_eq!(loaded[0].user_id, Some(user));
        assert_eq!(loaded[0].mood, Mood::Low);
        assert_eq!(loaded[0].triggers, triggers);
        assert_eq!(loaded[0].weather, Some(Weather::Rainy));
    }

    #[test]
    fn reads_are_scoped_to_the_user() {
        let db = Database::open_memory().unwrap();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        db.insert_journal(alice, &JournalEntry::new("mine".into(), None))
            .unwrap();
        db.insert_journal(bob, &JournalEntry::new("theirs".into(), None))
            .unwrap();

        let journals = db.journals_for(alice).unwrap();
        assert_eq!(journals.len(), 1);
        assert_eq!(journals[0].content, "mine");
    }

    #[test]
    fn reads_are_newest_first() {
        let db = Database::open_memory().unwrap();
        let user = Uuid::new_v4();
        let mut older = JournalEntry::new("older".into(), None);
        older.created_at = Utc::now() - chrono::Duration::days(1);
        let newer = JournalEntry::new("newer".into(), None);
        db.insert_journal(user, &older).unwrap();
        db.insert_journal(user, &newer).unwrap();

        let journals = db.journals_for(user).unwrap();
        assert_eq!(journals[0].content, "newer");
        assert_eq!(journals[1].content, "older");
    }

    #[test]
    fn quiz_round_trip() {
        let db = Database::open_memory().unwrap();
        let user = Uuid::new_v4();
        let result = QuizResult {
            id: Uuid::new_v4(),
            user_id: None,
            created_at: Utc::now(),
            score: 8,
            level: "Mild".into(),
            recommendations: vec!["Journal regularly".into()],
        };
        db.insert_quiz(user, &result).unwrap();

        let loaded = db.quizzes_for(user).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].score, 8);
        assert_eq!(loaded[0].level, "Mild");
        assert_eq!(loaded[0].recommendations, vec!["Journal regularly"]);
    }

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        db.kv_delete("test").unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
    }
}
