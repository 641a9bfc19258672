//! Persistence gateway: session-gated record writes with degraded fallback.
//!
//! Every save checks the session provider, writes to the record store or
//! falls back, and reports the outcome through the notifier -- exactly one
//! terminal notice per save, and no store or provider error escapes raw.
//!
//! The flows deliberately diverge: a quiz result is never lost (it is
//! stashed locally when unauthenticated or when the write fails), while
//! mood and journal saves surface the condition without a local copy and
//! leave the user to retry after signing in.

mod fallback;

pub use fallback::{FallbackStore, RecordKind, StashedRecord};

use serde::Serialize;

use crate::auth::SessionProvider;
use crate::notify::{Notifier, NoticeKind};
use crate::records::{JournalEntry, MoodEntry, QuizResult};
use crate::storage::RecordStore;

/// Terminal outcome of a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveOutcome {
    /// Written to the record store under the signed-in user.
    Saved,
    /// Held in the local fallback store, unsynced.
    SavedLocally,
    /// No session and this flow performs no local save.
    Unauthenticated,
    /// The write failed and this flow performs no local save.
    Failed,
}

/// Saves user-generated records against an authenticated session.
///
/// Issues at most one write per call; callers are expected to disable
/// resubmission until the prior call returns.
pub struct PersistenceGateway<'a> {
    store: &'a dyn RecordStore,
    sessions: &'a dyn SessionProvider,
    notifier: &'a dyn Notifier,
    fallback: FallbackStore,
}

impl<'a> PersistenceGateway<'a> {
    pub fn new(
        store: &'a dyn RecordStore,
        sessions: &'a dyn SessionProvider,
        notifier: &'a dyn Notifier,
        fallback: FallbackStore,
    ) -> Self {
        Self {
            store,
            sessions,
            notifier,
            fallback,
        }
    }

    pub fn fallback(&self) -> &FallbackStore {
        &self.fallback
    }

    /// Save a mood entry. Requires a session; no local fallback.
    pub fn save_mood(&mut self, entry: &MoodEntry) -> SaveOutcome {
        let Some(session) = self.sessions.current_session() else {
            self.notifier.notify(
                NoticeKind::Info,
                "Sign in required",
                "Sign in to save your mood history.",
            );
            return SaveOutcome::Unauthenticated;
        };
        match self.store.insert_mood(session.user_id, entry) {
            Ok(()) => {
                self.notifier.notify(
                    NoticeKind::Info,
                    "Mood entry saved",
                    "Your mood has been recorded.",
                );
                SaveOutcome::Saved
            }
            Err(e) => {
                self.notifier
                    .notify(NoticeKind::Error, "Error saving mood entry", &e.to_string());
                SaveOutcome::Failed
            }
        }
    }

    /// Save a journal entry. Requires a session; no local fallback.
    pub fn save_journal(&mut self, entry: &JournalEntry) -> SaveOutcome {
        let Some(session) = self.sessions.current_session() else {
            self.notifier.notify(
                NoticeKind::Info,
                "Sign in required",
                "Sign in to save your journal.",
            );
            return SaveOutcome::Unauthenticated;
        };
        match self.store.insert_journal(session.user_id, entry) {
            Ok(()) => {
                self.notifier.notify(
                    NoticeKind::Info,
                    "Journal entry saved",
                    "Your entry has been recorded.",
                );
                SaveOutcome::Saved
            }
            Err(e) => {
                self.notifier.notify(
                    NoticeKind::Error,
                    "Error saving journal entry",
                    &e.to_string(),
                );
                SaveOutcome::Failed
            }
        }
    }

    /// Save a quiz result. Falls back to the local store when
    /// unauthenticated or when the write fails, so the result is never
    /// lost.
    pub fn save_quiz(&mut self, result: &QuizResult) -> SaveOutcome {
        let Some(session) = self.sessions.current_session() else {
            return self.stash_quiz(
                result,
                NoticeKind::Info,
                "Sign in required",
                "Your results are kept on this device until you sign in.",
            );
        };
        match self.store.insert_quiz(session.user_id, result) {
            Ok(()) => {
                self.notifier.notify(
                    NoticeKind::Info,
                    "Results saved",
                    "Your results have been saved for your reference.",
                );
                SaveOutcome::Saved
            }
            Err(e) => self.stash_quiz(
                result,
                NoticeKind::Error,
                "Error saving results",
                &e.to_string(),
            ),
        }
    }

    /// Retry the stashed quiz result against the record store.
    ///
    /// Returns `None` when there is nothing stashed or no session. On a
    /// failed retry the result goes back into the fallback store.
    pub fn resync(&mut self) -> Option<SaveOutcome> {
        let session = self.sessions.current_session()?;
        let stashed = self.fallback.take(RecordKind::Quiz).ok()??;
        let result: QuizResult = match serde_json::from_value(stashed.payload.clone()) {
            Ok(r) => r,
            Err(e) => {
                self.notifier.notify(
                    NoticeKind::Error,
                    "Could not read saved results",
                    &e.to_string(),
                );
                return Some(SaveOutcome::Failed);
            }
        };
        match self.store.insert_quiz(session.user_id, &result) {
            Ok(()) => {
                self.notifier.notify(
                    NoticeKind::Info,
                    "Results synced",
                    "Results saved on this device have been synced to your account.",
                );
                Some(SaveOutcome::Saved)
            }
            Err(e) => {
                let _ = self.fallback.stash(RecordKind::Quiz, &result);
                self.notifier
                    .notify(NoticeKind::Error, "Error syncing results", &e.to_string());
                Some(SaveOutcome::SavedLocally)
            }
        }
    }

    fn stash_quiz(
        &mut self,
        result: &QuizResult,
        kind: NoticeKind,
        title: &str,
        detail: &str,
    ) -> SaveOutcome {
        match self.fallback.stash(RecordKind::Quiz, result) {
            Ok(()) => {
                self.notifier.notify(kind, title, detail);
                SaveOutcome::SavedLocally
            }
            Err(e) => {
                self.notifier.notify(
                    NoticeKind::Error,
                    "Could not keep results on this device",
                    &e.to_string(),
                );
                SaveOutcome::Failed
            }
        }
    }
}
