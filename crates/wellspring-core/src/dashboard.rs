//! Read-only retrieval and shaping of a user's history for display.
//!
//! Each category is queried independently; a failing query notifies the
//! error and renders that category empty without touching the others.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::notify::{Notifier, NoticeKind};
use crate::records::{JournalEntry, MoodEntry, QuizResult};
use crate::storage::RecordStore;

/// One dashboard load: three independent, newest-first sequences.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardData {
    pub moods: Vec<MoodEntry>,
    pub journals: Vec<JournalEntry>,
    pub quizzes: Vec<QuizResult>,
}

impl DashboardData {
    pub fn is_empty(&self) -> bool {
        self.moods.is_empty() && self.journals.is_empty() && self.quizzes.is_empty()
    }

    /// Journal entries grouped by calendar day, newest day first. Display
    /// grouping only; entries within a day keep their newest-first order.
    pub fn journals_by_day(&self) -> Vec<(NaiveDate, Vec<&JournalEntry>)> {
        let mut days: Vec<(NaiveDate, Vec<&JournalEntry>)> = Vec::new();
        for entry in &self.journals {
            let day = entry.created_at.date_naive();
            match days.last_mut() {
                Some((last, bucket)) if *last == day => bucket.push(entry),
                _ => days.push((day, vec![entry])),
            }
        }
        days
    }
}

/// Read-only aggregator over the record store.
pub struct DashboardAggregator<'a> {
    store: &'a dyn RecordStore,
    notifier: &'a dyn Notifier,
}

impl<'a> DashboardAggregator<'a> {
    pub fn new(store: &'a dyn RecordStore, notifier: &'a dyn Notifier) -> Self {
        Self { store, notifier }
    }

    /// Load all three categories for the user. A fresh call re-queries.
    pub fn load_all(&self, user_id: Uuid) -> DashboardData {
        DashboardData {
            moods: self.load(
                "mood entries",
                self.store.moods_for(user_id),
            ),
            journals: self.load(
                "journal entries",
                self.store.journals_for(user_id),
            ),
            quizzes: self.load(
                "quiz results",
                self.store.quizzes_for(user_id),
            ),
        }
    }

    fn load<T>(
        &self,
        category: &str,
        result: Result<Vec<T>, crate::error::DatabaseError>,
    ) -> Vec<T> {
        match result {
            Ok(items) => items,
            Err(e) => {
                self.notifier.notify(
                    NoticeKind::Error,
                    &format!("Error fetching {category}"),
                    &e.to_string(),
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DatabaseError;
    use crate::notify::test_support::RecordingNotifier;
    use crate::records::Mood;
    use chrono::{Duration, TimeZone, Utc};
    use std::collections::BTreeSet;

    /// Store where individual categories can be made to fail.
    struct PartialStore {
        fail_moods: bool,
        fail_journals: bool,
        fail_quizzes: bool,
    }

    impl PartialStore {
        fn healthy() -> Self {
            Self {
                fail_moods: false,
                fail_journals: false,
                fail_quizzes: false,
            }
        }
    }

    impl RecordStore for PartialStore {
        fn insert_mood(&self, _: Uuid, _: &MoodEntry) -> Result<(), DatabaseError> {
            Ok(())
        }
        fn insert_journal(&self, _: Uuid, _: &JournalEntry) -> Result<(), DatabaseError> {
            Ok(())
        }
        fn insert_quiz(&self, _: Uuid, _: &QuizResult) -> Result<(), DatabaseError> {
            Ok(())
        }

        fn moods_for(&self, user_id: Uuid) -> Result<Vec<MoodEntry>, DatabaseError> {
            if self.fail_moods {
                return Err(DatabaseError::QueryFailed("mood query failed".into()));
            }
            let mut entry = MoodEntry::new(Mood::Good, BTreeSet::new(), None, None);
            entry.user_id = Some(user_id);
            Ok(vec![entry])
        }

        fn journals_for(&self, user_id: Uuid) -> Result<Vec<JournalEntry>, DatabaseError> {
            if self.fail_journals {
                return Err(DatabaseError::QueryFailed("journal query failed".into()));
            }
            let mut entry = JournalEntry::new("a page".into(), None);
            entry.user_id = Some(user_id);
            Ok(vec![entry])
        }

        fn quizzes_for(&self, user_id: Uuid) -> Result<Vec<QuizResult>, DatabaseError> {
            if self.fail_quizzes {
                return Err(DatabaseError::QueryFailed("quiz query failed".into()));
            }
            Ok(vec![QuizResult {
                id: Uuid::new_v4(),
                user_id: Some(user_id),
                created_at: Utc::now(),
                score: 3,
                level: "Minimal".into(),
                recommendations: vec![],
            }])
        }
    }

    #[test]
    fn loads_all_categories() {
        let store = PartialStore::healthy();
        let notifier = RecordingNotifier::default();
        let aggregator = DashboardAggregator::new(&store, &notifier);

        let data = aggregator.load_all(Uuid::new_v4());
        assert_eq!(data.moods.len(), 1);
        assert_eq!(data.journals.len(), 1);
        assert_eq!(data.quizzes.len(), 1);
        assert!(notifier.notices.borrow().is_empty());
    }

    #[test]
    fn category_failure_is_isolated() {
        let store = PartialStore {
            fail_moods: true,
            ..PartialStore::healthy()
        };
        let notifier = RecordingNotifier::default();
        let aggregator = DashboardAggregator::new(&store, &notifier);

        let data = aggregator.load_all(Uuid::new_v4());
        assert!(data.moods.is_empty());
        assert_eq!(data.journals.len(), 1);
        assert_eq!(data.quizzes.len(), 1);

        let notices = notifier.notices.borrow();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].0, NoticeKind::Error);
        assert!(notices[0].1.contains("mood entries"));
    }

    #[test]
    fn all_failures_still_return_a_shape() {
        let store = PartialStore {
            fail_moods: true,
            fail_journals: true,
            fail_quizzes: true,
        };
        let notifier = RecordingNotifier::default();
        let aggregator = DashboardAggregator::new(&store, &notifier);

        let data = aggregator.load_all(Uuid::new_v4());
        assert!(data.is_empty());
        assert_eq!(notifier.notices.borrow().len(), 3);
    }

    #[test]
    fn journals_group_by_day() {
        let noon = Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap();
        let mut data = DashboardData::default();
        let mut today = JournalEntry::new("today".into(), None);
        today.created_at = noon;
        let mut also_today = JournalEntry::new("also today".into(), None);
        also_today.created_at = noon - Duration::minutes(5);
        let mut yesterday = JournalEntry::new("yesterday".into(), None);
        yesterday.created_at = noon - Duration::days(1);
        data.journals = vec![today, also_today, yesterday];

        let days = data.journals_by_day();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].1.len(), 2);
        assert_eq!(days[1].1.len(), 1);
        assert_eq!(days[1].1[0].content, "yesterday");
    }
}
