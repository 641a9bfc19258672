//! User-generated record types: mood entries, journal entries and saved
//! quiz results, plus the fixed journal prompt suggestions.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assessment::AssessmentOutcome;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Great,
    Good,
    Okay,
    Low,
    Bad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Work,
    Relationships,
    Health,
    Sleep,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Sunny,
    Cloudy,
    Rainy,
    Windy,
    Night,
}

macro_rules! impl_str_enum {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok($ty::$variant),)+
                    _ => Err(ValidationError::InvalidValue {
                        field: stringify!($ty).to_lowercase(),
                        message: format!("unknown value '{s}'"),
                    }),
                }
            }
        }
    };
}

impl_str_enum!(Mood {
    Great => "great",
    Good => "good",
    Okay => "okay",
    Low => "low",
    Bad => "bad",
});

impl_str_enum!(Trigger {
    Work => "work",
    Relationships => "relationships",
    Health => "health",
    Sleep => "sleep",
    Other => "other",
});

impl_str_enum!(Weather {
    Sunny => "sunny",
    Cloudy => "cloudy",
    Rainy => "rainy",
    Windy => "windy",
    Night => "night",
});

/// A single logged mood.
///
/// `user_id` is filled in by the persistence gateway at save time; a record
/// is never written to the record store without one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub mood: Mood,
    pub triggers: BTreeSet<Trigger>,
    pub notes: Option<String>,
    pub weather: Option<Weather>,
}

impl MoodEntry {
    pub fn new(
        mood: Mood,
        triggers: BTreeSet<Trigger>,
        notes: Option<String>,
        weather: Option<Weather>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: None,
            created_at: Utc::now(),
            mood,
            triggers,
            notes,
            weather,
        }
    }
}

/// A free-form journal entry, optionally written against a prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub content: String,
    pub prompt: Option<String>,
}

impl JournalEntry {
    pub fn new(content: String, prompt: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: None,
            created_at: Utc::now(),
            content,
            prompt,
        }
    }
}

/// Persisted form of a completed assessment outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub score: u32,
    pub level: String,
    pub recommendations: Vec<String>,
}

impl QuizResult {
    pub fn from_outcome(outcome: &AssessmentOutcome) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: None,
            created_at: Utc::now(),
            score: outcome.score,
            level: outcome.level.label().to_string(),
            recommendations: outcome.recommendations.clone(),
        }
    }
}

/// Journal prompt suggestions, offered when the user asks for one.
pub const JOURNAL_PROMPTS: [&str; 10] = [
    "What's one small thing I'm grateful for today?",
    "How am I feeling right now, and why might I be feeling this way?",
    "What's one small victory I experienced today?",
    "If I could send a message to myself tomorrow, what would it say?",
    "What's something that made me smile today, no matter how small?",
    "What's one way I showed myself kindness today?",
    "What's something I'm looking forward to?",
    "If today had a color, what would it be and why?",
    "What's one thing I can let go of?",
    "What strength helped me today?",
];

/// Pick a random prompt suggestion.
pub fn random_prompt() -> &'static str {
    JOURNAL_PROMPTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(JOURNAL_PROMPTS[0])
}
