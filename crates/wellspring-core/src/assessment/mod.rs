//! Wellness-check engine: question sequencing, answer accumulation and
//! score classification.
//!
//! The engine is a pure function of the recorded answers -- no side effects,
//! no dependency on other components. The presentation layer owns rendering
//! and any settling delay between questions.

mod questions;

pub use questions::{questions, Question};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Number of questions in the instrument.
pub const QUESTION_COUNT: usize = 8;

/// Maximum possible score (all answers at 3).
pub const MAX_SCORE: u32 = 24;

/// Score classification bands, closed at the upper end of each band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Minimal,
    Mild,
    Moderate,
    ModeratelySevere,
    Severe,
}

impl Severity {
    /// Map a total score to its band: <=4 Minimal, <=9 Mild, <=14 Moderate,
    /// <=19 Moderately severe, else Severe.
    pub fn from_score(score: u32) -> Severity {
        match score {
            0..=4 => Severity::Minimal,
            5..=9 => Severity::Mild,
            10..=14 => Severity::Moderate,
            15..=19 => Severity::ModeratelySevere,
            _ => Severity::Severe,
        }
    }

    /// Display label, as shown in results and stored with saved outcomes.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Minimal => "Minimal",
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::ModeratelySevere => "Moderately severe",
            Severity::Severe => "Severe",
        }
    }

    /// Advisory message for the band.
    pub fn message(self) -> &'static str {
        match self {
            Severity::Minimal => {
                "Your responses suggest minimal or no symptoms of depression. \
                 Continue practicing self-care and mindfulness."
            }
            Severity::Mild => {
                "Your responses suggest mild symptoms. It's a good time to \
                 focus on self-care strategies."
            }
            Severity::Moderate => {
                "Your responses suggest moderate symptoms. Consider seeking \
                 additional support."
            }
            Severity::ModeratelySevere => {
                "Your responses suggest moderately severe symptoms. It's \
                 recommended to speak with a healthcare provider."
            }
            Severity::Severe => {
                "Your responses suggest severe symptoms. Please reach out to \
                 a healthcare provider or mental health professional as soon \
                 as possible."
            }
        }
    }

    /// Fixed recommendation list for the band.
    pub fn recommendations(self) -> [&'static str; 4] {
        match self {
            Severity::Minimal => [
                "Regular exercise",
                "Mindful breathing",
                "Journaling",
                "Maintain social connections",
            ],
            Severity::Mild => [
                "Use the breathing exercises",
                "Journal regularly",
                "Track your mood",
                "Consider talking to a trusted friend",
            ],
            Severity::Moderate => [
                "All self-care strategies",
                "Check the resources page",
                "Consider speaking with a healthcare provider",
                "Set small, achievable goals",
            ],
            Severity::ModeratelySevere => [
                "Continue self-care",
                "Speak with a healthcare provider",
                "Explore professional support options in the resources page",
                "Be kind to yourself",
            ],
            Severity::Severe => [
                "Contact a healthcare provider",
                "Check crisis resources",
                "Reach out to a trusted person",
                "Know that help is available",
            ],
        }
    }
}

/// Computed result of a completed assessment. Immutable once computed; not
/// persisted until explicitly saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentOutcome {
    pub score: u32,
    pub level: Severity,
    pub message: String,
    pub recommendations: Vec<String>,
}

impl AssessmentOutcome {
    fn from_score(score: u32) -> Self {
        let level = Severity::from_score(score);
        Self {
            score,
            level,
            message: level.message().to_string(),
            recommendations: level
                .recommendations()
                .iter()
                .map(|r| r.to_string())
                .collect(),
        }
    }
}

/// Sequential question delivery and answer accumulation.
///
/// Answers are appended one index at a time, so there are never gaps below
/// the current index and the session is complete exactly when all eight
/// answers are recorded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentEngine {
    answers: Vec<u8>,
}

impl AssessmentEngine {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Index of the question awaiting an answer; equals [`QUESTION_COUNT`]
    /// exactly when the sequence is complete.
    pub fn current_index(&self) -> usize {
        self.answers.len()
    }

    /// The question awaiting an answer, or `None` once complete.
    pub fn current_question(&self) -> Option<&'static Question> {
        questions().get(self.answers.len())
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() == QUESTION_COUNT
    }

    /// Display progress, recomputed on every answer.
    pub fn progress_pct(&self) -> f64 {
        self.answers.len() as f64 / QUESTION_COUNT as f64 * 100.0
    }

    pub fn answers(&self) -> &[u8] {
        &self.answers
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Record an answer for the current question and advance.
    ///
    /// Returns `false` (no-op) once the sequence is complete or when the
    /// option index is out of range; a duplicate submission for an already
    /// answered question therefore cannot create gaps.
    pub fn answer(&mut self, option: u8) -> bool {
        if self.is_complete() || option > 3 {
            return false;
        }
        self.answers.push(option);
        true
    }

    /// Compute the outcome of a completed assessment.
    ///
    /// # Errors
    /// Returns [`ValidationError::IncompleteAssessment`] if called before
    /// all questions are answered. That is a sequencing bug in the caller,
    /// not a user-visible condition.
    pub fn result(&self) -> Result<AssessmentOutcome, ValidationError> {
        if !self.is_complete() {
            return Err(ValidationError::IncompleteAssessment {
                answered: self.answers.len(),
                total: QUESTION_COUNT,
            });
        }
        let score = self.answers.iter().map(|&a| u32::from(a)).sum();
        Ok(AssessmentOutcome::from_score(score))
    }

    /// Reset to a fresh session.
    pub fn restart(&mut self) {
        self.answers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn completes_after_exactly_eight_answers() {
        let mut engine = AssessmentEngine::new();
        for i in 0..QUESTION_COUNT {
            assert!(!engine.is_complete());
            assert_eq!(engine.current_index(), i);
            assert!(engine.answer(0));
        }
        assert!(engine.is_complete());
        assert_eq!(engine.current_index(), QUESTION_COUNT);

        // Further answers are ignored.
        assert!(!engine.answer(0));
        assert_eq!(engine.current_index(), QUESTION_COUNT);
    }

    #[test]
    fn out_of_range_option_is_rejected() {
        let mut engine = AssessmentEngine::new();
        assert!(!engine.answer(4));
        assert_eq!(engine.current_index(), 0);
    }

    #[test]
    fn result_before_completion_is_an_error() {
        let mut engine = AssessmentEngine::new();
        engine.answer(2);
        assert!(matches!(
            engine.result(),
            Err(ValidationError::IncompleteAssessment {
                answered: 1,
                total: 8
            })
        ));
    }

    #[test]
    fn restart_clears_the_session() {
        let mut engine = AssessmentEngine::new();
        for _ in 0..QUESTION_COUNT {
            engine.answer(3);
        }
        engine.restart();
        assert_eq!(engine.current_index(), 0);
        assert!(!engine.is_complete());
        for _ in 0..QUESTION_COUNT {
            assert!(engine.answer(1));
        }
        assert!(engine.is_complete());
    }

    #[test]
    fn progress_tracks_answers() {
        let mut engine = AssessmentEngine::new();
        assert_eq!(engine.progress_pct(), 0.0);
        engine.answer(0);
        engine.answer(0);
        assert_eq!(engine.progress_pct(), 25.0);
        for _ in 0..6 {
            engine.answer(0);
        }
        assert_eq!(engine.progress_pct(), 100.0);
    }

    #[test]
    fn level_band_boundaries() {
        let cases = [
            (4, Severity::Minimal),
            (5, Severity::Mild),
            (9, Severity::Mild),
            (10, Severity::Moderate),
            (14, Severity::Moderate),
            (15, Severity::ModeratelySevere),
            (19, Severity::ModeratelySevere),
            (20, Severity::Severe),
        ];
        for (score, expected) in cases {
            assert_eq!(Severity::from_score(score), expected, "score {score}");
        }
        assert_eq!(Severity::from_score(0), Severity::Minimal);
        assert_eq!(Severity::from_score(MAX_SCORE), Severity::Severe);
    }

    #[test]
    fn mild_scenario_end_to_end() {
        let mut engine = AssessmentEngine::new();
        for answer in [0, 1, 2, 1, 0, 3, 1, 0] {
            assert!(engine.answer(answer));
        }
        let outcome = engine.result().unwrap();
        assert_eq!(outcome.score, 8);
        assert_eq!(outcome.level, Severity::Mild);
        assert_eq!(
            outcome.recommendations,
            vec![
                "Use the breathing exercises",
                "Journal regularly",
                "Track your mood",
                "Consider talking to a trusted friend",
            ]
        );
    }

    proptest! {
        #[test]
        fn score_is_sum_of_answers(answers in prop::collection::vec(0u8..4, QUESTION_COUNT)) {
            let mut engine = AssessmentEngine::new();
            for &a in &answers {
                prop_assert!(engine.answer(a));
            }
            let outcome = engine.result().unwrap();
            let expected: u32 = answers.iter().map(|&a| u32::from(a)).sum();
            prop_assert_eq!(outcome.score, expected);
            prop_assert!(outcome.score <= MAX_SCORE);
        }
    }
}
