//! The fixed wellness-check instrument.
//!
//! Eight questions, four frequency options each; the option index is the
//! score (0..=3). Defined at process start and never mutated.

/// A single screening question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: u32,
    pub text: &'static str,
    pub options: [&'static str; 4],
}

const FREQUENCY_OPTIONS: [&str; 4] = [
    "Not at all",
    "Several days",
    "More than half the days",
    "Nearly every day",
];

pub(super) const QUESTIONS: [Question; 8] = [
    Question {
        id: 1,
        text: "Over the past 2 weeks, how often have you felt little interest or pleasure in doing things?",
        options: FREQUENCY_OPTIONS,
    },
    Question {
        id: 2,
        text: "Over the past 2 weeks, how often have you felt down, depressed, or hopeless?",
        options: FREQUENCY_OPTIONS,
    },
    Question {
        id: 3,
        text: "Over the past 2 weeks, how often have you had trouble falling asleep, staying asleep, or sleeping too much?",
        options: FREQUENCY_OPTIONS,
    },
    Question {
        id: 4,
        text: "Over the past 2 weeks, how often have you felt tired or had little energy?",
        options: FREQUENCY_OPTIONS,
    },
    Question {
        id: 5,
        text: "Over the past 2 weeks, how often have you had poor appetite or overeaten?",
        options: FREQUENCY_OPTIONS,
    },
    Question {
        id: 6,
        text: "Over the past 2 weeks, how often have you felt bad about yourself or that you're a failure or have let yourself or your family down?",
        options: FREQUENCY_OPTIONS,
    },
    Question {
        id: 7,
        text: "Over the past 2 weeks, how often have you had trouble concentrating on things, such as reading the newspaper or watching television?",
        options: FREQUENCY_OPTIONS,
    },
    Question {
        id: 8,
        text: "Over the past 2 weeks, how often have you felt that you would be better off dead or hurting yourself in some way?",
        options: FREQUENCY_OPTIONS,
    },
];

/// The full fixed question sequence.
pub fn questions() -> &'static [Question] {
    &QUESTIONS
}
