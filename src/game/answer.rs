//! Answer Validation
//!
//! Pure mapping from a raw input line to an [`Outcome`]. No timer, no
//! session, no I/O.

use serde::{Deserialize, Serialize};

use crate::game::bank::Question;

/// Classification of one answer attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeKind {
    /// Picked the right option.
    Correct,
    /// Picked a valid but wrong option.
    Incorrect,
    /// Not a number, or not an option number.
    Invalid,
    /// Deadline passed before any input.
    TimedOut,
}

impl OutcomeKind {
    /// Whether this outcome settles the question (everything but Invalid).
    pub fn settles(self) -> bool {
        !matches!(self, OutcomeKind::Invalid)
    }
}

/// Result of resolving one attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// What happened.
    pub kind: OutcomeKind,
    /// Correct option text. `None` for invalid input, which reveals nothing.
    pub revealed_option: Option<String>,
}

impl Outcome {
    fn settled(kind: OutcomeKind, question: &Question) -> Self {
        Self {
            kind,
            revealed_option: Some(question.correct_option().to_string()),
        }
    }

    /// Outcome forced by deadline expiry. Never goes through the validator.
    pub fn timed_out(question: &Question) -> Self {
        Self::settled(OutcomeKind::TimedOut, question)
    }

    /// Outcome for malformed input.
    pub fn invalid() -> Self {
        Self {
            kind: OutcomeKind::Invalid,
            revealed_option: None,
        }
    }
}

/// Classify a raw answer line against `question`.
///
/// The player types option numbers 1..=4. Surrounding whitespace is ignored.
/// Anything that is not an unsigned integer in range is `Invalid`.
pub fn validate(raw: &str, question: &Question) -> Outcome {
    let choice = match raw.trim().parse::<usize>() {
        Ok(n) if (1..=question.options().len()).contains(&n) => n,
        _ => return Outcome::invalid(),
    };

    if choice == question.correct_index() + 1 {
        Outcome::settled(OutcomeKind::Correct, question)
    } else {
        Outcome::settled(OutcomeKind::Incorrect, question)
    }
}
