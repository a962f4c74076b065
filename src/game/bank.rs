//! Question Bank
//!
//! Immutable, ordered quiz items. Two built-in banks ship with the game;
//! which one is played is a configuration choice.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every question offers exactly this many options.
pub const OPTION_COUNT: usize = 4;

/// A single multiple-choice question.
///
/// Deserializing goes through the same check as [`Question::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionData")]
pub struct Question {
    prompt: String,
    options: [String; OPTION_COUNT],
    correct_index: usize,
    category: Option<String>,
}

impl Question {
    /// Build a question, checking that `correct_index` names an option.
    pub fn new(
        prompt: impl Into<String>,
        options: [&str; OPTION_COUNT],
        correct_index: usize,
        category: Option<&str>,
    ) -> Result<Self, BankError> {
        QuestionData {
            prompt: prompt.into(),
            options: options.map(String::from),
            correct_index,
            category: category.map(String::from),
        }
        .try_into()
    }

    /// Question text.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Options in display order.
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    /// 0-based index of the correct option.
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// Text of the correct option.
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    /// Optional grouping used by the end-of-game report.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// Unchecked wire form of a [`Question`].
#[derive(Deserialize)]
struct QuestionData {
    prompt: String,
    options: [String; OPTION_COUNT],
    correct_index: usize,
    #[serde(default)]
    category: Option<String>,
}

impl TryFrom<QuestionData> for Question {
    type Error = BankError;

    fn try_from(data: QuestionData) -> Result<Self, Self::Error> {
        if data.correct_index >= OPTION_COUNT {
            return Err(BankError::CorrectIndexOutOfRange {
                prompt: data.prompt,
                index: data.correct_index,
            });
        }

        Ok(Self {
            prompt: data.prompt,
            options: data.options,
            correct_index: data.correct_index,
            category: data.category,
        })
    }
}

/// Built-in bank selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankKind {
    /// General knowledge.
    #[default]
    General,
    /// Space-themed trivia.
    Space,
}

impl FromStr for BankKind {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(BankKind::General),
            "space" => Ok(BankKind::Space),
            other => Err(BankError::UnknownBank(other.to_string())),
        }
    }
}

impl fmt::Display for BankKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BankKind::General => write!(f, "general"),
            BankKind::Space => write!(f, "space"),
        }
    }
}

/// Ordered, non-empty list of questions for one game.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "BankData")]
pub struct QuestionBank {
    questions: Vec<Question>,
}

#[derive(Deserialize)]
struct BankData {
    questions: Vec<Question>,
}

impl TryFrom<BankData> for QuestionBank {
    type Error = BankError;

    fn try_from(data: BankData) -> Result<Self, Self::Error> {
        Self::new(data.questions)
    }
}

impl QuestionBank {
    /// Wrap a list of questions. An empty list is rejected.
    pub fn new(questions: Vec<Question>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }
        Ok(Self { questions })
    }

    /// Load one of the built-in banks.
    pub fn builtin(kind: BankKind) -> Result<Self, BankError> {
        let questions = match kind {
            BankKind::General => general_questions()?,
            BankKind::Space => space_questions()?,
        };
        Self::new(questions)
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed bank; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Question at `index`.
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Iterate in play order.
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

/// Question bank errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BankError {
    /// Correct index does not point at an option.
    #[error("Correct index {index} out of range for question {prompt:?}")]
    CorrectIndexOutOfRange {
        /// Offending question text.
        prompt: String,
        /// Offending index.
        index: usize,
    },

    /// A bank needs at least one question.
    #[error("Question bank is empty")]
    Empty,

    /// No built-in bank by that name.
    #[error("Unknown question bank: {0}")]
    UnknownBank(String),
}

// =============================================================================
// BUILT-IN BANKS
// =============================================================================

const EASY: &str = "Easy";
const HARD: &str = "Hard";

/// Keyword rule for the general bank's difficulty split.
fn general_category(prompt: &str) -> Option<&'static str> {
    const EASY_WORDS: [&str; 3] = ["capital", "planet", "largest"];
    const HARD_WORDS: [&str; 2] = ["painted", "chemical"];

    if EASY_WORDS.iter().any(|w| prompt.contains(w)) {
        Some(EASY)
    } else if HARD_WORDS.iter().any(|w| prompt.contains(w)) {
        Some(HARD)
    } else {
        None
    }
}

fn general_questions() -> Result<Vec<Question>, BankError> {
    let raw: [(&str, [&str; OPTION_COUNT], usize); 5] = [
        ("What is the capital of France?", ["London", "Berlin", "Paris", "Madrid"], 2),
        ("Which planet is known as the Red Planet?", ["Venus", "Mars", "Jupiter", "Saturn"], 1),
        ("What is the largest mammal?", ["Elephant", "Blue Whale", "Giraffe", "Polar Bear"], 1),
        ("Who painted the Mona Lisa?", ["Van Gogh", "Picasso", "Da Vinci", "Michelangelo"], 2),
        ("What is the chemical symbol for gold?", ["Go", "Gd", "Au", "Ag"], 2),
    ];

    raw.into_iter()
        .map(|(prompt, options, answer)| {
            Question::new(prompt, options, answer, general_category(prompt))
        })
        .collect()
}

fn space_questions() -> Result<Vec<Question>, BankError> {
    let raw: [(&str, [&str; OPTION_COUNT], usize, &str); 5] = [
        ("Which planet is closest to the Sun?", ["Venus", "Earth", "Mercury", "Mars"], 2, EASY),
        ("What is the largest planet in our solar system?", ["Saturn", "Jupiter", "Neptune", "Uranus"], 1, EASY),
        ("What is the name of Earth's natural satellite?", ["Phobos", "Titan", "Europa", "The Moon"], 3, EASY),
        ("Who was the first person to walk on the Moon?", ["Buzz Aldrin", "Yuri Gagarin", "Neil Armstrong", "John Glenn"], 2, HARD),
        ("What galaxy contains our solar system?", ["Andromeda", "Milky Way", "Triangulum", "Sombrero"], 1, HARD),
    ];

    raw.into_iter()
        .map(|(prompt, options, answer, category)| {
            Question::new(prompt, options, answer, Some(category))
        })
        .collect()
}
