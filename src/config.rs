//! Game Configuration
//!
//! Defaults match the classic game: general bank, ten seconds per question,
//! two-second pause between questions. Each can be overridden from the
//! environment:
//!
//! | Variable | Meaning |
//! |---|---|
//! | `TRIVIA_BANK` | `general` or `space` |
//! | `TRIVIA_QUESTION_SECONDS` | seconds per question, at least 1 |
//! | `TRIVIA_ADVANCE_MILLIS` | pause between questions in milliseconds |

use std::time::Duration;

use crate::game::bank::{BankError, BankKind};

/// Bank selector variable.
pub const ENV_BANK: &str = "TRIVIA_BANK";
/// Per-question time variable.
pub const ENV_QUESTION_SECONDS: &str = "TRIVIA_QUESTION_SECONDS";
/// Inter-question pause variable.
pub const ENV_ADVANCE_MILLIS: &str = "TRIVIA_ADVANCE_MILLIS";

/// Configuration for a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Which built-in bank to play.
    pub bank: BankKind,
    /// Time allowed per question.
    pub question_time: Duration,
    /// Pause after each settled question.
    pub advance_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bank: BankKind::General,
            question_time: Duration::from_secs(crate::DEFAULT_QUESTION_SECONDS),
            advance_delay: Duration::from_millis(crate::DEFAULT_ADVANCE_MILLIS),
        }
    }
}

impl GameConfig {
    /// Build from process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Missing keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(bank) = lookup(ENV_BANK) {
            config.bank = bank.parse()?;
        }

        if let Some(raw) = lookup(ENV_QUESTION_SECONDS) {
            let seconds = parse_number(ENV_QUESTION_SECONDS, &raw)?;
            if seconds == 0 {
                return Err(ConfigError::ZeroQuestionTime);
            }
            config.question_time = Duration::from_secs(seconds);
        }

        if let Some(raw) = lookup(ENV_ADVANCE_MILLIS) {
            config.advance_delay = Duration::from_millis(parse_number(ENV_ADVANCE_MILLIS, &raw)?);
        }

        Ok(config)
    }

    /// Whole seconds allowed per question, for display.
    pub fn question_seconds(&self) -> u64 {
        self.question_time.as_secs()
    }
}

fn parse_number(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: raw.to_string(),
    })
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Not a non-negative integer.
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber {
        /// Variable name.
        var: &'static str,
        /// Value as given.
        value: String,
    },

    /// Questions need at least one second.
    #[error("{} must be at least 1", ENV_QUESTION_SECONDS)]
    ZeroQuestionTime,

    /// Bad bank name.
    #[error(transparent)]
    Bank(#[from] BankError),
}
