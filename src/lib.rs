//! # CLI Trivia
//!
//! Timed multiple-choice trivia for the terminal.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        CLI TRIVIA                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Runtime primitives                        │
//! │  ├── timer.rs    - Single-shot cancelable countdown          │
//! │  └── shutdown.rs - Interrupt fan-in                          │
//! │                                                              │
//! │  game/           - Quiz logic                                │
//! │  ├── bank.rs     - Questions and built-in banks              │
//! │  ├── answer.rs   - Pure answer validation                    │
//! │  ├── session.rs  - Score, progress, status                   │
//! │  ├── flow.rs     - Question-flow state machine               │
//! │  ├── report.rs   - End-of-round summary                      │
//! │  └── events.rs   - Transition history                        │
//! │                                                              │
//! │  terminal/       - I/O boundary                              │
//! │  └── console.rs  - Line input, text output                   │
//! │                                                              │
//! │  config.rs       - Defaults and environment overrides        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Settling Guarantee
//!
//! Each question settles exactly once. The deadline and the player's input
//! race inside a single `select!` on the game task; the loser is dropped
//! before the session is touched, so a question can never be both answered
//! and timed out.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod game;
pub mod terminal;

// Re-export commonly used types
pub use config::{GameConfig, ConfigError};
pub use crate::core::shutdown::Shutdown;
pub use crate::core::timer::CountdownTimer;
pub use game::{QuizGame, GameExit, QuizError, QuestionBank, BankKind};
pub use terminal::Console;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Seconds allowed per question unless configured otherwise.
pub const DEFAULT_QUESTION_SECONDS: u64 = 10;

/// Pause between questions in milliseconds unless configured otherwise.
pub const DEFAULT_ADVANCE_MILLIS: u64 = 2000;
