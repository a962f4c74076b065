//! Game Logic Module
//!
//! Everything the quiz knows about questions, answers and scoring.
//!
//! ## Module Structure
//!
//! - `bank`: Questions and the built-in banks
//! - `answer`: Pure answer validation
//! - `session`: Score, progress and status of one playthrough
//! - `flow`: The question-flow state machine
//! - `report`: End-of-round summary
//! - `events`: Transition history

pub mod bank;
pub mod answer;
pub mod session;
pub mod flow;
pub mod report;
pub mod events;

// Re-export key types
pub use bank::{Question, QuestionBank, BankKind, BankError, OPTION_COUNT};
pub use answer::{validate, Outcome, OutcomeKind};
pub use session::{Session, SessionStatus, SessionError};
pub use flow::{QuizGame, GameExit, QuizError};
pub use report::{SessionReport, PraiseTier};
pub use events::{QuizEvent, QuizEventData, EventLog};
