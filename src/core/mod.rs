//! Core runtime primitives.
//!
//! Timing and shutdown plumbing used by the question-flow driver. Nothing in
//! here knows about questions or scoring.

pub mod timer;
pub mod shutdown;

// Re-export core types
pub use timer::{CountdownTimer, TimerCycle, TimerState};
pub use shutdown::{Shutdown, ShutdownListener};
