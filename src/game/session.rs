//! Game Session
//!
//! Mutable run-time state of one playthrough. Owned by the question-flow
//! driver; every mutation goes through one of the transition methods below,
//! each of which checks that the session is in the state it expects.

use serde::Serialize;
use tokio::time::Instant;

use crate::core::timer::TimerCycle;
use crate::game::answer::OutcomeKind;

/// Where the session is in the question flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionStatus {
    /// Reset, waiting for `start_game`.
    Idle,
    /// Question shown, deadline armed, waiting for input or expiry.
    Asking,
    /// An outcome is being applied.
    Resolving,
    /// Inter-question pause.
    Advancing,
    /// All questions resolved, report shown.
    Finished,
}

/// Session state.
#[derive(Debug, Clone)]
pub struct Session {
    score: u32,
    current_index: usize,
    resolved: usize,
    total: usize,
    status: SessionStatus,
    deadline: Option<Instant>,
    active_timer: Option<TimerCycle>,
    round: u32,
}

impl Session {
    /// Create an idle session over a bank of `total` questions.
    pub fn new(total: usize) -> Self {
        Self {
            score: 0,
            current_index: 0,
            resolved: 0,
            total,
            status: SessionStatus::Idle,
            deadline: None,
            active_timer: None,
            round: 0,
        }
    }

    /// Enter `Idle`, clearing score and progress. Rounds keep counting.
    pub fn reset(&mut self) {
        self.score = 0;
        self.current_index = 0;
        self.resolved = 0;
        self.status = SessionStatus::Idle;
        self.deadline = None;
        self.active_timer = None;
    }

    /// `Idle` → `Asking` (or straight to `Finished` for an empty bank).
    pub fn start_game(&mut self) -> Result<(), SessionError> {
        self.require(SessionStatus::Idle)?;
        self.round += 1;
        self.status = if self.total == 0 {
            SessionStatus::Finished
        } else {
            SessionStatus::Asking
        };
        Ok(())
    }

    /// Record the armed deadline for the current question.
    ///
    /// Replaces any previous handle; the caller's timer has already
    /// cancelled it.
    pub fn arm(&mut self, cycle: TimerCycle, deadline: Instant) -> Result<(), SessionError> {
        self.require(SessionStatus::Asking)?;
        self.active_timer = Some(cycle);
        self.deadline = Some(deadline);
        Ok(())
    }

    /// Forget the timer handle after it fired or was cancelled.
    pub fn disarm(&mut self) -> Option<TimerCycle> {
        self.deadline = None;
        self.active_timer.take()
    }

    /// `Asking` → `Resolving`.
    pub fn begin_resolving(&mut self) -> Result<(), SessionError> {
        self.require(SessionStatus::Asking)?;
        if self.active_timer.is_some() {
            return Err(SessionError::TimerStillArmed);
        }
        self.status = SessionStatus::Resolving;
        Ok(())
    }

    /// Apply an outcome while `Resolving`.
    ///
    /// `Invalid` sends the session back to `Asking` on the same question.
    /// Any settling outcome scores, counts the question as resolved and moves
    /// to `Advancing`. Returns the new status.
    pub fn resolve(&mut self, kind: OutcomeKind) -> Result<SessionStatus, SessionError> {
        self.require(SessionStatus::Resolving)?;

        if kind.settles() {
            if kind == OutcomeKind::Correct {
                self.score += 1;
            }
            self.resolved += 1;
            self.status = SessionStatus::Advancing;
        } else {
            self.status = SessionStatus::Asking;
        }

        debug_assert!(self.check_invariants().is_ok());
        Ok(self.status)
    }

    /// `Advancing` → next question or `Finished`. Returns the new status.
    pub fn advance(&mut self) -> Result<SessionStatus, SessionError> {
        self.require(SessionStatus::Advancing)?;
        self.current_index += 1;
        self.status = if self.current_index < self.total {
            SessionStatus::Asking
        } else {
            SessionStatus::Finished
        };

        debug_assert!(self.check_invariants().is_ok());
        Ok(self.status)
    }

    /// Score and progress invariants.
    ///
    /// `score <= current_index` cannot hold while `Advancing` after a correct
    /// answer, since the index moves only after the pause. The check is
    /// therefore `score <= resolved`, with `resolved` at most one ahead of
    /// the index and `score <= current_index` whenever the two agree.
    pub fn check_invariants(&self) -> Result<(), SessionError> {
        let score = self.score as usize;
        let settled_index = self.resolved == self.current_index;

        if score > self.resolved
            || !(settled_index || self.resolved == self.current_index + 1)
            || self.current_index > self.total
            || (settled_index && score > self.current_index)
        {
            return Err(SessionError::InvariantViolated {
                score: self.score,
                current_index: self.current_index,
                resolved: self.resolved,
            });
        }
        Ok(())
    }

    fn require(&self, status: SessionStatus) -> Result<(), SessionError> {
        if self.status != status {
            return Err(SessionError::InvalidState {
                expected: status,
                actual: self.status,
            });
        }
        Ok(())
    }

    /// Points so far this round.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Index of the question being asked (or `total` once finished).
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Questions settled so far this round.
    pub fn resolved(&self) -> usize {
        self.resolved
    }

    /// Bank size.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Current status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Whether a round is in progress.
    pub fn is_playing(&self) -> bool {
        !matches!(self.status, SessionStatus::Idle | SessionStatus::Finished)
    }

    /// Pending deadline of the current question. `None` outside `Asking`.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Timer cycle armed for the current question.
    pub fn active_timer(&self) -> Option<TimerCycle> {
        self.active_timer
    }

    /// Rounds started since launch.
    pub fn round(&self) -> u32 {
        self.round
    }
}

/// Session errors. Every variant is a driver bug, never player input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Transition attempted from the wrong state.
    #[error("Invalid session state: expected {expected:?}, found {actual:?}")]
    InvalidState {
        /// State the transition requires.
        expected: SessionStatus,
        /// State the session was in.
        actual: SessionStatus,
    },

    /// Resolving started while a deadline could still fire.
    #[error("Question timer still armed")]
    TimerStillArmed,

    /// Score ran ahead of progress.
    #[error("Session invariant violated: score {score}, index {current_index}, resolved {resolved}")]
    InvariantViolated {
        /// Score.
        score: u32,
        /// Current index.
        current_index: usize,
        /// Resolved count.
        resolved: usize,
    },
}
