//! Countdown Timer
//!
//! Single-shot, restartable, cancelable deadline for one question.
//!
//! The timer never spawns a task. The game loop owns it and awaits
//! [`CountdownTimer::expired`] inside the same `select!` that awaits player
//! input, so expiry is delivered on the game loop's own task and the loser of
//! the race is simply dropped.
//!
//! ## Arm cycle
//!
//! ```text
//!            start()                expired() resolves
//!   Idle ─────────────▶ Armed ──────────────────────────▶ Fired
//!     ▲                   │
//!     │                   │ cancel() / start() again
//!     │                   ▼
//!     └──────────────  Cancelled
//! ```
//!
//! Every `start` opens a new cycle. Exactly one of {cancel, fire} closes it.

use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Identifier of one arm cycle.
///
/// Monotonic per timer; a cycle id is never reused.
pub type TimerCycle = u64;

/// Where the timer is in its current cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Never armed.
    Idle,
    /// Deadline pending.
    Armed {
        /// Instant at which the cycle expires.
        deadline: Instant,
        /// Cycle id.
        cycle: TimerCycle,
    },
    /// Deadline passed and expiry was delivered.
    Fired {
        /// Cycle id.
        cycle: TimerCycle,
    },
    /// Disarmed before the deadline.
    Cancelled {
        /// Cycle id.
        cycle: TimerCycle,
    },
}

/// Per-question countdown.
#[derive(Debug)]
pub struct CountdownTimer {
    state: TimerState,
    next_cycle: TimerCycle,
}

impl CountdownTimer {
    /// Create an idle timer.
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            next_cycle: 1,
        }
    }

    /// Arm a fresh deadline `duration` from now.
    ///
    /// A deadline that is still pending is cancelled first, so two armed
    /// cycles never coexist.
    pub fn start(&mut self, duration: Duration) -> TimerCycle {
        self.cancel();

        let cycle = self.next_cycle;
        self.next_cycle += 1;
        self.state = TimerState::Armed {
            deadline: Instant::now() + duration,
            cycle,
        };
        cycle
    }

    /// Disarm the pending deadline.
    ///
    /// Returns `true` if a deadline was pending. Cancelling an idle, fired or
    /// already-cancelled timer is a no-op and returns `false`.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            TimerState::Armed { cycle, .. } => {
                self.state = TimerState::Cancelled { cycle };
                true
            }
            _ => false,
        }
    }

    /// Wait for the pending deadline.
    ///
    /// Resolves once per cycle with the cycle id. Pends forever when nothing
    /// is armed. Cancel-safe: dropping the future before it resolves leaves
    /// the timer armed and untouched.
    pub async fn expired(&mut self) -> TimerCycle {
        match self.state {
            TimerState::Armed { deadline, cycle } => {
                sleep_until(deadline).await;
                self.state = TimerState::Fired { cycle };
                cycle
            }
            _ => std::future::pending().await,
        }
    }

    /// Check whether a deadline is pending.
    pub fn is_armed(&self) -> bool {
        matches!(self.state, TimerState::Armed { .. })
    }

    /// Pending deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            TimerState::Armed { deadline, .. } => Some(deadline),
            _ => None,
        }
    }

    /// Time left before the pending deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Current cycle state.
    pub fn state(&self) -> TimerState {
        self.state
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}
