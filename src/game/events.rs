//! Quiz Events
//!
//! Record of every question-flow transition, kept in order for the life of
//! the process. Tests read it to check that each question settles once.

use serde::{Deserialize, Serialize};

use crate::game::answer::OutcomeKind;

/// What happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizEventData {
    /// A round began with a fresh session.
    RoundStarted {
        /// Number of questions in the round.
        total: usize,
    },

    /// A question was shown and its deadline armed.
    QuestionAsked {
        /// Question index.
        index: usize,
        /// 1 for the first showing, +1 for every re-ask after invalid input.
        attempt: u32,
    },

    /// Input did not name an option; the question is asked again.
    InvalidAnswer {
        /// Question index.
        index: usize,
        /// Raw line as typed.
        input: String,
    },

    /// The question settled.
    Resolved {
        /// Question index.
        index: usize,
        /// Settling outcome.
        kind: OutcomeKind,
        /// Score after applying the outcome.
        score: u32,
    },

    /// Every question settled.
    RoundFinished {
        /// Final score.
        score: u32,
        /// Bank size.
        total: usize,
        /// Rounded percentage.
        percentage: u32,
    },

    /// Shutdown was requested mid-game.
    Interrupted,
}

/// An event tagged with the round it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizEvent {
    /// Round number (1-based, 0 before the first round).
    pub round: u32,
    /// Event data.
    pub data: QuizEventData,
}

impl QuizEvent {
    /// Create a new event.
    pub fn new(round: u32, data: QuizEventData) -> Self {
        Self { round, data }
    }

    /// Settling outcome, if this is a `Resolved` event.
    pub fn resolved_kind(&self) -> Option<(usize, OutcomeKind)> {
        match &self.data {
            QuizEventData::Resolved { index, kind, .. } => Some((*index, *kind)),
            _ => None,
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Ordered transition history.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<QuizEvent>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn push(&mut self, event: QuizEvent) {
        self.events.push(event);
    }

    /// All events in order.
    pub fn events(&self) -> &[QuizEvent] {
        &self.events
    }

    /// Settling outcomes of one round, in order.
    pub fn outcomes(&self, round: u32) -> Vec<(usize, OutcomeKind)> {
        self.events
            .iter()
            .filter(|e| e.round == round)
            .filter_map(QuizEvent::resolved_kind)
            .collect()
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
