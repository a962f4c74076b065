//! Session Report
//!
//! End-of-round summary derived from the session and bank. Read-only.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::game::bank::QuestionBank;
use crate::game::session::Session;

/// Praise band picked from the final percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PraiseTier {
    /// 100%.
    Perfect,
    /// 80% and up.
    Great,
    /// 60% and up.
    Good,
    /// Everything else.
    KeepPracticing,
}

impl PraiseTier {
    /// Tier for a percentage.
    pub fn for_percentage(percentage: u32) -> Self {
        if percentage >= 100 {
            PraiseTier::Perfect
        } else if percentage >= 80 {
            PraiseTier::Great
        } else if percentage >= 60 {
            PraiseTier::Good
        } else {
            PraiseTier::KeepPracticing
        }
    }

    /// Line shown to the player.
    pub fn message(self) -> &'static str {
        match self {
            PraiseTier::Perfect => "Perfect! You're amazing!",
            PraiseTier::Great => "Great job!",
            PraiseTier::Good => "Good work!",
            PraiseTier::KeepPracticing => "Keep practicing!",
        }
    }
}

/// `round(100 * score / total)`, halves rounded up. Zero when `total` is zero.
pub fn percentage(score: u32, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let score = u64::from(score);
    let total = total as u64;
    ((200 * score + total) / (2 * total)) as u32
}

/// Summary of a finished round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    /// Final score.
    pub score: u32,
    /// Questions in the bank.
    pub total: usize,
    /// Rounded percentage.
    pub percentage: u32,
    /// Praise band.
    pub tier: PraiseTier,
    /// Question count per category. Uncategorised questions are left out.
    pub categories: BTreeMap<String, usize>,
}

impl SessionReport {
    /// Build the report.
    pub fn new(session: &Session, bank: &QuestionBank) -> Self {
        let total = bank.len();
        let score = session.score();
        let percentage = percentage(score, total);

        let mut categories = BTreeMap::new();
        for category in bank.iter().filter_map(|q| q.category()) {
            *categories.entry(category.to_string()).or_insert(0) += 1;
        }

        Self {
            score,
            total,
            percentage,
            tier: PraiseTier::for_percentage(percentage),
            categories,
        }
    }

    /// Display lines in output order.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            "\n=== GAME OVER ===".to_string(),
            format!("Final score: {}/{}", self.score, self.total),
            self.tier.message().to_string(),
        ];

        if !self.categories.is_empty() {
            lines.push("\nGame stats:".to_string());
            for (category, count) in &self.categories {
                lines.push(format!("- {category} questions: {count}"));
            }
        }

        lines
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
