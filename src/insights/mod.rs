//! Rule engines over a resolved [`TodaySummary`](crate::models::TodaySummary)
//!
//! Every engine is a pure synchronous function of the summary: no I/O, no
//! shared state, and no failure mode. Missing optional inputs (air quality,
//! an unparseable sunrise) fall back to neutral values.

pub mod advice;
pub mod health;
pub mod occupation;
pub mod time_window;
pub mod travel;

pub use advice::Advice;
pub use health::{HealthCondition, HealthInsight, RiskLevel};
pub use occupation::{Occupation, OccupationInsight, SuitabilityLabel};
pub use time_window::TimeWindows;
pub use travel::{TravelExplanation, TravelLabel, TravelScore};

/// Append-only collection of findings.
///
/// Rules push in evaluation order; consumers read the result once it is
/// finished and never mutate it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    items: Vec<String>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.items.push(message.into());
    }

    pub fn extend(&mut self, other: Findings) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Messages in insertion order
    pub fn into_messages(self) -> Vec<String> {
        self.items
    }
}

/// A sub-score together with the findings that explain it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorScore {
    pub score: u8,
    pub findings: Findings,
}

impl FactorScore {
    pub fn clean(score: u8) -> Self {
        Self {
            score,
            findings: Findings::new(),
        }
    }

    pub fn warn(score: u8, message: impl Into<String>) -> Self {
        let mut findings = Findings::new();
        findings.push(message);
        Self { score, findings }
    }
}

/// Apply additive adjustments to a baseline and clamp into 0..=100
pub(crate) fn clamp_score(baseline: i32, adjustments: i32) -> u8 {
    // clamp guarantees the cast is lossless
    (baseline + adjustments).clamp(0, 100) as u8
}
