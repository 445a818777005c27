//! Transition rules - decide a cell's next state from its current state
//! and neighbor count.
//!
//! [`Rule`] is the closed set of rule families the engine understands. The
//! engine only ever calls [`Rule::evaluate`]; new families are added as
//! variants here rather than as separate step loops.

mod probability;
mod threshold;

pub use probability::*;
pub use threshold::*;

use rand::Rng;

use crate::grid::Cell;

/// A configured transition rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Deterministic birth/survival sets
    Threshold(ThresholdRule),
    /// Bell-curve probabilities sampled per cell
    Probability(ProbabilityRule),
}

impl Rule {
    /// Next state of a cell.
    ///
    /// Probability rules consume exactly one draw from `rng` per call,
    /// whatever the outcome, so a seeded generator walked in a fixed cell
    /// order reproduces a run exactly. Threshold rules never touch `rng`.
    #[inline]
    pub fn evaluate<R: Rng + ?Sized>(&self, state: Cell, count: u32, rng: &mut R) -> Cell {
        match self {
            Rule::Threshold(rule) => rule.next_state(state, count),
            Rule::Probability(rule) => {
                let u: f64 = rng.gen();
                rule.next_state(state, count, u)
            }
        }
    }

    /// Probability that the cell is alive next step. Threshold rules
    /// answer 0 or 1.
    pub fn probability(&self, state: Cell, count: u32) -> f64 {
        match self {
            Rule::Threshold(rule) => rule.next_state(state, count) as f64,
            Rule::Probability(rule) => rule.probability(state, count),
        }
    }

    pub fn is_stochastic(&self) -> bool {
        matches!(self, Rule::Probability(_))
    }
}

impl From<ThresholdRule> for Rule {
    fn from(rule: ThresholdRule) -> Self {
        Rule::Threshold(rule)
    }
}

impl From<ProbabilityRule> for Rule {
    fn from(rule: ProbabilityRule) -> Self {
        Rule::Probability(rule)
    }
}

/// Errors from building or parsing a rule
#[derive(Debug, Clone, PartialEq)]
pub enum RuleError {
    InvalidNotation(String),
    InvalidSpread(f64),
    InvalidCenter(f64),
}

impl std::fmt::Display for RuleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleError::InvalidNotation(s) => {
                write!(f, "Invalid rule notation '{}', expected e.g. B3/S23", s)
            }
            RuleError::InvalidSpread(s) => {
                write!(f, "Density spread must be finite and non-negative, got {}", s)
            }
            RuleError::InvalidCenter(c) => write!(f, "Density center must be finite, got {}", c),
        }
    }
}

impl std::error::Error for RuleError {}
