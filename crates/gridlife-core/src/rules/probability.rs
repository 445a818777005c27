//! Probabilistic ("quantum") rules.
//!
//! Instead of a hard birth/survival threshold, each transition has a
//! probability taken from a bell curve centered on the classic threshold:
//!
//! - dead cell: `birth(count)`
//! - live cell with 2 neighbors: `survival_low(2)`
//! - live cell with 3 neighbors: `survival_high(3)`
//! - live cell with any other count: 0
//!
//! The probability is clamped to `[0, 1]` and compared against a uniform draw.
//! As the spread shrinks to zero the rule degenerates to B3/S23.

use serde::{Deserialize, Serialize};

use super::RuleError;
use crate::grid::{Cell, ALIVE, DEAD};

/// Live-cell count that consults the low survival curve.
pub const SURVIVAL_LOW_COUNT: u32 = 2;
/// Live-cell count that consults the high survival curve.
pub const SURVIVAL_HIGH_COUNT: u32 = 3;

/// Default spread for all three curves.
pub const DEFAULT_SPREAD: f64 = 0.34;

/// Unimodal density: a normal curve with the given center and spread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Density {
    pub center: f64,
    pub spread: f64,
}

impl Density {
    pub const fn new(center: f64, spread: f64) -> Self {
        Self { center, spread }
    }

    /// Density at `count`. Not normalized to `[0, 1]`; a narrow curve peaks
    /// above 1 and is clamped by the rule.
    ///
    /// A spread of exactly zero is the limit case: 1 at the center, 0 elsewhere.
    pub fn at(&self, count: u32) -> f64 {
        let x = count as f64;
        if self.spread == 0.0 {
            return if x == self.center { 1.0 } else { 0.0 };
        }
        let z = (x - self.center) / self.spread;
        (-0.5 * z * z).exp() / (self.spread * (2.0 * std::f64::consts::PI).sqrt())
    }

    fn validate(&self) -> Result<(), RuleError> {
        if !self.spread.is_finite() || self.spread < 0.0 {
            return Err(RuleError::InvalidSpread(self.spread));
        }
        if !self.center.is_finite() {
            return Err(RuleError::InvalidCenter(self.center));
        }
        Ok(())
    }
}

/// The three curves of a probability rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityParams {
    pub birth: Density,
    pub survival_low: Density,
    pub survival_high: Density,
}

impl ProbabilityParams {
    /// Curves centered on the B3/S23 thresholds, all with the same spread.
    pub fn life_like(spread: f64) -> Self {
        Self {
            birth: Density::new(3.0, spread),
            survival_low: Density::new(SURVIVAL_LOW_COUNT as f64, spread),
            survival_high: Density::new(SURVIVAL_HIGH_COUNT as f64, spread),
        }
    }
}

impl Default for ProbabilityParams {
    fn default() -> Self {
        Self::life_like(DEFAULT_SPREAD)
    }
}

/// Transition probabilities precomputed per neighbor count.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityRule {
    params: ProbabilityParams,
    /// `[birth, survival]` for counts `0..=max_count`
    table: Vec<[f64; 2]>,
}

impl ProbabilityRule {
    /// Build a rule for kernels of at most `max_count` neighbors.
    pub fn new(params: ProbabilityParams, max_count: usize) -> Result<Self, RuleError> {
        params.birth.validate()?;
        params.survival_low.validate()?;
        params.survival_high.validate()?;

        let table = (0..=max_count as u32)
            .map(|n| [birth_probability(&params, n), survival_probability(&params, n)])
            .collect();
        Ok(Self { params, table })
    }

    pub fn params(&self) -> &ProbabilityParams {
        &self.params
    }

    /// Largest count covered by the lookup table.
    pub fn max_count(&self) -> usize {
        self.table.len().saturating_sub(1)
    }

    /// Replace the curves and rebuild the table.
    pub fn set_params(&mut self, params: ProbabilityParams) -> Result<(), RuleError> {
        *self = Self::new(params, self.max_count())?;
        Ok(())
    }

    /// Probability that a cell in `state` with `count` neighbors is alive next step.
    #[inline]
    pub fn probability(&self, state: Cell, count: u32) -> f64 {
        let column = match state {
            DEAD => 0,
            ALIVE => 1,
            _ => return 0.0,
        };
        match self.table.get(count as usize) {
            Some(row) => row[column],
            None if column == 0 => birth_probability(&self.params, count),
            None => survival_probability(&self.params, count),
        }
    }

    /// Next state given a uniform draw `u` in `[0, 1)`.
    #[inline]
    pub fn next_state(&self, state: Cell, count: u32, u: f64) -> Cell {
        if u < self.probability(state, count) {
            ALIVE
        } else {
            DEAD
        }
    }
}

fn birth_probability(params: &ProbabilityParams, count: u32) -> f64 {
    params.birth.at(count).clamp(0.0, 1.0)
}

fn survival_probability(params: &ProbabilityParams, count: u32) -> f64 {
    let p = match count {
        SURVIVAL_LOW_COUNT => params.survival_low.at(count),
        SURVIVAL_HIGH_COUNT => params.survival_high.at(count),
        _ => 0.0,
    };
    p.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_peak_and_decay() {
        let d = Density::new(3.0, 1.0);
        assert!(d.at(3) > d.at(2));
        assert!((d.at(2) - d.at(4)).abs() < 1e-12);
        assert!((d.at(3) - 0.398_942_280_4).abs() < 1e-9);
    }

    #[test]
    fn test_default_rule_probabilities() {
        let rule = ProbabilityRule::new(ProbabilityParams::default(), 8).unwrap();
        // Narrow curves peak above 1 and clamp
        assert_eq!(rule.probability(DEAD, 3), 1.0);
        assert_eq!(rule.probability(ALIVE, 2), 1.0);
        assert_eq!(rule.probability(ALIVE, 3), 1.0);
        // Off-peak births are rare but possible
        let p = rule.probability(DEAD, 2);
        assert!(p > 0.0 && p < 0.05, "p = {}", p);
        // Survival outside 2/3 is impossible
        assert_eq!(rule.probability(ALIVE, 1), 0.0);
        assert_eq!(rule.probability(ALIVE, 4), 0.0);
    }

    #[test]
    fn test_zero_spread_is_threshold() {
        let rule = ProbabilityRule::new(ProbabilityParams::life_like(0.0), 8).unwrap();
        for n in 0..=8 {
            let birth = if n == 3 { 1.0 } else { 0.0 };
            let survive = if n == 2 || n == 3 { 1.0 } else { 0.0 };
            assert_eq!(rule.probability(DEAD, n), birth);
            assert_eq!(rule.probability(ALIVE, n), survive);
        }
    }

    #[test]
    fn test_counts_past_table_still_answered() {
        let rule = ProbabilityRule::new(ProbabilityParams::life_like(2.0), 2).unwrap();
        assert_eq!(rule.max_count(), 2);
        assert_eq!(
            rule.probability(DEAD, 5),
            ProbabilityParams::life_like(2.0).birth.at(5).clamp(0.0, 1.0)
        );
        assert!(rule.probability(ALIVE, 3) > 0.0);
    }

    #[test]
    fn test_set_params_rebuilds_table() {
        let mut rule = ProbabilityRule::new(ProbabilityParams::life_like(5.0), 8).unwrap();
        let wide = rule.probability(DEAD, 6);
        rule.set_params(ProbabilityParams::life_like(0.1)).unwrap();
        assert!(rule.probability(DEAD, 6) < wide);
        assert_eq!(rule.max_count(), 8);
    }

    #[test]
    fn test_invalid_spread_rejected() {
        let mut params = ProbabilityParams::default();
        params.survival_high.spread = -1.0;
        assert_eq!(
            ProbabilityRule::new(params, 8),
            Err(RuleError::InvalidSpread(-1.0))
        );
        params.survival_high.spread = f64::NAN;
        assert!(ProbabilityRule::new(params, 8).is_err());
    }

    #[test]
    fn test_next_state_against_draw() {
        let rule = ProbabilityRule::new(ProbabilityParams::default(), 8).unwrap();
        let p = rule.probability(DEAD, 4);
        assert_eq!(rule.next_state(DEAD, 4, p / 2.0), ALIVE);
        assert_eq!(rule.next_state(DEAD, 4, p), DEAD);
        assert_eq!(rule.next_state(ALIVE, 2, 0.999), ALIVE);
    }
}
