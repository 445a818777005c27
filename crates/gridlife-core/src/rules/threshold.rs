//! Deterministic birth/survival threshold rules.
//!
//! Rules are written in the usual `B<birth>/S<survival>` notation. Counts
//! below 10 may be listed as bare digits (`B36/S23`), larger counts are
//! comma separated (`B34,35/S2`), and inclusive ranges use `..`
//! (`B34..45/S34..58`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::RuleError;
use crate::grid::{Cell, ALIVE, DEAD};

/// A set of neighbor counts, as an explicit list or an inclusive range.
///
/// Both forms are equivalent for membership; ranges just avoid spelling out
/// long runs like the 34..58 survival band of large-neighborhood rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountSet {
    List(Vec<u32>),
    Range { min: u32, max: u32 },
}

impl CountSet {
    pub fn empty() -> Self {
        CountSet::List(Vec::new())
    }

    #[inline]
    pub fn contains(&self, count: u32) -> bool {
        match self {
            CountSet::List(counts) => counts.contains(&count),
            CountSet::Range { min, max } => (*min..=*max).contains(&count),
        }
    }

    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some((lo, hi)) = text.split_once("..") {
            let min = lo.trim().parse().ok()?;
            let max = hi.trim().parse().ok()?;
            return Some(CountSet::Range { min, max });
        }
        if text.contains(',') {
            // A trailing comma marks a one-element list such as `12,`
            let counts = text
                .strip_suffix(',')
                .unwrap_or(text)
                .split(',')
                .map(|part| part.trim().parse().ok())
                .collect::<Option<Vec<u32>>>()?;
            return Some(CountSet::List(counts));
        }
        text.chars()
            .map(|c| c.to_digit(10))
            .collect::<Option<Vec<u32>>>()
            .map(CountSet::List)
    }
}

impl fmt::Display for CountSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountSet::Range { min, max } => write!(f, "{}..{}", min, max),
            CountSet::List(counts) if counts.iter().all(|&c| c < 10) => {
                for c in counts {
                    write!(f, "{}", c)?;
                }
                Ok(())
            }
            CountSet::List(counts) => {
                let parts: Vec<String> = counts.iter().map(u32::to_string).collect();
                write!(f, "{}", parts.join(","))?;
                if parts.len() == 1 {
                    write!(f, ",")?;
                }
                Ok(())
            }
        }
    }
}

/// Birth/survival rule over neighbor counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdRule {
    pub birth: CountSet,
    pub survival: CountSet,
}

impl ThresholdRule {
    pub fn new(birth: CountSet, survival: CountSet) -> Self {
        Self { birth, survival }
    }

    /// Build from explicit count lists.
    pub fn from_lists(birth: &[u32], survival: &[u32]) -> Self {
        Self::new(CountSet::List(birth.to_vec()), CountSet::List(survival.to_vec()))
    }

    /// Conway's Game of Life, B3/S23.
    pub fn life() -> Self {
        Self::from_lists(&[3], &[2, 3])
    }

    /// B36/S23
    pub fn high_life() -> Self {
        Self::from_lists(&[3, 6], &[2, 3])
    }

    /// B2/S
    pub fn seeds() -> Self {
        Self::from_lists(&[2], &[])
    }

    /// B3678/S34678
    pub fn day_and_night() -> Self {
        Self::from_lists(&[3, 6, 7, 8], &[3, 4, 6, 7, 8])
    }

    /// Bosco's rule for the 11x11 ring: B34..45/S34..58.
    pub fn bosco() -> Self {
        Self::new(
            CountSet::Range { min: 34, max: 45 },
            CountSet::Range { min: 34, max: 58 },
        )
    }

    /// Parse `B3/S23` style notation. Case-insensitive; either half may be empty.
    pub fn parse(notation: &str) -> Result<Self, RuleError> {
        let invalid = || RuleError::InvalidNotation(notation.to_string());

        let (b, s) = notation.trim().split_once('/').ok_or_else(invalid)?;
        let b = b.trim();
        let s = s.trim();
        let birth = b
            .strip_prefix(['B', 'b'])
            .and_then(CountSet::parse)
            .ok_or_else(invalid)?;
        let survival = s
            .strip_prefix(['S', 's'])
            .and_then(CountSet::parse)
            .ok_or_else(invalid)?;

        Ok(Self::new(birth, survival))
    }

    /// Next state of a cell. Anything outside the birth/survival sets is dead.
    #[inline]
    pub fn next_state(&self, state: Cell, count: u32) -> Cell {
        let lives = match state {
            DEAD => self.birth.contains(count),
            ALIVE => self.survival.contains(count),
            _ => false,
        };
        if lives {
            ALIVE
        } else {
            DEAD
        }
    }
}

impl fmt::Display for ThresholdRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}/S{}", self.birth, self.survival)
    }
}

impl FromStr for ThresholdRule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
