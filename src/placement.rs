//! Placement strategies
//!
//! Each strategy is a pure function from the current free gaps (in ascending
//! address order) and a requested dimension to the low address of the chosen
//! gap. The block is always placed at the start of the chosen gap.
//!
//! | Strategy   | Candidate gap                                           |
//! |------------|---------------------------------------------------------|
//! | First fit  | lowest-addressed gap that is large enough               |
//! | Best fit   | sufficient gap with the smallest leftover, lowest first |
//! | Worst fit  | the single largest gap, only if it is large enough      |

use crate::memory::{Address, Gap};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placement policy used by the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strategy {
    FirstFit,
    BestFit,
    WorstFit,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::FirstFit, Strategy::BestFit, Strategy::WorstFit];

    /// Display name used in reports
    pub fn name(self) -> &'static str {
        match self {
            Strategy::FirstFit => "FIRST_FIT",
            Strategy::BestFit => "BEST_FIT",
            Strategy::WorstFit => "WORST_FIT",
        }
    }

    /// Pick the low address for a block of `dimension` addresses
    pub fn choose(self, gaps: &[Gap], dimension: u64) -> Option<Address> {
        match self {
            Strategy::FirstFit => first_fit(gaps, dimension),
            Strategy::BestFit => best_fit(gaps, dimension),
            Strategy::WorstFit => worst_fit(gaps, dimension),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "FIRST_FIT" | "FIRST" => Ok(Strategy::FirstFit),
            "BEST_FIT" | "BEST" => Ok(Strategy::BestFit),
            "WORST_FIT" | "WORST" => Ok(Strategy::WorstFit),
            _ => Err(format!("Unknown placement strategy: {}", s)),
        }
    }
}

/// First gap, in address order, that can hold `dimension`
pub fn first_fit(gaps: &[Gap], dimension: u64) -> Option<Address> {
    gaps.iter().find(|g| g.fits(dimension)).map(|g| g.low)
}

/// Sufficient gap with the least leftover space
pub fn best_fit(gaps: &[Gap], dimension: u64) -> Option<Address> {
    let mut best: Option<&Gap> = None;

    for gap in gaps.iter().filter(|g| g.fits(dimension)) {
        // Strict comparison keeps the lower address on equal leftovers
        let better = match best {
            None => true,
            Some(b) => gap.len() - dimension < b.len() - dimension,
        };
        if better {
            best = Some(gap);
        }
    }

    best.map(|g| g.low)
}

/// Largest gap overall, provided it can hold `dimension`
pub fn worst_fit(gaps: &[Gap], dimension: u64) -> Option<Address> {
    let mut largest: Option<&Gap> = None;

    for gap in gaps {
        if largest.map_or(true, |l| gap.len() > l.len()) {
            largest = Some(gap);
        }
    }

    largest.filter(|g| g.fits(dimension)).map(|g| g.low)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gaps() -> Vec<Gap> {
        // lengths: 4, 2, 6, 2
        vec![
            Gap::new(0, 3),
            Gap::new(10, 11),
            Gap::new(20, 25),
            Gap::new(30, 31),
        ]
    }

    #[test]
    fn test_first_fit_takes_lowest_sufficient_gap() {
        assert_eq!(first_fit(&gaps(), 2), Some(0));
        assert_eq!(first_fit(&gaps(), 5), Some(20));
        assert_eq!(first_fit(&gaps(), 7), None);
    }

    #[test]
    fn test_best_fit_minimizes_leftover() {
        assert_eq!(best_fit(&gaps(), 4), Some(0));
        assert_eq!(best_fit(&gaps(), 5), Some(20));
        assert_eq!(best_fit(&gaps(), 3), Some(0));
    }

    #[test]
    fn test_best_fit_ties_resolve_to_lower_address() {
        assert_eq!(best_fit(&gaps(), 2), Some(10));
        assert_eq!(best_fit(&gaps(), 1), Some(10));
    }

    #[test]
    fn test_worst_fit_only_considers_largest_gap() {
        assert_eq!(worst_fit(&gaps(), 1), Some(20));
        assert_eq!(worst_fit(&gaps(), 6), Some(20));
        assert_eq!(worst_fit(&gaps(), 7), None);
    }

    #[test]
    fn test_worst_fit_ties_resolve_to_lower_address() {
        let gaps = vec![Gap::new(0, 2), Gap::new(5, 7)];
        assert_eq!(worst_fit(&gaps, 3), Some(0));
    }

    #[test]
    fn test_no_gaps_fails_for_every_strategy() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.choose(&[], 1), None);
        }
    }

    #[test]
    fn test_strategy_names_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>(), Ok(strategy));
        }
        assert_eq!("best-fit".parse::<Strategy>(), Ok(Strategy::BestFit));
        assert!("next-fit".parse::<Strategy>().is_err());
    }
}
