//! Rating parameters: the K-factor schedule and bonus weight

use crate::error::RatingError;
use serde::{Deserialize, Serialize};

/// Free parameters of the rating recurrence
///
/// `breakpoints` and `steps` form a piecewise-constant K-factor schedule
/// indexed by career length and shared across all competitors: a competitor
/// whose (post-update) match count falls below `breakpoints[i]` but not
/// below any earlier breakpoint uses `steps[i]`. `bonus_weight` scales the
/// accumulated bonus term when computing effective ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingParameters {
    pub breakpoints: Vec<u32>,
    pub steps: Vec<f64>,
    pub bonus_weight: f64,
}

/// Cumulative-match-count thresholds of the hardcoded fit schedule
pub const FIT_BREAKPOINTS: [u32; 5] = [0, 5, 10, 15, 20];

/// Starting point for the optimizer: five equal K-steps plus a bonus weight
pub const INITIAL_GUESS: [f64; 6] = [170.0, 170.0, 170.0, 170.0, 170.0, 50.0];

impl Default for RatingParameters {
    fn default() -> Self {
        Self {
            breakpoints: FIT_BREAKPOINTS.to_vec(),
            steps: INITIAL_GUESS[..5].to_vec(),
            bonus_weight: INITIAL_GUESS[5],
        }
    }
}

impl RatingParameters {
    /// Create parameters, validating the schedule shape
    pub fn new(breakpoints: Vec<u32>, steps: Vec<f64>, bonus_weight: f64) -> crate::error::Result<Self> {
        let params = Self {
            breakpoints,
            steps,
            bonus_weight,
        };
        params.validate()?;
        Ok(params)
    }

    /// Validate the breakpoint/step pairing
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.breakpoints.len() != self.steps.len() {
            return Err(RatingError::ParameterShape {
                breakpoints: self.breakpoints.len(),
                steps: self.steps.len(),
            }
            .into());
        }
        Ok(())
    }

    /// K-factor step for a competitor with the given match count
    ///
    /// Selects the step paired with the first breakpoint strictly greater
    /// than `matches_played`. A count that exceeds every breakpoint means
    /// the schedule is too short for the data's longest career.
    pub fn step_for(&self, matches_played: u32) -> crate::error::Result<f64> {
        for (breakpoint, step) in self.breakpoints.iter().zip(&self.steps) {
            if *breakpoint > matches_played {
                return Ok(*step);
            }
        }
        Err(RatingError::ScheduleExhausted { matches_played }.into())
    }
}
