//! Parameter fitting: likelihood objective and numerical minimizer
//!
//! This module wraps the rating engine's log-loss mode in a smooth
//! objective and drives a derivative-based minimizer over the K-factor
//! steps and bonus weight.

pub mod fitter;
pub mod minimizer;

// Re-export commonly used types
pub use fitter::ParameterFitter;
pub use minimizer::{BfgsMinimizer, MinimizeOutcome, Minimizer};

use crate::rating::engine::RatingEngine;
use crate::rating::params::RatingParameters;
use crate::types::{CompetitorId, Observation, OutputMode, RatingOutput};

/// Rate a sequence of pairwise comparisons
///
/// Zips the parallel input sequences, then either replays them under the
/// supplied parameters or fits the default five-bucket schedule to the
/// data first. With explicit `params` this is a pure deterministic
/// function of its inputs; without them the result also depends on the
/// optimizer's convergence path.
///
/// # Arguments
/// * `ids` - ordered (left, right) competitor pairs, in play order
/// * `outcomes` - one score per pair; 1.0 = left win, 0.0 = right win
/// * `bonus_flags` - per-event bonus accrual flags; `None` means all-false
/// * `mode` - shape of the result
/// * `params` - explicit parameters; supplying them skips optimization
pub fn fit_or_evaluate(
    ids: &[(CompetitorId, CompetitorId)],
    outcomes: &[f64],
    bonus_flags: Option<&[bool]>,
    mode: OutputMode,
    params: Option<RatingParameters>,
) -> crate::error::Result<RatingOutput> {
    let observations = Observation::from_sequences(ids, outcomes, bonus_flags)?;

    match params {
        Some(params) => RatingEngine::new(params)?.evaluate(&observations, mode),
        None => ParameterFitter::default().fit(&observations, mode),
    }
}
