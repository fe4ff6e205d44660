//! Sequential Elo rating engine
//!
//! One strictly ordered left-to-right pass over the observation sequence.
//! Order is semantically load-bearing: every update depends on the ratings
//! produced by the updates before it, so a pass must never be reordered or
//! parallelized. Each pass builds a fresh table; no state crosses calls.

use crate::rating::params::RatingParameters;
use crate::types::{CompetitorId, CompetitorState, Observation, OutputMode, RatingOutput};
use std::collections::HashMap;

/// Rating-difference scale of the logistic curve, in rating points
const RATING_SCALE: f64 = 400.0;

/// Elo win-probability curve: `1 / (1 + 10^(diff / 400))`
///
/// `diff` is the right side's effective rating minus the left side's, so
/// the result is the left side's expected score.
fn logistic(diff: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf(diff / RATING_SCALE))
}

/// Everything a single pass produces; the requested mode picks one field
struct Replay {
    table: HashMap<CompetitorId, CompetitorState>,
    differentials: Vec<(f64, f64)>,
    log_loss: f64,
}

/// Applies the career-indexed Elo recurrence over an observation sequence
#[derive(Debug, Clone)]
pub struct RatingEngine {
    params: RatingParameters,
}

impl RatingEngine {
    /// Create an engine, validating the parameter shape up front
    pub fn new(params: RatingParameters) -> crate::error::Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Parameters this engine applies
    pub fn params(&self) -> &RatingParameters {
        &self.params
    }

    /// Run one full pass and shape the result by `mode`
    pub fn evaluate(
        &self,
        observations: &[Observation],
        mode: OutputMode,
    ) -> crate::error::Result<RatingOutput> {
        let replay = self.replay(observations, mode == OutputMode::Differentials)?;

        Ok(match mode {
            OutputMode::Ratings => RatingOutput::Ratings(replay.table),
            OutputMode::Differentials => RatingOutput::Differentials(replay.differentials),
            OutputMode::LogLoss => RatingOutput::LogLoss(replay.log_loss),
        })
    }

    /// Negative log-likelihood of the observed outcomes under `params`
    ///
    /// This is the objective the parameter fitter minimizes; it avoids the
    /// mode dispatch of [`evaluate`](Self::evaluate).
    pub fn log_loss(&self, observations: &[Observation]) -> crate::error::Result<f64> {
        Ok(self.replay(observations, false)?.log_loss)
    }

    fn replay(
        &self,
        observations: &[Observation],
        record_differentials: bool,
    ) -> crate::error::Result<Replay> {
        let mut table: HashMap<CompetitorId, CompetitorState> = HashMap::new();
        let mut differentials = Vec::new();
        let mut log_likelihood = 0.0;
        let bonus_weight = self.params.bonus_weight;

        for obs in observations {
            let left_eff = state_mut(&mut table, &obs.left).effective_rating(bonus_weight);
            let right_eff = state_mut(&mut table, &obs.right).effective_rating(bonus_weight);

            let expected = logistic(right_eff - left_eff);

            if record_differentials {
                differentials.push((left_eff, right_eff));
            }

            state_mut(&mut table, &obs.left).matches_played += 1;
            state_mut(&mut table, &obs.right).matches_played += 1;

            // K selection is career-indexed: the updated count picks the bucket.
            let k_left = self
                .params
                .step_for(state_mut(&mut table, &obs.left).matches_played)?;
            let k_right = self
                .params
                .step_for(state_mut(&mut table, &obs.right).matches_played)?;

            let delta = obs.outcome - expected;
            state_mut(&mut table, &obs.left).rating += k_left * delta;
            state_mut(&mut table, &obs.right).rating -= k_right * delta;

            // Only clean wins move the bonus term or the likelihood sum.
            // Fractional outcomes skip both branches; the rating update
            // above still applies.
            if obs.outcome == 1.0 {
                log_likelihood += expected.ln();
                state_mut(&mut table, &obs.left).bonus = 0.0;
                if obs.bonus_flag {
                    state_mut(&mut table, &obs.right).bonus += 1.0;
                }
            } else if obs.outcome == 0.0 {
                log_likelihood += (1.0 - expected).ln();
                state_mut(&mut table, &obs.right).bonus = 0.0;
                if obs.bonus_flag {
                    state_mut(&mut table, &obs.left).bonus += 1.0;
                }
            }
        }

        Ok(Replay {
            table,
            differentials,
            log_loss: -log_likelihood,
        })
    }
}

/// Look up a competitor's state, creating it on first appearance
fn state_mut<'a>(
    table: &'a mut HashMap<CompetitorId, CompetitorState>,
    id: &CompetitorId,
) -> &'a mut CompetitorState {
    table.entry(id.clone()).or_default()
}
