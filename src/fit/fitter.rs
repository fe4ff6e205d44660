//! Maximum-likelihood calibration of the rating parameters

use crate::fit::minimizer::{BfgsMinimizer, Minimizer};
use crate::rating::engine::RatingEngine;
use crate::rating::params::{RatingParameters, FIT_BREAKPOINTS, INITIAL_GUESS};
use crate::types::{Observation, OutputMode, RatingOutput};
use tracing::{debug, warn};

/// Fits the K-factor steps and bonus weight to an observation sequence
///
/// The schedule breakpoints are held fixed; the optimizer searches over the
/// step sizes plus the bonus weight, minimizing the negative log-likelihood
/// of the observed outcomes. Each objective evaluation is one full replay
/// of the sequence. Evaluations are independent and side-effect-free, but
/// every individual replay is strictly sequential.
pub struct ParameterFitter<M: Minimizer = BfgsMinimizer> {
    breakpoints: Vec<u32>,
    initial_guess: Vec<f64>,
    minimizer: M,
}

impl Default for ParameterFitter {
    fn default() -> Self {
        Self::new(BfgsMinimizer::default())
    }
}

impl<M: Minimizer> ParameterFitter<M> {
    /// Create a fitter over the hardcoded five-bucket schedule
    pub fn new(minimizer: M) -> Self {
        Self {
            breakpoints: FIT_BREAKPOINTS.to_vec(),
            initial_guess: INITIAL_GUESS.to_vec(),
            minimizer,
        }
    }

    /// Fitted parameters for an observation sequence
    pub fn fit_params(&self, observations: &[Observation]) -> crate::error::Result<RatingParameters> {
        let mut objective = |x: &[f64]| {
            let engine = RatingEngine::new(self.params_from_vector(x))?;
            engine.log_loss(observations)
        };

        let outcome = self.minimizer.minimize(&mut objective, &self.initial_guess)?;
        if outcome.converged {
            debug!(
                iterations = outcome.iterations,
                log_loss = outcome.objective,
                "parameter fit converged"
            );
        } else {
            warn!(
                iterations = outcome.iterations,
                gradient_norm = outcome.gradient_norm,
                "parameter fit stopped before reaching tolerance"
            );
        }

        Ok(self.params_from_vector(&outcome.x))
    }

    /// Fit the parameters, then run one pass in the requested output mode
    pub fn fit(
        &self,
        observations: &[Observation],
        mode: OutputMode,
    ) -> crate::error::Result<RatingOutput> {
        let params = self.fit_params(observations)?;
        RatingEngine::new(params)?.evaluate(observations, mode)
    }

    /// Unpack an optimizer vector: leading step sizes, trailing bonus weight
    fn params_from_vector(&self, x: &[f64]) -> RatingParameters {
        RatingParameters {
            breakpoints: self.breakpoints.clone(),
            steps: x[..x.len() - 1].to_vec(),
            bonus_weight: x[x.len() - 1],
        }
    }
}
