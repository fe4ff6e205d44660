//! Unconstrained numerical minimization
//!
//! The parameter fitter treats the minimizer as an injected capability
//! behind the [`Minimizer`] trait. The default implementation is BFGS with
//! central-difference gradients and Armijo backtracking, which is enough
//! for the low-dimensional smooth objectives this crate produces.

use nalgebra::{DMatrix, DVector};

/// Curvature threshold below which the inverse-Hessian update is skipped
const CURVATURE_FLOOR: f64 = 1e-10;

/// Armijo sufficient-decrease coefficient for the backtracking line search
const ARMIJO_C1: f64 = 1e-4;

/// Relative objective change treated as a converged stall
const OBJECTIVE_STALL: f64 = 1e-9;

/// Result of a minimization run
#[derive(Debug, Clone)]
pub struct MinimizeOutcome {
    /// Best parameter vector found
    pub x: Vec<f64>,
    /// Objective value at `x`
    pub objective: f64,
    /// Number of iterations performed
    pub iterations: usize,
    /// Whether the stopping tolerance was reached
    pub converged: bool,
    /// Gradient norm at termination
    pub gradient_norm: f64,
}

/// Trait for derivative-based unconstrained minimization
///
/// The objective is fallible so errors raised inside an evaluation (for
/// example a rating pass that exhausts its schedule) propagate out of the
/// optimization loop instead of being papered over.
pub trait Minimizer {
    fn minimize(
        &self,
        objective: &mut dyn FnMut(&[f64]) -> crate::error::Result<f64>,
        x0: &[f64],
    ) -> crate::error::Result<MinimizeOutcome>;
}

/// BFGS quasi-Newton minimizer with numerical gradients
#[derive(Debug, Clone)]
pub struct BfgsMinimizer {
    /// Iteration cap
    pub max_iterations: usize,
    /// Stop once the gradient norm falls below this
    pub gradient_tolerance: f64,
    /// Relative step for central-difference gradients
    pub gradient_step: f64,
}

impl Default for BfgsMinimizer {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            gradient_tolerance: 1e-5,
            gradient_step: 1e-6,
        }
    }
}

impl BfgsMinimizer {
    /// Create a minimizer with an explicit iteration cap and tolerance
    pub fn new(max_iterations: usize, gradient_tolerance: f64) -> Self {
        Self {
            max_iterations,
            gradient_tolerance,
            ..Self::default()
        }
    }

    fn gradient(
        &self,
        objective: &mut dyn FnMut(&[f64]) -> crate::error::Result<f64>,
        x: &DVector<f64>,
    ) -> crate::error::Result<DVector<f64>> {
        let mut grad = DVector::zeros(x.len());
        let mut probe = x.clone();

        for i in 0..x.len() {
            let h = self.gradient_step * x[i].abs().max(1.0);
            probe[i] = x[i] + h;
            let forward = objective(probe.as_slice())?;
            probe[i] = x[i] - h;
            let backward = objective(probe.as_slice())?;
            probe[i] = x[i];
            grad[i] = (forward - backward) / (2.0 * h);
        }

        Ok(grad)
    }
}

impl Minimizer for BfgsMinimizer {
    fn minimize(
        &self,
        objective: &mut dyn FnMut(&[f64]) -> crate::error::Result<f64>,
        x0: &[f64],
    ) -> crate::error::Result<MinimizeOutcome> {
        let n = x0.len();
        let mut x = DVector::from_column_slice(x0);
        let mut fx = objective(x.as_slice())?;
        let mut grad = self.gradient(&mut *objective, &x)?;
        let mut h_inv = DMatrix::<f64>::identity(n, n);

        let mut iterations = 0;
        let mut converged = grad.norm() < self.gradient_tolerance;

        while !converged && iterations < self.max_iterations {
            iterations += 1;

            let mut direction = -(&h_inv * &grad);
            if direction.dot(&grad) >= 0.0 {
                // Curvature estimate has gone bad; restart from steepest descent.
                h_inv = DMatrix::identity(n, n);
                direction = -grad.clone();
            }

            // Backtracking line search with the Armijo condition.
            let slope = grad.dot(&direction);
            let mut step = 1.0;
            let mut accepted = None;
            for _ in 0..40 {
                let candidate = &x + &direction * step;
                let f_candidate = objective(candidate.as_slice())?;
                if f_candidate <= fx + ARMIJO_C1 * step * slope {
                    accepted = Some((candidate, f_candidate));
                    break;
                }
                step *= 0.5;
            }

            let Some((x_new, f_new)) = accepted else {
                // No acceptable step along this direction; give up here.
                break;
            };

            let grad_new = self.gradient(&mut *objective, &x_new)?;
            let s = &x_new - &x;
            let y = &grad_new - &grad;
            let curvature = s.dot(&y);
            if curvature > CURVATURE_FLOOR {
                let rho = 1.0 / curvature;
                let identity = DMatrix::<f64>::identity(n, n);
                let left = &identity - (&s * y.transpose()) * rho;
                let right = &identity - (&y * s.transpose()) * rho;
                h_inv = (&left * &h_inv) * &right + (&s * s.transpose()) * rho;
            }

            let stalled = (fx - f_new).abs() <= OBJECTIVE_STALL * (1.0 + fx.abs());
            x = x_new;
            fx = f_new;
            grad = grad_new;
            converged = grad.norm() < self.gradient_tolerance || stalled;
        }

        Ok(MinimizeOutcome {
            x: x.as_slice().to_vec(),
            objective: fx,
            iterations,
            converged,
            gradient_norm: grad.norm(),
        })
    }
}
