//! Elo Ladder - career-indexed Elo ratings for pairwise comparison data
//!
//! This crate replays an ordered sequence of pairwise comparison outcomes
//! through an Elo-style update rule whose K-factor depends on how many
//! matches a competitor has played, with a bonus term that accumulates over
//! flagged losses and resets on a win. The free parameters (K-factor steps
//! and bonus weight) can be calibrated by maximum likelihood.

pub mod error;
pub mod fit;
pub mod rating;
pub mod types;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use fit::{fit_or_evaluate, BfgsMinimizer, Minimizer, ParameterFitter};
pub use rating::{RatingEngine, RatingParameters};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
