//! Error types for the rating library
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate. Every error is fatal: nothing is retried or recovered
//! internally, and there is no partial-result behavior.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("input sequences have unequal lengths: {ids} ids, {outcomes} outcomes, {bonus_flags} bonus flags")]
    InputShape {
        ids: usize,
        outcomes: usize,
        bonus_flags: usize,
    },

    #[error("unknown output mode '{value}': expected one of 'ratings', 'differentials', 'log_loss'")]
    InvalidMode { value: String },

    #[error("K-factor schedule has {breakpoints} breakpoints but {steps} steps")]
    ParameterShape { breakpoints: usize, steps: usize },

    #[error("K-factor schedule exhausted: no breakpoint exceeds {matches_played} matches played")]
    ScheduleExhausted { matches_played: u32 },
}
