//! Career-indexed Elo rating engine
//!
//! This module holds the rating recurrence itself: the parameter schedule
//! and the sequential engine that replays an observation sequence.

pub mod engine;
pub mod params;

// Re-export commonly used types
pub use engine::RatingEngine;
pub use params::{RatingParameters, FIT_BREAKPOINTS, INITIAL_GUESS};
