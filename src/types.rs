//! Common types used throughout the rating library

use crate::error::RatingError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unique identifier for competitors
pub type CompetitorId = String;

/// A single pairwise comparison event
///
/// `outcome` is 1.0 for a left win and 0.0 for a right win. Fractional
/// values in between are tolerated (the rating update still applies) but
/// only clean 0/1 outcomes drive bonus accrual and the likelihood sum.
/// `bonus_flag` marks whether this event counts toward bonus accrual
/// (e.g. an away-game indicator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub left: CompetitorId,
    pub right: CompetitorId,
    pub outcome: f64,
    pub bonus_flag: bool,
}

impl Observation {
    /// Zip parallel id/outcome/bonus-flag sequences into observations
    ///
    /// A missing `bonus_flags` sequence defaults to all-false, in which
    /// case no bonus accrual is possible. Unequal lengths are a fatal
    /// input error, raised before any processing.
    pub fn from_sequences(
        ids: &[(CompetitorId, CompetitorId)],
        outcomes: &[f64],
        bonus_flags: Option<&[bool]>,
    ) -> crate::error::Result<Vec<Observation>> {
        let flag_len = bonus_flags.map_or(ids.len(), <[bool]>::len);
        if ids.len() != outcomes.len() || ids.len() != flag_len {
            return Err(RatingError::InputShape {
                ids: ids.len(),
                outcomes: outcomes.len(),
                bonus_flags: flag_len,
            }
            .into());
        }

        Ok(ids
            .iter()
            .zip(outcomes)
            .enumerate()
            .map(|(i, ((left, right), &outcome))| Observation {
                left: left.clone(),
                right: right.clone(),
                outcome,
                bonus_flag: bonus_flags.map_or(false, |flags| flags[i]),
            })
            .collect())
    }
}

/// Mutable per-competitor record, created lazily on first appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorState {
    pub rating: f64,
    pub matches_played: u32,
    pub bonus: f64,
}

impl Default for CompetitorState {
    fn default() -> Self {
        Self {
            rating: 1000.0,
            matches_played: 0,
            bonus: 0.0,
        }
    }
}

impl CompetitorState {
    /// Rating with the weighted bonus term subtracted
    pub fn effective_rating(&self, bonus_weight: f64) -> f64 {
        self.rating - bonus_weight * self.bonus
    }
}

/// What a rating pass should produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputMode {
    /// Full competitor-state table
    Ratings,
    /// Pre-update effective-rating pairs, one per observation
    Differentials,
    /// Negative log-likelihood of the observed outcomes
    LogLoss,
}

impl FromStr for OutputMode {
    type Err = RatingError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ratings" => Ok(OutputMode::Ratings),
            "differentials" => Ok(OutputMode::Differentials),
            "log_loss" => Ok(OutputMode::LogLoss),
            other => Err(RatingError::InvalidMode {
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputMode::Ratings => write!(f, "ratings"),
            OutputMode::Differentials => write!(f, "differentials"),
            OutputMode::LogLoss => write!(f, "log_loss"),
        }
    }
}

/// Result of a rating pass, shaped by the requested [`OutputMode`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RatingOutput {
    Ratings(std::collections::HashMap<CompetitorId, CompetitorState>),
    Differentials(Vec<(f64, f64)>),
    LogLoss(f64),
}

impl RatingOutput {
    /// Competitor-state table, if this output carries one
    pub fn as_ratings(&self) -> Option<&std::collections::HashMap<CompetitorId, CompetitorState>> {
        match self {
            RatingOutput::Ratings(table) => Some(table),
            _ => None,
        }
    }

    /// Effective-rating pairs, if this output carries them
    pub fn as_differentials(&self) -> Option<&[(f64, f64)]> {
        match self {
            RatingOutput::Differentials(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// Negative log-likelihood, if this output carries one
    pub fn as_log_loss(&self) -> Option<f64> {
        match self {
            RatingOutput::LogLoss(value) => Some(*value),
            _ => None,
        }
    }
}
