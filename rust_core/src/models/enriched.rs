//! Records produced by each stage of the line pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lines::{GameInfo, GameLine};

/// A game with a single adopted line hoisted next to the game columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatGameLine {
    #[serde(flatten)]
    pub game: GameInfo,
    pub start_date: String,
    #[serde(flatten)]
    pub line: GameLine,
}

/// A flattened game whose start time has been parsed and corrected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledGameLine {
    #[serde(flatten)]
    pub game: GameInfo,
    pub start_date: DateTime<Utc>,
    pub end_time_est: DateTime<Utc>,
    #[serde(flatten)]
    pub line: GameLine,
}

/// Moneyline-implied probabilities for both sides of a game.
///
/// `home_win_prob`/`away_win_prob` carry `0.0` when a side has no market.
/// The vig-free fields are `None` when neither side has a market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinProbabilities {
    pub home_win_prob: f64,
    pub away_win_prob: f64,
    pub vig: f64,
    pub home_win_prob_no_vig: Option<f64>,
    pub away_win_prob_no_vig: Option<f64>,
    pub home_win_prob_pretty: String,
    pub away_win_prob_pretty: String,
    pub home_win_prob_no_vig_pretty: Option<String>,
    pub away_win_prob_no_vig_pretty: Option<String>,
}

impl WinProbabilities {
    /// True when at least one side had a moneyline to price.
    pub fn has_market(&self) -> bool {
        self.home_win_prob_no_vig.is_some()
    }
}

/// Final output row: game, adopted line and derived probabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedGameLine {
    #[serde(flatten)]
    pub game: GameInfo,
    pub start_date: DateTime<Utc>,
    pub end_time_est: DateTime<Utc>,
    #[serde(flatten)]
    pub line: GameLine,
    #[serde(flatten)]
    pub probabilities: WinProbabilities,
}

impl EnrichedGameLine {
    pub fn from_parts(scheduled: ScheduledGameLine, probabilities: WinProbabilities) -> Self {
        Self {
            game: scheduled.game,
            start_date: scheduled.start_date,
            end_time_est: scheduled.end_time_est,
            line: scheduled.line,
            probabilities,
        }
    }
}
