//! Moneyline -> win probability enrichment.
//!
//! Each game is priced from its own two moneylines only, so the batch is
//! fanned out over rayon's pool. Output order matches input order.

use std::str::FromStr;

use rayon::prelude::*;
use tracing::warn;

use crate::error::{CoreError, Result};
use crate::models::{EnrichedGameLine, ScheduledGameLine, WinProbabilities};
use crate::odds::{implied_probability, overround, remove_vig};

/// Decimal places kept on the raw implied probabilities
pub const PROBABILITY_DECIMALS: i32 = 7;

/// What to do with a game whose moneyline cannot be priced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OddsErrorPolicy {
    /// Drop that game, log it, keep the rest of the batch
    #[default]
    Skip,
    /// Fail the whole batch with the odds error
    Abort,
}

impl FromStr for OddsErrorPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" | "drop" => Ok(OddsErrorPolicy::Skip),
            "abort" | "fail" => Ok(OddsErrorPolicy::Abort),
            other => Err(CoreError::config(
                "odds_error_policy",
                format!("expected skip or abort, got {:?}", other),
            )),
        }
    }
}

/// Round to a fixed number of decimal places
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Display form of a probability, e.g. `0.523809` -> `"52.38%"`
pub fn format_percentage(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

/// Price one game from its home and away moneylines.
///
/// A missing side prices as `0.0`, the "no market" placeholder. With no
/// market on either side the vig-free fields are `None`.
pub fn win_probabilities(
    home_moneyline: Option<f64>,
    away_moneyline: Option<f64>,
) -> Result<WinProbabilities> {
    let home_win_prob = implied_probability(home_moneyline)?
        .map(|p| round_to(p, PROBABILITY_DECIMALS))
        .unwrap_or(0.0);
    let away_win_prob = implied_probability(away_moneyline)?
        .map(|p| round_to(p, PROBABILITY_DECIMALS))
        .unwrap_or(0.0);

    let no_vig = remove_vig(home_win_prob, away_win_prob);

    Ok(WinProbabilities {
        home_win_prob,
        away_win_prob,
        vig: overround(home_win_prob, away_win_prob),
        home_win_prob_no_vig: no_vig.map(|(home, _)| home),
        away_win_prob_no_vig: no_vig.map(|(_, away)| away),
        home_win_prob_pretty: format_percentage(home_win_prob),
        away_win_prob_pretty: format_percentage(away_win_prob),
        home_win_prob_no_vig_pretty: no_vig.map(|(home, _)| format_percentage(home)),
        away_win_prob_no_vig_pretty: no_vig.map(|(_, away)| format_percentage(away)),
    })
}

/// Attach win probabilities to every game.
pub fn derive_probabilities(
    records: Vec<ScheduledGameLine>,
    policy: OddsErrorPolicy,
) -> Result<Vec<EnrichedGameLine>> {
    let priced: Vec<(ScheduledGameLine, Result<WinProbabilities>)> = records
        .into_par_iter()
        .map(|record| {
            let probabilities = record
                .line
                .moneyline_odds()
                .and_then(|(home, away)| win_probabilities(home, away));
            (record, probabilities)
        })
        .collect();

    let mut enriched = Vec::with_capacity(priced.len());
    for (record, probabilities) in priced {
        match probabilities {
            Ok(probabilities) => enriched.push(EnrichedGameLine::from_parts(record, probabilities)),
            Err(e) if policy == OddsErrorPolicy::Skip => {
                warn!(
                    "Skipping game {} ({} vs {}): {}",
                    record.game.id, record.game.home_team, record.game.away_team, e
                );
            }
            Err(e) => return Err(e),
        }
    }

    Ok(enriched)
}

impl EnrichedGameLine {
    /// Vig-free (home, away) probabilities, or an error when neither side had a market.
    pub fn no_vig_probabilities(&self) -> Result<(f64, f64)> {
        match (
            self.probabilities.home_win_prob_no_vig,
            self.probabilities.away_win_prob_no_vig,
        ) {
            (Some(home), Some(away)) => Ok((home, away)),
            _ => Err(CoreError::ProbabilityUndefined {
                game_id: self.game.id,
            }),
        }
    }
}
