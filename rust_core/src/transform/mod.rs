//! Record transformer: raw provider games -> flat, filtered, priced table.
//!
//! Each stage takes a whole collection and returns a new one, so every step
//! can be exercised on its own:
//! 1. [`flatten_lines`] - adopt one line per game
//! 2. [`filter_by_conference`] - keep games touching a qualifying conference
//! 3. [`normalize_start_times`] - parse, shift and estimate the end time
//! 4. [`sort_by_start`] - earliest game first
//! 5. [`derive_probabilities`] - implied, vig and vig-free probabilities
//! 6. [`retain_valid_lines`] - drop games without a spread

use tracing::{debug, info};

use crate::config::TransformConfig;
use crate::error::Result;
use crate::models::{EnrichedGameLine, GameLines, Team};

pub mod filter;
pub mod flatten;
pub mod probabilities;
pub mod schedule;

pub use filter::{filter_by_conference, qualifying_conferences, retain_valid_lines};
pub use flatten::{flatten_lines, LineSelection};
pub use probabilities::{
    derive_probabilities, format_percentage, round_to, win_probabilities, OddsErrorPolicy,
    PROBABILITY_DECIMALS,
};
pub use schedule::{normalize_start_times, parse_start_date, sort_by_start};

/// Run the full pipeline over one batch.
///
/// `teams` is only used to build the qualifying conference set. Timestamp
/// failures always fail the batch; odds failures follow
/// `config.odds_error_policy`.
pub fn transform_game_lines(
    games: Vec<GameLines>,
    teams: &[Team],
    config: &TransformConfig,
) -> Result<Vec<EnrichedGameLine>> {
    let received = games.len();

    let flat = flatten_lines(games, &config.line_selection);

    let conferences = qualifying_conferences(teams);
    let flat = filter_by_conference(flat, &conferences);
    debug!(
        "Conference filter kept {}/{} games ({} qualifying conferences)",
        flat.len(),
        received,
        conferences.len()
    );

    let scheduled = normalize_start_times(flat, config.start_offset, config.game_duration)?;
    let scheduled = sort_by_start(scheduled);

    let priced = derive_probabilities(scheduled, config.odds_error_policy)?;
    let priced_count = priced.len();

    let valid = retain_valid_lines(priced);
    debug!("Dropped {} games without a spread", priced_count - valid.len());

    info!("Transformed {} raw games into {} priced lines", received, valid.len());
    Ok(valid)
}
