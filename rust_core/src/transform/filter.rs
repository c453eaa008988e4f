//! Record filters: conference membership and line validity.

use std::collections::HashSet;

use crate::models::{GameRecord, LineRecord, Team};

/// Conferences any listed team plays in. Teams without a conference are ignored.
pub fn qualifying_conferences(teams: &[Team]) -> HashSet<String> {
    teams
        .iter()
        .filter_map(|team| team.conference.clone())
        .collect()
}

/// Keep games where the home or away side plays in a qualifying conference.
///
/// Works on any stage's records, so it can run before or after flattening.
pub fn filter_by_conference<T: GameRecord>(
    records: Vec<T>,
    conferences: &HashSet<String>,
) -> Vec<T> {
    let qualifies = |conference: &Option<String>| {
        conference
            .as_ref()
            .is_some_and(|name| conferences.contains(name))
    };

    records
        .into_iter()
        .filter(|record| {
            let game = record.game();
            qualifies(&game.home_conference) || qualifies(&game.away_conference)
        })
        .collect()
}

/// Drop records without a usable spread.
///
/// A blank provider name is cleared to `None` first. A spread of `0.0` is a
/// pick'em line and is kept.
pub fn retain_valid_lines<T: LineRecord>(records: Vec<T>) -> Vec<T> {
    records
        .into_iter()
        .filter_map(|mut record| {
            let line = record.line_mut();
            if line.provider.as_deref().is_some_and(|p| p.trim().is_empty()) {
                line.provider = None;
            }
            let spread = line.spread;
            match spread {
                Some(spread) if !spread.is_nan() => Some(record),
                _ => None,
            }
        })
        .collect()
}
