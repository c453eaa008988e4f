//! Line adoption: hoist one bookmaker's line up next to the game columns.

use crate::models::{FlatGameLine, GameLine, GameLines};

/// Rule for picking the one line a game keeps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LineSelection {
    /// Whatever line the provider listed first
    #[default]
    First,
    /// First provider in this list that quoted the game (case-insensitive),
    /// falling back to the first listed line
    PreferProviders(Vec<String>),
}

impl LineSelection {
    /// Parse a comma-separated provider preference list; empty means `First`.
    pub fn from_provider_list(raw: &str) -> Self {
        let providers: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        if providers.is_empty() {
            LineSelection::First
        } else {
            LineSelection::PreferProviders(providers)
        }
    }

    pub fn select<'a>(&self, lines: &'a [GameLine]) -> Option<&'a GameLine> {
        match self {
            LineSelection::First => lines.first(),
            LineSelection::PreferProviders(preferred) => preferred
                .iter()
                .find_map(|want| {
                    lines.iter().find(|line| {
                        line.provider
                            .as_deref()
                            .is_some_and(|p| p.trim().eq_ignore_ascii_case(want))
                    })
                })
                .or_else(|| lines.first()),
        }
    }
}

/// Adopt one line per game and drop the nested collection.
///
/// A game with no lines at all keeps an empty line (every field `None`); the
/// validity filter removes it later for lacking a spread.
pub fn flatten_lines(games: Vec<GameLines>, selection: &LineSelection) -> Vec<FlatGameLine> {
    games
        .into_iter()
        .map(|game| {
            let line = selection.select(&game.lines).cloned().unwrap_or_default();
            FlatGameLine {
                game: game.game,
                start_date: game.start_date,
                line,
            }
        })
        .collect()
}
