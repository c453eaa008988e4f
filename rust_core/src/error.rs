//! Error types for odds conversion, upstream fetches and the line pipeline.

use thiserror::Error;

/// Errors surfaced by this crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An odds quotation that is neither a signed price nor the "no market" sentinel.
    /// Carries the quote as received.
    #[error("invalid american odds: {value}")]
    InvalidOdds { value: String },

    /// The upstream data provider could not be reached or returned garbage.
    #[error("upstream fetch failed ({endpoint}): {reason}")]
    UpstreamFetch { endpoint: String, reason: String },

    /// Vig-free probability requested for a game with no market on either side.
    #[error("win probability undefined for game {game_id}: no moneyline on either side")]
    ProbabilityUndefined { game_id: i64 },

    #[error("invalid start timestamp for game {game_id}: {value:?}")]
    InvalidTimestamp { game_id: i64, value: String },

    #[error("invalid configuration {key}: {reason}")]
    Config { key: String, reason: String },
}

impl CoreError {
    pub(crate) fn upstream(endpoint: &str, reason: impl ToString) -> Self {
        CoreError::UpstreamFetch {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn config(key: &str, reason: impl ToString) -> Self {
        CoreError::Config {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::InvalidOdds {
            value: f64::INFINITY.to_string(),
        };
        assert_eq!(err.to_string(), "invalid american odds: inf");

        let err = CoreError::upstream("/lines", "status 401 Unauthorized");
        assert!(err.to_string().contains("/lines"));
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn test_probability_undefined_names_game() {
        let err = CoreError::ProbabilityUndefined { game_id: 401_520_180 };
        assert!(err.to_string().contains("401520180"));
    }
}
