//! Configuration constants and environment loading.
//!
//! This module manages:
//! - Provider endpoint, credentials and request timeout
//! - Start-time correction and game-length estimate
//! - Which bookmaker's line a game adopts
//! - What happens to a game with a malformed moneyline

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::error::{CoreError, Result};
use crate::transform::{LineSelection, OddsErrorPolicy};

/// Default provider API root
pub const DEFAULT_CFBD_BASE_URL: &str = "https://api.collegefootballdata.com";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Provider start times run this many hours ahead of the schedule we report
pub const DEFAULT_START_OFFSET_HOURS: i64 = 7;

/// Rough wall-clock length of a college football game
pub const DEFAULT_GAME_DURATION_HOURS: i64 = 4;

/// Provider client configuration
#[derive(Clone)]
pub struct CfbdConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl fmt::Debug for CfbdConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CfbdConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl CfbdConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_CFBD_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load from environment (and `.env`), failing if no API key is set
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("CFBD_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| CoreError::config("CFBD_API_KEY", "not set"))?;

        let base_url = lookup("CFBD_BASE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_CFBD_BASE_URL.to_string());

        let timeout = Duration::from_secs(parse_or("CFBD_TIMEOUT_SECS", &lookup, DEFAULT_TIMEOUT_SECS));

        Ok(Self {
            api_key,
            base_url,
            timeout,
        })
    }
}

/// Knobs for the record transformer
#[derive(Debug, Clone, PartialEq)]
pub struct TransformConfig {
    pub start_offset: chrono::Duration,
    pub game_duration: chrono::Duration,
    pub line_selection: LineSelection,
    pub odds_error_policy: OddsErrorPolicy,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            start_offset: chrono::Duration::hours(DEFAULT_START_OFFSET_HOURS),
            game_duration: chrono::Duration::hours(DEFAULT_GAME_DURATION_HOURS),
            line_selection: LineSelection::First,
            odds_error_policy: OddsErrorPolicy::Skip,
        }
    }
}

impl TransformConfig {
    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let start_offset_hours =
            parse_or("CFB_START_OFFSET_HOURS", &lookup, DEFAULT_START_OFFSET_HOURS);
        let game_duration_hours =
            parse_or("CFB_GAME_DURATION_HOURS", &lookup, DEFAULT_GAME_DURATION_HOURS);

        let line_selection = lookup("CFB_LINE_PROVIDERS")
            .map(|v| LineSelection::from_provider_list(&v))
            .unwrap_or(LineSelection::First);

        let odds_error_policy = parse_or("CFB_ODDS_ERROR_POLICY", &lookup, OddsErrorPolicy::Skip);

        Self {
            start_offset: chrono::Duration::hours(start_offset_hours),
            game_duration: chrono::Duration::hours(game_duration_hours),
            line_selection,
            odds_error_policy,
        }
    }
}

fn parse_or<T>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> T
where
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using default", key, raw);
            default
        }),
        None => default,
    }
}
