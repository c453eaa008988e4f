//! CFB Lines Core - college football moneyline normalization and vig removal.
//!
//! This crate provides:
//! - American odds algebra (implied probability, decimal odds, parlays, vig)
//! - A record pipeline turning nested per-game betting lines into a flat,
//!   conference-filtered, time-sorted table of win probabilities
//! - An HTTP client for the upstream college football data provider
//! - A `LinesSource` seam for one-shot pull-and-transform runs
//!
//! ```
//! use cfb_lines_core::odds::{odds_to_probability, parlay_multiplier};
//!
//! assert_eq!(odds_to_probability(-150.0).unwrap(), 0.6);
//! assert_eq!(parlay_multiplier(&[200.0, 150.0]).unwrap(), 7);
//! ```

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod odds;
pub mod source;
pub mod transform;

pub use config::{CfbdConfig, TransformConfig};
pub use error::{CoreError, Result};
pub use models::{EnrichedGameLine, GameLines, SeasonType, Team, WeeklyLinesRequest};
pub use odds::{odds_to_decimal, odds_to_probability, parlay_multiplier};
pub use source::{fetch_weekly_lines, LinesSource};
pub use transform::transform_game_lines;
