//! Raw betting-line records as served by the upstream provider.
//!
//! The provider speaks camelCase JSON; everything here serializes back out in
//! snake_case so the enriched output reads as one flat table.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result as CoreResult};

/// Season segment a batch of games belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonType {
    #[default]
    Regular,
    Postseason,
    Both,
    /// Anything else the provider invents (spring games, all-star games)
    #[serde(other)]
    Other,
}

impl SeasonType {
    /// Wire name used in provider query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonType::Regular => "regular",
            SeasonType::Postseason => "postseason",
            SeasonType::Both => "both",
            SeasonType::Other => "other",
        }
    }

    /// Value the provider accepts in a query string. `Other` only ever comes
    /// back from the provider and cannot be requested.
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            SeasonType::Other => None,
            known => Some(known.as_str()),
        }
    }
}

impl fmt::Display for SeasonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeasonType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regular" => Ok(SeasonType::Regular),
            "postseason" => Ok(SeasonType::Postseason),
            "both" => Ok(SeasonType::Both),
            other => Err(CoreError::config(
                "season_type",
                format!("unknown season type {:?}", other),
            )),
        }
    }
}

/// Which slate of games to pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyLinesRequest {
    pub year: u16,
    pub week: u8,
    pub season_type: SeasonType,
}

impl WeeklyLinesRequest {
    pub fn new(year: u16, week: u8) -> Self {
        Self {
            year,
            week,
            season_type: SeasonType::Regular,
        }
    }

    pub fn with_season_type(mut self, season_type: SeasonType) -> Self {
        self.season_type = season_type;
        self
    }
}

// ============================================================================
// Provider records
// ============================================================================

/// Game-level columns shared by every stage of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct GameInfo {
    pub id: i64,
    pub season: u16,
    pub week: u8,
    #[serde(default)]
    pub season_type: SeasonType,
    pub home_team: String,
    pub home_conference: Option<String>,
    #[serde(default)]
    pub home_score: Option<u16>,
    pub away_team: String,
    pub away_conference: Option<String>,
    #[serde(default)]
    pub away_score: Option<u16>,
}

/// One bookmaker's quote for a game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct GameLine {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub spread: Option<f64>,
    #[serde(default)]
    pub formatted_spread: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub spread_open: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub over_under: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub over_under_open: Option<f64>,
    #[serde(default, deserialize_with = "lenient_moneyline")]
    pub home_moneyline: Option<Moneyline>,
    #[serde(default, deserialize_with = "lenient_moneyline")]
    pub away_moneyline: Option<Moneyline>,
}

impl GameLine {
    /// Both moneylines as American odds, failing on a quote that is not one.
    pub fn moneyline_odds(&self) -> CoreResult<(Option<f64>, Option<f64>)> {
        let home = self.home_moneyline.as_ref().map(Moneyline::odds).transpose()?;
        let away = self.away_moneyline.as_ref().map(Moneyline::odds).transpose()?;
        Ok((home, away))
    }
}

/// A moneyline as quoted by a bookmaker.
///
/// Anything that is not a whole American-odds number (`"EVEN"`, `"N/A"`,
/// `-110.5`) is kept verbatim so the record can be judged on its own later
/// instead of failing the whole batch at decode time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Moneyline {
    American(i32),
    Malformed(String),
}

impl Moneyline {
    fn from_number(n: f64) -> Option<Self> {
        if n.is_nan() {
            return None;
        }
        if n.fract() == 0.0 && n >= i32::MIN as f64 && n <= i32::MAX as f64 {
            Some(Moneyline::American(n as i32))
        } else {
            Some(Moneyline::Malformed(n.to_string()))
        }
    }

    /// The quote as American odds for pricing.
    pub fn odds(&self) -> CoreResult<f64> {
        match self {
            Moneyline::American(odds) => Ok(f64::from(*odds)),
            Moneyline::Malformed(raw) => Err(CoreError::InvalidOdds { value: raw.clone() }),
        }
    }
}

impl From<i32> for Moneyline {
    fn from(odds: i32) -> Self {
        Moneyline::American(odds)
    }
}

/// A game with every provider's line nested under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct GameLines {
    #[serde(flatten)]
    pub game: GameInfo,
    pub start_date: String,
    #[serde(default)]
    pub lines: Vec<GameLine>,
}

/// Accepts a JSON number, a numeric string, a blank string or null.
///
/// Older provider payloads ship spreads as strings; a blank string is "no line".
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<f64>().map(Some).map_err(de::Error::custom)
        }
    }
}

/// Like [`lenient_f64`], but an unreadable quote becomes [`Moneyline::Malformed`]
/// rather than a decode error. `NaN` and blanks mean no market.
fn lenient_moneyline<'de, D>(deserializer: D) -> Result<Option<Moneyline>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        None => None,
        Some(NumberOrText::Number(n)) => Moneyline::from_number(n),
        Some(NumberOrText::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                match s.parse::<f64>() {
                    Ok(n) => Moneyline::from_number(n),
                    Err(_) => Some(Moneyline::Malformed(s.to_string())),
                }
            }
        }
    })
}
