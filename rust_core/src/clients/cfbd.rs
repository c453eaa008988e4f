use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::CfbdConfig;
use crate::error::{CoreError, Result};
use crate::models::{GameLines, Team, WeeklyLinesRequest};

const LINES_PATH: &str = "/lines";
const FBS_TEAMS_PATH: &str = "/teams/fbs";

/// Longest slice of an error body echoed back in an error message
const MAX_ERROR_BODY: usize = 200;

/// Client for the college football data provider's betting and team endpoints.
///
/// No retries: a failed call fails the caller's invocation.
#[derive(Clone)]
pub struct CfbdClient {
    client: Client,
    config: CfbdConfig,
}

impl std::fmt::Debug for CfbdClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CfbdClient")
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

impl CfbdClient {
    pub fn new(config: CfbdConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CoreError::upstream("client", e))?;

        Ok(Self { client, config })
    }

    /// Build from `CFBD_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(CfbdConfig::from_env()?)
    }

    /// Betting lines for every game in one week
    pub async fn get_lines(&self, request: &WeeklyLinesRequest) -> Result<Vec<GameLines>> {
        let season_type = request.season_type.query_value().ok_or_else(|| {
            CoreError::config("season_type", "only regular, postseason or both can be requested")
        })?;
        let query = [
            ("year", request.year.to_string()),
            ("week", request.week.to_string()),
            ("seasonType", season_type.to_string()),
        ];
        let games: Vec<GameLines> = self.get_json(LINES_PATH, &query).await?;
        info!(
            "Fetched lines for {} games ({} week {}, {})",
            games.len(),
            request.year,
            request.week,
            request.season_type
        );
        Ok(games)
    }

    /// Every FBS team, optionally as of a given season
    pub async fn get_fbs_teams(&self, year: Option<u16>) -> Result<Vec<Team>> {
        let query: Vec<(&str, String)> = year
            .map(|y| vec![("year", y.to_string())])
            .unwrap_or_default();
        let teams: Vec<Team> = self.get_json(FBS_TEAMS_PATH, &query).await?;
        info!("Fetched {} FBS teams", teams.len());
        Ok(teams)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.config.base_url, path);
        debug!("GET {} {:?}", url, query);

        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .header(ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| CoreError::upstream(path, e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| CoreError::upstream(path, e))?;

        if !status.is_success() {
            return Err(CoreError::upstream(
                path,
                format!("status {}: {}", status, truncate(&body, MAX_ERROR_BODY)),
            ));
        }

        serde_json::from_str(&body)
            .map_err(|e| CoreError::upstream(path, format!("undecodable body: {}", e)))
    }
}

fn truncate(body: &str, max_chars: usize) -> &str {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeasonType;
    use std::time::Duration;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Hawai'i Rainbow Warriors", 6), "Hawai'");
        assert_eq!(truncate("ñññ", 2), "ññ");
    }

    #[test]
    fn test_debug_omits_credentials() {
        let client = CfbdClient::new(CfbdConfig::new("top-secret")).unwrap();
        let rendered = format!("{:?}", client);
        assert!(rendered.contains("collegefootballdata"));
        assert!(!rendered.contains("top-secret"));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_upstream_error() {
        let config = CfbdConfig {
            api_key: "key".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_secs(2),
        };
        let client = CfbdClient::new(config).unwrap();

        let err = client
            .get_lines(&WeeklyLinesRequest::new(2023, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::UpstreamFetch { ref endpoint, .. } if endpoint == "/lines"));

        let err = client.get_fbs_teams(Some(2023)).await.unwrap_err();
        assert!(matches!(err, CoreError::UpstreamFetch { ref endpoint, .. } if endpoint == "/teams/fbs"));
    }

    #[tokio::test]
    async fn test_decode_only_season_type_not_requested() {
        let config = CfbdConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            ..CfbdConfig::new("key")
        };
        let client = CfbdClient::new(config).unwrap();
        let request = WeeklyLinesRequest::new(2023, 1).with_season_type(SeasonType::Other);

        let err = client.get_lines(&request).await.unwrap_err();
        assert!(matches!(err, CoreError::Config { ref key, .. } if key == "season_type"));
    }
}
