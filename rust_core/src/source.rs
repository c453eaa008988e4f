//! Where raw lines come from, and the one-shot pull-and-transform.
//!
//! [`LinesSource`] is the seam between the provider and the transformer: the
//! HTTP client implements it, tests plug in canned batches.

use async_trait::async_trait;
use tracing::info;

use crate::clients::CfbdClient;
use crate::config::TransformConfig;
use crate::error::Result;
use crate::models::{EnrichedGameLine, GameLines, Team, WeeklyLinesRequest};
use crate::transform::transform_game_lines;

/// Supplier of raw betting lines and the team directory
#[async_trait]
pub trait LinesSource: Send + Sync {
    /// Every game with its nested lines for the requested week
    async fn fetch_lines(&self, request: &WeeklyLinesRequest) -> Result<Vec<GameLines>>;

    /// Teams whose conferences define which games are kept
    async fn fetch_teams(&self, year: u16) -> Result<Vec<Team>>;

    /// Source name for logging
    fn source_name(&self) -> &str;
}

#[async_trait]
impl LinesSource for CfbdClient {
    async fn fetch_lines(&self, request: &WeeklyLinesRequest) -> Result<Vec<GameLines>> {
        self.get_lines(request).await
    }

    async fn fetch_teams(&self, year: u16) -> Result<Vec<Team>> {
        self.get_fbs_teams(Some(year)).await
    }

    fn source_name(&self) -> &str {
        "cfbd"
    }
}

/// Pull one week of lines plus the team directory and run the pipeline.
///
/// Either fetch failing fails the call; nothing is retried or resumed.
pub async fn fetch_weekly_lines<S>(
    source: &S,
    request: &WeeklyLinesRequest,
    config: &TransformConfig,
) -> Result<Vec<EnrichedGameLine>>
where
    S: LinesSource + ?Sized,
{
    let games = source.fetch_lines(request).await?;
    let teams = source.fetch_teams(request.year).await?;
    info!(
        "{}: {} games, {} teams for {} week {}",
        source.source_name(),
        games.len(),
        teams.len(),
        request.year,
        request.week
    );

    transform_game_lines(games, &teams, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::models::SeasonType;
    use crate::transform::test_support::{game_lines, line};
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Default)]
    struct StubSource {
        games: Vec<GameLines>,
        teams: Vec<Team>,
        fail_teams: bool,
        team_calls: AtomicU32,
    }

    #[async_trait]
    impl LinesSource for StubSource {
        async fn fetch_lines(&self, request: &WeeklyLinesRequest) -> Result<Vec<GameLines>> {
            if request.season_type == SeasonType::Postseason {
                return Err(CoreError::UpstreamFetch {
                    endpoint: "/lines".to_string(),
                    reason: "status 503 Service Unavailable".to_string(),
                });
            }
            Ok(self.games.clone())
        }

        async fn fetch_teams(&self, _year: u16) -> Result<Vec<Team>> {
            self.team_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_teams {
                return Err(CoreError::UpstreamFetch {
                    endpoint: "/teams/fbs".to_string(),
                    reason: "timed out".to_string(),
                });
            }
            Ok(self.teams.clone())
        }

        fn source_name(&self) -> &str {
            "stub"
        }
    }

    fn stub() -> StubSource {
        StubSource {
            games: vec![
                game_lines(1, ("SEC", "SEC"), vec![line("consensus", Some(-6.5), -250, 200)]),
                game_lines(2, ("Big Sky", "MVFC"), vec![line("consensus", Some(-3.0), -150, 130)]),
            ],
            teams: vec![Team::new(1, "Georgia", Some("SEC"))],
            ..StubSource::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_and_transform() {
        let source = stub();
        let out = fetch_weekly_lines(&source, &WeeklyLinesRequest::new(2023, 1), &TransformConfig::default())
            .await
            .unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].game.id, 1);
    }

    #[tokio::test]
    async fn test_lines_failure_is_fatal() {
        let source = stub();
        let request = WeeklyLinesRequest::new(2023, 1).with_season_type(SeasonType::Postseason);

        let err = fetch_weekly_lines(&source, &request, &TransformConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::UpstreamFetch { .. }));
        // Teams are never requested once lines fail
        assert_eq!(source.team_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_teams_failure_is_fatal() {
        let source = StubSource {
            fail_teams: true,
            ..stub()
        };

        let err = fetch_weekly_lines(&source, &WeeklyLinesRequest::new(2023, 1), &TransformConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::UpstreamFetch { ref endpoint, .. } if endpoint == "/teams/fbs"));
    }

    #[tokio::test]
    async fn test_works_through_trait_object() {
        let source: Box<dyn LinesSource> = Box::new(stub());
        let out = fetch_weekly_lines(source.as_ref(), &WeeklyLinesRequest::new(2023, 1), &TransformConfig::default())
            .await
            .unwrap();
        assert_eq!(out.len(), 1);
    }
}
