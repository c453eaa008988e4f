//! Start-time parsing, correction and ordering.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};

use crate::error::{CoreError, Result};
use crate::models::{FlatGameLine, ScheduledGameLine};

/// Parse a provider timestamp.
///
/// RFC 3339 with an offset is the normal case; a bare `YYYY-MM-DDTHH:MM:SS[.fff]`
/// is read as UTC.
pub fn parse_start_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Parse every start time, shift it back by `start_offset` and estimate the
/// end as `start + game_duration`.
///
/// The shift is a fixed correction for the provider's clock, not a timezone
/// conversion. One unparseable timestamp fails the whole batch.
pub fn normalize_start_times(
    records: Vec<FlatGameLine>,
    start_offset: Duration,
    game_duration: Duration,
) -> Result<Vec<ScheduledGameLine>> {
    records
        .into_iter()
        .map(|record| {
            let parsed = parse_start_date(&record.start_date).ok_or_else(|| {
                CoreError::InvalidTimestamp {
                    game_id: record.game.id,
                    value: record.start_date.clone(),
                }
            })?;
            let start_date = parsed - start_offset;

            Ok(ScheduledGameLine {
                game: record.game,
                start_date,
                end_time_est: start_date + game_duration,
                line: record.line,
            })
        })
        .collect()
}

/// Order games by corrected start time, earliest first. Ties keep input order.
pub fn sort_by_start(mut records: Vec<ScheduledGameLine>) -> Vec<ScheduledGameLine> {
    records.sort_by_key(|record| record.start_date);
    records
}
