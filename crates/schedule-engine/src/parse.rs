//! Timezone and timestamp parsing.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Result, ScheduleError};

/// Naive layouts accepted after RFC 3339, tried in order.
const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Resolve an IANA timezone name (e.g. "Europe/Berlin").
pub fn parse_tz(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| ScheduleError::InvalidTimezone(name.to_string()))
}

/// Parse an ISO 8601 timestamp into `DateTime<Utc>`.
///
/// RFC 3339 input with an offset or `Z` (e.g. "2026-03-17T00:00:00.000Z") is
/// an absolute instant and `tz` is ignored. Input without an offset
/// ("YYYY-MM-DDTHH:MM[:SS[.fff]]") is wall-clock time in `tz`:
///
/// - an ambiguous time (the repeated hour when clocks fall back) resolves to
///   the earlier instant, i.e. the pre-transition offset;
/// - a time inside a spring-forward gap is read with the offset in effect
///   before the gap, which lands it the length of the gap later on the clock.
pub fn parse_instant(s: &str, tz: Tz) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let mut last_err = None;
    for format in LOCAL_FORMATS {
        match NaiveDateTime::parse_from_str(s, format) {
            Ok(local) => return Ok(resolve_local(local, tz)),
            Err(e) => last_err = Some(e),
        }
    }

    let reason = last_err.map(|e| e.to_string()).unwrap_or_default();
    Err(ScheduleError::InvalidInstant(format!("'{}': {}", s, reason)))
}

fn resolve_local(local: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
        LocalResult::None => {
            // Zones never change offset twice within a day.
            let before = tz
                .offset_from_utc_datetime(&(local - Duration::days(1)))
                .fix();
            let instant = local.and_utc() - Duration::seconds(i64::from(before.local_minus_utc()));
            tracing::debug!(%local, timezone = tz.name(), "local time falls in a DST gap");
            instant
        }
    }
}
