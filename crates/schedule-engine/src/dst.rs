//! DST shift detection for recurring bookings.
//!
//! A weekly booking at 09:00 in Europe/Berlin stays at 09:00 local time all
//! year, but its UTC offset moves twice a year. These functions find the
//! occurrences where the offset moved so the UI can warn about them.
//!
//! Detection compares offsets instead of looking up transition dates, so it
//! works for any zone `chrono-tz` knows about.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parse::{parse_instant, parse_tz};

/// Which earlier occurrence an occurrence's offset is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShiftBaseline {
    /// The immediately preceding occurrence. A flag means the shift happened
    /// between these two occurrences.
    #[default]
    Previous,
    /// The first occurrence of the series. A flag means the occurrence is
    /// currently off the series' original offset.
    First,
}

/// UTC offset in effect at `instant` in `tz`.
pub fn utc_offset(instant: &DateTime<Utc>, tz: Tz) -> FixedOffset {
    instant.with_timezone(&tz).offset().fix()
}

/// Flag every occurrence whose UTC offset in `tz` differs from the previous
/// occurrence's.
///
/// The result has one entry per input. Index 0 is always `false`.
pub fn time_shift_flags(dates: &[DateTime<Utc>], tz: Tz) -> Vec<bool> {
    time_shift_flags_with(dates, tz, ShiftBaseline::default())
}

/// Like [`time_shift_flags`], with an explicit comparison baseline.
pub fn time_shift_flags_with(
    dates: &[DateTime<Utc>],
    tz: Tz,
    baseline: ShiftBaseline,
) -> Vec<bool> {
    let offsets: Vec<FixedOffset> = dates.iter().map(|dt| utc_offset(dt, tz)).collect();

    offsets
        .iter()
        .enumerate()
        .map(|(i, offset)| {
            if i == 0 {
                return false;
            }
            let reference = match baseline {
                ShiftBaseline::Previous => offsets[i - 1],
                ShiftBaseline::First => offsets[0],
            };
            let shifted = *offset != reference;
            if shifted {
                tracing::debug!(
                    index = i,
                    timezone = tz.name(),
                    from = %reference,
                    to = %offset,
                    "utc offset changed between occurrences"
                );
            }
            shifted
        })
        .collect()
}

/// Parse ISO 8601 `dates` and an IANA `timezone`, then run
/// [`time_shift_flags`].
///
/// Dates without an offset are wall-clock times in `timezone`; see
/// [`parse_instant`] for how ambiguous and skipped times resolve. An empty
/// `dates` slice yields an empty result without resolving the zone.
///
/// # Errors
/// Returns `ScheduleError::InvalidTimezone` if `timezone` is not a valid IANA
/// identifier, or `ScheduleError::InvalidInstant` for an unparseable date.
pub fn time_shift_flags_from_strs<S: AsRef<str>>(
    dates: &[S],
    timezone: &str,
) -> Result<Vec<bool>> {
    if dates.is_empty() {
        return Ok(Vec::new());
    }

    let tz = parse_tz(timezone)?;
    let instants = dates
        .iter()
        .map(|d| parse_instant(d.as_ref(), tz))
        .collect::<Result<Vec<_>>>()?;

    Ok(time_shift_flags(&instants, tz))
}

/// Keep only the first flag of each contiguous run of `true`.
///
/// Once the offset changes it usually stays changed for weeks, so a series
/// of shift flags tends to come in runs. Only the start of a run marks the
/// transition itself.
pub fn first_shift_flags(flags: &[bool]) -> Vec<bool> {
    flags
        .iter()
        .enumerate()
        .map(|(i, &flag)| flag && (i == 0 || !flags[i - 1]))
        .collect()
}

/// Keep only the earliest `true` in the whole sequence.
pub fn earliest_shift_flags(flags: &[bool]) -> Vec<bool> {
    let earliest = flags.iter().position(|&flag| flag);
    (0..flags.len()).map(|i| earliest == Some(i)).collect()
}
