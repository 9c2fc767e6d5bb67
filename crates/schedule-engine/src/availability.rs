//! Weekly availability compaction.
//!
//! A [`WeeklySchedule`] stores the time ranges a user is available on each
//! weekday. Persisting it day by day is redundant when several days share the
//! same hours, so [`availability_from_schedule`] folds it into a short list of
//! [`AvailabilityRule`]s, one per distinct time range, each listing the
//! weekdays it applies to. [`schedule_from_availability`] spreads the rules
//! back out again.
//!
//! Date overrides replace the weekly hours on specific calendar dates;
//! [`date_overrides`] groups them per date and drops dates already past.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Number of minutes in a day.
pub const MINUTES_IN_DAY: u32 = 1440;
/// First minute of a day (00:00).
pub const MINUTES_DAY_START: u32 = 0;
/// Last minute of a day (23:59).
pub const MINUTES_DAY_END: u32 = MINUTES_IN_DAY - 1;

/// Number of buckets in a [`WeeklySchedule`].
pub const DAYS_IN_WEEK: usize = 7;

/// A wall-clock time range within a single day.
///
/// `start < end` is expected but not enforced; compaction passes malformed
/// ranges through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Build a range from minutes since midnight.
    ///
    /// # Errors
    /// Returns `ScheduleError::InvalidMinutes` if either bound is past
    /// [`MINUTES_DAY_END`].
    pub fn from_minutes(start: u32, end: u32) -> Result<Self> {
        Ok(Self {
            start: minute_of_day(start)?,
            end: minute_of_day(end)?,
        })
    }

    /// Ranges are stored with a 23:59 end when they run until midnight. This
    /// moves such an end to the last representable instant of the day so the
    /// final minute counts as available.
    pub fn through_end_of_day(self) -> Self {
        if self.end == NaiveTime::MIN - Duration::minutes(1) {
            Self {
                end: end_of_day(),
                ..self
            }
        } else {
            self
        }
    }
}

/// 23:59:59.999, the latest time a range can end on the same day.
pub fn end_of_day() -> NaiveTime {
    NaiveTime::MIN - Duration::milliseconds(1)
}

fn minute_of_day(minutes: u32) -> Result<NaiveTime> {
    if minutes > MINUTES_DAY_END {
        return Err(ScheduleError::InvalidMinutes(minutes));
    }
    NaiveTime::from_num_seconds_from_midnight_opt(minutes * 60, 0)
        .ok_or(ScheduleError::InvalidMinutes(minutes))
}

/// Seven buckets of time ranges, index 0 = Sunday through 6 = Saturday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule([Vec<TimeRange>; DAYS_IN_WEEK]);

impl WeeklySchedule {
    pub fn new(days: [Vec<TimeRange>; DAYS_IN_WEEK]) -> Self {
        Self(days)
    }

    /// A schedule with no availability on any day.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Monday to Friday, 09:00 to 17:00. Weekends are left empty.
    pub fn default_working_hours() -> Self {
        let nine_to_five = TimeRange::new(
            NaiveTime::MIN + Duration::hours(9),
            NaiveTime::MIN + Duration::hours(17),
        );
        let mut schedule = Self::empty();
        for day in 1..=5 {
            schedule.0[day].push(nine_to_five);
        }
        schedule
    }

    /// Ranges for one weekday, or `None` if `day` is not in `0..=6`.
    pub fn day(&self, day: u8) -> Option<&[TimeRange]> {
        self.0.get(usize::from(day)).map(Vec::as_slice)
    }

    /// Append a range to a weekday.
    ///
    /// # Errors
    /// Returns `ScheduleError::InvalidWeekday` if `day` is not in `0..=6`.
    pub fn push(&mut self, day: u8, range: TimeRange) -> Result<()> {
        self.0
            .get_mut(usize::from(day))
            .ok_or(ScheduleError::InvalidWeekday(day))?
            .push(range);
        Ok(())
    }

    /// Iterate `(weekday index, ranges)` from Sunday to Saturday.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[TimeRange])> {
        (0u8..).zip(self.0.iter().map(Vec::as_slice))
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Vec::is_empty)
    }

    /// The same schedule with every bucket sorted by start (then end) and
    /// duplicate ranges removed.
    pub fn normalized(&self) -> Self {
        let mut days = self.0.clone();
        for ranges in &mut days {
            ranges.sort();
            ranges.dedup();
        }
        Self(days)
    }

    pub fn into_inner(self) -> [Vec<TimeRange>; DAYS_IN_WEEK] {
        self.0
    }
}

impl From<[Vec<TimeRange>; DAYS_IN_WEEK]> for WeeklySchedule {
    fn from(days: [Vec<TimeRange>; DAYS_IN_WEEK]) -> Self {
        Self(days)
    }
}

/// One time range and the weekdays that share it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRule {
    /// Weekday indices (0 = Sunday), ascending and unique.
    pub days: Vec<u8>,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl AvailabilityRule {
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }
}

/// Compact a weekly schedule into availability rules.
///
/// Every distinct `(start, end)` pair becomes one rule listing the weekdays
/// that contain it. A weekday holding several ranges shows up in several
/// rules; ranges are matched exactly and never merged, even when they
/// overlap. Empty weekdays produce nothing.
///
/// Rules are ordered by when their range is first seen, scanning Sunday to
/// Saturday and each day's ranges in stored order.
pub fn availability_from_schedule(schedule: &WeeklySchedule) -> Vec<AvailabilityRule> {
    let mut rules: Vec<AvailabilityRule> = Vec::new();
    let mut by_range: HashMap<TimeRange, usize> = HashMap::new();

    for (day, ranges) in schedule.iter() {
        for range in ranges {
            match by_range.get(range) {
                Some(&idx) => {
                    let days = &mut rules[idx].days;
                    // Days are visited in ascending order, so a repeat of the
                    // same range on the same day can only be the last entry.
                    if days.last() != Some(&day) {
                        days.push(day);
                    }
                }
                None => {
                    by_range.insert(*range, rules.len());
                    rules.push(AvailabilityRule {
                        days: vec![day],
                        start: range.start,
                        end: range.end,
                    });
                }
            }
        }
    }

    tracing::debug!(rules = rules.len(), "compacted weekly schedule");
    rules
}

/// Expand availability rules back into a weekly schedule.
///
/// Each bucket of the result is sorted by start time and free of duplicates,
/// so `schedule_from_availability(&availability_from_schedule(&s))` equals
/// `s.normalized()`.
///
/// # Errors
/// Returns `ScheduleError::InvalidWeekday` if a rule names a day outside `0..=6`.
pub fn schedule_from_availability(rules: &[AvailabilityRule]) -> Result<WeeklySchedule> {
    let mut schedule = WeeklySchedule::empty();
    for rule in rules {
        for &day in &rule.days {
            schedule.push(day, rule.range())?;
        }
    }
    Ok(schedule.normalized())
}

/// Like [`schedule_from_availability`], but ranges ending at 23:59 are
/// extended to [`end_of_day`].
///
/// # Errors
/// Returns `ScheduleError::InvalidWeekday` if a rule names a day outside `0..=6`.
pub fn schedule_from_availability_through_day_end(
    rules: &[AvailabilityRule],
) -> Result<WeeklySchedule> {
    let mut schedule = schedule_from_availability(rules)?;
    for ranges in &mut schedule.0 {
        for range in ranges.iter_mut() {
            *range = range.through_end_of_day();
        }
    }
    Ok(schedule)
}

/// One stored override range: the hours available on a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRange {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl OverrideRange {
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }
}

/// All override ranges for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOverride {
    pub date: NaiveDate,
    /// Sorted by start time, without duplicates.
    pub ranges: Vec<TimeRange>,
}

/// Group override ranges by date, dropping dates before today in `tz`.
///
/// "Today" is the calendar date of `now` in `tz`, and today's overrides are
/// kept. The result is sorted by date.
pub fn date_overrides(
    entries: &[OverrideRange],
    tz: Tz,
    now: DateTime<Utc>,
) -> Vec<DateOverride> {
    let today = now.with_timezone(&tz).date_naive();

    let mut by_date: BTreeMap<NaiveDate, Vec<TimeRange>> = BTreeMap::new();
    for entry in entries.iter().filter(|e| e.date >= today) {
        by_date.entry(entry.date).or_default().push(entry.range());
    }

    let dropped = entries.len() - by_date.values().map(Vec::len).sum::<usize>();
    if dropped > 0 {
        tracing::debug!(dropped, %today, timezone = tz.name(), "skipped past date overrides");
    }

    by_date
        .into_iter()
        .map(|(date, mut ranges)| {
            ranges.sort();
            ranges.dedup();
            DateOverride { date, ranges }
        })
        .collect()
}
