//! # schedule-engine
//!
//! Weekly availability compaction and DST shift detection for recurring
//! bookings.
//!
//! Everything here is a pure, synchronous function over caller-owned data.
//! Timezone math goes through `chrono-tz`, so results are deterministic for a
//! given tz database version.
//!
//! ## Modules
//!
//! - [`availability`] — weekly schedule ⇄ compact availability rules, date overrides
//! - [`dst`] — flag occurrences whose UTC offset changed
//! - [`weekday`] — weekday names for schedule labels
//! - [`parse`] — IANA timezone and ISO 8601 timestamp parsing
//! - [`error`] — Error types

pub mod availability;
pub mod dst;
pub mod error;
pub mod parse;
pub mod weekday;

pub use availability::{
    availability_from_schedule, date_overrides, schedule_from_availability,
    schedule_from_availability_through_day_end, AvailabilityRule, DateOverride, OverrideRange,
    TimeRange, WeeklySchedule,
};
pub use dst::{
    earliest_shift_flags, first_shift_flags, time_shift_flags, time_shift_flags_from_strs,
    time_shift_flags_with, ShiftBaseline,
};
pub use error::{Result, ScheduleError};
pub use weekday::{name_of_day, weekday_names, WeekdayFormat};
