//! Error types for schedule-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid instant: {0}")]
    InvalidInstant(String),

    /// Weekday indices run from 0 (Sunday) to 6 (Saturday).
    #[error("Invalid weekday index: {0}")]
    InvalidWeekday(u8),

    #[error("Invalid minute of day: {0}")]
    InvalidMinutes(u32),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
