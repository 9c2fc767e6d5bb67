//! English weekday names, indexed from Sunday = 0.

use serde::{Deserialize, Serialize};

const LONG_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const SHORT_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeekdayFormat {
    /// "Monday"
    #[default]
    Long,
    /// "Mon"
    Short,
}

impl WeekdayFormat {
    fn names(self) -> &'static [&'static str; 7] {
        match self {
            WeekdayFormat::Long => &LONG_NAMES,
            WeekdayFormat::Short => &SHORT_NAMES,
        }
    }
}

/// Name of weekday `day`. Out-of-range values wrap, so 7 is Sunday and -1 is
/// Saturday.
pub fn name_of_day(day: i32, format: WeekdayFormat) -> &'static str {
    format.names()[day.rem_euclid(7) as usize]
}

/// All seven weekday names, starting from `week_start` (0 = Sunday).
pub fn weekday_names(week_start: i32, format: WeekdayFormat) -> [&'static str; 7] {
    let start = week_start.rem_euclid(7);
    std::array::from_fn(|i| name_of_day(start + i as i32, format))
}
