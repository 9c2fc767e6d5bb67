//! WASM bindings for schedule-engine.
//!
//! Exposes availability compaction and DST shift detection to the booking UI
//! via `wasm-bindgen`. Schedules, rules, and flag lists cross the boundary as
//! JSON strings; wall-clock times are "HH:MM" (or "HH:MM:SS") strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p schedule-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/schedule-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/schedule_engine_wasm.wasm
//! ```

use chrono::{NaiveTime, Timelike};
use schedule_engine::availability::{AvailabilityRule, TimeRange, WeeklySchedule, DAYS_IN_WEEK};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct TimeRangeDto {
    start: String,
    end: String,
}

#[derive(Serialize, Deserialize)]
struct AvailabilityRuleDto {
    days: Vec<u8>,
    start: String,
    end: String,
}

impl From<&TimeRange> for TimeRangeDto {
    fn from(r: &TimeRange) -> Self {
        Self {
            start: format_time(r.start),
            end: format_time(r.end),
        }
    }
}

impl From<&AvailabilityRule> for AvailabilityRuleDto {
    fn from(r: &AvailabilityRule) -> Self {
        Self {
            days: r.days.clone(),
            start: format_time(r.start),
            end: format_time(r.end),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers: wall-clock time strings
// ---------------------------------------------------------------------------

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|e| format!("Invalid time '{}': {}", s, e))
}

/// "HH:MM", or "HH:MM:SS" when the seconds are not zero.
fn format_time(t: NaiveTime) -> String {
    if t.second() == 0 {
        t.format("%H:%M").to_string()
    } else {
        t.format("%H:%M:%S").to_string()
    }
}

fn parse_range(dto: &TimeRangeDto) -> Result<TimeRange, String> {
    Ok(TimeRange::new(parse_time(&dto.start)?, parse_time(&dto.end)?))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// JSON-in, JSON-out implementations
// ---------------------------------------------------------------------------

fn availability_from_schedule_json(schedule_json: &str) -> Result<String, String> {
    let days: Vec<Vec<TimeRangeDto>> = serde_json::from_str(schedule_json)
        .map_err(|e| format!("Invalid schedule JSON: {}", e))?;
    if days.len() != DAYS_IN_WEEK {
        return Err(format!(
            "Invalid schedule JSON: expected {} days, got {}",
            DAYS_IN_WEEK,
            days.len()
        ));
    }

    let mut schedule = WeeklySchedule::empty();
    for (day, ranges) in (0u8..).zip(&days) {
        for dto in ranges {
            schedule
                .push(day, parse_range(dto)?)
                .map_err(|e| e.to_string())?;
        }
    }

    let rules = schedule_engine::availability_from_schedule(&schedule);
    let dtos: Vec<AvailabilityRuleDto> = rules.iter().map(AvailabilityRuleDto::from).collect();
    to_json(&dtos)
}

fn schedule_from_availability_json(rules_json: &str) -> Result<String, String> {
    let inputs: Vec<AvailabilityRuleDto> = serde_json::from_str(rules_json)
        .map_err(|e| format!("Invalid availability JSON: {}", e))?;

    let rules = inputs
        .into_iter()
        .map(|dto| {
            Ok(AvailabilityRule {
                days: dto.days,
                start: parse_time(&dto.start)?,
                end: parse_time(&dto.end)?,
            })
        })
        .collect::<Result<Vec<_>, String>>()?;

    let schedule =
        schedule_engine::schedule_from_availability(&rules).map_err(|e| e.to_string())?;
    let dtos: Vec<Vec<TimeRangeDto>> = schedule
        .iter()
        .map(|(_, ranges)| ranges.iter().map(TimeRangeDto::from).collect())
        .collect();
    to_json(&dtos)
}

fn time_shift_flags_json(dates_json: &str, timezone: &str) -> Result<String, String> {
    let dates: Vec<String> = serde_json::from_str(dates_json)
        .map_err(|e| format!("Invalid dates JSON: {}", e))?;
    let flags = schedule_engine::time_shift_flags_from_strs(&dates, timezone)
        .map_err(|e| e.to_string())?;
    to_json(&flags)
}

fn first_shift_flags_json(flags_json: &str) -> Result<String, String> {
    let flags: Vec<bool> = serde_json::from_str(flags_json)
        .map_err(|e| format!("Invalid flags JSON: {}", e))?;
    to_json(&schedule_engine::first_shift_flags(&flags))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compact a weekly schedule into availability rules.
///
/// `schedule_json` is an array of 7 arrays (Sunday first) of `{start, end}`
/// objects. Returns a JSON array of `{days, start, end}` rules.
#[wasm_bindgen(js_name = "availabilityFromSchedule")]
pub fn availability_from_schedule(schedule_json: &str) -> Result<String, JsValue> {
    availability_from_schedule_json(schedule_json).map_err(JsValue::from)
}

/// Expand availability rules into a weekly schedule (array of 7 arrays).
#[wasm_bindgen(js_name = "scheduleFromAvailability")]
pub fn schedule_from_availability(rules_json: &str) -> Result<String, JsValue> {
    schedule_from_availability_json(rules_json).map_err(JsValue::from)
}

/// Flag occurrences whose UTC offset in `timezone` differs from the previous
/// occurrence's.
///
/// `dates_json` is a JSON array of ISO 8601 strings; strings without an
/// offset are wall-clock times in `timezone`. Returns a JSON array of booleans
/// of the same length.
#[wasm_bindgen(js_name = "timeShiftFlags")]
pub fn time_shift_flags(dates_json: &str, timezone: &str) -> Result<String, JsValue> {
    time_shift_flags_json(dates_json, timezone).map_err(JsValue::from)
}

/// Keep only the first flag of each run of `true` in a JSON boolean array.
#[wasm_bindgen(js_name = "firstShiftFlags")]
pub fn first_shift_flags(flags_json: &str) -> Result<String, JsValue> {
    first_shift_flags_json(flags_json).map_err(JsValue::from)
}
