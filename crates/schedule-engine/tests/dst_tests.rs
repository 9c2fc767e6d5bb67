//! Tests for DST shift detection and the run reducers.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use schedule_engine::dst::{
    earliest_shift_flags, first_shift_flags, time_shift_flags, time_shift_flags_from_strs,
    time_shift_flags_with, utc_offset, ShiftBaseline,
};
use schedule_engine::ScheduleError;

// ── Helpers ─────────────────────────────────────────────────────────────────

/// Unambiguous local wall-clock time in `tz`, as UTC.
fn local(tz: Tz, y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    tz.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .expect("local time should be unambiguous")
        .with_timezone(&Utc)
}

// ── time_shift_flags ────────────────────────────────────────────────────────

#[test]
fn no_dates_no_flags() {
    assert!(time_shift_flags(&[], chrono_tz::Europe::Berlin).is_empty());
}

#[test]
fn berlin_spring_forward_flags_third_occurrence() {
    let tz = chrono_tz::Europe::Berlin;
    let dates = [
        local(tz, 2026, 3, 17, 1, 0),
        local(tz, 2026, 3, 24, 1, 0),
        local(tz, 2026, 3, 31, 2, 0),
    ];

    assert_eq!(time_shift_flags(&dates, tz), vec![false, false, true]);
}

#[test]
fn berlin_fall_back_flags_third_occurrence() {
    let tz = chrono_tz::Europe::Berlin;
    // 02:00 on 2026-10-25 happens twice; the first one is still CEST.
    let ambiguous = tz
        .with_ymd_and_hms(2026, 10, 25, 2, 0, 0)
        .earliest()
        .unwrap()
        .with_timezone(&Utc);
    let dates = [
        local(tz, 2026, 10, 18, 2, 0),
        ambiguous,
        local(tz, 2026, 11, 1, 1, 0),
    ];

    assert_eq!(time_shift_flags(&dates, tz), vec![false, false, true]);
}

#[test]
fn new_york_without_transition() {
    let tz = chrono_tz::America::New_York;
    let dates = [
        local(tz, 2026, 4, 1, 9, 0),
        local(tz, 2026, 4, 8, 9, 0),
        local(tz, 2026, 4, 15, 9, 0),
    ];

    assert_eq!(time_shift_flags(&dates, tz), vec![false, false, false]);
}

#[test]
fn zone_without_dst_never_flags() {
    let tz = chrono_tz::Asia::Tokyo;
    let dates: Vec<_> = (0..52)
        .map(|w| Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap() + chrono::Duration::weeks(w))
        .collect();

    assert!(time_shift_flags(&dates, tz).iter().all(|&f| !f));
}

#[test]
fn single_occurrence_is_never_flagged() {
    let tz = chrono_tz::Europe::Berlin;
    let dates = [local(tz, 2026, 7, 1, 9, 0)];
    assert_eq!(time_shift_flags(&dates, tz), vec![false]);
}

#[test]
fn both_transitions_in_one_series() {
    let tz = chrono_tz::America::New_York;
    // DST starts 2026-03-08, ends 2026-11-01.
    let dates = [
        local(tz, 2026, 3, 1, 9, 0),
        local(tz, 2026, 3, 15, 9, 0),
        local(tz, 2026, 7, 1, 9, 0),
        local(tz, 2026, 11, 15, 9, 0),
    ];

    assert_eq!(time_shift_flags(&dates, tz), vec![false, true, false, true]);
}

#[test]
fn offset_reflects_zone_rules() {
    let tz = chrono_tz::Europe::Berlin;
    assert_eq!(
        utc_offset(&local(tz, 2026, 1, 10, 12, 0), tz).local_minus_utc(),
        3600
    );
    assert_eq!(
        utc_offset(&local(tz, 2026, 7, 10, 12, 0), tz).local_minus_utc(),
        7200
    );
}

// ── Baselines ───────────────────────────────────────────────────────────────

#[test]
fn first_baseline_flags_every_occurrence_off_original_offset() {
    let tz = chrono_tz::Europe::Berlin;
    let dates = [
        local(tz, 2026, 3, 24, 9, 0),
        local(tz, 2026, 3, 31, 9, 0),
        local(tz, 2026, 4, 7, 9, 0),
    ];

    assert_eq!(
        time_shift_flags_with(&dates, tz, ShiftBaseline::Previous),
        vec![false, true, false]
    );
    assert_eq!(
        time_shift_flags_with(&dates, tz, ShiftBaseline::First),
        vec![false, true, true]
    );
}

#[test]
fn default_baseline_is_previous() {
    assert_eq!(ShiftBaseline::default(), ShiftBaseline::Previous);
}

// ── String entry point ──────────────────────────────────────────────────────

#[test]
fn iso_strings_match_typed_input() {
    // dayjs-style toISOString output for 01:00 CET / 02:00 CEST.
    let dates = [
        "2026-03-17T00:00:00.000Z",
        "2026-03-24T00:00:00.000Z",
        "2026-03-31T00:00:00.000Z",
    ];

    let flags = time_shift_flags_from_strs(&dates, "Europe/Berlin").unwrap();

    assert_eq!(flags, vec![false, false, true]);
}

#[test]
fn berlin_spring_forward_from_local_strings() {
    let dates = ["2026-03-17T01:00", "2026-03-24T01:00", "2026-03-31T02:00"];

    let flags = time_shift_flags_from_strs(&dates, "Europe/Berlin").unwrap();

    assert_eq!(flags, vec![false, false, true]);
}

#[test]
fn berlin_fall_back_from_local_strings() {
    // 2026-10-25T02:00 occurs twice in Berlin; the earlier (CEST) one is used.
    let dates = ["2026-10-18T02:00", "2026-10-25T02:00", "2026-11-01T01:00"];

    let flags = time_shift_flags_from_strs(&dates, "Europe/Berlin").unwrap();

    assert_eq!(flags, vec![false, false, true]);
}

#[test]
fn local_strings_with_seconds_match_minute_precision() {
    let with_seconds = ["2026-10-18T02:00:00", "2026-10-25T02:00:00", "2026-11-01T01:00:00"];
    let minutes = ["2026-10-18T02:00", "2026-10-25T02:00", "2026-11-01T01:00"];

    assert_eq!(
        time_shift_flags_from_strs(&with_seconds, "Europe/Berlin").unwrap(),
        time_shift_flags_from_strs(&minutes, "Europe/Berlin").unwrap()
    );
}

#[test]
fn local_strings_are_read_in_the_given_zone() {
    // New York springs forward on 2026-03-08, Berlin not until 2026-03-29.
    let dates = ["2026-03-03T09:00", "2026-03-10T09:00", "2026-03-31T09:00"];

    assert_eq!(
        time_shift_flags_from_strs(&dates, "America/New_York").unwrap(),
        vec![false, true, false]
    );
    assert_eq!(
        time_shift_flags_from_strs(&dates, "Europe/Berlin").unwrap(),
        vec![false, false, true]
    );
}

#[test]
fn empty_strings_skip_timezone_resolution() {
    let dates: [&str; 0] = [];
    assert_eq!(time_shift_flags_from_strs(&dates, "Not/AZone").unwrap(), Vec::<bool>::new());
}

#[test]
fn invalid_timezone_is_an_error() {
    let err = time_shift_flags_from_strs(&["2026-03-17T00:00:00Z"], "Not/AZone").unwrap_err();
    assert_eq!(err, ScheduleError::InvalidTimezone("Not/AZone".to_string()));
}

#[test]
fn invalid_instant_is_an_error() {
    let err = time_shift_flags_from_strs(&["2026-03-17T00:00:00Z", "soon"], "UTC").unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidInstant(_)));
}

#[test]
fn owned_strings_are_accepted() {
    let dates = vec!["2026-06-01T09:00:00Z".to_string(), "2026-06-08T09:00:00Z".to_string()];
    assert_eq!(time_shift_flags_from_strs(&dates, "UTC").unwrap(), vec![false, false]);
}

// ── first_shift_flags ───────────────────────────────────────────────────────

#[test]
fn first_shift_empty() {
    assert!(first_shift_flags(&[]).is_empty());
}

#[test]
fn first_shift_all_false() {
    assert_eq!(first_shift_flags(&[false, false, false]), vec![false, false, false]);
}

#[test]
fn first_shift_marks_start_of_run() {
    assert_eq!(
        first_shift_flags(&[false, false, true, true, true]),
        vec![false, false, true, false, false]
    );
}

#[test]
fn first_shift_single_element_mirrors_input() {
    assert_eq!(first_shift_flags(&[false]), vec![false]);
    assert_eq!(first_shift_flags(&[true]), vec![true]);
}

#[test]
fn first_shift_run_at_start() {
    assert_eq!(first_shift_flags(&[true, true, false]), vec![true, false, false]);
}

#[test]
fn first_shift_marks_each_separate_run() {
    assert_eq!(
        first_shift_flags(&[false, true, false, true]),
        vec![false, true, false, true]
    );
    assert_eq!(
        first_shift_flags(&[true, true, false, false, true, true, true, false]),
        vec![true, false, false, false, true, false, false, false]
    );
}

// ── earliest_shift_flags ────────────────────────────────────────────────────

#[test]
fn earliest_shift_keeps_only_one_flag() {
    assert_eq!(
        earliest_shift_flags(&[false, true, false, true]),
        vec![false, true, false, false]
    );
    assert_eq!(earliest_shift_flags(&[false, false]), vec![false, false]);
    assert!(earliest_shift_flags(&[]).is_empty());
}
