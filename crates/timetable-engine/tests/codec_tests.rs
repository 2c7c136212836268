//! Tests for time and day codes and their conversion to instants.

use chrono::{TimeZone, Utc};
use timetable_engine::{DayCode, TimeCode, TimeCodec, TimetableError};

#[test]
fn encodes_instant_in_codec_timezone() {
    // 07:30 UTC is 08:30 in Berlin during winter time.
    let codec = TimeCodec::from_name("Europe/Berlin").unwrap();
    let instant = Utc.with_ymd_and_hms(2026, 1, 12, 7, 30, 0).unwrap();

    assert_eq!(codec.time_code(&instant).hhmm(), 830);
    assert_eq!(codec.day_code(&instant).code(), 20260112);
}

#[test]
fn local_midnight_belongs_to_the_local_day() {
    // 23:30 UTC on the 15th is already the 16th in Berlin.
    let codec = TimeCodec::from_name("Europe/Berlin").unwrap();
    let instant = Utc.with_ymd_and_hms(2026, 3, 15, 23, 30, 0).unwrap();

    assert_eq!(codec.day_code(&instant).code(), 20260316);
    assert_eq!(codec.time_code(&instant).hhmm(), 30);
}

#[test]
fn seconds_are_truncated() {
    let codec = TimeCodec::default();
    let instant = Utc.with_ymd_and_hms(2026, 3, 16, 8, 30, 59).unwrap();

    assert_eq!(codec.time_code(&instant).hhmm(), 830);
}

#[test]
fn to_instant_inverts_encoding() {
    let codec = TimeCodec::from_name("Europe/Berlin").unwrap();
    let instant = Utc.with_ymd_and_hms(2026, 6, 1, 6, 45, 0).unwrap();

    let back = codec
        .to_instant(codec.time_code(&instant), codec.day_code(&instant))
        .unwrap();

    assert_eq!(back, instant);
}

#[test]
fn round_trips_every_minute_of_a_day() {
    let codec = TimeCodec::from_name("Europe/Berlin").unwrap();
    let day = DayCode::new(20260316).unwrap();

    for minute in 0..24 * 60 {
        let code = TimeCode::from_minutes(minute).unwrap();
        let instant = codec.to_instant(code, day).unwrap();
        assert_eq!(codec.time_code(&instant), code);
        assert_eq!(codec.day_code(&instant), day);
    }
}

#[test]
fn ambiguous_local_time_resolves_to_earliest() {
    // 2026-10-25: Berlin repeats 02:00-03:00. The first 02:30 is CEST (UTC+2).
    let codec = TimeCodec::from_name("Europe/Berlin").unwrap();
    let day = DayCode::new(20261025).unwrap();

    let instant = codec.to_instant(TimeCode::new(230).unwrap(), day).unwrap();

    assert_eq!(instant, Utc.with_ymd_and_hms(2026, 10, 25, 0, 30, 0).unwrap());
}

#[test]
fn second_pass_of_repeated_hour_comes_back_as_first_pass() {
    // 01:30 UTC on 2026-10-25 is the second 02:30 in Berlin (CET, UTC+1).
    let codec = TimeCodec::from_name("Europe/Berlin").unwrap();
    let second_pass = Utc.with_ymd_and_hms(2026, 10, 25, 1, 30, 0).unwrap();

    let code = codec.time_code(&second_pass);
    let back = codec.to_instant(code, codec.day_code(&second_pass)).unwrap();

    assert_eq!(code.hhmm(), 230);
    assert_eq!(back, Utc.with_ymd_and_hms(2026, 10, 25, 0, 30, 0).unwrap());
    assert_eq!(second_pass - back, chrono::Duration::hours(1));
}

#[test]
fn day_code_converts_to_and_from_dates() {
    let date = chrono::NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();

    assert_eq!(DayCode::from_date(date), DayCode::new(20260316).unwrap());
    assert_eq!(DayCode::from_date(date).date(), date);
}

#[test]
fn nonexistent_local_time_is_an_error() {
    let codec = TimeCodec::from_name("Europe/Berlin").unwrap();
    let day = DayCode::new(20260329).unwrap();

    let err = codec.to_instant(TimeCode::new(215).unwrap(), day).unwrap_err();

    assert!(matches!(err, TimetableError::NonexistentLocalTime { day: 20260329, .. }));
}

#[test]
fn unknown_timezone_is_rejected() {
    let err = TimeCodec::from_name("Not/AZone").unwrap_err();
    assert!(matches!(err, TimetableError::InvalidTimezone(_)));
}

#[test]
fn codes_serialize_as_bare_integers() {
    let code = TimeCode::new(845).unwrap();
    assert_eq!(serde_json::to_string(&code).unwrap(), "845");
    assert_eq!(serde_json::from_str::<TimeCode>("945").unwrap().hhmm(), 945);
    assert!(serde_json::from_str::<TimeCode>("975").is_err());

    let day = DayCode::new(20260316).unwrap();
    assert_eq!(serde_json::to_string(&day).unwrap(), "20260316");
}

#[test]
fn time_code_displays_as_clock_time() {
    assert_eq!(TimeCode::new(805).unwrap().to_string(), "08:05");
    assert_eq!(TimeCode::MIDNIGHT.to_string(), "00:00");
    assert_eq!(TimeCode::LAST_MINUTE.to_string(), "23:59");
}
