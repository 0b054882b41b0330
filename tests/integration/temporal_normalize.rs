use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use fcmprep::engine::temporal::{TemporalInput, to_utc_instant, to_utc_instant_at};
use serde_json::json;

fn los_angeles_winter() -> FixedOffset {
    FixedOffset::west_opt(8 * 3600).expect("offset")
}

#[test]
fn converts_fixed_values() {
    let local = los_angeles_winter()
        .with_ymd_and_hms(1980, 12, 10, 12, 34, 56)
        .single()
        .expect("local time")
        + Duration::microseconds(789_012);
    let cases: Vec<(&str, &str, TemporalInput)> = vec![
        ("seconds", "1234567890.000000", 1_234_567_890i64.into()),
        ("milliseconds_1", "1234567890.000000", 1_234_567_890_000i64.into()),
        ("milliseconds_2", "1234567890.123000", 1_234_567_890_123i64.into()),
        ("date_string", "345254400.000000", "10.12.1980".into()),
        (
            "timezone_1",
            "345328496.789012",
            "10.12.1980 12:34:56.789012 -08:00".into(),
        ),
        ("timezone_2", "345328496.789012", local.into()),
    ];

    for (name, expected, input) in cases {
        let instant = to_utc_instant(input).unwrap_or_else(|error| panic!("{name}: {error}"));
        assert_eq!(instant.format_unix_micros(), expected, "{name}");
        assert_eq!(instant.timezone(), "UTC", "{name}");
    }
}

#[test]
fn converts_variable_values_to_utc() {
    let now = Utc::now();
    let bangkok = FixedOffset::east_opt(7 * 3600).expect("offset");
    let cases: Vec<(&str, TemporalInput)> = vec![
        ("null", TemporalInput::Null),
        ("zero", 0i64.into()),
        ("zero_as_string", "0".into()),
        ("true", true.into()),
        ("false", false.into()),
        ("microtime", "0.12345600 1792143000".into()),
        ("time", now.timestamp().into()),
        ("now in LA", now.with_timezone(&los_angeles_winter()).into()),
        ("now in Bangkok", now.with_timezone(&bangkok).into()),
    ];

    for (name, input) in cases {
        let instant = to_utc_instant(input).unwrap_or_else(|error| panic!("{name}: {error}"));
        assert_eq!(instant.timezone(), "UTC", "{name}");
    }
}

#[test]
fn zoned_now_keeps_the_instant() {
    let now = Utc
        .with_ymd_and_hms(2026, 10, 16, 9, 30, 0)
        .single()
        .expect("fixed now");
    let zoned: DateTime<FixedOffset> = now.with_timezone(&los_angeles_winter());
    let instant = to_utc_instant(zoned).expect("zoned now");
    assert_eq!(instant.seconds(), now.timestamp());
}

#[test]
fn rejects_invalid_values() {
    let text = to_utc_instant("foo").expect_err("string");
    assert_eq!(text.value, json!("foo"));

    let object = to_utc_instant(&json!({})).expect_err("object");
    assert_eq!(object.reason, "unsupported input type");
}

#[test]
fn json_documents_follow_the_same_rules() {
    let now = Utc
        .with_ymd_and_hms(2026, 10, 16, 9, 30, 0)
        .single()
        .expect("fixed now");
    let cases = [
        (json!(null), now.timestamp()),
        (json!(true), 1),
        (json!(1_234_567_890_123u64), 1_234_567_890),
        (json!("1234567890"), 1_234_567_890),
        (json!("yesterday"), now.timestamp() - 9 * 3600 - 30 * 60 - 86_400),
    ];
    for (value, seconds) in cases {
        let instant = to_utc_instant_at(&value, now).expect("valid value");
        assert_eq!(instant.seconds(), seconds, "value {value}");
    }
}
