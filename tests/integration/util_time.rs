use fcmprep::util::time::{format_rfc3339_utc, parse_rfc3339_utc};

#[test]
fn normalizes_offset_datetime_to_utc() {
    let utc = parse_rfc3339_utc("2026-02-23T20:15:30+09:00").expect("valid datetime");
    assert_eq!(format_rfc3339_utc(&utc), "2026-02-23T11:15:30Z");
}

#[test]
fn keeps_microseconds_and_drops_nanoseconds() {
    let utc = parse_rfc3339_utc("2026-02-23T20:15:30.123456789+09:00").expect("valid datetime");
    assert_eq!(format_rfc3339_utc(&utc), "2026-02-23T11:15:30.123456Z");
}

#[test]
fn invalid_datetime_returns_none() {
    assert!(parse_rfc3339_utc("not-a-datetime").is_none());
}
