use std::io::Cursor;

use fcmprep::cmd::instant::{InstantCommandOptions, normalize_all, run};
use fcmprep::engine::temporal::TemporalInput;
use fcmprep::io::Format;
use serde_json::{Value, json};

#[test]
fn jsonl_values_to_json_array() {
    let input = b"1234567890123\n\"10.12.1980\"\ntrue\n";
    let mut output = Vec::new();
    run(
        Cursor::new(&input[..]),
        &mut output,
        Format::Jsonl,
        Format::Json,
        InstantCommandOptions::default(),
    )
    .expect("instant flow should succeed");

    let records: Value = serde_json::from_slice(&output).expect("json output");
    assert_eq!(
        records,
        json!([
            {
                "seconds": 1_234_567_890,
                "microseconds": 123_000,
                "timezone": "UTC",
                "rfc3339": "2009-02-13T23:31:30.123Z"
            },
            {
                "seconds": 345_254_400,
                "microseconds": 0,
                "timezone": "UTC",
                "rfc3339": "1980-12-10T00:00:00Z"
            },
            {
                "seconds": 1,
                "microseconds": 0,
                "timezone": "UTC",
                "rfc3339": "1970-01-01T00:00:01Z"
            }
        ])
    );
}

#[test]
fn one_clock_reading_serves_every_null() {
    let options = InstantCommandOptions::default();
    let instants = normalize_all(
        vec![TemporalInput::Null, TemporalInput::Null, "now".into()],
        options,
    )
    .expect("normalize");
    assert_eq!(instants[0], instants[1]);
    assert_eq!(instants[1], instants[2]);
}

#[test]
fn pinned_clock_drives_relative_text() {
    let options = InstantCommandOptions::with_now("2026-10-16T09:30:00+02:00").expect("now");
    let instants = normalize_all(vec!["+1 hour".into()], options).expect("normalize");
    assert_eq!(instants[0].to_rfc3339(), "2026-10-16T08:30:00Z");
}
