use std::io::Cursor;

use fcmprep::cmd::android::{AndroidCommandOptions, run};
use fcmprep::domain::android::MessagePriority;
use fcmprep::domain::error::AndroidError;
use fcmprep::io::Format;

#[test]
fn yaml_stream_to_jsonl() {
    let input = br#"
ttl: 3600
notification:
  title: Doors open
---
priority: high
ttl: "0s"
"#;
    let mut output = Vec::new();
    run(
        Cursor::new(&input[..]),
        &mut output,
        Format::Yaml,
        Format::Jsonl,
        AndroidCommandOptions::default(),
    )
    .expect("android flow should succeed");

    let out = String::from_utf8(output).expect("valid utf8");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#"{"notification":{"title":"Doors open"},"ttl":"3600s"}"#,
            r#"{"priority":"high","ttl":"0s"}"#,
        ]
    );
}

#[test]
fn options_apply_to_every_document() {
    let input = br#"[{}, {"priority": "high", "notification": {"body": "b"}}]"#;
    let options = AndroidCommandOptions {
        sort_keys: true,
        default_sound: true,
        priority: Some(MessagePriority::Normal),
    };
    let mut output = Vec::new();
    run(
        Cursor::new(&input[..]),
        &mut output,
        Format::Json,
        Format::Jsonl,
        options,
    )
    .expect("android flow should succeed");

    let out = String::from_utf8(output).expect("valid utf8");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#"{"notification":{"sound":"default"},"priority":"normal"}"#,
            r#"{"notification":{"body":"b","sound":"default"},"priority":"normal"}"#,
        ]
    );
}

#[test]
fn unsorted_output_keeps_schema_order() {
    let input = br#"{"notification":{"sound":"x"},"ttl":"5","priority":"high"}"#;
    let mut output = Vec::new();
    run(
        Cursor::new(&input[..]),
        &mut output,
        Format::Json,
        Format::Json,
        AndroidCommandOptions {
            sort_keys: false,
            ..AndroidCommandOptions::default()
        },
    )
    .expect("android flow should succeed");

    assert_eq!(
        String::from_utf8(output).expect("valid utf8"),
        "{\"priority\":\"high\",\"ttl\":\"5s\",\"notification\":{\"sound\":\"x\"}}\n"
    );
}

#[test]
fn invalid_ttl_stops_the_flow() {
    let input = br#"{"ttl": true}"#;
    let mut output = Vec::new();
    let error = run(
        Cursor::new(&input[..]),
        &mut output,
        Format::Json,
        Format::Json,
        AndroidCommandOptions::default(),
    )
    .expect_err("boolean ttl");

    assert!(matches!(error, AndroidError::InvalidConfig { index: 0, .. }));
    assert!(output.is_empty());
}

#[test]
fn malformed_json_is_a_read_error() {
    let error = run(
        Cursor::new(&b"{"[..]),
        Vec::<u8>::new(),
        Format::Json,
        Format::Json,
        AndroidCommandOptions::default(),
    )
    .expect_err("truncated json");
    assert!(matches!(error, AndroidError::ReadInput { .. }));
}
