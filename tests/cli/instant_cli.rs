use predicates::prelude::predicate;
use serde_json::{Value, json};

#[test]
fn instant_command_normalizes_literal_value() {
    let assert = assert_cmd::cargo::cargo_bin_cmd!("fcmprep")
        .args(["instant", "--value", "10.12.1980"])
        .assert()
        .code(0)
        .stderr(predicate::str::is_empty());

    let record: Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("stdout is json");
    assert_eq!(
        record,
        json!({
            "seconds": 345_254_400,
            "microseconds": 0,
            "timezone": "UTC",
            "rfc3339": "1980-12-10T00:00:00Z"
        })
    );
}

#[test]
fn instant_command_reads_documents_with_pinned_clock() {
    let assert = assert_cmd::cargo::cargo_bin_cmd!("fcmprep")
        .args([
            "instant",
            "--from",
            "json",
            "--to",
            "jsonl",
            "--now",
            "2026-10-16T09:30:00Z",
        ])
        .write_stdin(r#"[null, false, 1234567890123, "tomorrow"]"#)
        .assert()
        .code(0);

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let seconds: Vec<Value> = stdout
        .lines()
        .map(|line| {
            let record: Value = serde_json::from_str(line).expect("json line");
            record["seconds"].clone()
        })
        .collect();
    assert_eq!(
        seconds,
        vec![
            json!(1_792_143_000),
            json!(0),
            json!(1_234_567_890),
            json!(1_792_195_200)
        ]
    );
}

#[test]
fn instant_command_rejects_unrecognized_text() {
    let assert = assert_cmd::cargo::cargo_bin_cmd!("fcmprep")
        .args(["instant", "--value", "foo"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty());

    let stderr: Value =
        serde_json::from_slice(&assert.get_output().stderr).expect("stderr is json");
    assert_eq!(stderr["error"], "input_usage_error");
    assert_eq!(stderr["details"]["value"], "foo");
}

#[test]
fn instant_command_rejects_malformed_now() {
    assert_cmd::cargo::cargo_bin_cmd!("fcmprep")
        .args(["instant", "--value", "now", "--now", "noon"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("input_usage_error"));
}

#[test]
fn instant_command_value_conflicts_with_input() {
    assert_cmd::cargo::cargo_bin_cmd!("fcmprep")
        .args(["instant", "--value", "now", "--input", "values.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("cli_parse_error"));
}

#[test]
fn instant_command_value_conflicts_with_from() {
    assert_cmd::cargo::cargo_bin_cmd!("fcmprep")
        .args(["instant", "--value", "now", "--from", "yaml"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("cli_parse_error"));
}
