use std::fs;

use predicates::prelude::predicate;
use serde_json::{Value, json};
use tempfile::tempdir;

#[test]
fn android_command_runs_from_stdin_to_stdout() {
    assert_cmd::cargo::cargo_bin_cmd!("fcmprep")
        .args(["android", "--from", "json"])
        .write_stdin(r#"{"ttl":"3600","priority":"high"}"#)
        .assert()
        .code(0)
        .stdout(predicate::eq("{\"priority\":\"high\",\"ttl\":\"3600s\"}\n"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn android_command_applies_sound_and_priority() {
    assert_cmd::cargo::cargo_bin_cmd!("fcmprep")
        .args([
            "android",
            "--from",
            "json",
            "--default-sound",
            "--priority",
            "normal",
        ])
        .write_stdin(r#"{"priority":"high"}"#)
        .assert()
        .code(0)
        .stdout(predicate::eq(
            "{\"notification\":{\"sound\":\"default\"},\"priority\":\"normal\"}\n",
        ));
}

#[test]
fn android_command_reports_invalid_ttl() {
    let assert = assert_cmd::cargo::cargo_bin_cmd!("fcmprep")
        .args(["android", "--from", "json"])
        .write_stdin(r#"{"ttl":"1m"}"#)
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty());

    let stderr: Value =
        serde_json::from_slice(&assert.get_output().stderr).expect("stderr is json");
    assert_eq!(stderr["error"], "input_usage_error");
    assert_eq!(stderr["code"], 3);
    assert_eq!(stderr["details"]["field"], "ttl");
    assert_eq!(stderr["details"]["value"], "1m");
    assert_eq!(stderr["details"]["document"], 0);
}

#[test]
fn android_command_rejects_unknown_notification_key() {
    let assert = assert_cmd::cargo::cargo_bin_cmd!("fcmprep")
        .args(["android", "--from", "json"])
        .write_stdin(r#"{"notification":{"titel":"typo"}}"#)
        .assert()
        .code(3);

    let stderr: Value =
        serde_json::from_slice(&assert.get_output().stderr).expect("stderr is json");
    assert_eq!(stderr["details"]["field"], "notification.titel");
}

#[test]
fn android_command_reads_yaml_file_by_extension() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("android.yaml");
    fs::write(
        &path,
        "collapse_key: scores\nttl: 0\n---\nrestricted_package_name: com.example.app\n",
    )
    .expect("write input");

    let assert = assert_cmd::cargo::cargo_bin_cmd!("fcmprep")
        .args(["android", "--to", "jsonl", "--input"])
        .arg(&path)
        .assert()
        .code(0);

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let lines: Vec<Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect();
    assert_eq!(
        lines,
        vec![
            json!({"collapse_key": "scores", "ttl": "0s"}),
            json!({"restricted_package_name": "com.example.app"}),
        ]
    );
}

#[test]
fn android_command_missing_input_file_is_usage_error() {
    let dir = tempdir().expect("tempdir");
    assert_cmd::cargo::cargo_bin_cmd!("fcmprep")
        .args(["android", "--from", "json", "--input"])
        .arg(dir.path().join("missing.json"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("failed to open input file"));
}

#[test]
fn android_command_emits_pipeline_report() {
    let assert = assert_cmd::cargo::cargo_bin_cmd!("fcmprep")
        .args([
            "android",
            "--from",
            "json",
            "--default-sound",
            "--emit-pipeline",
        ])
        .write_stdin("{}")
        .assert()
        .code(0)
        .stdout(predicate::eq("{\"notification\":{\"sound\":\"default\"}}\n"));

    let report: Value =
        serde_json::from_slice(&assert.get_output().stderr).expect("pipeline report is json");
    assert_eq!(report["command"], "android");
    assert_eq!(
        report["steps"],
        json!([
            "read_android_documents",
            "validate_android_config",
            "apply_default_sound",
            "write_android_wire_mapping"
        ])
    );
    assert_eq!(report["input"]["sources"][0]["source"], "stdin");
}
