use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::tempdir;

fn cli_bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_parshift"))
}

#[test]
fn analyze_process_contract_emits_report_json_on_stdout() {
    // Given a target-addressed conversation on disk
    // When running `parshift analyze <file>`
    // Then the process succeeds and stdout is a single JSON report.
    let root = tempdir().expect("tempdir");
    let input = root.path().join("chat.jsonl");
    fs::write(
        &input,
        concat!(
            "{\"id\": 1, \"user_id\": \"a\", \"message_text\": \"hi\", \"target_id\": \"\"}\n",
            "{\"id\": 2, \"user_id\": \"b\", \"message_text\": \"hey a\", \"target_id\": \"a\"}\n",
            "{\"id\": 3, \"user_id\": \"a\", \"message_text\": \"hey b\", \"target_id\": \"b\"}\n",
        ),
    )
    .expect("write conversation");

    let output = Command::new(cli_bin_path())
        .args(["analyze", input.to_str().expect("input path")])
        .env_remove("PARSHIFT_SEGMENTS")
        .env_remove("PARSHIFT_ZERO_DIVISION")
        .output()
        .expect("run analyze");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout must be JSON");
    assert_eq!(report["mode"], "target");
    assert_eq!(report["turn_count"], 3);
    assert_eq!(report["turns"][2]["classification"]["code"], "AB-BA");
    assert_eq!(report["propensities"]["turn_receiving"], 1.0);
}

#[test]
fn missing_input_file_fails_with_nonzero_exit() {
    let root = tempdir().expect("tempdir");
    let missing = root.path().join("absent.json");

    let output = Command::new(cli_bin_path())
        .args(["annotate", missing.to_str().expect("path")])
        .output()
        .expect("run annotate");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load conversation"), "stderr: {stderr}");
}

#[test]
fn env_segments_are_applied_when_flag_is_absent() {
    let root = tempdir().expect("tempdir");
    let input = root.path().join("chat.json");
    fs::write(
        &input,
        r#"[
            {"id": 1, "user_id": 1, "message_text": "a"},
            {"id": 2, "user_id": 2, "message_text": "b"},
            {"id": 3, "user_id": 3, "message_text": "c"},
            {"id": 4, "user_id": 4, "message_text": "d"}
        ]"#,
    )
    .expect("write conversation");

    let output = Command::new(cli_bin_path())
        .args(["stats", input.to_str().expect("input path")])
        .env("PARSHIFT_SEGMENTS", "2")
        .env_remove("PARSHIFT_ZERO_DIVISION")
        .output()
        .expect("run stats");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let parts: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(parts.as_array().map(Vec::len), Some(2));
}
