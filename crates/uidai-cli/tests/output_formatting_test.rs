//! Integration tests for output formatting
//!
//! These run the `uidai` binary against small CSV files and check the JSON
//! envelope, human tables and failure exits.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("enrolment_clean.csv"),
        "\
date,state,district,pincode,age_0_5,age_5_17,age_18_greater
2025-09-01,Bihar,Patna,800001,300,100,20
2025-09-02,Bihar,Gaya,823001,200,50,10
2025-09-03,Goa,North Goa,403001,100,20,0
",
    )
    .unwrap();
    fs::write(
        dir.path().join("demographic_clean.csv"),
        "\
date,state,district,pincode,demo_age_5_17,demo_age_17_
2025-09-02,Goa,North Goa,403001,40,60
",
    )
    .unwrap();
    fs::write(
        dir.path().join("biometric_clean.csv"),
        "\
date,state,district,pincode,bio_age_5_17,bio_age_17_
2025-09-03,Bihar,Patna,800001,5,5
",
    )
    .unwrap();
    dir
}

fn uidai(data: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_uidai"))
        .arg("--data-dir")
        .arg(data)
        .args(args)
        .env_remove("UIDAI_TRAILING_WEEKS")
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute command")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

#[test]
fn test_json_metrics_envelope() {
    let dir = data_dir();
    let output = uidai(dir.path(), &["--json", "metrics"]);
    assert!(output.status.success(), "Command should succeed");

    let parsed = stdout_json(&output);
    assert_eq!(parsed["status"], "success");
    let data = &parsed["data"];
    assert_eq!(data["total_enrollments"], 800);
    assert_eq!(data["total_demographic_updates"], 100);
    assert_eq!(data["total_biometric_updates"], 10);
    assert_eq!(data["records_count"]["enrollment"], 3);
}

#[test]
fn test_json_trends_window() {
    let dir = data_dir();
    let output = uidai(dir.path(), &["trends", "--days", "2", "--json"]);
    assert!(output.status.success());

    let data = &stdout_json(&output)["data"];
    assert_eq!(data["dates"], serde_json::json!(["2025-09-02", "2025-09-03"]));
    assert_eq!(data["enrollment"], serde_json::json!([260, 120]));
    assert_eq!(data["biometric"], serde_json::json!([0, 10]));
}

#[test]
fn test_invalid_window_fails() {
    let dir = data_dir();
    let output = uidai(dir.path(), &["--json", "trends", "--days", "0"]);
    assert!(!output.status.success(), "Zero-day window should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\"status\": \"error\""));
    assert!(stderr.contains("days"));
}

#[test]
fn test_missing_data_dir_fails() {
    let dir = TempDir::new().unwrap();
    let output = uidai(&dir.path().join("absent"), &["metrics"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load datasets"));
}

#[test]
fn test_human_states_table() {
    let dir = data_dir();
    let output = uidai(dir.path(), &["states", "--all"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Bihar"));
    assert!(stdout.contains("IN-BR"));
    assert!(stdout.contains("IN-GA"));
}

#[test]
fn test_config_reports_cli_source() {
    let dir = data_dir();
    let output = uidai(dir.path(), &["--json", "--spike-multiple", "4", "config"]);
    assert!(output.status.success());

    let values = &stdout_json(&output)["data"]["values"];
    assert_eq!(values["spike_multiple_threshold"]["source"], "Cli");
    assert_eq!(values["spike_multiple_threshold"]["value"], "4");
    assert_eq!(values["trailing_weeks"]["source"], "Default");
}

#[test]
fn test_json_summary_has_all_sections() {
    let dir = data_dir();
    let output = uidai(dir.path(), &["--json", "summary"]);
    assert!(output.status.success());

    let data = &stdout_json(&output)["data"];
    assert_eq!(data["period"]["start"], "2025-09-01");
    assert_eq!(data["period"]["days"], 3);
    assert_eq!(data["top_states"][0]["state"], "Bihar");
    assert!(data["anomalies"].is_array());
    assert!(data["source"].as_str().unwrap().starts_with("csv:"));
}
