//! CLI integration tests for the psa binary

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Helper function to create a test command
fn create_test_cmd() -> Command {
    let mut cmd = Command::cargo_bin("psa").unwrap();
    // Keep host environment variables out of the configuration
    cmd.env_remove("PSA_SEASON")
        .env_remove("PSA_DATA_DIR")
        .env_remove("PSA_SESSIONS")
        .env_remove("PSA_THRESHOLD_FACTOR");
    cmd
}

/// Minimal one-event archive where FP2 matches the final order
fn write_archive() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let season = dir.path().join("2024");
    fs::create_dir_all(&season).unwrap();

    fs::write(
        season.join("schedule.json"),
        r#"[{"round": 1, "name": "Bahrain Grand Prix"}]"#,
    )
    .unwrap();
    write_session(
        &season,
        "01-fp2.json",
        r#"{"laps": [
            {"driver": "VER", "time_ms": 91000},
            {"driver": "HAM", "time_ms": 91400},
            {"driver": "LEC", "time_ms": 91900}
        ]}"#,
    );
    write_session(
        &season,
        "01-q.json",
        r#"{"laps": [
            {"driver": "VER", "time_ms": 90000},
            {"driver": "HAM", "time_ms": 90300},
            {"driver": "LEC", "time_ms": 90700}
        ], "results": ["VER", "HAM", "LEC"]}"#,
    );
    write_session(&season, "01-r.json", r#"{"results": ["VER", "HAM", "LEC"]}"#);

    dir
}

fn write_session(season: &Path, file: &str, body: &str) {
    fs::write(season.join(file), body).unwrap();
}

#[test]
fn test_help_describes_the_tool() {
    create_test_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--season"))
        .stdout(predicate::str::contains("--data-dir"))
        .stdout(predicate::str::contains("--threshold-factor"));
}

#[test]
fn test_missing_required_arguments_fail() {
    create_test_cmd().assert().failure();
}

#[test]
fn test_full_run_reports_most_predictive_session() {
    let dir = write_archive();

    create_test_cmd()
        .arg("--season")
        .arg("2024")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--sessions")
        .arg("FP2")
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bahrain Grand Prix"))
        .stdout(predicate::str::contains("Average correlations"))
        .stdout(predicate::str::contains("Most predictive session of 2024: FP2"));
}

#[test]
fn test_conflicting_color_flags_fail() {
    let dir = write_archive();

    create_test_cmd()
        .arg("--season")
        .arg("2024")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--color")
        .arg("--no-color")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--no-color"));
}

#[test]
fn test_unknown_session_code_fails() {
    let dir = write_archive();

    create_test_cmd()
        .arg("--season")
        .arg("2024")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--sessions")
        .arg("FP1,FP9")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("FP9"));
}

#[test]
fn test_race_as_predictor_fails() {
    let dir = write_archive();

    create_test_cmd()
        .arg("--season")
        .arg("2024")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--sessions")
        .arg("R")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("reference"));
}

#[test]
fn test_missing_archive_directory_fails() {
    create_test_cmd()
        .arg("--season")
        .arg("2024")
        .arg("--data-dir")
        .arg("/definitely/not/there")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_season_without_any_data_exits_with_stats_code() {
    let dir = write_archive();
    // Remove the race so the only event loses its reference
    fs::remove_file(dir.path().join("2024/01-r.json")).unwrap();

    create_test_cmd()
        .arg("--season")
        .arg("2024")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--sessions")
        .arg("FP2")
        .assert()
        .failure()
        .code(6)
        .stderr(predicate::str::contains("no correlation data"));
}

#[test]
fn test_export_writes_json_report() {
    let dir = write_archive();
    let export = dir.path().join("report.json");

    create_test_cmd()
        .arg("--season")
        .arg("2024")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--sessions")
        .arg("FP2")
        .arg("--export")
        .arg(&export)
        .assert()
        .success();

    let raw = fs::read_to_string(&export).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["season"], 2024);
    assert_eq!(value["most_predictive"], "FP2");
}

#[test]
fn test_chart_renders_fastest_laps() {
    let dir = write_archive();

    create_test_cmd()
        .arg("--season")
        .arg("2024")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--sessions")
        .arg("FP2")
        .arg("--chart")
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bahrain Grand Prix 2024 Free Practice 2"))
        .stdout(predicate::str::contains("Fastest Lap: 1:31.000 (VER)"));
}

#[test]
fn test_verbose_announces_the_run() {
    let dir = write_archive();

    create_test_cmd()
        .arg("--season")
        .arg("2024")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--sessions")
        .arg("FP2")
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("Analyzing season 2024"));
}
