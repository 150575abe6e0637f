#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Write a replay file with one duplicate and one invalid round.
fn replay_file() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("rounds.json"),
        r#"[
    {"session": 1001, "dice": [6, 5, 4]},
    {"session": 1002, "dice": [1, 2, 3]},
    {"session": 1002, "dice": [1, 2, 3]},
    {"session": 1003, "dice": [7, 1, 1]},
    {"session": 1004, "dice": [6, 6, 1]}
]
"#,
    )
    .unwrap();
    dir
}

fn hilo() -> Command {
    Command::cargo_bin("hilo").unwrap()
}

// ---------------------------------------------------------------------------
// predict
// ---------------------------------------------------------------------------

#[test]
fn predict_from_sequence() {
    hilo()
        .args(["predict", "HHHLHHHL"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("High")
                .and(predicate::str::contains("50.00%"))
                .and(predicate::str::contains("Markov chain predicts")),
        );
}

#[test]
fn predict_accepts_alternate_codes() {
    hilo()
        .args(["predict", "T X T"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Next:"));
}

#[test]
fn predict_cold_start() {
    hilo()
        .args(["predict", ""])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("15.00%")
                .and(predicate::str::contains("Initial prediction: theoretical balance.")),
        );
}

#[test]
fn predict_json_output() {
    let output = hilo()
        .args(["predict", "HHHLHHHL", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["label"], "High");
    assert_eq!(json["confidence"], 50.0);
    assert_eq!(json["last_state"], "Low");
}

#[test]
fn predict_rejects_unknown_code() {
    hilo()
        .args(["predict", "HHZ"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid label code"));
}

// ---------------------------------------------------------------------------
// replay
// ---------------------------------------------------------------------------

#[test]
fn replay_prints_records_and_summary() {
    let dir = replay_file();
    hilo()
        .args(["replay", dir.path().join("rounds.json").to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("1004")
                .and(predicate::str::contains("3 applied, 1 duplicates, 1 rejected"))
                .and(predicate::str::contains("session 1005")),
        )
        .stderr(predicate::str::contains("entry 3"));
}

#[test]
fn replay_respects_capacity() {
    let dir = replay_file();
    hilo()
        .args([
            "replay",
            dir.path().join("rounds.json").to_str().unwrap(),
            "--variant",
            "md5",
            "--capacity",
            "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("(taixiumd5, 2 kept)"));
}

#[test]
fn replay_empty_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.json");
    fs::write(&path, "[]").unwrap();
    hilo()
        .args(["replay", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No rounds applied."));
}

#[test]
fn replay_fails_unknown_variant() {
    let dir = replay_file();
    hilo()
        .args([
            "replay",
            dir.path().join("rounds.json").to_str().unwrap(),
            "--variant",
            "roulette",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown variant"));
}

#[test]
fn replay_fails_missing_file() {
    let dir = TempDir::new().unwrap();
    hilo()
        .args(["replay", dir.path().join("nope.json").to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn replay_fails_malformed_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"session": 1}"#).unwrap();
    hilo()
        .args(["replay", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid replay file"));
}

// ---------------------------------------------------------------------------
// serve
// ---------------------------------------------------------------------------

#[test]
fn serve_help_lists_flags() {
    hilo()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--poll-interval")
                .and(predicate::str::contains("--upstream"))
                .and(predicate::str::contains("PORT")),
        );
}

#[test]
fn serve_rejects_bad_port() {
    hilo()
        .args(["serve", "--port", "notaport"])
        .assert()
        .failure();
}
