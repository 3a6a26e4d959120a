#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const CONFIG: &str = r#"{
  "staff": ["佐藤", "鈴木", "田中", "高橋", "伊藤"],
  "individual_rules": ["佐藤は土日休み", "田中は週3回まで"]
}"#;

#[test]
fn generate_then_recover() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("touban.json");
    let requests = dir.path().join("requests.csv");
    let table = dir.path().join("table.md");
    let counts = dir.path().join("counts.csv");
    fs::write(&config, CONFIG).unwrap();
    fs::write(&requests, "staff,request_text\n鈴木,\"5日休み、6日夜勤\"\n").unwrap();

    Command::cargo_bin("touban-cli")
        .unwrap()
        .args(["generate", "--month", "2026年4月"])
        .arg("--config")
        .arg(&config)
        .arg("--requests")
        .arg(&requests)
        .arg("--out-table")
        .arg(&table)
        .arg("--out-counts")
        .arg(&counts)
        .assert()
        .success();

    let table_text = fs::read_to_string(&table).unwrap();
    assert!(table_text.starts_with("| 日付 | 曜 | 早番 | 日勤 | 準夜 | 夜勤 |"));
    assert_eq!(table_text.lines().count(), 2 + 30);
    assert!(fs::read_to_string(&counts)
        .unwrap()
        .starts_with("スタッフ,早番,日勤,準夜,夜勤,合計\n佐藤,"));

    Command::cargo_bin("touban-cli")
        .unwrap()
        .arg("recover")
        .arg("--table")
        .arg(&table)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("スタッフ,早番,日勤,準夜,夜勤,合計"));

    Command::cargo_bin("touban-cli")
        .unwrap()
        .args(["check", "--month", "2026年4月"])
        .arg("--config")
        .arg(&config)
        .arg("--requests")
        .arg(&requests)
        .arg("--table")
        .arg(&table)
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: no conflicts"));
}

#[test]
fn check_flags_hand_edits_with_exit_code_2() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("touban.json");
    let table = dir.path().join("table.md");
    fs::write(&config, CONFIG).unwrap();
    // 2026-04-04 est un samedi ; 佐藤 ne travaille pas le week-end
    fs::write(
        &table,
        "| 日付 | 曜 | 早番 | 日勤 | 準夜 | 夜勤 |\n|---|---|---|---|---|---|\n| 4/4 | 土 | 佐藤 |  | 鈴木 | 鈴木 |\n",
    )
    .unwrap();

    Command::cargo_bin("touban-cli")
        .unwrap()
        .args(["check", "--month", "2026年4月"])
        .arg("--config")
        .arg(&config)
        .arg("--table")
        .arg(&table)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Found 2 conflict(s)"))
        .stderr(predicate::str::contains("weekend off"));
}

#[test]
fn status_lists_missing_requests() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("touban.json");
    let requests = dir.path().join("requests.csv");
    fs::write(&config, CONFIG).unwrap();
    fs::write(&requests, "staff,request_text\n鈴木,5日休み\n田中,8日出張\n").unwrap();

    Command::cargo_bin("touban-cli")
        .unwrap()
        .args(["status", "--month", "2026年4月"])
        .arg("--config")
        .arg(&config)
        .arg("--requests")
        .arg(&requests)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "2026年4月: missing requests from 佐藤、高橋、伊藤",
        ));
}

#[test]
fn unreadable_month_is_an_error() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("touban.json");
    fs::write(&config, CONFIG).unwrap();

    Command::cargo_bin("touban-cli")
        .unwrap()
        .args(["generate", "--month", "April 2026"])
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid target month"));
}

#[test]
fn init_writes_a_loadable_config() {
    let dir = tempdir().unwrap();
    let staff = dir.path().join("staff.txt");
    let rules = dir.path().join("rules.txt");
    let out = dir.path().join("touban.json");
    fs::write(&staff, "佐藤、鈴木\n田中\n").unwrap();
    fs::write(&rules, "佐藤は土日休み\n\n田中は夜勤のみ\n").unwrap();

    Command::cargo_bin("touban-cli")
        .unwrap()
        .arg("init")
        .arg("--staff")
        .arg(&staff)
        .arg("--rules")
        .arg(&rules)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("(3 staff)"));

    let config = touban::RosterConfig::load(&out).unwrap();
    assert_eq!(config.staff, vec!["佐藤", "鈴木", "田中"]);
    assert_eq!(config.individual_rules.len(), 2);
}

#[test]
fn check_refuses_a_table_from_another_month() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("touban.json");
    let table = dir.path().join("table.md");
    fs::write(&config, CONFIG).unwrap();
    fs::write(
        &table,
        "| 日付 | 曜 | 早番 | 日勤 | 準夜 | 夜勤 |\n|---|---|---|---|---|---|\n| 5/1 | 金 | 鈴木 | 田中 | 高橋 | 伊藤 |\n",
    )
    .unwrap();

    Command::cargo_bin("touban-cli")
        .unwrap()
        .args(["check", "--month", "2026年4月"])
        .arg("--config")
        .arg(&config)
        .arg("--table")
        .arg(&table)
        .assert()
        .failure()
        .stderr(predicate::str::contains("has dates for month 5, expected 2026年4月"));
}
