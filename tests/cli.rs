//! End-to-end tests of the `trendline` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use trendline::models::{
    Category, CategoryId, MonthlyRecord, Subcategory, SubcategoryId, YearMonth,
};
use trendline::store::{LedgerSnapshot, SqliteStore};

fn record(month: &str, sub: i64, amount: f64) -> MonthlyRecord {
    MonthlyRecord::new(YearMonth::parse(month).unwrap(), SubcategoryId::new(sub), amount)
}

fn snapshot() -> LedgerSnapshot {
    LedgerSnapshot {
        categories: vec![
            Category::new(CategoryId::new(1), "Vivienda"),
            Category::new(CategoryId::new(2), "Nómina"),
            Category::new(CategoryId::new(-2), "Saldo inicial"),
        ],
        subcategories: vec![
            Subcategory::new(SubcategoryId::new(10), CategoryId::new(1), "Alquiler"),
            Subcategory::new(SubcategoryId::new(11), CategoryId::new(1), "Luz"),
            Subcategory::new(SubcategoryId::new(20), CategoryId::new(2), "Empresa"),
            Subcategory::new(SubcategoryId::new(99), CategoryId::new(-2), "Saldo inicial"),
        ],
        records: vec![
            record("2022-12", 99, 5000.0),
            record("2023-01", 10, -700.0),
            record("2023-01", 11, -45.5),
            record("2023-01", 20, 2100.0),
            record("2023-02", 10, -700.0),
            record("2023-02", 11, -60.25),
            record("2023-02", 20, 2100.0),
            record("2023-04", 10, -720.0),
            record("2023-04", 20, 2250.75),
        ],
    }
}

fn ledger(temp_dir: &TempDir) -> PathBuf {
    let path = temp_dir.path().join("ledger.sqlite");
    SqliteStore::create(&path, &snapshot()).unwrap();
    path
}

fn trendline(temp_dir: &TempDir, db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("trendline").unwrap();
    cmd.env("TRENDLINE_DATA_DIR", temp_dir.path().join("config"))
        .env_remove("TRENDLINE_DB")
        .env_remove("RUST_LOG")
        .arg("--db")
        .arg(db);
    cmd
}

#[test]
fn report_json_covers_default_range() {
    let temp_dir = TempDir::new().unwrap();
    let db = ledger(&temp_dir);

    let output = trendline(&temp_dir, &db)
        .args(["report", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let export: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let report = &export["report"];
    assert_eq!(report["months"], 4);
    assert_eq!(report["granularity"], "month");
    assert_eq!(report["table"].as_array().unwrap().len(), 4);
    assert_eq!(report["chart"]["labels"][0], "2023-01");
    assert_eq!(report["chart"]["scale"]["step_size"], 1000);
}

#[test]
fn report_terminal_shows_summary_and_table() {
    let temp_dir = TempDir::new().unwrap();
    let db = ledger(&temp_dir);

    trendline(&temp_dir, &db)
        .args(["report", "--category", "Vivienda"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vivienda"))
        .stdout(predicate::str::contains("Alquiler"))
        .stdout(predicate::str::contains("Axis step"));
}

#[test]
fn report_hidden_series_drop_to_plain_ticks() {
    let temp_dir = TempDir::new().unwrap();
    let db = ledger(&temp_dir);
    let chart = temp_dir.path().join("chart.json");

    trendline(&temp_dir, &db)
        .args(["report", "--format", "csv", "--hide", "income", "--hide", "savings"])
        .arg("--chart")
        .arg(&chart)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("label,expenses,income,savings"))
        .stdout(predicate::str::contains("Chart written to:"));

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&chart).unwrap()).unwrap();
    assert!(written["scale"]["step_size"].is_null());
}

#[test]
fn report_rejects_invalid_month() {
    let temp_dir = TempDir::new().unwrap();
    let db = ledger(&temp_dir);

    trendline(&temp_dir, &db)
        .args(["report", "--start", "2023-13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid range"));
}

#[test]
fn report_rejects_unknown_category() {
    let temp_dir = TempDir::new().unwrap();
    let db = ledger(&temp_dir);

    trendline(&temp_dir, &db)
        .args(["report", "--category", "Viajes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn categories_lists_tree_without_initial_balance() {
    let temp_dir = TempDir::new().unwrap();
    let db = ledger(&temp_dir);

    trendline(&temp_dir, &db)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vivienda"))
        .stdout(predicate::str::contains("Luz"))
        .stdout(predicate::str::contains("Saldo inicial").not());
}

#[test]
fn bounds_skip_initial_balance_month() {
    let temp_dir = TempDir::new().unwrap();
    let db = ledger(&temp_dir);

    trendline(&temp_dir, &db)
        .arg("bounds")
        .assert()
        .success()
        .stdout(predicate::str::contains("First month:   2022-12"))
        .stdout(predicate::str::contains("Last month:    2023-04"))
        .stdout(predicate::str::contains("Default range: 2023-01..2023-04"));
}

#[test]
fn config_shows_paths() {
    let temp_dir = TempDir::new().unwrap();
    let db = ledger(&temp_dir);

    trendline(&temp_dir, &db)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Trendline Configuration"))
        .stdout(predicate::str::contains("ledger.sqlite"));
}

#[test]
fn missing_ledger_fails() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("absent.sqlite");

    trendline(&temp_dir, &db)
        .arg("bounds")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
