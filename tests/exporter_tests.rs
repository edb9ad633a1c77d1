// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgeteer::models::Transaction;
use budgeteer::store::{SqliteStore, TransactionStore};
use budgeteer::{cli, commands::exporter, db};
use chrono::{TimeZone, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn seeded_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let store = SqliteStore::new(&conn);
    store
        .create_transaction(Transaction::new(
            "alice",
            "Corner Shop",
            "Groceries",
            Decimal::new(-1234, 2),
            Utc.with_ymd_and_hms(2025, 1, 2, 10, 0, 0).unwrap(),
        ))
        .unwrap();
    store
        .create_transaction(Transaction::new(
            "bob",
            "Other",
            "Groceries",
            Decimal::new(-1, 0),
            Utc.with_ymd_and_hms(2025, 1, 2, 10, 0, 0).unwrap(),
        ))
        .unwrap();
    conn
}

fn run_export(conn: &Connection, format: &str, out: &str) {
    let matches = cli::build_cli().get_matches_from([
        "budgeteer",
        "--user",
        "alice",
        "export",
        "transactions",
        "--format",
        format,
        "--out",
        out,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(conn, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_transactions_writes_pretty_json() {
    let conn = seeded_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    run_export(&conn, "json", out_path.to_str().unwrap());

    let body = std::fs::read_to_string(&out_path).unwrap();
    let items: serde_json::Value = serde_json::from_str(&body).unwrap();
    let arr = items.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["name"], "Corner Shop");
    assert_eq!(arr[0]["value"], "-12.34");
    assert_eq!(arr[0]["user_id"], "alice");
}

#[test]
fn export_transactions_writes_csv_with_header() {
    let conn = seeded_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    run_export(&conn, "csv", out_path.to_str().unwrap());

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[0], "date");
    let records: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 1);
    assert_eq!(&records[0][1], "Corner Shop");
    assert_eq!(&records[0][3], "-12.34");
}
