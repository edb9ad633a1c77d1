// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::models::Transaction;
use crate::store::{SqliteStore, TransactionStore};
use crate::utils::{fmt_money, maybe_print_json, parse_timestamp, parse_value, pretty_table};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let cfg = Config::for_matches(conn, sub)?;
    let tx = build(&cfg, sub)?;
    let saved = SqliteStore::new(conn).create_transaction(tx)?;
    println!(
        "Recorded {} '{}' in {} on {}",
        fmt_money(&saved.value, &cfg.currency),
        saved.name,
        saved.category,
        saved.date.format("%Y-%m-%d %H:%M")
    );
    Ok(())
}

/// Turns `tx add` arguments into a validated transaction for the configured user.
pub fn build(cfg: &Config, sub: &clap::ArgMatches) -> Result<Transaction> {
    let name = sub.get_one::<String>("name").context("name missing")?;
    let category = sub.get_one::<String>("category").context("category missing")?;
    let raw_value = sub.get_one::<String>("value").context("value missing")?;
    let value = parse_value(raw_value)?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_timestamp(d)?,
        None => Utc::now(),
    };
    Ok(Transaction::new(
        cfg.user.clone(),
        name.trim(),
        category.trim(),
        value,
        date,
    ))
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let cfg = Config::for_matches(conn, sub)?;
    let data = query_rows(conn, &cfg, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.name.clone(),
                    r.category.clone(),
                    fmt_money(&r.value, &cfg.currency),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Name", "Category", "Value"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub name: String,
    pub category: String,
    pub value: rust_decimal::Decimal,
}

/// The user's transactions newest first, optionally for one category.
pub fn query_rows(
    conn: &Connection,
    cfg: &Config,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let mut txs = SqliteStore::new(conn).fetch_transactions(&cfg.user)?;
    if let Some(cat) = sub.get_one::<String>("category") {
        txs.retain(|t| t.category == *cat);
    }
    txs.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        txs.truncate(*limit);
    }
    Ok(txs
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id.to_string(),
            date: t.date.format("%Y-%m-%d %H:%M").to_string(),
            name: t.name,
            category: t.category,
            value: t.value,
        })
        .collect())
}
