// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::store::{SqliteStore, TransactionStore};
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let cfg = Config::for_matches(conn, sub)?;
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "csv".into());
    let out = sub.get_one::<String>("out").context("out missing")?;

    let txs = SqliteStore::new(conn).fetch_transactions(&cfg.user)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "name", "category", "value", "user", "id"])?;
            for t in &txs {
                wtr.write_record([
                    t.date.to_rfc3339(),
                    t.name.clone(),
                    t.category.clone(),
                    t.value.to_string(),
                    t.user_id.clone(),
                    t.id.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = txs
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id, "user_id": t.user_id, "name": t.name,
                        "category": t.category, "value": t.value.to_string(), "date": t.date
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write {}", out))?;
        }
        other => return Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
    println!("Exported {} transactions to {}", txs.len(), out);
    Ok(())
}
