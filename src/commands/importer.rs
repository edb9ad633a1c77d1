// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::models::Transaction;
use crate::store::{SqliteStore, TransactionStore};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(conn, sub),
        _ => Ok(()),
    }
}

/// Expects a header row then `date,name,category,value[,user]`.
/// Any invalid row aborts the import and nothing is written.
fn import_transactions(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let cfg = Config::for_matches(conn, sub)?;
    let path = sub.get_one::<String>("path").context("path missing")?.trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.transaction()?;
    let mut count = 0usize;
    {
        let store = SqliteStore::new(&tx);
        for (i, result) in rdr.records().enumerate() {
            // header is line 1
            let line = i + 2;
            let rec = result?;
            let date_raw = rec.get(0).context("date missing")?;
            let name = rec.get(1).context("name missing")?;
            let category = rec.get(2).context("category missing")?;
            let value_raw = rec.get(3).context("value missing")?;
            let user = rec
                .get(4)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(cfg.user.as_str());

            let parsed = Transaction::parse(user, name, category, value_raw, date_raw)
                .with_context(|| format!("Invalid record on line {} of {}", line, path))?;
            store.create_transaction(parsed)?;
            count += 1;
        }
    }
    tx.commit()?;
    tracing::info!(path, count, "import committed");
    println!("Imported {} transactions from {}", count, path);
    Ok(())
}
