// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregator::totals_by_category;
use crate::config::Config;
use crate::store::{SqliteStore, TransactionStore};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let cfg = Config::for_matches(conn, sub)?;
            let txs = SqliteStore::new(conn).fetch_transactions(&cfg.user)?;
            let names: Vec<String> = totals_by_category(&txs).into_keys().collect();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &names)? {
                let data = names.into_iter().map(|n| vec![n]).collect();
                println!("{}", pretty_table(&["Category"], data));
            }
        }
        Some(("totals", sub)) => {
            let cfg = Config::for_matches(conn, sub)?;
            let txs = SqliteStore::new(conn).fetch_transactions(&cfg.user)?;
            let totals = totals_by_category(&txs);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &totals)? {
                let data = totals
                    .iter()
                    .map(|(cat, total)| vec![cat.clone(), fmt_money(total, &cfg.currency)])
                    .collect();
                println!("{}", pretty_table(&["Category", "Total"], data));
            }
        }
        _ => {}
    }
    Ok(())
}
