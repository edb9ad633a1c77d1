// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{self, Config};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let cfg = Config::for_matches(conn, sub)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cfg)? {
                let data = vec![
                    vec!["user".into(), cfg.user.clone()],
                    vec!["currency".into(), cfg.currency.clone()],
                    vec!["week_start".into(), cfg.week_start.to_string()],
                    vec!["top".into(), cfg.top.to_string()],
                ];
                println!("{}", pretty_table(&["Setting", "Value"], data));
            }
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").context("key missing")?;
            let value = sub.get_one::<String>("value").context("value missing")?;
            config::set(conn, key, value)?;
            println!("Set {} = {}", key, value.trim());
        }
        _ => {}
    }
    Ok(())
}
