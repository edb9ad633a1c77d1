// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::query::{series_from_json, summary_from_json};
use anyhow::{Context, Result};
use std::io::Read;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("series", sub)) => {
            let body = read_input(sub)?;
            let resp = series_from_json(&body)?;
            println!("{}", serde_json::to_string_pretty(&resp)?);
        }
        Some(("summary", sub)) => {
            let body = read_input(sub)?;
            let resp = summary_from_json(&body)?;
            println!("{}", serde_json::to_string_pretty(&resp)?);
        }
        _ => {}
    }
    Ok(())
}

fn read_input(sub: &clap::ArgMatches) -> Result<String> {
    let input = sub
        .get_one::<String>("input")
        .map(String::as_str)
        .unwrap_or("-");
    if input == "-" {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("Read request from stdin")?;
        Ok(body)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Read request {}", input))
    }
}
