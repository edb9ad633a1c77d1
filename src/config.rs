// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::Weekday;
use rusqlite::Connection;
use serde::Serialize;

use crate::db::{get_setting, set_setting};
use crate::timeframe::parse_weekday;

pub const KEYS: [&str; 4] = ["user", "currency", "week_start", "top"];

const DEFAULT_USER: &str = "local";
const DEFAULT_CURRENCY: &str = "CAD";
const DEFAULT_TOP: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub user: String,
    pub currency: String,
    pub week_start: Weekday,
    pub top: usize,
}

impl Config {
    /// Stored settings over defaults; `BUDGETEER_USER` beats the stored user.
    pub fn load(conn: &Connection) -> Result<Config> {
        let user = match std::env::var("BUDGETEER_USER") {
            Ok(u) if !u.trim().is_empty() => u.trim().to_string(),
            _ => get_setting(conn, "user")?.unwrap_or_else(|| DEFAULT_USER.to_string()),
        };
        let currency =
            get_setting(conn, "currency")?.unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        let week_start = match get_setting(conn, "week_start")? {
            Some(s) => parse_weekday(&s).map_err(|e| anyhow!(e))?,
            None => Weekday::Mon,
        };
        let top = match get_setting(conn, "top")? {
            Some(s) => s
                .parse::<usize>()
                .map_err(|_| anyhow!("Invalid stored setting top='{}'", s))?,
            None => DEFAULT_TOP,
        };
        Ok(Config {
            user,
            currency,
            week_start,
            top,
        })
    }

    /// Config with the `--user` flag applied when present.
    pub fn for_matches(conn: &Connection, m: &clap::ArgMatches) -> Result<Config> {
        let mut cfg = Config::load(conn)?;
        if let Ok(Some(u)) = m.try_get_one::<String>("user") {
            let u = u.trim();
            if u.is_empty() {
                return Err(anyhow!("--user must not be empty"));
            }
            cfg.user = u.to_string();
        }
        Ok(cfg)
    }
}

/// Validates then persists one setting.
pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    let value = value.trim();
    match key {
        "user" if value.is_empty() => return Err(anyhow!("user must not be empty")),
        "currency" if value.is_empty() => return Err(anyhow!("currency must not be empty")),
        "week_start" => {
            parse_weekday(value).map_err(|e| anyhow!(e))?;
        }
        "top" => {
            value
                .parse::<usize>()
                .map_err(|_| anyhow!("top must be a non-negative integer, got '{}'", value))?;
        }
        "user" | "currency" => {}
        other => {
            return Err(anyhow!(
                "Unknown setting '{}', expected one of {}",
                other,
                KEYS.join(", ")
            ));
        }
    }
    let stored = if key == "currency" {
        value.to_uppercase()
    } else if key == "week_start" {
        value.to_lowercase()
    } else {
        value.to_string()
    };
    set_setting(conn, key, &stored)?;
    tracing::info!(key, value = %stored, "setting updated");
    Ok(())
}
