// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Once;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::error::ValidationError;

static TRACING_INIT: Once = Once::new();

/// Installs the stderr fmt subscriber. Filter comes from `BUDGETEER_LOG`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_env("BUDGETEER_LOG")
            .unwrap_or_else(|_| EnvFilter::new("budgeteer=warn"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    });
}

/// Largest accepted amount magnitude (10^15). Keeps every reduction far from
/// `Decimal::MAX`.
pub const MAX_ABS_VALUE: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Rejects amounts whose magnitude exceeds [`MAX_ABS_VALUE`].
pub fn check_value(d: Decimal) -> Result<Decimal, ValidationError> {
    if d.abs() > MAX_ABS_VALUE {
        return Err(ValidationError::Value(d.to_string()));
    }
    Ok(d)
}

pub fn parse_value(s: &str) -> Result<Decimal, ValidationError> {
    let t = s.trim();
    let d = t
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(t))
        .map_err(|_| ValidationError::Value(s.to_string()))?;
    check_value(d).map_err(|_| ValidationError::Value(s.to_string()))
}

/// Floats reach us from JSON clients; NaN and infinities are refused, never zeroed.
pub fn value_from_f64(v: f64) -> Result<Decimal, ValidationError> {
    if !v.is_finite() {
        return Err(ValidationError::Value(v.to_string()));
    }
    Decimal::try_from(v)
        .ok()
        .and_then(|d| check_value(d).ok())
        .ok_or_else(|| ValidationError::Value(v.to_string()))
}

pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, ValidationError> {
    let t = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(t, fmt) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(t, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| ValidationError::Date(s.to_string()))
}

/// Reference instant for windowed reports: `--now` when given, else the clock.
pub fn now_or(arg: Option<&String>) -> Result<DateTime<Utc>> {
    match arg {
        Some(s) => parse_timestamp(s).with_context(|| format!("Invalid --now '{}'", s)),
        None => Ok(Utc::now()),
    }
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{:.2} {}", d.round_dp(2), ccy)
}

pub fn fmt_percent(d: &Decimal) -> String {
    format!("{:.1}%", d.round_dp(1))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
