// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregator::{self, ProgressBand, Summary};
use crate::bucketer::Bucketer;
use crate::config::Config;
use crate::models::Bucket;
use crate::store::{SqliteStore, TransactionStore};
use crate::timeframe::TimeFrame;
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, now_or, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("top", sub)) => top(conn, sub)?,
        Some(("chart", sub)) => chart(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn build_summary(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<Summary> {
    let top_n = sub
        .try_get_one::<usize>("top")
        .ok()
        .flatten()
        .copied()
        .unwrap_or(cfg.top);
    let txs = SqliteStore::new(conn).fetch_transactions(&cfg.user)?;
    Ok(aggregator::summarize(&txs, top_n))
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let cfg = Config::for_matches(conn, sub)?;
    let s = build_summary(conn, &cfg, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let ccy = &cfg.currency;
    let band = match s.progress.band {
        ProgressBand::Healthy => "healthy",
        ProgressBand::Warning => "warning",
        ProgressBand::Critical => "critical",
    };
    let mut rows = vec![
        vec!["Current balance".into(), fmt_money(&s.balance, ccy)],
        vec!["Income".into(), fmt_money(&s.income, ccy)],
        vec!["Total spent".into(), fmt_money(&s.expenses, ccy)],
        vec!["Savings rate".into(), fmt_percent(&s.savings_rate)],
        vec![
            "Average savings per month".into(),
            fmt_money(&s.average_monthly_savings, ccy),
        ],
        vec![
            "Budget progress".into(),
            format!(
                "{:.2}/{:.2} ({}, {})",
                s.progress.amount.round_dp(2),
                s.progress.ceiling.round_dp(2),
                fmt_percent(&(s.progress.ratio * Decimal::ONE_HUNDRED)),
                band
            ),
        ],
    ];
    if !s.progress.over_budget.is_zero() {
        rows.push(vec![
            "Over budget by".into(),
            fmt_percent(&(s.progress.over_budget * Decimal::ONE_HUNDRED)),
        ]);
    }
    for (i, cat) in s.top_expenses.iter().enumerate() {
        rows.push(vec![format!("Biggest expense #{}", i + 1), cat.clone()]);
    }
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    Ok(())
}

fn top(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let cfg = Config::for_matches(conn, sub)?;
    let n = sub.get_one::<usize>("n").copied().unwrap_or(cfg.top);
    let txs = SqliteStore::new(conn).fetch_transactions(&cfg.user)?;
    let names = aggregator::top_expense_categories(&txs, n);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &names)? {
        let totals = aggregator::totals_by_category(&txs);
        let data = names
            .iter()
            .enumerate()
            .map(|(i, cat)| {
                let spent = aggregator::saturating_sum(
                    txs.iter()
                        .filter(|t| t.category == *cat && t.is_expense())
                        .map(|t| t.value),
                );
                vec![
                    (i + 1).to_string(),
                    cat.clone(),
                    fmt_money(&spent, &cfg.currency),
                    fmt_money(&totals[cat], &cfg.currency),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["#", "Category", "Spent", "Net"], data)
        );
    }
    Ok(())
}

/// Bucketed series for the chosen frame, optionally narrowed to a category.
pub fn chart_series(
    conn: &Connection,
    cfg: &Config,
    sub: &clap::ArgMatches,
) -> Result<(TimeFrame, Vec<Bucket>)> {
    let raw = sub.get_one::<String>("frame").map(String::as_str).unwrap_or("M");
    let frame: TimeFrame = raw.parse().map_err(|e: String| anyhow!(e))?;
    let now = now_or(sub.get_one::<String>("now"))?;
    let mut txs = SqliteStore::new(conn).fetch_transactions(&cfg.user)?;
    if let Some(cat) = sub.get_one::<String>("category") {
        txs.retain(|t| t.category == *cat);
    }
    let buckets = Bucketer::new(cfg.week_start).bucket(&txs, frame, now);
    tracing::debug!(frame = %frame, buckets = buckets.len(), "chart series built");
    Ok((frame, buckets))
}

fn chart(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let cfg = Config::for_matches(conn, sub)?;
    let (frame, buckets) = chart_series(conn, &cfg, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &buckets)? {
        return Ok(());
    }
    let widest = buckets
        .iter()
        .map(|b| b.total.abs())
        .max()
        .unwrap_or_default();
    let data = buckets
        .iter()
        .map(|b| {
            vec![
                frame.format_label(b.start),
                fmt_money(&b.total, &cfg.currency),
                bar(b.total, widest),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Period", "Total", ""], data));
    Ok(())
}

const BAR_WIDTH: u32 = 20;

fn bar(total: Decimal, widest: Decimal) -> String {
    if widest.is_zero() || total.is_zero() {
        return String::new();
    }
    let len = (total.abs() / widest * Decimal::from(BAR_WIDTH))
        .round()
        .max(Decimal::ONE)
        .to_usize()
        .unwrap_or(1);
    let glyph = if total.is_sign_negative() { "-" } else { "+" };
    glyph.repeat(len)
}
