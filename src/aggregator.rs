// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Whole-list reductions behind the home and overview screens.
//!
//! Every function here is pure and total: the empty list yields zeros, and the
//! result does not depend on input order. Sums saturate at the `Decimal` range
//! instead of panicking; validated amounts never get close to it.

use std::collections::{BTreeMap, HashMap};

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Transaction;
use crate::timeframe::Granularity;

const HEALTHY_THRESHOLD: Decimal = Decimal::from_parts(7, 0, 0, false, 1);
const WARNING_THRESHOLD: Decimal = Decimal::from_parts(4, 0, 0, false, 1);

/// Overflow-free sum, clamped to `Decimal::MIN..=Decimal::MAX`.
pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

pub fn total_balance(transactions: &[Transaction]) -> Decimal {
    saturating_sum(transactions.iter().map(|t| t.value))
}

/// One entry per category present in the input; absent categories are not zero-filled.
pub fn totals_by_category(transactions: &[Transaction]) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for t in transactions {
        let total = totals.entry(t.category.clone()).or_insert(Decimal::ZERO);
        *total = total.saturating_add(t.value);
    }
    totals
}

pub fn total_expenses(transactions: &[Transaction]) -> Decimal {
    saturating_sum(
        transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.value),
    )
}

/// Sum of positive entries, the denominator of the progress gauge.
pub fn budget_ceiling(transactions: &[Transaction]) -> Decimal {
    saturating_sum(transactions.iter().filter(|t| t.is_income()).map(|t| t.value))
}

/// Categories with the largest spend first; ties resolve by name.
pub fn top_expense_categories(transactions: &[Transaction], n: usize) -> Vec<String> {
    let mut spent: HashMap<&str, Decimal> = HashMap::new();
    for t in transactions.iter().filter(|t| t.is_expense()) {
        let total = spent.entry(t.category.as_str()).or_insert(Decimal::ZERO);
        *total = total.saturating_add(t.value);
    }
    let mut items: Vec<_> = spent.into_iter().collect();
    items.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    items
        .into_iter()
        .take(n)
        .map(|(cat, _)| cat.to_string())
        .collect()
}

/// Net balance as a percentage of income. Zero when there is no income; a rate
/// too large to represent saturates toward the sign of the balance.
pub fn savings_rate(transactions: &[Transaction]) -> Decimal {
    let income = budget_ceiling(transactions);
    if income.is_zero() {
        return Decimal::ZERO;
    }
    let balance = total_balance(transactions);
    balance
        .checked_div(income)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if balance.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

/// Mean net per calendar month that has at least one transaction.
pub fn average_monthly_savings(transactions: &[Transaction]) -> Decimal {
    let mut months: BTreeMap<_, Decimal> = BTreeMap::new();
    for t in transactions {
        let month = Granularity::Month.truncate(t.date, Weekday::Mon);
        let total = months.entry(month).or_insert(Decimal::ZERO);
        *total = total.saturating_add(t.value);
    }
    if months.is_empty() {
        return Decimal::ZERO;
    }
    saturating_sum(months.values().copied()) / Decimal::from(months.len())
}

/// Fill fraction of the gauge, clamped to `[0, 1]`. A zero ceiling reads as 0%.
pub fn progress_ratio(amount: Decimal, ceiling: Decimal) -> Decimal {
    if ceiling <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    match amount.checked_div(ceiling) {
        Some(r) => r.clamp(Decimal::ZERO, Decimal::ONE),
        None if amount.is_sign_positive() => Decimal::ONE,
        None => Decimal::ZERO,
    }
}

/// How far past the ceiling `amount` runs, as a fraction capped at 1.
pub fn over_budget_ratio(amount: Decimal, ceiling: Decimal) -> Decimal {
    if ceiling <= Decimal::ZERO || amount <= ceiling {
        return Decimal::ZERO;
    }
    (amount - ceiling)
        .checked_div(ceiling)
        .map_or(Decimal::ONE, |r| r.min(Decimal::ONE))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressBand {
    Healthy,
    Warning,
    Critical,
}

impl ProgressBand {
    pub fn for_ratio(ratio: Decimal) -> Self {
        if ratio >= HEALTHY_THRESHOLD {
            ProgressBand::Healthy
        } else if ratio >= WARNING_THRESHOLD {
            ProgressBand::Warning
        } else {
            ProgressBand::Critical
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub amount: Decimal,
    pub ceiling: Decimal,
    pub ratio: Decimal,
    pub over_budget: Decimal,
    pub band: ProgressBand,
}

impl Progress {
    pub fn new(amount: Decimal, ceiling: Decimal) -> Self {
        let ratio = progress_ratio(amount, ceiling);
        Progress {
            amount,
            ceiling,
            ratio,
            over_budget: over_budget_ratio(amount, ceiling),
            band: ProgressBand::for_ratio(ratio),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub balance: Decimal,
    pub income: Decimal,
    pub expenses: Decimal,
    pub savings_rate: Decimal,
    pub average_monthly_savings: Decimal,
    pub top_expenses: Vec<String>,
    pub by_category: BTreeMap<String, Decimal>,
    pub progress: Progress,
}

/// Everything the overview needs in one pass over the snapshot.
pub fn summarize(transactions: &[Transaction], top_n: usize) -> Summary {
    let balance = total_balance(transactions);
    let income = budget_ceiling(transactions);
    Summary {
        balance,
        income,
        expenses: total_expenses(transactions),
        savings_rate: savings_rate(transactions),
        average_monthly_savings: average_monthly_savings(transactions),
        top_expenses: top_expense_categories(transactions, top_n),
        by_category: totals_by_category(transactions),
        progress: Progress::new(balance, income),
    }
}
