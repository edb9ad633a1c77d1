// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgeteer::aggregator::{
    ProgressBand, budget_ceiling, average_monthly_savings, over_budget_ratio, progress_ratio,
    savings_rate, summarize, top_expense_categories, total_balance, total_expenses,
    totals_by_category,
};
use budgeteer::models::Transaction;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use rust_decimal::Decimal;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 12, 14, 0, 0).unwrap()
}

fn tx(category: &str, value: &str, date: DateTime<Utc>) -> Transaction {
    Transaction::new("u1", category, category, value.parse().unwrap(), date)
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn home_screen() -> Vec<Transaction> {
    vec![
        tx("Pay check", "768.89", t0()),
        tx("Groceries", "-126.78", t0()),
        tx("Snacks", "-8.48", t0()),
        tx("OPUS", "-60", t0()),
        tx("Rent", "-600", t0()),
    ]
}

#[test]
fn scenario_balance_and_category_totals() {
    let txs = vec![
        tx("salary", "100", t0()),
        tx("food", "-30", t0()),
        tx("food", "-10", t0() - TimeDelta::hours(1)),
    ];
    assert_eq!(total_balance(&txs), dec("60"));
    let totals = totals_by_category(&txs);
    assert_eq!(totals.len(), 2);
    assert_eq!(totals["food"], dec("-40"));
    assert_eq!(totals["salary"], dec("100"));
}

#[test]
fn empty_input_reduces_to_zero() {
    assert_eq!(total_balance(&[]), Decimal::ZERO);
    assert!(totals_by_category(&[]).is_empty());
    assert_eq!(total_expenses(&[]), Decimal::ZERO);
    assert_eq!(budget_ceiling(&[]), Decimal::ZERO);
    assert!(top_expense_categories(&[], 3).is_empty());
    assert_eq!(savings_rate(&[]), Decimal::ZERO);
    assert_eq!(average_monthly_savings(&[]), Decimal::ZERO);
}

#[test]
fn reductions_ignore_input_order() {
    let txs = home_screen();
    let mut reversed = txs.clone();
    reversed.reverse();
    let mut rotated = txs.clone();
    rotated.rotate_left(2);
    for other in [&reversed, &rotated] {
        assert_eq!(total_balance(&txs), total_balance(other));
        assert_eq!(totals_by_category(&txs), totals_by_category(other));
        assert_eq!(
            top_expense_categories(&txs, 5),
            top_expense_categories(other, 5)
        );
    }
}

#[test]
fn category_keys_come_from_the_input_only() {
    let txs = home_screen();
    let totals = totals_by_category(&txs);
    for key in totals.keys() {
        assert!(txs.iter().any(|t| &t.category == key));
    }
    assert_eq!(totals.len(), 5);
}

#[test]
fn expenses_and_ceiling_split_by_sign() {
    let txs = home_screen();
    assert_eq!(total_expenses(&txs), dec("-795.26"));
    assert_eq!(budget_ceiling(&txs), dec("768.89"));
    assert_eq!(total_balance(&txs), dec("-26.37"));
}

#[test]
fn top_expenses_order_by_spend_then_name() {
    let txs = vec![
        tx("b", "-50", t0()),
        tx("a", "-20", t0()),
        tx("income", "500", t0()),
    ];
    assert_eq!(top_expense_categories(&txs, 1), vec!["b".to_string()]);

    let tied = vec![
        tx("zeta", "-10", t0()),
        tx("alpha", "-10", t0()),
        tx("mid", "-5", t0()),
    ];
    assert_eq!(
        top_expense_categories(&tied, 10),
        vec!["alpha".to_string(), "zeta".to_string(), "mid".to_string()]
    );
}

#[test]
fn top_expenses_ignore_refunds_in_the_same_category() {
    let txs = vec![
        tx("food", "-40", t0()),
        tx("food", "15", t0()),
        tx("fuel", "-30", t0()),
    ];
    assert_eq!(
        top_expense_categories(&txs, 2),
        vec!["food".to_string(), "fuel".to_string()]
    );
}

#[test]
fn progress_guards_a_zero_ceiling() {
    assert_eq!(progress_ratio(dec("50"), Decimal::ZERO), Decimal::ZERO);
    assert_eq!(over_budget_ratio(dec("50"), Decimal::ZERO), Decimal::ZERO);
    assert_eq!(progress_ratio(dec("-5"), dec("100")), Decimal::ZERO);
    assert_eq!(progress_ratio(dec("50"), dec("100")), dec("0.5"));
    assert_eq!(progress_ratio(dec("250"), dec("100")), Decimal::ONE);
    assert_eq!(over_budget_ratio(dec("150"), dec("100")), dec("0.5"));
    assert_eq!(over_budget_ratio(dec("500"), dec("100")), Decimal::ONE);
}

#[test]
fn progress_bands_follow_thresholds() {
    assert_eq!(ProgressBand::for_ratio(dec("0.7")), ProgressBand::Healthy);
    assert_eq!(ProgressBand::for_ratio(dec("0.69")), ProgressBand::Warning);
    assert_eq!(ProgressBand::for_ratio(dec("0.4")), ProgressBand::Warning);
    assert_eq!(ProgressBand::for_ratio(dec("0.39")), ProgressBand::Critical);
}

#[test]
fn savings_rate_and_monthly_average() {
    let march = t0();
    let feb = Utc.with_ymd_and_hms(2025, 2, 3, 9, 0, 0).unwrap();
    let txs = vec![
        tx("pay", "1000", feb),
        tx("rent", "-800", feb),
        tx("pay", "1000", march),
        tx("rent", "-900", march),
    ];
    // 300 saved out of 2000 earned
    assert_eq!(savings_rate(&txs), dec("15"));
    assert_eq!(average_monthly_savings(&txs), dec("150"));
}

#[test]
fn summary_bundles_every_figure() {
    let txs = home_screen();
    let s = summarize(&txs, 2);
    assert_eq!(s.balance, dec("-26.37"));
    assert_eq!(s.income, dec("768.89"));
    assert_eq!(s.expenses, dec("-795.26"));
    assert_eq!(s.top_expenses, vec!["Rent".to_string(), "Groceries".to_string()]);
    assert_eq!(s.by_category.len(), 5);
    assert_eq!(s.progress.ratio, Decimal::ZERO);
    assert_eq!(s.progress.band, ProgressBand::Critical);
    assert_eq!(format!("{:.2}", s.savings_rate.round_dp(2)), "-3.43");
}

#[test]
fn huge_amounts_saturate_instead_of_overflowing() {
    let big = Decimal::from_i128_with_scale(5 * 10i128.pow(28), 0);
    let txs = vec![
        Transaction::new("u1", "a", "windfall", big, t0()),
        Transaction::new("u1", "b", "windfall", big, t0()),
    ];
    assert_eq!(total_balance(&txs), Decimal::MAX);
    assert_eq!(budget_ceiling(&txs), Decimal::MAX);
    assert_eq!(totals_by_category(&txs)["windfall"], Decimal::MAX);
    assert_eq!(savings_rate(&txs), dec("100"));

    let losses: Vec<_> = txs
        .iter()
        .map(|t| Transaction::new("u1", "c", "loss", -t.value, t0()))
        .collect();
    assert_eq!(total_expenses(&losses), Decimal::MIN);
    assert_eq!(top_expense_categories(&losses, 1), vec!["loss".to_string()]);
}

#[test]
fn savings_rate_saturates_on_a_tiny_income() {
    let txs = vec![
        tx("pay", "0.00000000000000000001", t0()),
        tx("rent", "-1000000000", t0()),
    ];
    assert_eq!(savings_rate(&txs), Decimal::MIN);
    let s = summarize(&txs, 2);
    assert_eq!(s.progress.ratio, Decimal::ZERO);
    assert_eq!(s.progress.band, ProgressBand::Critical);

    let windfall = vec![tx("pay", "0.00000000000000000001", t0()), tx("gift", "1000000000", t0())];
    assert_eq!(savings_rate(&windfall), dec("100"));
}

#[test]
fn progress_ratios_stay_bounded_for_extreme_ceilings() {
    let tiny = dec("0.0000000000000000000000000001");
    assert_eq!(progress_ratio(dec("1000000000"), tiny), Decimal::ONE);
    assert_eq!(progress_ratio(dec("-1000000000"), tiny), Decimal::ZERO);
    assert_eq!(over_budget_ratio(dec("1000000000"), tiny), Decimal::ONE);
}
