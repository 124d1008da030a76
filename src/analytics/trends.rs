// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{
    Category, DuplicateExpense, Expense, MonthlyProjection, MonthlyTotal, SpendingTrend,
    TrendDirection,
};
use crate::utils::{month_key, shift_month};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Classification noise threshold: successive months must move by more
/// than 5% to count as a real increase or decrease.
fn noise_factor() -> Decimal {
    Decimal::new(5, 2) // 0.05
}

/// Month-over-month growth in percent. None when the previous total is
/// zero; never Infinity or NaN.
pub fn growth_rate(current: Decimal, previous: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        return None;
    }
    Some((current - previous) / previous * Decimal::from(100))
}

/// The last `months` month keys ending with the month of `reference_day`,
/// ascending.
fn month_window(reference_day: NaiveDate, months: u32) -> Vec<(i32, u32)> {
    (0..months)
        .rev()
        .map(|back| shift_month(reference_day.year(), reference_day.month(), back))
        .collect()
}

fn classify(totals: &[Decimal]) -> TrendDirection {
    let one = Decimal::ONE;
    let up = totals
        .windows(2)
        .all(|w| w[1] > w[0] * (one + noise_factor()));
    if up {
        return TrendDirection::Increasing;
    }
    let down = totals
        .windows(2)
        .all(|w| w[1] < w[0] * (one - noise_factor()));
    if down {
        return TrendDirection::Decreasing;
    }
    TrendDirection::Stable
}

/// Per-category trend over the last `months` calendar months (minimum 3,
/// clamped up). Empty data classifies as Stable.
pub fn analyze(expenses: &[Expense], months: u32, reference_day: NaiveDate) -> Vec<SpendingTrend> {
    let months = months.max(3);
    let window = month_window(reference_day, months);

    // (category, month) -> (total, count)
    let mut buckets: BTreeMap<(Category, String), (Decimal, u32)> = BTreeMap::new();
    for e in expenses {
        let entry = buckets
            .entry((e.category, month_key(e.date)))
            .or_insert((Decimal::ZERO, 0));
        entry.0 += e.amount;
        entry.1 += 1;
    }

    Category::ALL
        .iter()
        .map(|&category| {
            let mut monthly_totals = Vec::with_capacity(window.len());
            let mut counts = Vec::with_capacity(window.len());
            for &(y, m) in &window {
                let key = format!("{:04}-{:02}", y, m);
                let (total, count) = buckets
                    .get(&(category, key.clone()))
                    .copied()
                    .unwrap_or((Decimal::ZERO, 0));
                monthly_totals.push(MonthlyTotal { month: key, total });
                counts.push(count);
            }

            let totals: Vec<Decimal> = monthly_totals.iter().map(|t| t.total).collect();
            let n = totals.len();
            let (cur, prev) = (totals[n - 1], totals[n - 2]);
            let (cur_count, prev_count) = (counts[n - 1], counts[n - 2]);

            SpendingTrend {
                category,
                direction: classify(&totals),
                growth_rate: growth_rate(cur, prev),
                new_data: prev_count == 0 && cur_count > 0,
                monthly_totals,
            }
        })
        .collect()
}

/// Overall month-over-month growth across all categories. Returns the rate
/// and the new-data flag under the same zero-transaction disambiguation as
/// per-category trends.
pub fn month_over_month(
    expenses: &[Expense],
    reference_day: NaiveDate,
) -> (Option<Decimal>, bool) {
    let cur_key = month_key(reference_day);
    let (py, pm) = shift_month(reference_day.year(), reference_day.month(), 1);
    let prev_key = format!("{:04}-{:02}", py, pm);

    let mut cur = Decimal::ZERO;
    let mut prev = Decimal::ZERO;
    let mut prev_count = 0u32;
    let mut cur_count = 0u32;
    for e in expenses {
        let key = month_key(e.date);
        if key == cur_key {
            cur += e.amount;
            cur_count += 1;
        } else if key == prev_key {
            prev += e.amount;
            prev_count += 1;
        }
    }
    (growth_rate(cur, prev), prev_count == 0 && cur_count > 0)
}

fn gap_factor(gap: i64) -> f64 {
    (1.0 - 0.15 * gap as f64).max(0.4)
}

/// Probable duplicates: same amount and category within `window_days`
/// calendar days. Confidence shrinks with the day gap and grows with
/// description similarity (exact match highest).
pub fn find_duplicates(expenses: &[Expense], window_days: i64) -> Vec<DuplicateExpense> {
    let mut sorted: Vec<&Expense> = expenses.iter().collect();
    sorted.sort_by_key(|e| (e.date, e.id));

    let mut out = Vec::new();
    for (i, a) in sorted.iter().enumerate() {
        for b in &sorted[i + 1..] {
            let gap = (b.date - a.date).num_days();
            if gap > window_days {
                break;
            }
            if a.amount != b.amount || a.category != b.category {
                continue;
            }
            let similarity = strsim::normalized_levenshtein(&a.description, &b.description);
            out.push(DuplicateExpense {
                first_id: a.id,
                second_id: b.id,
                category: a.category,
                amount: a.amount,
                day_gap: gap,
                confidence: gap_factor(gap) * (0.5 + 0.5 * similarity),
            });
        }
    }
    out
}

/// Next month's projected total per category: trailing mean of the last
/// `based_on_months` closed months (months strictly before the one
/// containing `reference_day`). Confidence rises with the number of months
/// used, capped at 0.9.
pub fn project(
    expenses: &[Expense],
    based_on_months: u32,
    reference_day: NaiveDate,
) -> Vec<MonthlyProjection> {
    let n = based_on_months.max(1);
    let window: Vec<(i32, u32)> = (1..=n)
        .map(|back| shift_month(reference_day.year(), reference_day.month(), back))
        .collect();
    let confidence = (0.3 + 0.15 * n as f64).min(0.9);

    let mut buckets: BTreeMap<(Category, String), Decimal> = BTreeMap::new();
    for e in expenses {
        *buckets
            .entry((e.category, month_key(e.date)))
            .or_insert(Decimal::ZERO) += e.amount;
    }

    Category::ALL
        .iter()
        .map(|&category| {
            let sum: Decimal = window
                .iter()
                .map(|&(y, m)| {
                    buckets
                        .get(&(category, format!("{:04}-{:02}", y, m)))
                        .copied()
                        .unwrap_or(Decimal::ZERO)
                })
                .sum();
            MonthlyProjection {
                category,
                projected_total: sum / Decimal::from(n),
                based_on_months: n,
                confidence,
            }
        })
        .collect()
}
