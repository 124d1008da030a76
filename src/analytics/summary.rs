// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, CategoryTotal, Expense, ExpenseSummary, TopCategory};
use crate::utils::month_bounds;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Reduce the full expense log into all-time and current-month totals,
/// a per-category breakdown (every category present, zero or not), and the
/// top three categories by amount. The month window is the calendar month
/// containing `reference_day`, both bounds inclusive.
pub fn compute(expenses: &[Expense], reference_day: NaiveDate) -> ExpenseSummary {
    let total_expenses: Decimal = expenses.iter().map(|e| e.amount).sum();

    let (start, end) = month_bounds(reference_day);
    let monthly_total: Decimal = expenses
        .iter()
        .filter(|e| e.date >= start && e.date <= end)
        .map(|e| e.amount)
        .sum();

    let mut category_breakdown: Vec<CategoryTotal> = Category::ALL
        .iter()
        .map(|&category| CategoryTotal {
            category,
            total: Decimal::ZERO,
        })
        .collect();
    for e in expenses {
        category_breakdown[e.category as usize].total += e.amount;
    }

    // Stable sort: ties keep category declaration order.
    let mut ranked = category_breakdown.clone();
    ranked.sort_by(|a, b| b.total.cmp(&a.total));
    let top_categories = ranked
        .into_iter()
        .take(3)
        .map(|ct| TopCategory {
            category: ct.category,
            total: ct.total,
            percentage: if total_expenses.is_zero() {
                Decimal::ZERO
            } else {
                ct.total / total_expenses * Decimal::from(100)
            },
        })
        .collect();

    ExpenseSummary {
        total_expenses,
        monthly_total,
        category_breakdown,
        top_categories,
    }
}
