// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetpulse::analytics::daily;
use budgetpulse::models::{BudgetStatus, Category, Expense, UserProfile};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn exp(id: i64, date: &str, amount: &str, category: Category) -> Expense {
    Expense {
        id,
        date: d(date),
        amount: amount.parse().unwrap(),
        category,
        description: String::new(),
        created_at: String::new(),
        updated_at: String::new(),
    }
}

fn profile_with_limit(limit: &str) -> UserProfile {
    UserProfile {
        daily_limit: limit.parse().unwrap(),
        ..UserProfile::default()
    }
}

#[test]
fn status_boundaries_at_limit_100() {
    let limit = Decimal::from(100);
    assert_eq!(
        daily::status_for("89.99".parse().unwrap(), limit),
        BudgetStatus::Under
    );
    assert_eq!(
        daily::status_for(Decimal::from(90), limit),
        BudgetStatus::Near
    );
    assert_eq!(
        daily::status_for(Decimal::from(100), limit),
        BudgetStatus::Near
    );
    assert_eq!(
        daily::status_for("100.01".parse().unwrap(), limit),
        BudgetStatus::Over
    );
}

#[test]
fn zero_limit_treats_any_spend_as_over() {
    assert_eq!(
        daily::status_for("0.01".parse().unwrap(), Decimal::ZERO),
        BudgetStatus::Over
    );
    assert_eq!(
        daily::status_for(Decimal::ZERO, Decimal::ZERO),
        BudgetStatus::Under
    );
}

#[test]
fn empty_day_leaves_full_budget_remaining() {
    let profile = profile_with_limit("50");
    let result = daily::evaluate(d("2025-08-10"), &profile, &[]).unwrap();
    assert_eq!(result.total_spent, Decimal::ZERO);
    assert_eq!(result.remaining_budget, Decimal::from(50));
    assert_eq!(result.budget_status, BudgetStatus::Under);
    assert!(result.expense_ids.is_empty());
}

#[test]
fn forty_five_of_fifty_is_near() {
    let profile = profile_with_limit("50");
    let expenses = vec![
        exp(1, "2025-08-10", "20", Category::Food),
        exp(2, "2025-08-10", "25", Category::Transportation),
    ];
    let result = daily::evaluate(d("2025-08-10"), &profile, &expenses).unwrap();
    assert_eq!(result.total_spent, Decimal::from(45));
    assert_eq!(result.remaining_budget, Decimal::from(5));
    assert_eq!(result.budget_status, BudgetStatus::Near);
    assert_eq!(result.expense_ids, vec![1, 2]);
}

#[test]
fn remaining_budget_goes_negative_when_over() {
    let profile = profile_with_limit("30");
    let expenses = vec![exp(1, "2025-08-10", "42.50", Category::Shopping)];
    let result = daily::evaluate(d("2025-08-10"), &profile, &expenses).unwrap();
    assert_eq!(result.remaining_budget, "-12.50".parse::<Decimal>().unwrap());
    assert_eq!(result.budget_status, BudgetStatus::Over);
}

#[test]
fn negative_daily_limit_is_rejected() {
    let profile = profile_with_limit("-1");
    let err = daily::evaluate(d("2025-08-10"), &profile, &[]).unwrap_err();
    assert!(err.to_string().contains("daily_limit"));
}

#[test]
fn expense_from_another_day_is_rejected() {
    let profile = profile_with_limit("50");
    let stray = vec![exp(1, "2025-08-09", "5", Category::Food)];
    let err = daily::evaluate(d("2025-08-10"), &profile, &stray).unwrap_err();
    assert!(err.to_string().contains("2025-08-09"));
}

#[test]
fn daily_category_budget_divides_by_days_in_month() {
    let budget = daily::daily_category_budget(Decimal::from(310), d("2025-08-15"));
    assert_eq!(budget, Decimal::from(10)); // August has 31 days
    let feb = daily::daily_category_budget(Decimal::from(280), d("2025-02-10"));
    assert_eq!(feb, Decimal::from(10)); // 2025 is not a leap year
}

#[test]
fn category_status_none_without_configured_budget() {
    let profile = profile_with_limit("50");
    let expenses = vec![exp(1, "2025-08-10", "5", Category::Food)];
    assert!(daily::category_status(d("2025-08-10"), &profile, &expenses, Category::Food).is_none());
}
