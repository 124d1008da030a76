// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::AnalyticsError;
use crate::models::{BudgetStatus, Category, DailyExpenses, Expense, UserProfile};
use crate::utils::days_in_month;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

/// Near-threshold: spend at or above 90% of the limit (but not over it)
/// counts as Near.
fn near_floor(limit: Decimal) -> Decimal {
    limit * Decimal::new(9, 1)
}

/// Tri-state status of a day's spend against a daily limit. A zero limit
/// means any positive spend is Over and zero spend is Under.
pub fn status_for(total_spent: Decimal, daily_limit: Decimal) -> BudgetStatus {
    if daily_limit.is_zero() {
        return if total_spent > Decimal::ZERO {
            BudgetStatus::Over
        } else {
            BudgetStatus::Under
        };
    }
    if total_spent > daily_limit {
        BudgetStatus::Over
    } else if total_spent >= near_floor(daily_limit) {
        BudgetStatus::Near
    } else {
        BudgetStatus::Under
    }
}

/// Evaluate one calendar day against the profile's daily limit.
/// `expenses_on_date` must all carry the target date; a stray expense from
/// another day is a caller bug and is rejected rather than silently summed.
pub fn evaluate(
    date: NaiveDate,
    profile: &UserProfile,
    expenses_on_date: &[Expense],
) -> Result<DailyExpenses, AnalyticsError> {
    if profile.daily_limit < Decimal::ZERO {
        return Err(AnalyticsError::InvalidProfile {
            field: "daily_limit",
            reason: format!("must be non-negative, got {}", profile.daily_limit),
        });
    }
    for e in expenses_on_date {
        if e.date != date {
            return Err(AnalyticsError::InvalidDate {
                input: e.date.to_string(),
                reason: format!("expense {} does not belong to {}", e.id, date),
            });
        }
    }

    let total_spent: Decimal = expenses_on_date.iter().map(|e| e.amount).sum();
    Ok(DailyExpenses {
        date,
        expense_ids: expenses_on_date.iter().map(|e| e.id).collect(),
        total_spent,
        remaining_budget: profile.daily_limit - total_spent,
        budget_status: status_for(total_spent, profile.daily_limit),
    })
}

/// Daily share of a monthly category budget: plain division by the number
/// of days in the month containing `date`. The projector uses the same
/// policy.
pub fn daily_category_budget(monthly: Decimal, date: NaiveDate) -> Decimal {
    let days = days_in_month(date.year(), date.month());
    if days == 0 {
        return Decimal::ZERO;
    }
    monthly / Decimal::from(days)
}

/// Status of one category's spend on one day against its derived daily
/// budget. None when the profile has no budget for that category.
pub fn category_status(
    date: NaiveDate,
    profile: &UserProfile,
    expenses_on_date: &[Expense],
    category: Category,
) -> Option<BudgetStatus> {
    let monthly = profile.monthly_budget(category)?;
    let limit = daily_category_budget(monthly, date);
    let spent: Decimal = expenses_on_date
        .iter()
        .filter(|e| e.date == date && e.category == category)
        .map(|e| e.amount)
        .sum();
    Some(status_for(spent, limit))
}
