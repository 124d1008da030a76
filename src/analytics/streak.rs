// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::AnalyticsError;
use crate::models::{BudgetStatus, DailyExpenses, DailyStreak, Expense, StreakRule, UserProfile};
use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;

/// Materialize one `DailyExpenses` per calendar day from the first logged
/// expense through `today`, with no gaps. Days without expenses appear as
/// empty evaluations so the streak pass sees them as explicit "no data"
/// days instead of silently skipping them.
pub fn build_history(
    expenses: &[Expense],
    profile: &UserProfile,
    today: NaiveDate,
) -> Result<Vec<DailyExpenses>, AnalyticsError> {
    let mut by_date: BTreeMap<NaiveDate, Vec<Expense>> = BTreeMap::new();
    for e in expenses {
        by_date.entry(e.date).or_default().push(e.clone());
    }
    let Some((&first, _)) = by_date.iter().next() else {
        return Ok(Vec::new());
    };

    let mut history = Vec::new();
    let mut day = first;
    while day <= today {
        let on_day = by_date.get(&day).map(Vec::as_slice).unwrap_or(&[]);
        history.push(super::daily::evaluate(day, profile, on_day)?);
        day = match day.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }
    Ok(history)
}

fn satisfies(day: &DailyExpenses, rule: StreakRule) -> bool {
    match rule {
        // Both rules require a daily check-in: a day with nothing logged
        // is "no data" and breaks the streak.
        StreakRule::LoggedExpenses => !day.expense_ids.is_empty(),
        StreakRule::UnderBudget => {
            !day.expense_ids.is_empty() && day.budget_status != BudgetStatus::Over
        }
    }
}

/// Single pass, oldest to newest, over a gap-free chronological history.
/// Re-derivable from scratch at any time so edits to past expenses
/// recompute all downstream streak state.
pub fn recompute(history: &[DailyExpenses], rule: StreakRule) -> DailyStreak {
    let mut streak = DailyStreak {
        current_streak: 0,
        longest_streak: 0,
        last_streak_date: None,
        streak_type: rule,
    };
    for day in history {
        if satisfies(day, rule) {
            streak.current_streak += 1;
            streak.longest_streak = streak.longest_streak.max(streak.current_streak);
        } else {
            streak.current_streak = 0;
        }
        streak.last_streak_date = Some(day.date);
    }
    streak
}

/// Days on which at least one expense was logged.
pub fn tracked_days(history: &[DailyExpenses]) -> u32 {
    history.iter().filter(|d| !d.expense_ids.is_empty()).count() as u32
}

/// Days in compliance (Under or Near) among tracked days.
pub fn compliant_days(history: &[DailyExpenses]) -> u32 {
    history
        .iter()
        .filter(|d| !d.expense_ids.is_empty() && d.budget_status != BudgetStatus::Over)
        .count() as u32
}
