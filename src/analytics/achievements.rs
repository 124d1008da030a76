// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{
    Achievement, AchievementKind, BudgetStatus, Category, DailyStreak, Expense, UserProfile,
};
use crate::utils::{days_in_month, month_key};
use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

pub struct AchievementDef {
    pub id: &'static str,
    pub kind: AchievementKind,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub target: i64,
}

/// Fixed, versioned catalog. Declaration order is the unlock order within
/// a single recomputation pass.
pub const CATALOG: [AchievementDef; 9] = [
    AchievementDef {
        id: "streak-starter",
        kind: AchievementKind::Streak,
        title: "Streak Starter",
        description: "Keep your daily streak alive for 7 days",
        icon: "🔥",
        target: 7,
    },
    AchievementDef {
        id: "streak-master",
        kind: AchievementKind::Streak,
        title: "Streak Master",
        description: "Keep your daily streak alive for 30 days",
        icon: "🏆",
        target: 30,
    },
    AchievementDef {
        id: "streak-legend",
        kind: AchievementKind::Streak,
        title: "Streak Legend",
        description: "Keep your daily streak alive for 100 days",
        icon: "💎",
        target: 100,
    },
    AchievementDef {
        id: "smart-saver",
        kind: AchievementKind::Saving,
        title: "Smart Saver",
        description: "Stay a cumulative 500 under your monthly budgets",
        icon: "🐷",
        target: 500,
    },
    AchievementDef {
        id: "super-saver",
        kind: AchievementKind::Saving,
        title: "Super Saver",
        description: "Stay a cumulative 2500 under your monthly budgets",
        icon: "💰",
        target: 2500,
    },
    AchievementDef {
        id: "first-expense",
        kind: AchievementKind::Milestone,
        title: "First Steps",
        description: "Log your first expense",
        icon: "🌱",
        target: 1,
    },
    AchievementDef {
        id: "century-logger",
        kind: AchievementKind::Milestone,
        title: "Century Logger",
        description: "Log 100 expenses",
        icon: "💯",
        target: 100,
    },
    AchievementDef {
        id: "quarter-tracked",
        kind: AchievementKind::Milestone,
        title: "Quarter Tracked",
        description: "Track expenses on 90 distinct days",
        icon: "📅",
        target: 90,
    },
    AchievementDef {
        id: "food-discipline",
        kind: AchievementKind::Category,
        title: "Food Discipline",
        description: "Keep Food within budget 14 days running",
        icon: "🥗",
        target: 14,
    },
];

/// Cumulative amount saved versus the monthly budget over closed months
/// (months strictly before the one containing `today`). Overspent months
/// contribute nothing rather than clawing savings back.
fn saved_under_budget(expenses: &[Expense], profile: &UserProfile, today: NaiveDate) -> Decimal {
    let mut per_month: BTreeMap<String, Decimal> = BTreeMap::new();
    for e in expenses {
        *per_month.entry(month_key(e.date)).or_insert(Decimal::ZERO) += e.amount;
    }
    let current = month_key(today);
    let mut saved = Decimal::ZERO;
    for (month, spent) in &per_month {
        if *month >= current {
            continue;
        }
        let Ok(first) = chrono::NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
        else {
            continue;
        };
        let budget =
            profile.total_monthly_budget(days_in_month(first.year(), first.month()));
        if budget > *spent {
            saved += budget - *spent;
        }
    }
    saved
}

/// Longest run of days inside the trailing 30-day window ending at `today`
/// on which the category stayed within its derived daily budget. Zero when
/// no budget is configured for the category.
fn category_compliance_run(
    expenses: &[Expense],
    profile: &UserProfile,
    category: Category,
    today: NaiveDate,
) -> u32 {
    if profile.monthly_budget(category).is_none() {
        return 0;
    }
    let start = today
        .checked_sub_days(Days::new(29))
        .unwrap_or(today);
    let mut best = 0u32;
    let mut run = 0u32;
    let mut day = start;
    while day <= today {
        let on_day: Vec<Expense> = expenses.iter().filter(|e| e.date == day).cloned().collect();
        let status = super::daily::category_status(day, profile, &on_day, category);
        if status.is_some_and(|s| s != BudgetStatus::Over) {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
        day = match day.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }
    best
}

/// Recompute the whole catalog against current derived state. Idempotent:
/// an id present in `prior_unlocks` keeps its timestamp and its progress
/// pinned at target; a fresh unlock takes `now` exactly once. Results come
/// back in catalog declaration order.
pub fn recompute(
    expenses: &[Expense],
    profile: &UserProfile,
    streak: &DailyStreak,
    prior_unlocks: &BTreeMap<String, String>,
    today: NaiveDate,
    now: &str,
) -> Vec<Achievement> {
    let logged = expenses.len() as i64;
    let distinct_days = expenses
        .iter()
        .map(|e| e.date)
        .collect::<BTreeSet<_>>()
        .len() as i64;
    let saved = saved_under_budget(expenses, profile, today);
    let food_run = category_compliance_run(expenses, profile, Category::Food, today);

    CATALOG
        .iter()
        .map(|def| {
            let target = Decimal::from(def.target);
            let progress = match def.kind {
                AchievementKind::Streak => Decimal::from(streak.current_streak),
                AchievementKind::Saving => saved,
                AchievementKind::Milestone => match def.id {
                    "quarter-tracked" => Decimal::from(distinct_days),
                    _ => Decimal::from(logged),
                },
                AchievementKind::Category => Decimal::from(food_run),
            };

            let (unlocked_at, progress) = if let Some(ts) = prior_unlocks.get(def.id) {
                (Some(ts.clone()), target)
            } else if progress >= target {
                (Some(now.to_string()), target)
            } else {
                (None, progress)
            };

            Achievement {
                id: def.id.to_string(),
                kind: def.kind,
                title: def.title.to_string(),
                description: def.description.to_string(),
                icon: def.icon.to_string(),
                unlocked_at,
                progress,
                target,
            }
        })
        .collect()
}
