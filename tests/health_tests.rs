// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetpulse::analytics::{health, streak, trends};
use budgetpulse::models::{
    AlertSeverity, Category, CategoryBudget, Expense, HealthTier, SpendingTrend, StreakRule,
    TrendDirection, UserProfile,
};
use chrono::NaiveDate;

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

fn profile() -> UserProfile {
    UserProfile {
        daily_limit: "50".parse().unwrap(),
        ..UserProfile::default()
    }
}

#[test]
fn tier_bands_match_the_documented_cutoffs() {
    assert_eq!(health::tier_for(100), HealthTier::Excellent);
    assert_eq!(health::tier_for(80), HealthTier::Excellent);
    assert_eq!(health::tier_for(79), HealthTier::Good);
    assert_eq!(health::tier_for(60), HealthTier::Good);
    assert_eq!(health::tier_for(59), HealthTier::Fair);
    assert_eq!(health::tier_for(40), HealthTier::Fair);
    assert_eq!(health::tier_for(39), HealthTier::Poor);
    assert_eq!(health::tier_for(0), HealthTier::Poor);
}

#[test]
fn no_tracked_days_yields_insufficient_data_default() {
    let p = profile();
    let history = streak::build_history(&[], &p, d("2025-08-30")).unwrap();
    let current = streak::recompute(&history, StreakRule::UnderBudget);
    let report = health::score(&history, &current, &[], &[]);
    assert_eq!(report.score, 50);
    assert_eq!(report.tier, HealthTier::Fair);
}

#[test]
fn perfect_adherence_and_full_streak_score_excellent() {
    let p = profile();
    let expenses: Vec<Expense> = (1..=7)
        .map(|day| exp(day, &format!("2025-08-0{}", day), "10", Category::Food))
        .collect();
    let history = streak::build_history(&expenses, &p, d("2025-08-07")).unwrap();
    let current = streak::recompute(&history, StreakRule::UnderBudget);
    let spending_trends = trends::analyze(&expenses, 3, d("2025-08-07"));
    let alerts = health::alerts(&history, d("2025-08-07"));

    let report = health::score(&history, &current, &spending_trends, &alerts);
    // 50 adherence + 20 streak + 30 allowance, nothing to penalize
    assert_eq!(report.score, 100);
    assert_eq!(report.tier, HealthTier::Excellent);
}

#[test]
fn over_budget_days_drag_the_score_down() {
    let p = profile();
    let mut expenses: Vec<Expense> = (1..=4)
        .map(|day| exp(day, &format!("2025-08-0{}", day), "10", Category::Food))
        .collect();
    for day in 5..=8 {
        expenses.push(exp(day, &format!("2025-08-0{}", day), "90", Category::Food));
    }
    let history = streak::build_history(&expenses, &p, d("2025-08-08")).unwrap();
    let current = streak::recompute(&history, StreakRule::UnderBudget);
    let alerts = health::alerts(&history, d("2025-08-08"));

    let report = health::score(&history, &current, &[], &alerts);
    // adherence 4/8, current streak 0, and a High alert for 4 over days
    assert!(report.score < 50);
    assert_eq!(report.high_alerts, 1);
}

#[test]
fn three_or_more_over_days_raise_a_high_alert() {
    let p = profile();
    let expenses: Vec<Expense> = (1..=3)
        .map(|day| exp(day, &format!("2025-08-0{}", day), "90", Category::Food))
        .collect();
    let history = streak::build_history(&expenses, &p, d("2025-08-03")).unwrap();
    let alerts = health::alerts(&history, d("2025-08-03"));
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, AlertSeverity::High);
}

#[test]
fn single_over_day_is_only_a_warning() {
    let p = profile();
    let expenses = vec![exp(1, "2025-08-01", "90", Category::Food)];
    let history = streak::build_history(&expenses, &p, d("2025-08-01")).unwrap();
    let alerts = health::alerts(&history, d("2025-08-01"));
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, AlertSeverity::Warning);
}

#[test]
fn near_limit_today_raises_an_info_alert() {
    let p = profile();
    let expenses = vec![exp(1, "2025-08-01", "45", Category::Food)];
    let history = streak::build_history(&expenses, &p, d("2025-08-01")).unwrap();
    let alerts = health::alerts(&history, d("2025-08-01"));
    assert!(alerts
        .iter()
        .any(|a| a.severity == AlertSeverity::Info && a.id == "near-limit-today"));
}

#[test]
fn category_overspend_raises_a_high_alert() {
    let p = UserProfile {
        daily_limit: "50".parse().unwrap(),
        category_budgets: vec![CategoryBudget {
            category: Category::Food,
            monthly: "100".parse().unwrap(),
        }],
        ..UserProfile::default()
    };
    let expenses = vec![
        exp(1, "2025-08-05", "60", Category::Food),
        exp(2, "2025-08-12", "70", Category::Food),
    ];
    let alerts = health::category_alerts(&expenses, &p, d("2025-08-30"));
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, AlertSeverity::High);
    assert_eq!(alerts[0].category, Some(Category::Food));
}

#[test]
fn recommendations_cover_limits_and_duplicates() {
    let p = UserProfile::default(); // daily_limit 0
    let dupes = trends::find_duplicates(
        &[
            exp(1, "2025-08-10", "25", Category::Food),
            exp(2, "2025-08-10", "25", Category::Food),
        ],
        3,
    );
    let recs = health::recommend(&p, &[], &dupes);
    assert!(recs.iter().any(|r| r.id == "set-daily-limit"));
    assert!(recs.iter().any(|r| r.id == "review-duplicates"));
}

#[test]
fn trim_recommendation_targets_the_fastest_rising_category() {
    let p = profile();
    let rising = |category: Category, rate: Option<&str>| SpendingTrend {
        category,
        direction: TrendDirection::Increasing,
        monthly_totals: Vec::new(),
        growth_rate: rate.map(|r| r.parse().unwrap()),
        new_data: false,
    };

    // Bills grows faster than Food even though Food is declared first
    let trends = vec![
        rising(Category::Food, Some("12")),
        rising(Category::Bills, Some("40")),
    ];
    let recs = health::recommend(&p, &trends, &[]);
    assert!(recs.iter().any(|r| r.id == "trim-bills"));
    assert!(recs.iter().all(|r| r.id != "trim-food"));

    // Ties and missing rates fall back to declaration order
    let tied = vec![
        rising(Category::Food, Some("20")),
        rising(Category::Bills, Some("20")),
        rising(Category::Other, None),
    ];
    let recs = health::recommend(&p, &tied, &[]);
    assert!(recs.iter().any(|r| r.id == "trim-food"));
}

#[test]
fn score_is_always_within_bounds() {
    let p = profile();
    let expenses: Vec<Expense> = (1..=9)
        .map(|day| exp(day, &format!("2025-08-0{}", day), "200", Category::Food))
        .collect();
    let history = streak::build_history(&expenses, &p, d("2025-08-09")).unwrap();
    let current = streak::recompute(&history, StreakRule::UnderBudget);
    let alerts = health::alerts(&history, d("2025-08-09"));
    let report = health::score(&history, &current, &[], &alerts);
    assert!(report.score <= 100);
}
