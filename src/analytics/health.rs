// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{
    AlertSeverity, BudgetStatus, DailyExpenses, DailyStreak, DuplicateExpense, FinancialAlert,
    HealthReport, HealthTier, Recommendation, SpendingTrend, TrendDirection, UserProfile,
};
use crate::utils::month_bounds;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Composite score weights, a documented policy:
/// adherence 50 pts, streak strength 20 pts, plus a 30-pt allowance
/// reduced by 5 per rising category trend (up to 15) and by 7 per High /
/// 3 per Warning alert (up to 15). Clamped to [0, 100].
const ADHERENCE_PTS: f64 = 50.0;
const STREAK_PTS: f64 = 20.0;
const ALLOWANCE_PTS: f64 = 30.0;
const TREND_PENALTY_CAP: f64 = 15.0;
const ALERT_PENALTY_CAP: f64 = 15.0;

pub fn tier_for(score: u8) -> HealthTier {
    match score {
        80..=100 => HealthTier::Excellent,
        60..=79 => HealthTier::Good,
        40..=59 => HealthTier::Fair,
        _ => HealthTier::Poor,
    }
}

/// Combine adherence, streak strength, trend direction, and alert severity
/// into a 0-100 score and tier. With no tracked days the result is the
/// documented insufficient-data default: 50, Fair.
pub fn score(
    history: &[DailyExpenses],
    streak: &DailyStreak,
    trends: &[SpendingTrend],
    alerts: &[FinancialAlert],
) -> HealthReport {
    let tracked = super::streak::tracked_days(history);
    let rising_trends = trends
        .iter()
        .filter(|t| t.direction == TrendDirection::Increasing)
        .count() as u32;
    let high_alerts = alerts
        .iter()
        .filter(|a| a.severity == AlertSeverity::High)
        .count() as u32;
    let warning_alerts = alerts
        .iter()
        .filter(|a| a.severity == AlertSeverity::Warning)
        .count() as u32;

    if tracked == 0 {
        return HealthReport {
            score: 50,
            tier: HealthTier::Fair,
            adherence_ratio: 0.0,
            streak_strength: 0.0,
            rising_trends,
            high_alerts,
        };
    }

    let adherence_ratio = super::streak::compliant_days(history) as f64 / tracked as f64;
    let streak_strength = if streak.longest_streak == 0 {
        0.0
    } else {
        streak.current_streak as f64 / streak.longest_streak as f64
    };

    let trend_penalty = (5.0 * rising_trends as f64).min(TREND_PENALTY_CAP);
    let alert_penalty =
        (7.0 * high_alerts as f64 + 3.0 * warning_alerts as f64).min(ALERT_PENALTY_CAP);

    let raw = adherence_ratio * ADHERENCE_PTS
        + streak_strength * STREAK_PTS
        + ALLOWANCE_PTS
        - trend_penalty
        - alert_penalty;
    let score = raw.clamp(0.0, 100.0).round() as u8;

    HealthReport {
        score,
        tier: tier_for(score),
        adherence_ratio,
        streak_strength,
        rising_trends,
        high_alerts,
    }
}

/// Derived alerts for the month containing `reference_day`. Ids are
/// synthetic and stable for UI keying.
pub fn alerts(history: &[DailyExpenses], reference_day: NaiveDate) -> Vec<FinancialAlert> {
    let (start, end) = month_bounds(reference_day);
    let month_days: Vec<&DailyExpenses> = history
        .iter()
        .filter(|d| d.date >= start && d.date <= end)
        .collect();

    let mut out = Vec::new();

    let over_days = month_days
        .iter()
        .filter(|d| d.budget_status == BudgetStatus::Over)
        .count();
    if over_days > 0 {
        let severity = if over_days >= 3 {
            AlertSeverity::High
        } else {
            AlertSeverity::Warning
        };
        out.push(FinancialAlert {
            id: format!("over-days-{}", reference_day.format("%Y-%m")),
            severity,
            message: format!("{} day(s) over your daily limit this month", over_days),
            category: None,
            date: Some(reference_day),
        });
    }

    if let Some(today) = month_days.iter().find(|d| d.date == reference_day) {
        if today.budget_status == BudgetStatus::Near {
            out.push(FinancialAlert {
                id: "near-limit-today".to_string(),
                severity: AlertSeverity::Info,
                message: "Today's spending is near your daily limit".to_string(),
                category: None,
                date: Some(reference_day),
            });
        }
    }

    out
}

/// Category budget overruns for the month containing `reference_day`.
pub fn category_alerts(
    expenses: &[crate::models::Expense],
    profile: &UserProfile,
    reference_day: NaiveDate,
) -> Vec<FinancialAlert> {
    let (start, end) = month_bounds(reference_day);
    let mut out = Vec::new();
    for budget in &profile.category_budgets {
        let spent: Decimal = expenses
            .iter()
            .filter(|e| e.category == budget.category && e.date >= start && e.date <= end)
            .map(|e| e.amount)
            .sum();
        if spent > budget.monthly {
            out.push(FinancialAlert {
                id: format!(
                    "category-over-{}",
                    budget.category.as_str().to_lowercase()
                ),
                severity: AlertSeverity::High,
                message: format!(
                    "{} spending ({:.2}) exceeded its monthly budget ({:.2})",
                    budget.category.as_str(),
                    spent,
                    budget.monthly
                ),
                category: Some(budget.category),
                date: Some(reference_day),
            });
        }
    }
    out
}

/// Plain-language suggestions derived from trends and duplicates.
pub fn recommend(
    profile: &UserProfile,
    trends: &[SpendingTrend],
    duplicates: &[DuplicateExpense],
) -> Vec<Recommendation> {
    let mut out = Vec::new();

    // Fastest-rising category; ties and missing rates fall back to
    // category declaration order.
    let mut fastest: Option<&SpendingTrend> = None;
    for t in trends
        .iter()
        .filter(|t| t.direction == TrendDirection::Increasing)
    {
        match fastest {
            Some(best) if t.growth_rate <= best.growth_rate => {}
            _ => fastest = Some(t),
        }
    }
    if let Some(rising) = fastest {
        out.push(Recommendation {
            id: format!("trim-{}", rising.category.as_str().to_lowercase()),
            message: format!(
                "{} spending has risen for several months in a row; consider trimming it",
                rising.category.as_str()
            ),
        });
    }

    if profile.daily_limit.is_zero() {
        out.push(Recommendation {
            id: "set-daily-limit".to_string(),
            message: "Set a daily limit to start tracking budget status and streaks".to_string(),
        });
    }

    if !duplicates.is_empty() {
        out.push(Recommendation {
            id: "review-duplicates".to_string(),
            message: format!(
                "Review {} possible duplicate expense(s) flagged in the last few days",
                duplicates.len()
            ),
        });
    }

    out
}
