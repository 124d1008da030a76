// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Closed set of expense categories. Declaration order is the tie-break
/// order for rankings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transportation,
    Entertainment,
    Shopping,
    Bills,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Transportation,
        Category::Entertainment,
        Category::Shopping,
        Category::Bills,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Category> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: Category,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBudget {
    pub category: Category,
    pub monthly: Decimal,
}

/// Which rule a daily streak is counted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreakRule {
    UnderBudget,
    LoggedExpenses,
}

impl StreakRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreakRule::UnderBudget => "under_budget",
            StreakRule::LoggedExpenses => "logged_expenses",
        }
    }

    pub fn parse(s: &str) -> Option<StreakRule> {
        match s.trim() {
            "under_budget" => Some(StreakRule::UnderBudget),
            "logged_expenses" => Some(StreakRule::LoggedExpenses),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub monthly_income: Decimal,
    pub currency: String,
    pub daily_limit: Decimal,
    pub category_budgets: Vec<CategoryBudget>,
    pub streak_rule: StreakRule,
    pub language: String,
    pub timezone: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        UserProfile {
            monthly_income: Decimal::ZERO,
            currency: "USD".to_string(),
            daily_limit: Decimal::ZERO,
            category_budgets: Vec::new(),
            streak_rule: StreakRule::UnderBudget,
            language: "en".to_string(),
            timezone: "UTC".to_string(),
        }
    }
}

impl UserProfile {
    pub fn monthly_budget(&self, category: Category) -> Option<Decimal> {
        self.category_budgets
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.monthly)
    }

    /// Sum of all configured category budgets, falling back to
    /// daily_limit x days-in-month when none are configured.
    pub fn total_monthly_budget(&self, days_in_month: u32) -> Decimal {
        if self.category_budgets.is_empty() {
            self.daily_limit * Decimal::from(days_in_month)
        } else {
            self.category_budgets.iter().map(|b| b.monthly).sum()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetStatus {
    Under,
    Near,
    Over,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::Under => "under",
            BudgetStatus::Near => "near",
            BudgetStatus::Over => "over",
        }
    }
}

/// One evaluated calendar day. Always recomputed from the expense log,
/// never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyExpenses {
    pub date: NaiveDate,
    pub expense_ids: Vec<i64>,
    pub total_spent: Decimal,
    pub remaining_budget: Decimal,
    pub budget_status: BudgetStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStreak {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_streak_date: Option<NaiveDate>,
    pub streak_type: StreakRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AchievementKind {
    Streak,
    Saving,
    Category,
    Milestone,
}

impl AchievementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementKind::Streak => "streak",
            AchievementKind::Saving => "saving",
            AchievementKind::Category => "category",
            AchievementKind::Milestone => "milestone",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub kind: AchievementKind,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked_at: Option<String>,
    pub progress: Decimal,
    pub target: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: String, // YYYY-MM
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingTrend {
    pub category: Category,
    pub direction: TrendDirection,
    pub monthly_totals: Vec<MonthlyTotal>,
    /// Month-over-month growth in percent for the last two months of the
    /// window; None when the previous month total is zero.
    pub growth_rate: Option<Decimal>,
    /// True when the previous month had no transactions at all, so a
    /// missing rate means "new data" rather than a flat trend.
    pub new_data: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyProjection {
    pub category: Category,
    pub projected_total: Decimal,
    pub based_on_months: u32,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateExpense {
    pub first_id: i64,
    pub second_id: i64,
    pub category: Category,
    pub amount: Decimal,
    pub day_gap: i64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertSeverity {
    Info,
    Warning,
    High,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Warning => "warning",
            AlertSeverity::High => "high",
        }
    }
}

/// Derived alert; the id is synthetic and only meant for UI keying.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialAlert {
    pub id: String,
    pub severity: AlertSeverity,
    pub message: String,
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl HealthTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthTier::Excellent => "excellent",
            HealthTier::Good => "good",
            HealthTier::Fair => "fair",
            HealthTier::Poor => "poor",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub score: u8,
    pub tier: HealthTier,
    pub adherence_ratio: f64,
    pub streak_strength: f64,
    pub rising_trends: u32,
    pub high_alerts: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopCategory {
    pub category: Category,
    pub total: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseSummary {
    pub total_expenses: Decimal,
    pub monthly_total: Decimal,
    pub category_breakdown: Vec<CategoryTotal>,
    pub top_categories: Vec<TopCategory>,
}
