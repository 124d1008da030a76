// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::AnalyticsError;
use crate::models::StreakRule;
use crate::utils::{get_profile, maybe_print_json, parse_decimal, pretty_table, set_setting};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(v) = sub.get_one::<String>("income") {
        let income = parse_decimal(v)?;
        if income < Decimal::ZERO {
            return Err(AnalyticsError::InvalidProfile {
                field: "monthly_income",
                reason: format!("must be non-negative, got {}", income),
            }
            .into());
        }
        set_setting(conn, "monthly_income", &income.to_string())?;
    }
    if let Some(v) = sub.get_one::<String>("currency") {
        set_setting(conn, "currency", &v.trim().to_uppercase())?;
    }
    if let Some(v) = sub.get_one::<String>("daily-limit") {
        let limit = parse_decimal(v)?;
        if limit < Decimal::ZERO {
            return Err(AnalyticsError::InvalidProfile {
                field: "daily_limit",
                reason: format!("must be non-negative, got {}", limit),
            }
            .into());
        }
        set_setting(conn, "daily_limit", &limit.to_string())?;
    }
    if let Some(v) = sub.get_one::<String>("streak-rule") {
        let rule = StreakRule::parse(v).ok_or_else(|| AnalyticsError::InvalidProfile {
            field: "streak_rule",
            reason: format!("'{}' is not under_budget or logged_expenses", v),
        })?;
        set_setting(conn, "streak_rule", rule.as_str())?;
    }
    if let Some(v) = sub.get_one::<String>("language") {
        set_setting(conn, "language", v.trim())?;
    }
    if let Some(v) = sub.get_one::<String>("timezone") {
        set_setting(conn, "timezone", v.trim())?;
    }
    println!("Profile updated");
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let p = get_profile(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &p)? {
        let rows = vec![
            vec!["Monthly income".into(), format!("{:.2}", p.monthly_income)],
            vec!["Currency".into(), p.currency.clone()],
            vec!["Daily limit".into(), format!("{:.2}", p.daily_limit)],
            vec!["Streak rule".into(), p.streak_rule.as_str().into()],
            vec!["Language".into(), p.language.clone()],
            vec!["Timezone".into(), p.timezone.clone()],
            vec![
                "Category budgets".into(),
                if p.category_budgets.is_empty() {
                    "(none)".into()
                } else {
                    p.category_budgets
                        .iter()
                        .map(|b| format!("{}={:.2}", b.category.as_str(), b.monthly))
                        .collect::<Vec<_>>()
                        .join(", ")
                },
            ],
        ];
        println!("{}", pretty_table(&["Field", "Value"], rows));
    }
    Ok(())
}
