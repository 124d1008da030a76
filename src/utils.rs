// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::AnalyticsError;
use crate::models::{Category, CategoryBudget, Expense, StreakRule, UserProfile};
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| {
        AnalyticsError::InvalidDate {
            input: s.to_string(),
            reason: format!("expected YYYY-MM-DD ({})", e),
        }
        .into()
    })
}

pub fn parse_month(s: &str) -> Result<String> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d").map_err(|_| {
        anyhow::Error::from(AnalyticsError::InvalidDate {
            input: s.to_string(),
            reason: "expected YYYY-MM".to_string(),
        })
    })?;
    // Re-format so an unpadded month like 2025-8 still matches month keys
    Ok(first.format("%Y-%m").to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn parse_category(s: &str) -> Result<Category> {
    Category::parse(s).with_context(|| {
        format!(
            "Unknown category '{}', expected one of: {}",
            s,
            Category::ALL
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// First and last calendar day of the month containing `day`.
pub fn month_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(day.year(), day.month(), 1).unwrap_or(day);
    let end = NaiveDate::from_ymd_opt(
        day.year(),
        day.month(),
        days_in_month(day.year(), day.month()),
    )
    .unwrap_or(day);
    (start, end)
}

pub fn month_key(day: NaiveDate) -> String {
    day.format("%Y-%m").to_string()
}

/// (year, month) shifted back by `offset` whole months.
pub fn shift_month(year: i32, month: u32, offset: u32) -> (i32, u32) {
    let total = year as i64 * 12 + (month as i64 - 1) - offset as i64;
    ((total.div_euclid(12)) as i32, (total.rem_euclid(12) + 1) as u32)
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

// Settings helpers

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

// Typed store accessors. The analytics engine never sees the Connection;
// commands load rows through these and hand structs to the engine.

pub fn list_expenses(conn: &Connection) -> Result<Vec<Expense>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, amount, category, description, created_at, updated_at
         FROM expenses ORDER BY date, id",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date_s: String = r.get(1)?;
        let amount_s: String = r.get(2)?;
        let category_s: String = r.get(3)?;
        let description: String = r.get(4)?;
        let created_at: String = r.get(5)?;
        let updated_at: String = r.get(6)?;
        let date = parse_date(&date_s)
            .with_context(|| format!("Corrupt date on expense {}", id))?;
        let amount = amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' on expense {}", amount_s, id))?;
        let category = parse_category(&category_s)
            .with_context(|| format!("Unknown category on expense {}", id))?;
        out.push(Expense {
            id,
            date,
            amount,
            category,
            description,
            created_at,
            updated_at,
        });
    }
    Ok(out)
}

pub fn expenses_on(conn: &Connection, date: NaiveDate) -> Result<Vec<Expense>> {
    Ok(list_expenses(conn)?
        .into_iter()
        .filter(|e| e.date == date)
        .collect())
}

pub fn get_profile(conn: &Connection) -> Result<UserProfile> {
    let mut p = UserProfile::default();
    if let Some(v) = get_setting(conn, "monthly_income")? {
        p.monthly_income = parse_decimal(&v)?;
    }
    if let Some(v) = get_setting(conn, "currency")? {
        p.currency = v;
    }
    if let Some(v) = get_setting(conn, "daily_limit")? {
        p.daily_limit = parse_decimal(&v)?;
    }
    if let Some(v) = get_setting(conn, "streak_rule")? {
        p.streak_rule = StreakRule::parse(&v)
            .with_context(|| format!("Unknown streak rule '{}'", v))?;
    }
    if let Some(v) = get_setting(conn, "language")? {
        p.language = v;
    }
    if let Some(v) = get_setting(conn, "timezone")? {
        p.timezone = v;
    }

    let mut stmt = conn.prepare("SELECT category, monthly FROM category_budgets")?;
    let mut rows = stmt.query([])?;
    let mut budgets = Vec::new();
    while let Some(r) = rows.next()? {
        let cat_s: String = r.get(0)?;
        let monthly_s: String = r.get(1)?;
        budgets.push(CategoryBudget {
            category: parse_category(&cat_s)?,
            monthly: parse_decimal(&monthly_s)?,
        });
    }
    // Stable order regardless of insertion order
    budgets.sort_by_key(|b| b.category);
    p.category_budgets = budgets;
    Ok(p)
}

/// Unlock timestamps previously committed, keyed by achievement id.
pub fn unlocked_achievements(
    conn: &Connection,
) -> Result<std::collections::BTreeMap<String, String>> {
    let mut stmt = conn.prepare("SELECT id, unlocked_at FROM achievements")?;
    let mut rows = stmt.query([])?;
    let mut out = std::collections::BTreeMap::new();
    while let Some(r) = rows.next()? {
        out.insert(r.get::<_, String>(0)?, r.get::<_, String>(1)?);
    }
    Ok(out)
}

/// Persist a new unlock. Never overwrites an existing timestamp.
pub fn record_unlock(conn: &Connection, id: &str, unlocked_at: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO achievements(id, unlocked_at) VALUES(?1, ?2)
         ON CONFLICT(id) DO NOTHING",
        params![id, unlocked_at],
    )?;
    Ok(())
}
