// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::AnalyticsError;
use crate::utils::{
    maybe_print_json, parse_category, parse_date, parse_decimal, parse_month, pretty_table,
};
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("clear", sub)) => clear(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn require_non_negative(amount: Decimal) -> Result<Decimal> {
    if amount < Decimal::ZERO {
        return Err(AnalyticsError::InvalidProfile {
            field: "amount",
            reason: format!("expense amounts are non-negative, got {}", amount),
        }
        .into());
    }
    Ok(amount)
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let amount = require_non_negative(parse_decimal(sub.get_one::<String>("amount").unwrap())?)?;
    let category = parse_category(sub.get_one::<String>("category").unwrap())?;
    let description = sub
        .get_one::<String>("description")
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    conn.execute(
        "INSERT INTO expenses(date, amount, category, description) VALUES (?1,?2,?3,?4)",
        params![
            date.to_string(),
            amount.to_string(),
            category.as_str(),
            description
        ],
    )?;
    println!(
        "Logged {:.2} under {} on {}",
        amount,
        category.as_str(),
        date
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let exists: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM expenses WHERE id=?1",
            params![id],
            |r| r.get(0),
        )
        .context("Lookup expense")?;
    if exists == 0 {
        anyhow::bail!("Expense {} not found", id);
    }

    if let Some(v) = sub.get_one::<String>("date") {
        let date = parse_date(v)?;
        conn.execute(
            "UPDATE expenses SET date=?1, updated_at=datetime('now') WHERE id=?2",
            params![date.to_string(), id],
        )?;
    }
    if let Some(v) = sub.get_one::<String>("amount") {
        let amount = require_non_negative(parse_decimal(v)?)?;
        conn.execute(
            "UPDATE expenses SET amount=?1, updated_at=datetime('now') WHERE id=?2",
            params![amount.to_string(), id],
        )?;
    }
    if let Some(v) = sub.get_one::<String>("category") {
        let category = parse_category(v)?;
        conn.execute(
            "UPDATE expenses SET category=?1, updated_at=datetime('now') WHERE id=?2",
            params![category.as_str(), id],
        )?;
    }
    if let Some(v) = sub.get_one::<String>("description") {
        conn.execute(
            "UPDATE expenses SET description=?1, updated_at=datetime('now') WHERE id=?2",
            params![v.trim(), id],
        )?;
    }
    println!("Updated expense {}", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute("DELETE FROM expenses WHERE id=?1", params![id])?;
    if n == 0 {
        anyhow::bail!("Expense {} not found", id);
    }
    println!("Removed expense {}", id);
    Ok(())
}

fn clear(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("yes") {
        anyhow::bail!("Refusing to delete all expenses without --yes");
    }
    let n = conn.execute("DELETE FROM expenses", [])?;
    println!("Removed {} expense(s)", n);
    Ok(())
}

#[derive(Serialize)]
pub struct ExpenseRow {
    pub id: i64,
    pub date: String,
    pub amount: String,
    pub category: String,
    pub description: String,
    pub updated_at: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let mut expenses = crate::utils::list_expenses(conn)?;
    if let Some(month) = sub.get_one::<String>("month") {
        let month = parse_month(month)?;
        expenses.retain(|e| crate::utils::month_key(e.date) == month);
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        let category = parse_category(cat)?;
        expenses.retain(|e| e.category == category);
    }
    expenses.sort_by(|a, b| (b.date, b.id).cmp(&(a.date, a.id)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        expenses.truncate(*limit);
    }

    let data: Vec<ExpenseRow> = expenses
        .iter()
        .map(|e| ExpenseRow {
            id: e.id,
            date: e.date.to_string(),
            amount: format!("{:.2}", e.amount),
            category: e.category.as_str().to_string(),
            description: e.description.clone(),
            updated_at: e.updated_at.clone(),
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Amount", "Category", "Description"], rows)
        );
    }
    Ok(())
}
