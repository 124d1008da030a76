// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::AnalyticsError;
use crate::utils::{
    maybe_print_json, parse_category, parse_decimal, pretty_table,
};
use anyhow::Result;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let category = parse_category(sub.get_one::<String>("category").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    if amount < Decimal::ZERO {
        return Err(AnalyticsError::InvalidProfile {
            field: "category_budgets",
            reason: format!("{} budget must be non-negative, got {}", category.as_str(), amount),
        }
        .into());
    }
    conn.execute(
        "INSERT INTO category_budgets(category, monthly) VALUES (?1,?2)
         ON CONFLICT(category) DO UPDATE SET monthly=excluded.monthly",
        params![category.as_str(), amount.to_string()],
    )?;
    println!("Budget set: {} = {:.2}/month", category.as_str(), amount);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let profile = crate::utils::get_profile(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &profile.category_budgets)? {
        let rows = profile
            .category_budgets
            .iter()
            .map(|b| vec![b.category.as_str().to_string(), format!("{:.2}", b.monthly)])
            .collect();
        println!("{}", pretty_table(&["Category", "Monthly budget"], rows));
    }
    Ok(())
}
