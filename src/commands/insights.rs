// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::trends;
use crate::utils::{list_expenses, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("trends", sub)) => trends_cmd(conn, sub)?,
        Some(("duplicates", sub)) => duplicates(conn, sub)?,
        Some(("project", sub)) => project(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn trends_cmd(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let as_of = super::reference_day(sub)?;
    let months = *sub.get_one::<u32>("months").unwrap_or(&3);

    let expenses = list_expenses(conn)?;
    let result = trends::analyze(&expenses, months, as_of);

    if !maybe_print_json(json_flag, jsonl_flag, &result)? {
        let rows = result
            .iter()
            .map(|t| {
                vec![
                    t.category.as_str().to_string(),
                    t.direction.as_str().to_string(),
                    match (&t.growth_rate, t.new_data) {
                        (Some(r), _) => format!("{:.1}%", r),
                        (None, true) => "new data".to_string(),
                        (None, false) => "-".to_string(),
                    },
                    t.monthly_totals
                        .iter()
                        .map(|mt| format!("{} {:.2}", mt.month, mt.total))
                        .collect::<Vec<_>>()
                        .join("  "),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Trend", "MoM growth", "Months"], rows)
        );
    }
    Ok(())
}

fn duplicates(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let window = *sub.get_one::<i64>("window").unwrap_or(&3);

    let expenses = list_expenses(conn)?;
    let dupes = trends::find_duplicates(&expenses, window);

    if !maybe_print_json(json_flag, jsonl_flag, &dupes)? {
        if dupes.is_empty() {
            println!("No probable duplicates found");
            return Ok(());
        }
        let rows = dupes
            .iter()
            .map(|d| {
                vec![
                    format!("{} / {}", d.first_id, d.second_id),
                    d.category.as_str().to_string(),
                    format!("{:.2}", d.amount),
                    format!("{} day(s)", d.day_gap),
                    format!("{:.0}%", d.confidence * 100.0),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Expenses", "Category", "Amount", "Gap", "Confidence"], rows)
        );
    }
    Ok(())
}

fn project(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let as_of = super::reference_day(sub)?;
    let months = *sub.get_one::<u32>("months").unwrap_or(&3);

    let expenses = list_expenses(conn)?;
    let projections = trends::project(&expenses, months, as_of);

    if !maybe_print_json(json_flag, jsonl_flag, &projections)? {
        let rows = projections
            .iter()
            .map(|p| {
                vec![
                    p.category.as_str().to_string(),
                    format!("{:.2}", p.projected_total),
                    p.based_on_months.to_string(),
                    format!("{:.0}%", p.confidence * 100.0),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Projected total", "Based on (months)", "Confidence"],
                rows
            )
        );
    }
    Ok(())
}
