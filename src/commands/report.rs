// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{daily, summary};
use crate::utils::{
    days_in_month, expenses_on, get_profile, list_expenses, maybe_print_json, parse_date,
    parse_month, pretty_table,
};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary_cmd(conn, sub)?,
        Some(("day", sub)) => day(conn, sub)?,
        Some(("month", sub)) => month(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary_cmd(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let as_of = super::reference_day(sub)?;

    let expenses = list_expenses(conn)?;
    let s = summary::compute(&expenses, as_of);

    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        let mut rows = vec![
            vec!["All-time total".into(), format!("{:.2}", s.total_expenses)],
            vec![
                format!("Total for {}", as_of.format("%Y-%m")),
                format!("{:.2}", s.monthly_total),
            ],
        ];
        for ct in &s.category_breakdown {
            rows.push(vec![
                format!("  {}", ct.category.as_str()),
                format!("{:.2}", ct.total),
            ]);
        }
        for (i, top) in s.top_categories.iter().enumerate() {
            rows.push(vec![
                format!("Top {}", i + 1),
                format!(
                    "{} {:.2} ({:.1}%)",
                    top.category.as_str(),
                    top.total,
                    top.percentage
                ),
            ]);
        }
        println!("{}", pretty_table(&["Metric", "Value"], rows));
    }
    Ok(())
}

fn day(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;

    let profile = get_profile(conn)?;
    let on_day = expenses_on(conn, date)?;
    let d = daily::evaluate(date, &profile, &on_day)?;

    if !maybe_print_json(json_flag, jsonl_flag, &d)? {
        let rows = vec![
            vec!["Date".into(), d.date.to_string()],
            vec!["Expenses".into(), d.expense_ids.len().to_string()],
            vec!["Spent".into(), format!("{:.2}", d.total_spent)],
            vec!["Remaining".into(), format!("{:.2}", d.remaining_budget)],
            vec!["Status".into(), d.budget_status.as_str().into()],
        ];
        println!("{}", pretty_table(&["Field", "Value"], rows));
    }
    Ok(())
}

fn month(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;

    let profile = get_profile(conn)?;
    let expenses = list_expenses(conn)?;

    let first = parse_date(&format!("{}-01", month))?;
    use chrono::Datelike;
    let mut days = Vec::new();
    for dom in 1..=days_in_month(first.year(), first.month()) {
        let Some(date) = NaiveDate::from_ymd_opt(first.year(), first.month(), dom) else {
            continue;
        };
        let on_day: Vec<_> = expenses.iter().filter(|e| e.date == date).cloned().collect();
        days.push(daily::evaluate(date, &profile, &on_day)?);
    }

    if !maybe_print_json(json_flag, jsonl_flag, &days)? {
        let rows = days
            .iter()
            .map(|d| {
                vec![
                    d.date.to_string(),
                    d.expense_ids.len().to_string(),
                    format!("{:.2}", d.total_spent),
                    format!("{:.2}", d.remaining_budget),
                    d.budget_status.as_str().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Expenses", "Spent", "Remaining", "Status"], rows)
        );
    }
    Ok(())
}
