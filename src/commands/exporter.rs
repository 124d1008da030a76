// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => export_expenses(conn, sub),
        _ => Ok(()),
    }
}

fn export_expenses(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let expenses = crate::utils::list_expenses(conn)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "date",
                "amount",
                "category",
                "description",
                "created_at",
                "updated_at",
            ])?;
            for e in &expenses {
                wtr.write_record([
                    e.id.to_string(),
                    e.date.to_string(),
                    e.amount.to_string(),
                    e.category.as_str().to_string(),
                    e.description.clone(),
                    e.created_at.clone(),
                    e.updated_at.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let rows: Vec<_> = expenses
                .iter()
                .map(|e| {
                    json!({
                        "id": e.id,
                        "date": e.date.to_string(),
                        "amount": e.amount.to_string(),
                        "category": e.category.as_str(),
                        "description": e.description,
                        "created_at": e.created_at,
                        "updated_at": e.updated_at,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
        other => anyhow::bail!("Unknown export format '{}', expected csv or json", other),
    }
    println!("Exported {} expense(s) to {}", expenses.len(), out);
    Ok(())
}
