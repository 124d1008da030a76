// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Category;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = audit(conn)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Scan the store for rows a healthy installation never writes: malformed
/// dates or amounts, categories outside the closed set, achievement rows
/// the catalog no longer knows, and negative profile numbers.
pub fn audit(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Malformed dates or amounts in the expense log
    let mut stmt =
        conn.prepare("SELECT id, date, amount, category FROM expenses ORDER BY id")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let amount: String = r.get(2)?;
        let category: String = r.get(3)?;
        if chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
            rows.push(vec!["malformed_date".into(), format!("expense {}: '{}'", id, date)]);
        }
        match amount.parse::<Decimal>() {
            Ok(a) if a < Decimal::ZERO => {
                rows.push(vec![
                    "negative_amount".into(),
                    format!("expense {}: {}", id, a),
                ]);
            }
            Ok(_) => {}
            Err(_) => {
                rows.push(vec![
                    "malformed_amount".into(),
                    format!("expense {}: '{}'", id, amount),
                ]);
            }
        }
        if Category::parse(&category).is_none() {
            rows.push(vec![
                "unknown_category".into(),
                format!("expense {}: '{}'", id, category),
            ]);
        }
    }

    // 2) Achievement rows for ids the catalog no longer knows
    let known: Vec<&str> = crate::analytics::achievements::CATALOG
        .iter()
        .map(|d| d.id)
        .collect();
    let mut stmt2 = conn.prepare("SELECT id FROM achievements ORDER BY id")?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: String = r.get(0)?;
        if !known.contains(&id.as_str()) {
            rows.push(vec!["orphan_achievement".into(), id]);
        }
    }

    // 3) Negative profile numbers committed by older builds
    for key in ["daily_limit", "monthly_income"] {
        if let Some(v) = crate::utils::get_setting(conn, key)? {
            if v.parse::<Decimal>().map(|d| d < Decimal::ZERO).unwrap_or(true) {
                rows.push(vec!["bad_setting".into(), format!("{}='{}'", key, v)]);
            }
        }
    }

    Ok(rows)
}
