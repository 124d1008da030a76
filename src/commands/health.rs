// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{health, streak, trends};
use crate::utils::{get_profile, list_expenses, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let as_of = super::reference_day(sub)?;

    let profile = get_profile(conn)?;
    let expenses = list_expenses(conn)?;
    let history = streak::build_history(&expenses, &profile, as_of)?;
    let current = streak::recompute(&history, profile.streak_rule);
    let spending_trends = trends::analyze(&expenses, 3, as_of);

    let mut all_alerts = health::alerts(&history, as_of);
    all_alerts.extend(health::category_alerts(&expenses, &profile, as_of));
    let duplicates = trends::find_duplicates(&expenses, 3);
    let recs = health::recommend(&profile, &spending_trends, &duplicates);

    let report = health::score(&history, &current, &spending_trends, &all_alerts);

    if !maybe_print_json(
        json_flag,
        jsonl_flag,
        &json!({
            "report": report,
            "alerts": all_alerts,
            "recommendations": recs,
        }),
    )? {
        let mut rows = vec![
            vec!["Score".into(), report.score.to_string()],
            vec!["Tier".into(), report.tier.as_str().into()],
            vec![
                "Budget adherence".into(),
                format!("{:.0}%", report.adherence_ratio * 100.0),
            ],
            vec![
                "Streak strength".into(),
                format!("{:.0}%", report.streak_strength * 100.0),
            ],
            vec!["Rising trends".into(), report.rising_trends.to_string()],
            vec!["High alerts".into(), report.high_alerts.to_string()],
        ];
        for a in &all_alerts {
            rows.push(vec![format!("Alert [{}]", a.severity.as_str()), a.message.clone()]);
        }
        for r in &recs {
            rows.push(vec!["Suggestion".into(), r.message.clone()]);
        }
        println!("{}", pretty_table(&["Field", "Value"], rows));
    }
    Ok(())
}
