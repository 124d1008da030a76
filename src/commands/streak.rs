// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::streak;
use crate::error::AnalyticsError;
use crate::models::StreakRule;
use crate::utils::{get_profile, list_expenses, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let as_of = super::reference_day(sub)?;

    let profile = get_profile(conn)?;
    let rule = match sub.get_one::<String>("rule") {
        Some(s) => StreakRule::parse(s).ok_or_else(|| AnalyticsError::InvalidProfile {
            field: "streak_rule",
            reason: format!("'{}' is not under_budget or logged_expenses", s),
        })?,
        None => profile.streak_rule,
    };

    let expenses = list_expenses(conn)?;
    let history = streak::build_history(&expenses, &profile, as_of)?;
    let s = streak::recompute(&history, rule);

    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        let rows = vec![
            vec!["Rule".into(), s.streak_type.as_str().into()],
            vec!["Current streak".into(), s.current_streak.to_string()],
            vec!["Longest streak".into(), s.longest_streak.to_string()],
            vec![
                "Last evaluated day".into(),
                s.last_streak_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "(no data)".into()),
            ],
        ];
        println!("{}", pretty_table(&["Field", "Value"], rows));
    }
    Ok(())
}
