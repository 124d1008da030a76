// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{achievements, streak};
use crate::utils::{
    get_profile, list_expenses, maybe_print_json, pretty_table, record_unlock,
    unlocked_achievements,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let as_of = super::reference_day(sub)?;

    let profile = get_profile(conn)?;
    let expenses = list_expenses(conn)?;
    let history = streak::build_history(&expenses, &profile, as_of)?;
    let current = streak::recompute(&history, profile.streak_rule);
    let prior = unlocked_achievements(conn)?;

    let all = achievements::recompute(
        &expenses,
        &profile,
        &current,
        &prior,
        as_of,
        &super::now_stamp(),
    );

    // Commit fresh unlocks in catalog order; timestamps already committed
    // are never rewritten.
    for a in &all {
        if let Some(ts) = &a.unlocked_at {
            if !prior.contains_key(&a.id) {
                record_unlock(conn, &a.id, ts)?;
                println!("🎉 Unlocked: {}", a.title);
            }
        }
    }

    if !maybe_print_json(json_flag, jsonl_flag, &all)? {
        let rows = all
            .iter()
            .map(|a| {
                vec![
                    format!("{} {}", a.icon, a.title),
                    a.kind.as_str().to_string(),
                    format!("{:.0}/{:.0}", a.progress, a.target),
                    a.unlocked_at.clone().unwrap_or_else(|| "-".into()),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Achievement", "Type", "Progress", "Unlocked"], rows)
        );
    }
    Ok(())
}
