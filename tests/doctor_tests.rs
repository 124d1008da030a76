// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetpulse::commands::doctor;
use budgetpulse::{db, utils};
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn issues_of_kind(rows: &[Vec<String>], kind: &str) -> Vec<String> {
    rows.iter()
        .filter(|r| r[0] == kind)
        .map(|r| r[1].clone())
        .collect()
}

#[test]
fn clean_store_audits_empty() {
    let conn = setup();
    conn.execute(
        "INSERT INTO expenses(date, amount, category, description) VALUES \
        ('2025-08-10','12.50','Food','lunch')",
        [],
    )
    .unwrap();
    utils::set_setting(&conn, "daily_limit", "50").unwrap();
    utils::record_unlock(&conn, "first-expense", "2025-08-10 09:00:00").unwrap();

    assert!(doctor::audit(&conn).unwrap().is_empty());
}

#[test]
fn malformed_dates_and_amounts_are_reported() {
    let conn = setup();
    conn.execute(
        "INSERT INTO expenses(date, amount, category) VALUES \
        ('08/10/2025','12.50','Food'),('2025-08-11','twelve','Food')",
        [],
    )
    .unwrap();

    let rows = doctor::audit(&conn).unwrap();
    let dates = issues_of_kind(&rows, "malformed_date");
    assert_eq!(dates.len(), 1);
    assert!(dates[0].contains("08/10/2025"));
    let amounts = issues_of_kind(&rows, "malformed_amount");
    assert_eq!(amounts.len(), 1);
    assert!(amounts[0].contains("twelve"));
}

#[test]
fn negative_amounts_are_reported() {
    let conn = setup();
    conn.execute(
        "INSERT INTO expenses(date, amount, category) VALUES ('2025-08-10','-4.25','Food')",
        [],
    )
    .unwrap();

    let rows = doctor::audit(&conn).unwrap();
    assert_eq!(issues_of_kind(&rows, "negative_amount").len(), 1);
}

#[test]
fn categories_outside_the_closed_set_are_reported() {
    let conn = setup();
    // The schema normally rejects these; a store written by an older
    // build can still carry them.
    conn.execute_batch("PRAGMA ignore_check_constraints = ON;")
        .unwrap();
    conn.execute(
        "INSERT INTO expenses(date, amount, category) VALUES ('2025-08-10','5','Groceries')",
        [],
    )
    .unwrap();

    let rows = doctor::audit(&conn).unwrap();
    let cats = issues_of_kind(&rows, "unknown_category");
    assert_eq!(cats.len(), 1);
    assert!(cats[0].contains("Groceries"));
}

#[test]
fn achievement_rows_outside_the_catalog_are_reported() {
    let conn = setup();
    utils::record_unlock(&conn, "streak-starter", "2025-08-10 09:00:00").unwrap();
    utils::record_unlock(&conn, "legacy-badge", "2024-01-01 09:00:00").unwrap();

    let rows = doctor::audit(&conn).unwrap();
    assert_eq!(
        issues_of_kind(&rows, "orphan_achievement"),
        vec!["legacy-badge".to_string()]
    );
}

#[test]
fn negative_or_garbled_settings_are_reported() {
    let conn = setup();
    utils::set_setting(&conn, "daily_limit", "-5").unwrap();
    utils::set_setting(&conn, "monthly_income", "lots").unwrap();

    let rows = doctor::audit(&conn).unwrap();
    let bad = issues_of_kind(&rows, "bad_setting");
    assert_eq!(bad.len(), 2);
    assert!(bad.iter().any(|d| d.contains("daily_limit='-5'")));
    assert!(bad.iter().any(|d| d.contains("monthly_income='lots'")));
}
