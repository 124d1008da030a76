// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod achievements;
pub mod budget;
pub mod doctor;
pub mod expense;
pub mod exporter;
pub mod health;
pub mod insights;
pub mod profile;
pub mod report;
pub mod streak;

use anyhow::Result;
use chrono::NaiveDate;

/// Explicit reference day for time-windowed computations; defaults to the
/// local calendar day when --as-of is absent.
pub fn reference_day(sub: &clap::ArgMatches) -> Result<NaiveDate> {
    match sub.get_one::<String>("as-of") {
        Some(s) => crate::utils::parse_date(s),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Wall-clock timestamp used for unlock times and audit columns.
pub fn now_stamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
