// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn as_of_arg() -> Arg {
    Arg::new("as-of")
        .long("as-of")
        .value_name("YYYY-MM-DD")
        .help("Reference day for time-windowed computations (default: today)")
}

pub fn build_cli() -> Command {
    Command::new("budgetpulse")
        .version(clap::crate_version!())
        .about("Personal expense tracking with daily budget status, streaks, and insights")
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(
            Command::new("profile")
                .about("Manage the user profile")
                .subcommand(
                    Command::new("set")
                        .about("Set profile fields")
                        .arg(Arg::new("income").long("income").value_name("AMOUNT"))
                        .arg(Arg::new("currency").long("currency").value_name("CCY"))
                        .arg(
                            Arg::new("daily-limit")
                                .long("daily-limit")
                                .value_name("AMOUNT"),
                        )
                        .arg(
                            Arg::new("streak-rule")
                                .long("streak-rule")
                                .value_name("RULE")
                                .help("under_budget or logged_expenses"),
                        )
                        .arg(Arg::new("language").long("language").value_name("LANG"))
                        .arg(Arg::new("timezone").long("timezone").value_name("TZ")),
                )
                .subcommand(json_flags(
                    Command::new("show").about("Show the active profile"),
                )),
        )
        .subcommand(
            Command::new("budget")
                .about("Manage monthly category budgets")
                .subcommand(
                    Command::new("set")
                        .about("Set a monthly budget for a category")
                        .arg(Arg::new("category").required(true))
                        .arg(Arg::new("amount").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List category budgets"),
                )),
        )
        .subcommand(
            Command::new("expense")
                .about("Manage the expense log")
                .subcommand(
                    Command::new("add")
                        .about("Log an expense")
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD")
                                .required(true),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .value_name("AMOUNT")
                                .required(true),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .value_name("CATEGORY")
                                .required(true),
                        )
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .value_name("TEXT"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List expenses")
                        .arg(Arg::new("month").long("month").value_name("YYYY-MM"))
                        .arg(Arg::new("category").long("category").value_name("CATEGORY"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_name("N")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Update an expense; refreshes its updated_at")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD"))
                        .arg(Arg::new("amount").long("amount").value_name("AMOUNT"))
                        .arg(Arg::new("category").long("category").value_name("CATEGORY"))
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .value_name("TEXT"),
                        ),
                )
                .subcommand(
                    Command::new("rm").about("Delete an expense").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(
                    Command::new("clear").about("Delete all expenses").arg(
                        Arg::new("yes")
                            .long("yes")
                            .action(ArgAction::SetTrue)
                            .help("Confirm deletion"),
                    ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Derived views over the expense log")
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("All-time and current-month totals with top categories")
                        .arg(as_of_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("day")
                        .about("Evaluate one day against the daily limit")
                        .arg(Arg::new("date").required(true).value_name("YYYY-MM-DD")),
                ))
                .subcommand(json_flags(
                    Command::new("month")
                        .about("Per-day budget status for a month")
                        .arg(Arg::new("month").required(true).value_name("YYYY-MM")),
                )),
        )
        .subcommand(json_flags(
            Command::new("streak")
                .about("Recompute the daily streak from the full history")
                .arg(as_of_arg())
                .arg(
                    Arg::new("rule")
                        .long("rule")
                        .value_name("RULE")
                        .help("Override the profile streak rule"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("achievements")
                .about("Recompute achievement progress and unlock new ones")
                .arg(as_of_arg()),
        ))
        .subcommand(
            Command::new("insights")
                .about("Trends, duplicates, and projections")
                .subcommand(json_flags(
                    Command::new("trends")
                        .about("Per-category month-over-month trends")
                        .arg(as_of_arg())
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_name("N")
                                .value_parser(value_parser!(u32))
                                .default_value("3"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("duplicates")
                        .about("Probable duplicate expenses")
                        .arg(
                            Arg::new("window")
                                .long("window")
                                .value_name("DAYS")
                                .value_parser(value_parser!(i64))
                                .default_value("3"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("project")
                        .about("Next month's projected totals per category")
                        .arg(as_of_arg())
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_name("N")
                                .value_parser(value_parser!(u32))
                                .default_value("3"),
                        ),
                )),
        )
        .subcommand(json_flags(
            Command::new("health")
                .about("Composite financial health score")
                .arg(as_of_arg()),
        ))
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("expenses")
                        .about("Export the expense log")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .value_name("csv|json")
                                .default_value("csv"),
                        )
                        .arg(
                            Arg::new("out")
                                .long("out")
                                .value_name("FILE")
                                .required(true),
                        ),
                ),
        )
        .subcommand(Command::new("doctor").about("Audit the store for inconsistencies"))
}
