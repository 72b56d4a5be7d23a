// Copyright (c) 2025 Soumyadip Sarkar.
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
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn month_arg(required: bool) -> Arg {
    Arg::new("month")
        .long("month")
        .required(required)
        .help("Calendar month, YYYY-MM")
}

pub fn build_cli() -> Command {
    Command::new("moneyplan")
        .about("Personal budget allocation, savings scoring, and goal funding")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(profile_cmd())
        .subcommand(category_cmd())
        .subcommand(tx_cmd())
        .subcommand(recurring_cmd())
        .subcommand(goal_cmd())
        .subcommand(plan_cmd())
        .subcommand(report_cmd())
        .subcommand(export_cmd())
        .subcommand(Command::new("doctor").about("Check data consistency"))
}

fn profile_cmd() -> Command {
    Command::new("profile")
        .about("Manage the user profile")
        .subcommand(
            Command::new("set")
                .about("Create or update the profile")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("salary")
                        .long("salary")
                        .required(true)
                        .help("Monthly income baseline"),
                )
                .arg(
                    Arg::new("savings-percent")
                        .long("savings-percent")
                        .required(true)
                        .help("Share of income earmarked for savings"),
                )
                .arg(
                    Arg::new("buffer-percent")
                        .long("buffer-percent")
                        .required(true)
                        .help("Share of income earmarked as a buffer"),
                ),
        )
        .subcommand(json_flags(
            Command::new("show").about("Show the profile and derived percents"),
        ))
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Manage spending categories")
        .subcommand(
            Command::new("add")
                .about("Add a category")
                .arg(Arg::new("name").long("name").required(true)),
        )
        .subcommand(Command::new("list").about("List categories"))
        .subcommand(
            Command::new("rm")
                .about("Remove a category")
                .arg(Arg::new("name").long("name").required(true)),
        )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and inspect transactions")
        .subcommand(
            Command::new("add")
                .about("Record a transaction (positive income, negative expense)")
                .arg(
                    Arg::new("date")
                        .long("date")
                        .required(true)
                        .help("YYYY-MM-DD"),
                )
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("method")
                        .long("method")
                        .help("Payment method (cash, card, ...)"),
                )
                .arg(Arg::new("note").long("note")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List transactions")
                .arg(month_arg(false))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                ),
        )
}

fn recurring_cmd() -> Command {
    Command::new("recurring")
        .about("Manage recurring obligations")
        .subcommand(
            Command::new("add")
                .about("Add a recurring obligation")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .help("Positive magnitude"),
                )
                .arg(
                    Arg::new("frequency")
                        .long("frequency")
                        .required(true)
                        .help("daily|weekly|monthly|yearly"),
                )
                .arg(Arg::new("category").long("category")),
        )
        .subcommand(json_flags(
            Command::new("list").about("List recurring obligations"),
        ))
        .subcommand(
            Command::new("rm")
                .about("Remove a recurring obligation")
                .arg(Arg::new("name").long("name").required(true)),
        )
}

fn goal_cmd() -> Command {
    Command::new("goal")
        .about("Manage savings goals")
        .subcommand(
            Command::new("add")
                .about("Add a goal")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("target").long("target").required(true))
                .arg(
                    Arg::new("current")
                        .long("current")
                        .help("Starting progress, defaults to 0"),
                )
                .arg(
                    Arg::new("deadline")
                        .long("deadline")
                        .help("Optional YYYY-MM-DD"),
                ),
        )
        .subcommand(json_flags(Command::new("list").about("List goals")))
        .subcommand(
            Command::new("rm")
                .about("Remove a goal")
                .arg(Arg::new("name").long("name").required(true)),
        )
        .subcommand(
            Command::new("contribute")
                .about("Contribute directly to a goal (clamped to its target)")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("amount").long("amount").required(true)),
        )
}

fn plan_cmd() -> Command {
    Command::new("plan")
        .about("Derive the monthly spending plan and fund goals")
        .subcommand(json_flags(
            Command::new("show")
                .about("Show the allocation split")
                .arg(month_arg(false).help("Use this month's recorded income as the basis"))
                .arg(
                    Arg::new("income")
                        .long("income")
                        .help("Override the income basis"),
                )
                .arg(
                    Arg::new("net-of-recurring")
                        .long("net-of-recurring")
                        .action(ArgAction::SetTrue)
                        .help("Subtract recurring obligations before splitting"),
                ),
        ))
        .subcommand(
            Command::new("fund")
                .about("Distribute the savings share across goals")
                .arg(month_arg(true))
                .arg(
                    Arg::new("income")
                        .long("income")
                        .help("Override the income basis"),
                )
                .arg(
                    Arg::new("net-of-recurring")
                        .long("net-of-recurring")
                        .action(ArgAction::SetTrue)
                        .help("Subtract recurring obligations before splitting"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Print the distribution without saving"),
                ),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Monthly summaries")
        .subcommand(json_flags(
            Command::new("month")
                .about("Income, expenses, savings score, and spending breakdown")
                .arg(month_arg(true)),
        ))
}

fn export_cmd() -> Command {
    Command::new("export")
        .about("Export data to files")
        .subcommand(
            Command::new("report")
                .about("Write the monthly report document")
                .arg(month_arg(true))
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .help("csv|json"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(
            Command::new("transactions")
                .about("Dump all transactions")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .help("csv|json"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
}
