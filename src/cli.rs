// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::identity::USER_ENV;
use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn date_arg(help: &'static str) -> Arg {
    Arg::new("date")
        .long("date")
        .required(true)
        .value_name("DD-MM-YYYY")
        .help(help)
}

fn entry_args(cmd: Command) -> Command {
    cmd.arg(date_arg("Day of the entry, regional year (e.g. 15-06-2567)"))
        .arg(
            Arg::new("type")
                .long("type")
                .required(true)
                .value_parser(["income", "expense", "INCOME", "EXPENSE"])
                .help("income or expense"),
        )
        .arg(
            Arg::new("category")
                .long("category")
                .required(true)
                .help("food, transport, shopping, health, salary, other"),
        )
        .arg(Arg::new("amount").long("amount").required(true))
        .arg(Arg::new("note").long("note"))
}

fn month_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("year")
            .long("year")
            .required(true)
            .value_parser(value_parser!(i32))
            .help("Universal calendar year"),
    )
    .arg(
        Arg::new("month")
            .long("month")
            .required(true)
            .value_parser(value_parser!(u32).range(1..=12)),
    )
}

pub fn build_cli() -> Command {
    Command::new("daybook")
        .about("Daily budget ledger: record income and expenses per day, track the running balance")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .env(USER_ENV)
                .help("Owner id supplied by your identity provider"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("profile")
                .about("Owner profile")
                .subcommand(
                    Command::new("create")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("email").long("email")),
                )
                .subcommand(json_flags(Command::new("show"))),
        )
        .subcommand(
            Command::new("budget")
                .about("Daily spending target")
                .subcommand(
                    Command::new("set").arg(
                        Arg::new("amount")
                            .long("amount")
                            .required(true)
                            .value_parser(value_parser!(i64))
                            .allow_negative_numbers(true)
                            .help("Whole currency units, 0 or more"),
                    ),
                )
                .subcommand(Command::new("show")),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(entry_args(Command::new("add")))
                .subcommand(json_flags(
                    Command::new("list").arg(date_arg("Day to list")),
                ))
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("draft")
                .about("Stage entries for a day and save them together")
                .subcommand(entry_args(Command::new("add")))
                .subcommand(json_flags(
                    Command::new("list").arg(date_arg("Day of the drafts")),
                ))
                .subcommand(
                    Command::new("rm").arg(date_arg("Day of the drafts")).arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(u32)),
                    ),
                )
                .subcommand(Command::new("clear").arg(date_arg("Day of the drafts")))
                .subcommand(Command::new("save").arg(date_arg("Day of the drafts"))),
        )
        .subcommand(
            Command::new("day")
                .about("One day's budget, transactions and running balance")
                .subcommand(json_flags(Command::new("show").arg(date_arg("Day to show")))),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly totals and category breakdown")
                .subcommand(json_flags(month_args(Command::new("month")))),
        )
        .subcommand(json_flags(month_args(
            Command::new("calendar").about("Under/over budget status per day of a month"),
        )))
        .subcommand(
            Command::new("summary")
                .about("Maintain cached daily summaries")
                .subcommand(
                    Command::new("rebuild")
                        .about("Recalculate a day and every later summarized day")
                        .arg(
                            Arg::new("from")
                                .long("from")
                                .required(true)
                                .value_name("DD-MM-YYYY"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("check").about("List days whose cached summary is stale"),
                )),
        )
        .subcommand(
            Command::new("settings")
                .about("Persistent settings")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").long("key").required(true))
                        .arg(Arg::new("value").long("value").required(true)),
                ),
        )
}
