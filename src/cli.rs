// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn output_flags(cmd: Command) -> Command {
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
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn category_arg(required: bool) -> Arg {
    Arg::new("category")
        .long("category")
        .short('c')
        .required(required)
        .help("Category label (free text)")
}

fn now_arg() -> Arg {
    Arg::new("now")
        .long("now")
        .help("Reference instant for the window (default: current time)")
}

pub fn build_cli() -> Command {
    Command::new("budgeteer")
        .version(clap::crate_version!())
        .about("Track income and expenses, category totals, budget progress and spending charts")
        .arg(
            Arg::new("user")
                .long("user")
                .short('u')
                .global(true)
                .help("User id whose transactions to use (default: configured user)"),
        )
        .subcommand(Command::new("init").about("Create the database and print its location"))
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(output_flags(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true).help("user | currency | week_start | top"))
                        .arg(Arg::new("value").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(category_arg(true))
                        .arg(
                            Arg::new("value")
                                .long("value")
                                .required(true)
                                .allow_hyphen_values(true)
                                .help("Signed amount: negative for expenses"),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("RFC 3339, 'YYYY-MM-DD HH:MM' or 'YYYY-MM-DD' (default: now)"),
                        ),
                )
                .subcommand(output_flags(
                    Command::new("list")
                        .arg(category_arg(false))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("category")
                .about("Categories and their totals")
                .subcommand(output_flags(Command::new("list")))
                .subcommand(output_flags(Command::new("totals"))),
        )
        .subcommand(
            Command::new("report")
                .about("Overview, top expenses and charts")
                .subcommand(output_flags(
                    Command::new("summary").arg(
                        Arg::new("top")
                            .long("top")
                            .value_parser(value_parser!(usize)),
                    ),
                ))
                .subcommand(output_flags(
                    Command::new("top").arg(
                        Arg::new("n")
                            .long("n")
                            .short('n')
                            .value_parser(value_parser!(usize)),
                    ),
                ))
                .subcommand(output_flags(
                    Command::new("chart")
                        .arg(
                            Arg::new("frame")
                                .long("frame")
                                .short('f')
                                .default_value("M")
                                .help("D | W | M | 6M | Y"),
                        )
                        .arg(category_arg(false))
                        .arg(now_arg()),
                )),
        )
        .subcommand(
            Command::new("import")
                .about("Import transactions from CSV (date,name,category,value)")
                .subcommand(
                    Command::new("transactions").arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export transactions")
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv | json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("query")
                .about("Run a stateless JSON query (file path or '-' for stdin)")
                .subcommand(Command::new("series").arg(Arg::new("input").long("input").default_value("-")))
                .subcommand(Command::new("summary").arg(Arg::new("input").long("input").default_value("-"))),
        )
        .subcommand(Command::new("doctor").about("Check stored transactions for invalid records"))
}
