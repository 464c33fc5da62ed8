// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::process::ExitCode;

use daybook::{cli, commands, db, utils};

fn main() -> ExitCode {
    utils::init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let outcome = commands::classify(&e);
            match outcome {
                commands::Failure::Redirect => eprintln!("{:#}", e),
                commands::Failure::Input | commands::Failure::Internal => {
                    eprintln!("Error: {:#}", e)
                }
            }
            ExitCode::from(outcome.exit_code())
        }
    }
}

fn run() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("settings", sub)) => commands::settings::handle(&conn, sub)?,
        Some(("profile", sub)) => {
            let identity = commands::identity(&conn, &matches)?;
            commands::profile::handle(&conn, &identity, sub)?
        }
        Some((name, sub)) => {
            let ctx = commands::request_context(&conn, &matches)?;
            match name {
                "budget" => commands::budget::handle(&conn, &ctx, sub)?,
                "tx" => commands::transactions::handle(&mut conn, &ctx, sub)?,
                "draft" => {
                    let dir = db::data_dir()?.join("drafts");
                    commands::drafts::handle(&mut conn, &ctx, &dir, sub)?
                }
                "day" => commands::day::handle(&conn, &ctx, sub)?,
                "report" => commands::reports::handle(&conn, &ctx, sub)?,
                "calendar" => commands::calendar::handle(&conn, &ctx, sub)?,
                "summary" => commands::summary::handle(&mut conn, &ctx, sub)?,
                _ => {}
            }
        }
        None => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
