// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{self, Settings};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let s = Settings::load(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
                println!(
                    "{}",
                    pretty_table(
                        &["Key", "Value"],
                        vec![
                            vec![config::CASCADE_RECALC.into(), s.cascade_recalc.to_string()],
                            vec![
                                config::DEFAULT_USER.into(),
                                s.default_user.unwrap_or_default(),
                            ],
                        ],
                    )
                );
            }
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").context("--key is required")?;
            let value = sub.get_one::<String>("value").context("--value is required")?;
            config::set_setting(conn, key, value)?;
            println!("Set {} = {}", key.trim(), value.trim());
        }
        _ => {}
    }
    Ok(())
}
