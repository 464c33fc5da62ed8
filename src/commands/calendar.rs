// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::context::RequestContext;
use crate::service;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, ctx: &RequestContext, m: &clap::ArgMatches) -> Result<()> {
    ctx.require_onboarded()?;
    let year = *m.get_one::<i32>("year").context("--year is required")?;
    let month = *m.get_one::<u32>("month").context("--month is required")?;
    let days = service::fetch_calendar(conn, &ctx.owner_id, year, month);
    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &days)? {
        let rows = days
            .iter()
            .map(|d| vec![d.day.to_regional_string(), d.status.as_str().to_string()])
            .collect();
        println!("{}", pretty_table(&["Day", "Status"], rows));
    }
    Ok(())
}
