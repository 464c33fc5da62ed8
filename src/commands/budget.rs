// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::context::RequestContext;
use crate::service;
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, ctx: &RequestContext, m: &clap::ArgMatches) -> Result<()> {
    ctx.require_onboarded()?;
    match m.subcommand() {
        Some(("set", sub)) => {
            let amount = *sub.get_one::<i64>("amount").context("--amount is required")?;
            let b = service::set_budget(conn, ctx, amount)?;
            println!("Daily budget set to {}", b.amount);
        }
        Some(("show", _)) => match service::fetch_budget(conn, &ctx.owner_id) {
            Some(b) => println!("Daily budget: {}", b.amount),
            None => println!("No daily budget set yet"),
        },
        _ => {}
    }
    Ok(())
}
