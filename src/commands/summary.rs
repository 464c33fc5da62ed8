// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::day_arg;
use crate::chain;
use crate::context::RequestContext;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, ctx: &RequestContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("rebuild", sub)) => {
            let from = day_arg(sub, "from")?;
            let rebuilt = crate::service::rebuild_from(conn, ctx, from)?;
            let rows = rebuilt
                .iter()
                .map(|s| {
                    vec![
                        s.day.to_regional_string(),
                        fmt_money(&s.net_amount),
                        fmt_money(&s.running_balance),
                        s.status.as_str().to_string(),
                    ]
                })
                .collect();
            println!("{}", pretty_table(&["Day", "Net", "Balance", "Status"], rows));
        }
        Some(("check", sub)) => {
            ctx.require_onboarded()?;
            let stale = chain::find_stale(conn, &ctx.owner_id)?;
            if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &stale)? {
                return Ok(());
            }
            if stale.is_empty() {
                println!("summary check: no stale days");
            } else {
                let rows = stale
                    .into_iter()
                    .map(|s| vec![s.day.to_regional_string(), s.issue])
                    .collect();
                println!("{}", pretty_table(&["Day", "Issue"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}
