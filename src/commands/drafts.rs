// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{day_arg, transactions::entry_from_args};
use crate::context::RequestContext;
use crate::drafts::DraftList;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

pub fn handle(
    conn: &mut Connection,
    ctx: &RequestContext,
    dir: &Path,
    m: &clap::ArgMatches,
) -> Result<()> {
    ctx.require_onboarded()?;
    match m.subcommand() {
        Some(("add", sub)) => {
            let entry = entry_from_args(sub)?;
            let mut list = DraftList::load(dir, day_arg(sub, "date")?)?;
            let id = list.add(entry)?;
            println!(
                "Staged draft #{} for {} ({} pending)",
                id,
                list.day().to_regional_string(),
                list.items().len()
            );
        }
        Some(("list", sub)) => {
            let list = DraftList::load(dir, day_arg(sub, "date")?)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &list.items())? {
                let rows = list
                    .items()
                    .iter()
                    .map(|d| {
                        vec![
                            d.id.to_string(),
                            d.item.tx_type.to_uppercase(),
                            d.item.category.clone(),
                            fmt_money(&d.item.amount),
                            d.item.note.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Draft", "Type", "Category", "Amount", "Note"], rows)
                );
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<u32>("id").context("--id is required")?;
            let mut list = DraftList::load(dir, day_arg(sub, "date")?)?;
            list.remove(id)?;
            println!("Removed draft #{}", id);
        }
        Some(("clear", sub)) => {
            let mut list = DraftList::load(dir, day_arg(sub, "date")?)?;
            list.clear()?;
            println!("Drafts cleared");
        }
        Some(("save", sub)) => {
            let mut list = DraftList::load(dir, day_arg(sub, "date")?)?;
            let outcome = list.commit(conn, ctx)?;
            println!("Saved {} transaction(s)", outcome.ids.len());
            for s in &outcome.summaries {
                println!(
                    "{}: balance {} ({})",
                    s.day.to_regional_string(),
                    fmt_money(&s.running_balance),
                    s.status.as_str()
                );
            }
            if outcome.cascaded > 0 {
                println!("Updated {} later day(s)", outcome.cascaded);
            }
        }
        _ => {}
    }
    Ok(())
}
