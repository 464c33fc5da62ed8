// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::day_arg;
use crate::context::RequestContext;
use crate::drafts;
use crate::models::Transaction;
use crate::service;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, ctx: &RequestContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, ctx, sub)?,
        Some(("list", sub)) => list(conn, ctx, sub)?,
        Some(("rm", sub)) => remove(conn, ctx, sub)?,
        _ => {}
    }
    Ok(())
}

/// Builds an entry from `--date --type --category --amount [--note]`.
pub fn entry_from_args(sub: &clap::ArgMatches) -> Result<crate::models::NewTransaction> {
    let day = day_arg(sub, "date")?;
    let tx_type = sub.get_one::<String>("type").context("--type is required")?;
    let category = sub
        .get_one::<String>("category")
        .context("--category is required")?;
    let amount = parse_decimal(
        sub.get_one::<String>("amount")
            .context("--amount is required")?
            .trim(),
    )?;
    let note = sub.get_one::<String>("note").map(|s| s.as_str());
    Ok(drafts::entry(day, tx_type.trim(), category.trim(), amount, note))
}

fn add(conn: &mut Connection, ctx: &RequestContext, sub: &clap::ArgMatches) -> Result<()> {
    let entry = entry_from_args(sub)?;
    let outcome = service::save_bulk_transactions(conn, ctx, std::slice::from_ref(&entry))?;
    let id = outcome.ids.first().copied().unwrap_or_default();
    println!(
        "Recorded {} {} ({}) on {} as #{}",
        entry.tx_type.to_uppercase(),
        fmt_money(&entry.amount),
        entry.category,
        entry.date,
        id
    );
    for s in &outcome.summaries {
        println!(
            "{}: balance {} ({})",
            s.day.to_regional_string(),
            fmt_money(&s.running_balance),
            s.status.as_str()
        );
    }
    Ok(())
}

fn list(conn: &Connection, ctx: &RequestContext, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let day = day_arg(sub, "date")?;
    ctx.require_onboarded()?;
    let data = service::fetch_day_transactions(conn, &ctx.owner_id, day);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(
                &["ID", "Type", "Category", "Amount", "Note", "Created"],
                rows(&data)
            )
        );
    }
    Ok(())
}

pub(crate) fn rows(data: &[Transaction]) -> Vec<Vec<String>> {
    data.iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                t.tx_type.to_string(),
                t.category.to_string(),
                fmt_money(&t.amount),
                t.note.clone().unwrap_or_default(),
                t.created_at.clone(),
            ]
        })
        .collect()
}

fn remove(conn: &mut Connection, ctx: &RequestContext, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    let outcome = service::delete_transaction(conn, ctx, id)?;
    println!(
        "Removed #{} from {}; balance now {} ({})",
        outcome.deleted.id,
        outcome.deleted.day.to_regional_string(),
        fmt_money(&outcome.summary.running_balance),
        outcome.summary.status.as_str()
    );
    Ok(())
}
