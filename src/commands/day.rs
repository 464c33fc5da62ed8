// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{day_arg, transactions::rows};
use crate::context::RequestContext;
use crate::service;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, ctx: &RequestContext, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("show", sub)) = m.subcommand() {
        ctx.require_onboarded()?;
        let day = day_arg(sub, "date")?;
        let view = service::day_view(conn, ctx, day);
        if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
            return Ok(());
        }
        let budget = view
            .budget
            .as_ref()
            .map(|b| b.amount.to_string())
            .unwrap_or_else(|| "-".into());
        let status = view
            .summary
            .as_ref()
            .map(|s| s.status.as_str())
            .unwrap_or("-");
        println!(
            "{}",
            pretty_table(
                &["Day", "Budget", "Income", "Expense", "Balance", "Status"],
                vec![vec![
                    view.day.to_regional_string(),
                    budget,
                    fmt_money(&view.total_income),
                    fmt_money(&view.total_expense),
                    fmt_money(&view.running_balance),
                    status.to_string(),
                ]],
            )
        );
        if view.transactions.is_empty() {
            println!("No transactions");
        } else {
            println!(
                "{}",
                pretty_table(
                    &["ID", "Type", "Category", "Amount", "Note", "Created"],
                    rows(&view.transactions)
                )
            );
        }
    }
    Ok(())
}
