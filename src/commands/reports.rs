// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::context::RequestContext;
use crate::service;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, ctx: &RequestContext, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("month", sub)) = m.subcommand() {
        month(conn, ctx, sub)?;
    }
    Ok(())
}

fn month(conn: &Connection, ctx: &RequestContext, sub: &clap::ArgMatches) -> Result<()> {
    ctx.require_onboarded()?;
    let year = *sub.get_one::<i32>("year").context("--year is required")?;
    let month = *sub.get_one::<u32>("month").context("--month is required")?;
    let report = service::fetch_monthly_summary(conn, &ctx.owner_id, year, month);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }

    println!(
        "{}",
        pretty_table(
            &["Month", "Income", "Expense", "Net"],
            vec![vec![
                format!("{:04}-{:02}", year, month),
                fmt_money(&report.total_income),
                fmt_money(&report.total_expense),
                fmt_money(&report.net_income),
            ]],
        )
    );

    if !report.category_breakdown.is_empty() {
        let rows = report
            .category_breakdown
            .iter()
            .map(|c| {
                vec![
                    c.category.to_string(),
                    fmt_money(&c.amount),
                    format!("{:.1}%", c.percentage.round_dp(1)),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    }

    // only days with activity; the JSON output carries the full series
    let rows: Vec<Vec<String>> = report
        .daily_data
        .iter()
        .filter(|p| !p.income.is_zero() || !p.expense.is_zero())
        .map(|p| vec![p.day.to_string(), fmt_money(&p.income), fmt_money(&p.expense)])
        .collect();
    if !rows.is_empty() {
        println!("{}", pretty_table(&["Day", "Income", "Expense"], rows));
    }
    Ok(())
}
