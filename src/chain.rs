// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The running balance chain.
//!
//! Each day's running balance is the previous calendar day's stored running
//! balance (0 when that day has no summary) plus the day's net amount. There is
//! no separate structure; the chain lives in `daily_summaries`.
//!
//! Recalculation is forward-only: recomputing a day never touches later days.
//! Editing a past day therefore leaves later running balances stale until
//! [`cascade_forward`] is run, either explicitly (`summary rebuild`) or after
//! each mutation when the `cascade_recalc` setting is on.

use crate::dates::DayKey;
use crate::engine;
use crate::errors::Result;
use crate::models::DailySummary;
use crate::store::{summaries, transactions};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

/// Running balance carried into `day`.
pub fn previous_balance(conn: &Connection, owner: &str, day: DayKey) -> Result<Decimal> {
    let Some(prev) = day.previous() else {
        return Ok(Decimal::ZERO);
    };
    Ok(summaries::find(conn, owner, prev)?
        .map(|s| s.running_balance)
        .unwrap_or(Decimal::ZERO))
}

/// Recomputes every summarized day after `from`, oldest first, so each one
/// reads its freshly updated predecessor. Each day keeps its own
/// `budget_at_that_time` snapshot.
pub fn cascade_forward(conn: &Connection, owner: &str, from: DayKey) -> Result<Vec<DailySummary>> {
    let mut out = Vec::new();
    for day in summaries::days_after(conn, owner, from)? {
        let Some(existing) = summaries::find(conn, owner, day)? else {
            continue;
        };
        out.push(engine::recalculate(
            conn,
            owner,
            day,
            existing.budget_at_that_time,
        )?);
    }
    if !out.is_empty() {
        tracing::info!(owner, %from, days = out.len(), "running balances cascaded forward");
    }
    Ok(out)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaleDay {
    pub day: DayKey,
    pub issue: String,
}

/// Lists summaries that no longer agree with their transactions or with the
/// previous day's running balance.
pub fn find_stale(conn: &Connection, owner: &str) -> Result<Vec<StaleDay>> {
    let mut stale = Vec::new();
    for s in summaries::list_all(conn, owner)? {
        let txs = transactions::list_by_day(conn, owner, s.day)?;
        let fresh =
            engine::compute_summary(owner, s.day, s.budget_at_that_time, &txs, Decimal::ZERO)?;
        let (income, expense) = (fresh.total_income, fresh.total_expense);
        if income != s.total_income || expense != s.total_expense {
            stale.push(StaleDay {
                day: s.day,
                issue: format!(
                    "totals {}/{} but transactions sum to {}/{}",
                    s.total_income, s.total_expense, income, expense
                ),
            });
        }
        let previous = previous_balance(conn, owner, s.day)?;
        let expected = engine::add(previous, s.net_amount, "running balance")?;
        if expected != s.running_balance {
            stale.push(StaleDay {
                day: s.day,
                issue: format!(
                    "running balance {} but chain gives {}",
                    s.running_balance, expected
                ),
            });
        }
    }
    Ok(stale)
}
