// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{decimal_at, parsed_at};
use crate::dates::DayKey;
use crate::errors::Result;
use crate::models::{CalendarDay, DailyStatus, DailySummary};
use rusqlite::{Connection, OptionalExtension, Row, params};

const COLUMNS: &str = "owner_id, day, budget_at_that_time, total_income, total_expense, \
                       net_amount, running_balance, status";

fn map_row(r: &Row) -> rusqlite::Result<DailySummary> {
    Ok(DailySummary {
        owner_id: r.get(0)?,
        day: parsed_at::<DayKey>(r, 1)?,
        budget_at_that_time: decimal_at(r, 2)?,
        total_income: decimal_at(r, 3)?,
        total_expense: decimal_at(r, 4)?,
        net_amount: decimal_at(r, 5)?,
        running_balance: decimal_at(r, 6)?,
        status: parsed_at::<DailyStatus>(r, 7)?,
    })
}

pub fn find(conn: &Connection, owner: &str, day: DayKey) -> Result<Option<DailySummary>> {
    let sql = format!("SELECT {COLUMNS} FROM daily_summaries WHERE owner_id=?1 AND day=?2");
    let s = conn
        .query_row(&sql, params![owner, day.to_string()], map_row)
        .optional()?;
    Ok(s)
}

/// Create-or-replace keyed by (owner, day).
pub fn upsert(conn: &Connection, s: &DailySummary) -> Result<()> {
    conn.execute(
        "INSERT INTO daily_summaries(owner_id, day, budget_at_that_time, total_income,
                                     total_expense, net_amount, running_balance, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(owner_id, day) DO UPDATE SET
             budget_at_that_time=excluded.budget_at_that_time,
             total_income=excluded.total_income,
             total_expense=excluded.total_expense,
             net_amount=excluded.net_amount,
             running_balance=excluded.running_balance,
             status=excluded.status,
             updated_at=strftime('%Y-%m-%dT%H:%M:%fZ','now')",
        params![
            s.owner_id,
            s.day.to_string(),
            s.budget_at_that_time.to_string(),
            s.total_income.to_string(),
            s.total_expense.to_string(),
            s.net_amount.to_string(),
            s.running_balance.to_string(),
            s.status.as_str(),
        ],
    )?;
    Ok(())
}

pub fn list_all(conn: &Connection, owner: &str) -> Result<Vec<DailySummary>> {
    let sql = format!("SELECT {COLUMNS} FROM daily_summaries WHERE owner_id=?1 ORDER BY day");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![owner], map_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Only the day and status columns, for calendar colouring.
pub fn statuses_between(
    conn: &Connection,
    owner: &str,
    first: DayKey,
    last: DayKey,
) -> Result<Vec<CalendarDay>> {
    let mut stmt = conn.prepare(
        "SELECT day, status FROM daily_summaries
         WHERE owner_id=?1 AND day>=?2 AND day<=?3 ORDER BY day",
    )?;
    let rows = stmt.query_map(params![owner, first.to_string(), last.to_string()], |r| {
        Ok(CalendarDay {
            day: parsed_at::<DayKey>(r, 0)?,
            status: parsed_at::<DailyStatus>(r, 1)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Days strictly after `day` that already carry a summary, ascending.
pub fn days_after(conn: &Connection, owner: &str, day: DayKey) -> Result<Vec<DayKey>> {
    let mut stmt = conn.prepare(
        "SELECT day FROM daily_summaries WHERE owner_id=?1 AND day>?2 ORDER BY day",
    )?;
    let rows = stmt.query_map(params![owner, day.to_string()], |r| {
        parsed_at::<DayKey>(r, 0)
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}
