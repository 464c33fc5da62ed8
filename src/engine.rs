// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Daily summary recalculation.
//!
//! A day's summary is derived from three inputs only: the day's transactions,
//! the previous day's stored running balance, and the budget the caller passes
//! in. The budget is never looked up here, so the same inputs always produce
//! the same summary.

use crate::chain;
use crate::dates::DayKey;
use crate::errors::{LedgerError, Result};
use crate::models::{DailyStatus, DailySummary, Transaction, TxType};
use crate::store::{summaries, transactions};
use once_cell::sync::Lazy;
use rusqlite::{Connection, TransactionBehavior};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type DayLocks = Mutex<HashMap<(String, DayKey), Arc<Mutex<()>>>>;

static RECALC_LOCKS: Lazy<DayLocks> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Adds two amounts, failing instead of wrapping or panicking.
pub(crate) fn add(a: Decimal, b: Decimal, what: &str) -> Result<Decimal> {
    a.checked_add(b)
        .ok_or_else(|| LedgerError::Overflow(what.to_string()))
}

fn sub(a: Decimal, b: Decimal, what: &str) -> Result<Decimal> {
    a.checked_sub(b)
        .ok_or_else(|| LedgerError::Overflow(what.to_string()))
}

/// Pure arithmetic for one day.
pub fn compute_summary(
    owner: &str,
    day: DayKey,
    budget: Decimal,
    txs: &[Transaction],
    previous_balance: Decimal,
) -> Result<DailySummary> {
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    for t in txs {
        match t.tx_type {
            TxType::Income => total_income = add(total_income, t.amount, "total income")?,
            TxType::Expense => total_expense = add(total_expense, t.amount, "total expense")?,
        }
    }

    let net_amount = add(
        sub(budget, total_expense, "net amount")?,
        total_income,
        "net amount",
    )?;
    let running_balance = add(previous_balance, net_amount, "running balance")?;
    // spending exactly the budget still counts as under
    let status = if total_expense <= budget {
        DailyStatus::UnderBudget
    } else {
        DailyStatus::OverBudget
    };

    Ok(DailySummary {
        owner_id: owner.to_string(),
        day,
        budget_at_that_time: budget,
        total_income,
        total_expense,
        net_amount,
        running_balance,
        status,
    })
}

/// Recomputes and upserts the summary for (owner, day). Store errors are
/// returned to the caller untouched.
pub fn recalculate(
    conn: &Connection,
    owner: &str,
    day: DayKey,
    budget: Decimal,
) -> Result<DailySummary> {
    let txs = transactions::list_by_day(conn, owner, day)?;
    let previous = chain::previous_balance(conn, owner, day)?;
    let summary = compute_summary(owner, day, budget, &txs, previous)?;
    summaries::upsert(conn, &summary)?;
    tracing::debug!(
        owner,
        %day,
        transactions = txs.len(),
        previous = %previous,
        net = %summary.net_amount,
        running = %summary.running_balance,
        status = summary.status.as_str(),
        "daily summary recalculated"
    );
    Ok(summary)
}

fn day_lock(owner: &str, day: DayKey) -> Arc<Mutex<()>> {
    let mut locks = RECALC_LOCKS.lock().unwrap_or_else(|p| p.into_inner());
    locks
        .entry((owner.to_string(), day))
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .clone()
}

/// Runs `f` while holding the (owner, day) lock and an IMMEDIATE transaction.
/// Everything `f` writes commits together or not at all, and no other writer
/// can slip a change to the same day in between its reads and its upsert.
pub fn with_day_locked<T>(
    conn: &mut Connection,
    owner: &str,
    day: DayKey,
    f: impl FnOnce(&Connection) -> Result<T>,
) -> Result<T> {
    with_days_locked(conn, owner, &[day], f)
}

/// Multi-day form of [`with_day_locked`]. Locks are taken in day order so two
/// callers touching overlapping days cannot deadlock.
pub fn with_days_locked<T>(
    conn: &mut Connection,
    owner: &str,
    days: &[DayKey],
    f: impl FnOnce(&Connection) -> Result<T>,
) -> Result<T> {
    let mut ordered = days.to_vec();
    ordered.sort();
    ordered.dedup();
    let locks: Vec<Arc<Mutex<()>>> = ordered.iter().map(|d| day_lock(owner, *d)).collect();
    let out = {
        let _guards: Vec<_> = locks
            .iter()
            .map(|l| l.lock().unwrap_or_else(|p| p.into_inner()))
            .collect();
        run_immediate(conn, f)
    };
    drop(locks);
    release_idle(owner, &ordered);
    out
}

fn run_immediate<T>(
    conn: &mut Connection,
    f: impl FnOnce(&Connection) -> Result<T>,
) -> Result<T> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let out = f(&tx)?;
    tx.commit()?;
    Ok(out)
}

/// Drops registry entries nobody else holds or waits on.
fn release_idle(owner: &str, days: &[DayKey]) {
    let mut locks = RECALC_LOCKS.lock().unwrap_or_else(|p| p.into_inner());
    for day in days {
        let key = (owner.to_string(), *day);
        if locks.get(&key).is_some_and(|l| Arc::strong_count(l) == 1) {
            locks.remove(&key);
        }
    }
}

/// Number of (owner, day) locks currently registered.
pub fn registered_locks() -> usize {
    RECALC_LOCKS.lock().unwrap_or_else(|p| p.into_inner()).len()
}

pub fn recalculate_serialized(
    conn: &mut Connection,
    owner: &str,
    day: DayKey,
    budget: Decimal,
) -> Result<DailySummary> {
    with_day_locked(conn, owner, day, |c| recalculate(c, owner, day, budget))
}
