// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Request-level operations.
//!
//! Mutations (save, delete, rebuild, budget, profile) propagate every failure.
//! The `fetch_*` reads log failures and fall back to an empty value so that a
//! storage hiccup shows an empty screen instead of an error.

use crate::calendar;
use crate::chain;
use crate::context::RequestContext;
use crate::dates::DayKey;
use crate::engine;
use crate::errors::{LedgerError, Result};
use crate::identity::IdentityProvider;
use crate::models::{
    Budget, CalendarDay, DailySummary, MonthlySummary, NewTransaction, Profile, Transaction, TxType,
};
use crate::monthly;
use crate::store::{budgets, profiles, summaries, transactions};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize)]
pub struct SaveOutcome {
    pub ids: Vec<i64>,
    pub summaries: Vec<DailySummary>,
    pub cascaded: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteOutcome {
    pub deleted: Transaction,
    pub summary: DailySummary,
    pub cascaded: usize,
}

/// What the day screen shows.
#[derive(Debug, Clone, Serialize)]
pub struct DayView {
    pub day: DayKey,
    pub budget: Option<Budget>,
    pub transactions: Vec<Transaction>,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub running_balance: Decimal,
    pub summary: Option<DailySummary>,
}

/// Inserts a batch and recalculates every day it touches, all in one
/// transaction. Either every item is stored and every summary updated, or
/// nothing changes.
pub fn save_bulk_transactions(
    conn: &mut Connection,
    ctx: &RequestContext,
    items: &[NewTransaction],
) -> Result<SaveOutcome> {
    ctx.require_onboarded()?;
    let valid = transactions::validate_all(items)?;
    let days: Vec<DayKey> = valid
        .iter()
        .map(|v| v.day)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let owner = ctx.owner_id.as_str();
    let budget = ctx.daily_budget();

    let outcome = engine::with_days_locked(conn, owner, &days, |c| {
        let ids = transactions::insert_valid(c, owner, &valid)?;
        let mut out = Vec::with_capacity(days.len());
        for day in &days {
            out.push(engine::recalculate(c, owner, *day, budget)?);
        }
        let cascaded = match days.first() {
            Some(first) if ctx.settings.cascade_recalc => {
                chain::cascade_forward(c, owner, *first)?.len()
            }
            _ => 0,
        };
        Ok(SaveOutcome {
            ids,
            summaries: out,
            cascaded,
        })
    })?;
    tracing::info!(
        owner,
        saved = outcome.ids.len(),
        days = days.len(),
        "transactions saved"
    );
    Ok(outcome)
}

/// Deletes one of the caller's transactions and recalculates its day.
pub fn delete_transaction(
    conn: &mut Connection,
    ctx: &RequestContext,
    id: i64,
) -> Result<DeleteOutcome> {
    ctx.require_onboarded()?;
    let owner = ctx.owner_id.as_str();
    let day = transactions::find_one(conn, owner, id)?
        .map(|t| t.day)
        .ok_or_else(|| LedgerError::NotFound(format!("transaction {}", id)))?;
    let budget = ctx.daily_budget();

    let outcome = engine::with_day_locked(conn, owner, day, |c| {
        let deleted = transactions::delete_one(c, owner, id)?;
        let summary = engine::recalculate(c, owner, day, budget)?;
        let cascaded = if ctx.settings.cascade_recalc {
            chain::cascade_forward(c, owner, day)?.len()
        } else {
            0
        };
        Ok(DeleteOutcome {
            deleted,
            summary,
            cascaded,
        })
    })?;
    tracing::info!(owner, id, %day, "transaction deleted");
    Ok(outcome)
}

/// Recalculates `from` with the current budget, then every later summarized
/// day with its own stored budget. This is the explicit repair for stale
/// running balances after a past day was edited.
pub fn rebuild_from(
    conn: &mut Connection,
    ctx: &RequestContext,
    from: DayKey,
) -> Result<Vec<DailySummary>> {
    ctx.require_onboarded()?;
    let owner = ctx.owner_id.as_str();
    let budget = ctx.daily_budget();
    let rebuilt = engine::with_day_locked(conn, owner, from, |c| {
        let mut out = vec![engine::recalculate(c, owner, from, budget)?];
        out.extend(chain::cascade_forward(c, owner, from)?);
        Ok(out)
    })?;
    tracing::info!(owner, %from, days = rebuilt.len(), "summaries rebuilt");
    Ok(rebuilt)
}

pub fn set_budget(conn: &Connection, ctx: &RequestContext, amount: i64) -> Result<Budget> {
    ctx.require_onboarded()?;
    let b = budgets::set(conn, &ctx.owner_id, amount)?;
    tracing::info!(owner = %ctx.owner_id, amount, "daily budget set");
    Ok(b)
}

/// Onboarding: creates the caller's profile. Needs an identity but no profile.
pub fn create_profile(
    conn: &Connection,
    identity: &dyn IdentityProvider,
    user_name: &str,
    email: Option<&str>,
) -> Result<Profile> {
    let owner = identity
        .current_owner_id()
        .ok_or(LedgerError::Unauthenticated)?;
    let p = profiles::create(conn, &owner, user_name, email)?;
    tracing::info!(owner = %owner, "profile created");
    Ok(p)
}

fn degrade<T>(what: &str, result: Result<T>, fallback: impl FnOnce() -> T) -> T {
    match result {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, "{} failed, showing empty state", what);
            fallback()
        }
    }
}

pub fn fetch_profile(conn: &Connection, owner: &str) -> Option<Profile> {
    degrade("fetch_profile", profiles::get(conn, owner), || None)
}

pub fn fetch_budget(conn: &Connection, owner: &str) -> Option<Budget> {
    degrade("fetch_budget", budgets::get(conn, owner), || None)
}

pub fn fetch_daily_summary(conn: &Connection, owner: &str, day: DayKey) -> Option<DailySummary> {
    degrade(
        "fetch_daily_summary",
        summaries::find(conn, owner, day),
        || None,
    )
}

pub fn fetch_previous_running_balance(conn: &Connection, owner: &str, day: DayKey) -> Decimal {
    degrade(
        "fetch_previous_running_balance",
        chain::previous_balance(conn, owner, day),
        || Decimal::ZERO,
    )
}

pub fn fetch_day_transactions(conn: &Connection, owner: &str, day: DayKey) -> Vec<Transaction> {
    degrade(
        "fetch_day_transactions",
        transactions::list_by_day(conn, owner, day),
        Vec::new,
    )
}

pub fn fetch_monthly_summary(
    conn: &Connection,
    owner: &str,
    year: i32,
    month: u32,
) -> MonthlySummary {
    degrade(
        "fetch_monthly_summary",
        monthly::monthly_summary(conn, owner, year, month),
        || MonthlySummary {
            year,
            month,
            total_income: Decimal::ZERO,
            total_expense: Decimal::ZERO,
            net_income: Decimal::ZERO,
            category_breakdown: Vec::new(),
            daily_data: Vec::new(),
        },
    )
}

pub fn fetch_calendar(conn: &Connection, owner: &str, year: i32, month: u32) -> Vec<CalendarDay> {
    degrade(
        "fetch_calendar",
        calendar::for_month(conn, owner, year, month),
        Vec::new,
    )
}

/// Assembles the day screen. Totals come straight from the transactions; the
/// running balance is the stored one, or the carried-in balance when the day
/// has no summary yet.
pub fn day_view(conn: &Connection, ctx: &RequestContext, day: DayKey) -> DayView {
    let owner = ctx.owner_id.as_str();
    let transactions = fetch_day_transactions(conn, owner, day);
    let summary = fetch_daily_summary(conn, owner, day);
    let (total_income, total_expense) = degrade(
        "day_view totals",
        day_totals(&transactions),
        || (Decimal::ZERO, Decimal::ZERO),
    );
    let running_balance = match &summary {
        Some(s) => s.running_balance,
        None => fetch_previous_running_balance(conn, owner, day),
    };
    DayView {
        day,
        budget: ctx.budget.clone(),
        transactions,
        total_income,
        total_expense,
        running_balance,
        summary,
    }
}

fn day_totals(transactions: &[Transaction]) -> Result<(Decimal, Decimal)> {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for t in transactions {
        match t.tx_type {
            TxType::Income => income = engine::add(income, t.amount, "day income")?,
            TxType::Expense => expense = engine::add(expense, t.amount, "day expense")?,
        }
    }
    Ok((income, expense))
}
