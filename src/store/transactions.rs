// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{decimal_at, parsed_at, with_savepoint};
use crate::dates::{self, DayKey};
use crate::errors::{LedgerError, Result};
use crate::models::{Category, NewTransaction, Transaction, TxType};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

/// Largest single amount accepted, in whole currency units.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;
/// Amounts are kept to the currency's minor unit.
pub const MAX_SCALE: u32 = 2;

const COLUMNS: &str = "id, owner_id, type, category, amount, note, occurred_at, created_at";

fn map_row(r: &Row) -> rusqlite::Result<Transaction> {
    let occurred_at: String = r.get(6)?;
    let day = DayKey::from_instant_str(&occurred_at).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Transaction {
        id: r.get(0)?,
        owner_id: r.get(1)?,
        tx_type: parsed_at::<TxType>(r, 2)?,
        category: parsed_at::<Category>(r, 3)?,
        amount: decimal_at(r, 4)?,
        note: r.get(5)?,
        day,
        created_at: r.get(7)?,
    })
}

fn list_between(
    conn: &Connection,
    owner: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    order: &str,
) -> Result<Vec<Transaction>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM transactions
         WHERE owner_id=?1 AND occurred_at>=?2 AND occurred_at<=?3
         ORDER BY {order}"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![
            owner,
            dates::storage_instant(start),
            dates::storage_instant(end)
        ],
        map_row,
    )?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// All of the owner's transactions on `day`, newest first.
pub fn list_by_day(conn: &Connection, owner: &str, day: DayKey) -> Result<Vec<Transaction>> {
    let (start, end) = dates::day_range(day);
    list_between(conn, owner, start, end, "created_at DESC, id DESC")
}

/// All of the owner's transactions in a month, oldest day first.
pub fn list_by_month(
    conn: &Connection,
    owner: &str,
    year: i32,
    month: u32,
) -> Result<Vec<Transaction>> {
    let (first, last) = dates::month_bounds(year, month)?;
    let (start, _) = dates::day_range(first);
    let (_, end) = dates::day_range(last);
    list_between(conn, owner, start, end, "occurred_at ASC, id ASC")
}

pub fn find_one(conn: &Connection, owner: &str, id: i64) -> Result<Option<Transaction>> {
    let sql = format!("SELECT {COLUMNS} FROM transactions WHERE id=?1 AND owner_id=?2");
    let tx = conn
        .query_row(&sql, params![id, owner], map_row)
        .optional()?;
    Ok(tx)
}

/// A submitted item that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidItem {
    pub tx_type: TxType,
    pub category: Category,
    pub amount: Decimal,
    pub note: Option<String>,
    pub day: DayKey,
}

pub fn validate(item: &NewTransaction) -> Result<ValidItem> {
    let tx_type = item.tx_type.parse::<TxType>()?;
    let category = item.category.parse::<Category>()?;
    if item.amount <= Decimal::ZERO {
        return Err(LedgerError::Validation(format!(
            "amount must be greater than 0, got {}",
            item.amount
        )));
    }
    if item.amount > Decimal::from(MAX_AMOUNT) {
        return Err(LedgerError::Validation(format!(
            "amount must be at most {}, got {}",
            MAX_AMOUNT, item.amount
        )));
    }
    if item.amount.normalize().scale() > MAX_SCALE {
        return Err(LedgerError::Validation(format!(
            "amount has more than {} decimal places: {}",
            MAX_SCALE, item.amount
        )));
    }
    let day = dates::encode(item.date.trim())?;
    let note = item
        .note
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());
    Ok(ValidItem {
        tx_type,
        category,
        amount: item.amount,
        note,
        day,
    })
}

/// Validates every item, collecting all problems into one message.
pub fn validate_all(items: &[NewTransaction]) -> Result<Vec<ValidItem>> {
    if items.is_empty() {
        return Err(LedgerError::Validation("no items to save".into()));
    }
    let mut valid = Vec::with_capacity(items.len());
    let mut problems = Vec::new();
    for (i, item) in items.iter().enumerate() {
        match validate(item) {
            Ok(v) => valid.push(v),
            Err(e) => problems.push(format!("item {}: {}", i + 1, e)),
        }
    }
    if !problems.is_empty() {
        return Err(LedgerError::Validation(problems.join(", ")));
    }
    Ok(valid)
}

/// Inserts all items or none of them. Returns the new ids in input order.
pub fn create_many(conn: &Connection, owner: &str, items: &[NewTransaction]) -> Result<Vec<i64>> {
    let valid = validate_all(items)?;
    insert_valid(conn, owner, &valid)
}

pub fn insert_valid(conn: &Connection, owner: &str, items: &[ValidItem]) -> Result<Vec<i64>> {
    with_savepoint(conn, "create_many", |c| {
        let mut stmt = c.prepare(
            "INSERT INTO transactions(owner_id, type, category, amount, note, occurred_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            stmt.execute(params![
                owner,
                item.tx_type.as_str(),
                item.category.as_str(),
                item.amount.to_string(),
                item.note,
                dates::storage_instant(item.day.noon_utc()),
            ])?;
            ids.push(c.last_insert_rowid());
        }
        Ok(ids)
    })
}

/// Deletes one of the owner's transactions and returns it. Ownership is
/// checked by lookup: another owner's id is reported as missing.
pub fn delete_one(conn: &Connection, owner: &str, id: i64) -> Result<Transaction> {
    let existing = find_one(conn, owner, id)?
        .ok_or_else(|| LedgerError::NotFound(format!("transaction {}", id)))?;
    conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND owner_id=?2",
        params![id, owner],
    )?;
    Ok(existing)
}
