// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{LedgerError, Result};
use crate::models::Budget;
use rusqlite::{Connection, OptionalExtension, params};

pub fn get(conn: &Connection, owner: &str) -> Result<Option<Budget>> {
    let b = conn
        .query_row(
            "SELECT owner_id, amount FROM budgets WHERE owner_id=?1",
            params![owner],
            |r| {
                Ok(Budget {
                    owner_id: r.get(0)?,
                    amount: r.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(b)
}

pub fn set(conn: &Connection, owner: &str, amount: i64) -> Result<Budget> {
    if amount < 0 {
        return Err(LedgerError::Validation(format!(
            "daily budget must be a whole number >= 0, got {}",
            amount
        )));
    }
    conn.execute(
        "INSERT INTO budgets(owner_id, amount) VALUES (?1, ?2)
         ON CONFLICT(owner_id) DO UPDATE SET
             amount=excluded.amount,
             updated_at=strftime('%Y-%m-%dT%H:%M:%fZ','now')",
        params![owner, amount],
    )?;
    Ok(Budget {
        owner_id: owner.to_string(),
        amount,
    })
}
