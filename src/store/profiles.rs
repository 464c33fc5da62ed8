// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{LedgerError, Result};
use crate::models::Profile;
use rusqlite::{Connection, OptionalExtension, params};

pub const MAX_USER_NAME: usize = 20;

pub fn get(conn: &Connection, owner: &str) -> Result<Option<Profile>> {
    let p = conn
        .query_row(
            "SELECT owner_id, user_name, email, created_at FROM profiles WHERE owner_id=?1",
            params![owner],
            |r| {
                Ok(Profile {
                    owner_id: r.get(0)?,
                    user_name: r.get(1)?,
                    email: r.get(2)?,
                    created_at: r.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(p)
}

pub fn exists(conn: &Connection, owner: &str) -> Result<bool> {
    let found: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM profiles WHERE owner_id=?1)",
        params![owner],
        |r| r.get(0),
    )?;
    Ok(found)
}

pub fn create(
    conn: &Connection,
    owner: &str,
    user_name: &str,
    email: Option<&str>,
) -> Result<Profile> {
    let name = user_name.trim();
    let len = name.chars().count();
    if len == 0 || len > MAX_USER_NAME {
        return Err(LedgerError::Validation(format!(
            "user name must be 1 to {} characters",
            MAX_USER_NAME
        )));
    }
    if exists(conn, owner)? {
        return Err(LedgerError::Validation(format!(
            "profile for '{}' already exists",
            owner
        )));
    }
    let email = email.map(str::trim).filter(|e| !e.is_empty());
    conn.execute(
        "INSERT INTO profiles(owner_id, user_name, email) VALUES (?1, ?2, ?3)",
        params![owner, name, email],
    )?;
    get(conn, owner)?.ok_or_else(|| LedgerError::NotFound(format!("profile {}", owner)))
}
