// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{LedgerError, Result};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

/// Recompute later days' running balances after every mutation.
pub const CASCADE_RECALC: &str = "cascade_recalc";
/// Owner used when neither `--user` nor `DAYBOOK_USER` is given.
pub const DEFAULT_USER: &str = "default_user";

pub const KNOWN_KEYS: [&str; 2] = [CASCADE_RECALC, DEFAULT_USER];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub cascade_recalc: bool,
    pub default_user: Option<String>,
}

impl Settings {
    pub fn load(conn: &Connection) -> Result<Self> {
        let cascade_recalc = match get_setting(conn, CASCADE_RECALC)? {
            Some(v) => parse_bool(&v)?,
            None => false,
        };
        let default_user = get_setting(conn, DEFAULT_USER)?.filter(|u| !u.trim().is_empty());
        Ok(Settings {
            cascade_recalc,
            default_user,
        })
    }
}

fn parse_bool(v: &str) -> Result<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(LedgerError::Validation(format!(
            "expected true/false, got '{}'",
            other
        ))),
    }
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    let key = key.trim();
    let value = value.trim();
    let stored = match key {
        CASCADE_RECALC => parse_bool(value)?.to_string(),
        DEFAULT_USER => value.to_string(),
        _ => {
            return Err(LedgerError::Validation(format!(
                "unknown setting '{}' (known: {})",
                key,
                KNOWN_KEYS.join(", ")
            )));
        }
    };
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, stored],
    )?;
    Ok(())
}
