// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Daybook", "daybook"));

pub const DB_ENV: &str = "DAYBOOK_DB";

/// Directory holding the database and the draft files.
pub fn data_dir() -> Result<PathBuf> {
    if let Ok(custom) = std::env::var(DB_ENV) {
        let path = PathBuf::from(custom);
        let dir = path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        fs::create_dir_all(&dir).context("Failed to create data dir")?;
        return Ok(dir);
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.to_path_buf())
}

pub fn db_path() -> Result<PathBuf> {
    if let Ok(custom) = std::env::var(DB_ENV) {
        data_dir()?;
        return Ok(PathBuf::from(custom));
    }
    Ok(data_dir()?.join("daybook.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;
    PRAGMA busy_timeout = 5000;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS profiles(
        owner_id TEXT PRIMARY KEY,
        user_name TEXT NOT NULL,
        email TEXT,
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
    );

    -- one scalar daily target per owner, whole currency units
    CREATE TABLE IF NOT EXISTS budgets(
        owner_id TEXT PRIMARY KEY,
        amount INTEGER NOT NULL CHECK(amount >= 0),
        updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_id TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('INCOME','EXPENSE')),
        category TEXT NOT NULL,
        amount TEXT NOT NULL,
        note TEXT,
        occurred_at TEXT NOT NULL, -- noon UTC of the calendar day
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_owner_day
        ON transactions(owner_id, occurred_at);

    CREATE TABLE IF NOT EXISTS daily_summaries(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_id TEXT NOT NULL,
        day TEXT NOT NULL,
        budget_at_that_time TEXT NOT NULL,
        total_income TEXT NOT NULL,
        total_expense TEXT NOT NULL,
        net_amount TEXT NOT NULL,
        running_balance TEXT NOT NULL,
        status TEXT NOT NULL CHECK(status IN ('UNDER_BUDGET','OVER_BUDGET')),
        updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
        UNIQUE(owner_id, day)
    );
    "#,
    )?;
    Ok(())
}
