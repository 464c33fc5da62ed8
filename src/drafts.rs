// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client-side staging of unsaved entries for one day.
//!
//! Items are kept in a JSON file per day until the user saves them, at which
//! point the whole list goes through a single bulk save. Nothing here touches
//! the database until [`DraftList::commit`].

use crate::context::RequestContext;
use crate::dates::DayKey;
use crate::errors::{LedgerError, Result};
use crate::models::NewTransaction;
use crate::service::{self, SaveOutcome};
use crate::store::transactions;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftItem {
    pub id: u32,
    pub item: NewTransaction,
}

#[derive(Debug)]
pub struct DraftList {
    path: PathBuf,
    day: DayKey,
    items: Vec<DraftItem>,
}

impl DraftList {
    /// Loads the staged items for `day` from `dir`. A missing file is an empty
    /// list; an unreadable one is discarded, like a corrupted local cache.
    pub fn load(dir: &Path, day: DayKey) -> Result<Self> {
        let path = dir.join(format!("draft_transactions_{}.json", day));
        let items = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            match serde_json::from_str::<Vec<DraftItem>>(&raw) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "discarding unreadable drafts");
                    fs::remove_file(&path)?;
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };
        Ok(DraftList { path, day, items })
    }

    pub fn day(&self) -> DayKey {
        self.day
    }

    pub fn items(&self) -> &[DraftItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Stages an item at the top of the list. The item is validated now so
    /// bad input is caught before the bulk save.
    pub fn add(&mut self, item: NewTransaction) -> Result<u32> {
        let valid = transactions::validate(&item)?;
        if valid.day != self.day {
            return Err(LedgerError::Validation(format!(
                "draft for {} cannot hold an entry dated {}",
                self.day.to_regional_string(),
                item.date
            )));
        }
        let id = self.items.iter().map(|d| d.id).max().unwrap_or(0) + 1;
        self.items.insert(0, DraftItem { id, item });
        self.persist()?;
        Ok(id)
    }

    pub fn remove(&mut self, id: u32) -> Result<DraftItem> {
        let pos = self
            .items
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("draft item {}", id)))?;
        let removed = self.items.remove(pos);
        self.persist()?;
        Ok(removed)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.items.clear();
        self.persist()
    }

    /// Saves every staged item in one bulk call and empties the list on
    /// success. On failure the drafts stay put.
    pub fn commit(&mut self, conn: &mut Connection, ctx: &RequestContext) -> Result<SaveOutcome> {
        let batch: Vec<NewTransaction> = self.items.iter().map(|d| d.item.clone()).collect();
        let outcome = service::save_bulk_transactions(conn, ctx, &batch)?;
        self.clear()?;
        Ok(outcome)
    }

    fn persist(&self) -> Result<()> {
        if self.items.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.items)?)?;
        Ok(())
    }
}

/// Builds a staged entry for `day` from command-line style input.
pub fn entry(
    day: DayKey,
    tx_type: &str,
    category: &str,
    amount: Decimal,
    note: Option<&str>,
) -> NewTransaction {
    NewTransaction {
        tx_type: tx_type.to_string(),
        category: category.to_string(),
        amount,
        note: note.map(|s| s.to_string()),
        date: day.to_regional_string(),
    }
}
