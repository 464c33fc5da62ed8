// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budget;
pub mod calendar;
pub mod day;
pub mod drafts;
pub mod profile;
pub mod reports;
pub mod settings;
pub mod summary;
pub mod transactions;

use crate::config::Settings;
use crate::context::RequestContext;
use crate::dates::{self, DayKey, MAX_REGIONAL_YEAR, MIN_REGIONAL_YEAR};
use crate::errors::LedgerError;
use crate::identity::LocalIdentity;
use anyhow::{Result, anyhow};
use rusqlite::Connection;

/// Reads and gates a `DD-MM-YYYY` argument. Strings that fail the wire-format
/// check are rejected up front instead of reaching the codec.
pub fn day_arg(sub: &clap::ArgMatches, name: &str) -> Result<DayKey> {
    let raw = sub
        .get_one::<String>(name)
        .ok_or_else(|| anyhow!("--{} is required", name))?
        .trim();
    if !dates::is_valid_day_string(raw) {
        return Err(LedgerError::Validation(format!(
            "Rejected day '{}': expected DD-MM-YYYY with a regional year {}-{}",
            raw, MIN_REGIONAL_YEAR, MAX_REGIONAL_YEAR
        ))
        .into());
    }
    Ok(dates::encode(raw)?)
}

pub fn identity(conn: &Connection, matches: &clap::ArgMatches) -> Result<LocalIdentity> {
    let settings = Settings::load(conn)?;
    Ok(LocalIdentity::new(
        matches.get_one::<String>("user").map(|s| s.as_str()),
        settings.default_user.as_deref(),
    ))
}

/// Resolves the caller once for the whole invocation.
pub fn request_context(conn: &Connection, matches: &clap::ArgMatches) -> Result<RequestContext> {
    let id = identity(conn, matches)?;
    Ok(RequestContext::load(conn, &id)?)
}

/// How a failed command should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// No owner or no profile: point the user at `--user` or `profile create`.
    Redirect,
    /// Bad input the user can correct.
    Input,
    /// Storage, IO and everything else.
    Internal,
}

impl Failure {
    pub fn exit_code(self) -> u8 {
        match self {
            Failure::Input => 1,
            Failure::Redirect => 2,
            Failure::Internal => 3,
        }
    }
}

/// Sorts an error by the first ledger error in its chain.
pub fn classify(err: &anyhow::Error) -> Failure {
    match err.chain().find_map(|c| c.downcast_ref::<LedgerError>()) {
        Some(e) if e.needs_redirect() => Failure::Redirect,
        Some(e) if e.is_user_facing() => Failure::Input,
        Some(_) => Failure::Internal,
        None => Failure::Internal,
    }
}
