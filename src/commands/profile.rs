// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::LedgerError;
use crate::identity::IdentityProvider;
use crate::service;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, identity: &dyn IdentityProvider, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("create", sub)) => {
            let name = sub.get_one::<String>("name").context("--name is required")?;
            let email = sub.get_one::<String>("email").map(|s| s.as_str());
            let p = service::create_profile(conn, identity, name, email)?;
            println!("Created profile '{}' for {}", p.user_name, p.owner_id);
        }
        Some(("show", sub)) => {
            let owner = identity
                .current_owner_id()
                .ok_or(LedgerError::Unauthenticated)?;
            let profile = service::fetch_profile(conn, &owner);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &profile)? {
                match profile {
                    Some(p) => println!(
                        "{}",
                        pretty_table(
                            &["Owner", "Name", "Email", "Created"],
                            vec![vec![
                                p.owner_id,
                                p.user_name,
                                p.email.unwrap_or_default(),
                                p.created_at,
                            ]],
                        )
                    ),
                    None => println!("No profile for {}", owner),
                }
            }
        }
        _ => {}
    }
    Ok(())
}
