// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::errors::{LedgerError, Result};
use crate::identity::IdentityProvider;
use crate::models::{Budget, Profile};
use crate::service;
use rusqlite::Connection;
use rust_decimal::Decimal;

/// Everything a request needs to know about its caller, resolved once when
/// the request starts and then passed by reference.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub owner_id: String,
    pub onboarded: bool,
    pub profile: Option<Profile>,
    pub budget: Option<Budget>,
    pub settings: Settings,
}

impl RequestContext {
    pub fn load(conn: &Connection, identity: &dyn IdentityProvider) -> Result<Self> {
        let owner_id = identity
            .current_owner_id()
            .ok_or(LedgerError::Unauthenticated)?;
        let onboarded = identity.has_completed_onboarding(conn, &owner_id)?;
        let settings = Settings::load(conn)?;
        Ok(RequestContext {
            profile: service::fetch_profile(conn, &owner_id),
            budget: service::fetch_budget(conn, &owner_id),
            owner_id,
            onboarded,
            settings,
        })
    }

    pub fn require_onboarded(&self) -> Result<()> {
        if self.onboarded {
            Ok(())
        } else {
            Err(LedgerError::OnboardingRequired(self.owner_id.clone()))
        }
    }

    /// Configured daily budget, 0 when the owner has not set one.
    pub fn daily_budget(&self) -> Decimal {
        self.budget
            .as_ref()
            .map(Budget::as_decimal)
            .unwrap_or(Decimal::ZERO)
    }
}
