// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::Result;
use crate::store::profiles;
use rusqlite::Connection;

pub const USER_ENV: &str = "DAYBOOK_USER";

/// Who is making the request. Authentication itself happens elsewhere; the
/// ledger only needs a stable owner id and whether onboarding is done.
pub trait IdentityProvider {
    fn current_owner_id(&self) -> Option<String>;
    fn has_completed_onboarding(&self, conn: &Connection, owner: &str) -> Result<bool>;
}

/// Owner from the command line (or `DAYBOOK_USER`), falling back to the
/// `default_user` setting. Onboarding is complete once a profile exists.
#[derive(Debug, Clone, Default)]
pub struct LocalIdentity {
    owner: Option<String>,
}

impl LocalIdentity {
    pub fn new(explicit: Option<&str>, default_user: Option<&str>) -> Self {
        let clean = |s: &str| Some(s.trim().to_string()).filter(|s| !s.is_empty());
        let owner = explicit.and_then(clean).or_else(|| default_user.and_then(clean));
        LocalIdentity { owner }
    }

    pub fn anonymous() -> Self {
        LocalIdentity { owner: None }
    }
}

impl IdentityProvider for LocalIdentity {
    fn current_owner_id(&self) -> Option<String> {
        self.owner.clone()
    }

    fn has_completed_onboarding(&self, conn: &Connection, owner: &str) -> Result<bool> {
        profiles::exists(conn, owner)
    }
}
