// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures surfaced by the ledger core.
///
/// `Validation`, `InvalidDateFormat`, `NotFound` and `Overflow` carry a
/// message meant for the user. `Unauthenticated` and `OnboardingRequired`
/// send the user to the sign-in / profile flow instead of being shown inline.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Amount out of range: {0}")]
    Overflow(String),
    #[error("Not signed in: pass --user or set DAYBOOK_USER")]
    Unauthenticated,
    #[error("No profile for '{0}': run `daybook profile create` first")]
    OnboardingRequired(String),
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl LedgerError {
    /// True for the errors a user can fix by changing their input.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            LedgerError::Validation(_)
                | LedgerError::InvalidDateFormat(_)
                | LedgerError::NotFound(_)
                | LedgerError::Overflow(_)
        )
    }

    /// True when the caller should redirect to sign-in or onboarding.
    pub fn needs_redirect(&self) -> bool {
        matches!(
            self,
            LedgerError::Unauthenticated | LedgerError::OnboardingRequired(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
