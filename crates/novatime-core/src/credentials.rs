//! # Credential Directory
//!
//! The static list of demo accounts the mock login checks against.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  login(email, password)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CredentialDirectory::authenticate ── linear, exact match ──► Credential│
//! │       │                                                      │          │
//! │       │ None                                    to_user()    ▼          │
//! │       ▼                                          (password dropped)     │
//! │  false                                           User ──► session slot  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The directory is read-only: registering a new account does not add
//! it here.

use crate::types::{Credential, Role, User};

/// Accounts shipped with the storefront.
pub const DEMO_CREDENTIALS: &[Credential] = &[
    Credential {
        id: "1",
        email: "admin@novatime.com",
        password: "admin123",
        name: "Administrador",
        role: Role::Admin,
    },
    Credential {
        id: "2",
        email: "user@novatime.com",
        password: "user123",
        name: "Usuario",
        role: Role::User,
    },
];

/// Lookup over a fixed set of credentials.
#[derive(Debug, Clone, Copy)]
pub struct CredentialDirectory {
    records: &'static [Credential],
}

impl CredentialDirectory {
    /// Wraps an arbitrary static list.
    pub const fn new(records: &'static [Credential]) -> Self {
        CredentialDirectory { records }
    }

    /// The storefront's demo accounts.
    pub const fn demo() -> Self {
        Self::new(DEMO_CREDENTIALS)
    }

    /// Returns the public user for an exact email and password match.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<User> {
        self.records
            .iter()
            .find(|c| c.matches(email, password))
            .map(Credential::to_user)
    }

    /// Checks if an email is already taken.
    pub fn contains_email(&self, email: &str) -> bool {
        self.records.iter().any(|c| c.email == email)
    }

    /// Number of accounts.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Checks if the directory has no accounts.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for CredentialDirectory {
    fn default() -> Self {
        Self::demo()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
