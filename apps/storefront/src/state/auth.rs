//! # Auth State
//!
//! Mock authentication: one optional logged-in user, persisted to a
//! named slot so it survives a restart.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         AuthStore Lifecycle                             │
//! │                                                                         │
//! │  AuthStore::new ── is_loading = true                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  restore() ── slot "novatime_user" ──┬── valid User  → current user     │
//! │       │                              ├── absent      → logged out       │
//! │       │                              └── unreadable  → warn, clear slot │
//! │       ▼                                                                 │
//! │  is_loading = false ── store handed to commands                         │
//! │       │                                                                 │
//! │       ├── login(email, pw)   ── sleep(latency) ── directory lookup      │
//! │       ├── register(name,..)  ── sleep(latency) ── synthesize User       │
//! │       └── logout()           ── remove slot, then clear memory          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The user sits behind a `parking_lot::Mutex`. The lock is only taken
//! for reads and swaps, never across the artificial delay or slot I/O.
//!
//! ## Persist-then-swap
//! Login and register write the slot before replacing the in-memory
//! user, and logout removes the slot before clearing it. If the slot
//! operation fails the caller gets the `DbError` and the session is
//! unchanged.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use novatime_core::{CredentialDirectory, User};
use novatime_db::{DbError, DbResult, SlotRepository};

/// The session's authentication store.
#[derive(Debug)]
pub struct AuthStore {
    user: Mutex<Option<User>>,
    loading: AtomicBool,
    slots: SlotRepository,
    directory: CredentialDirectory,
    latency: Duration,
    slot_key: String,
}

impl AuthStore {
    /// Creates a logged-out store that has not yet restored its slot.
    pub fn new(slots: SlotRepository, latency: Duration, slot_key: impl Into<String>) -> Self {
        AuthStore {
            user: Mutex::new(None),
            loading: AtomicBool::new(true),
            slots,
            directory: CredentialDirectory::demo(),
            latency,
            slot_key: slot_key.into(),
        }
    }

    // =========================================================================
    // Restore
    // =========================================================================

    /// Loads the persisted user, if any, and ends the loading phase.
    ///
    /// An unreadable slot counts as logged out: it is logged and removed.
    pub async fn restore(&self) -> DbResult<Option<User>> {
        let result = self.read_slot().await;
        self.loading.store(false, Ordering::Release);

        let restored = result?;
        match &restored {
            Some(user) => info!(user_id = %user.id, role = ?user.role, "Session restored"),
            None => debug!("No persisted session"),
        }
        *self.user.lock() = restored.clone();
        Ok(restored)
    }

    async fn read_slot(&self) -> DbResult<Option<User>> {
        match self.slots.get_json::<User>(&self.slot_key).await {
            Ok(user) => Ok(user),
            Err(DbError::InvalidSlotValue { key, reason }) => {
                warn!(key = %key, reason = %reason, "Discarding unreadable session slot");
                self.slots.remove(&self.slot_key).await?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Attempts a login against the credential directory.
    ///
    /// Returns `Ok(false)` for unknown credentials, leaving the current
    /// user untouched. `Err` only reports a failed slot write.
    pub async fn login(&self, email: &str, password: &str) -> DbResult<bool> {
        tokio::time::sleep(self.latency).await;

        let Some(user) = self.directory.authenticate(email, password) else {
            debug!(email = %email, "Login rejected");
            return Ok(false);
        };

        self.slots.set_json(&self.slot_key, &user).await?;
        info!(user_id = %user.id, role = ?user.role, "User logged in");
        *self.user.lock() = Some(user);
        Ok(true)
    }

    /// Registers a new shopper and logs them in.
    ///
    /// Returns `Ok(false)` when the email belongs to a directory account.
    /// The new account is not added to the directory, so it cannot log in
    /// again after a logout.
    /// The password is accepted but never stored.
    pub async fn register(&self, name: &str, email: &str, _password: &str) -> DbResult<bool> {
        tokio::time::sleep(self.latency).await;

        if self.directory.contains_email(email) {
            debug!(email = %email, "Registration rejected: email taken");
            return Ok(false);
        }

        let user = User::registered(name, email, Utc::now().timestamp_millis());
        self.slots.set_json(&self.slot_key, &user).await?;
        info!(user_id = %user.id, "User registered");
        *self.user.lock() = Some(user);
        Ok(true)
    }

    /// Removes the persisted slot and ends the session.
    pub async fn logout(&self) -> DbResult<()> {
        self.slots.remove(&self.slot_key).await?;
        let previous = self.user.lock().take();

        if let Some(user) = previous {
            info!(user_id = %user.id, "User logged out");
        }
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns a copy of the logged-in user.
    pub fn current_user(&self) -> Option<User> {
        self.user.lock().clone()
    }

    /// Checks if the logged-in user is an admin.
    pub fn is_admin(&self) -> bool {
        self.user.lock().as_ref().is_some_and(User::is_admin)
    }

    /// True until [`AuthStore::restore`] has run.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }
}
