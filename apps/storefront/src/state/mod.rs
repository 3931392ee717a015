//! # State Module
//!
//! Session state for the storefront, managed in a single [`Scope`].
//!
//! Each store has a single responsibility, and commands ask the scope
//! only for the stores they need.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Storefront::bootstrap                          │   │
//! │  │  scope.manage(auth);   scope.manage(cart);                      │   │
//! │  │  scope.manage(catalog); scope.manage(config);                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │      ┌───────────────┬───────┴────────┬──────────────────┐             │
//! │      ▼               ▼                ▼                  ▼              │
//! │  ┌──────────┐  ┌───────────┐  ┌──────────────┐  ┌─────────────┐        │
//! │  │AuthStore │  │ CartStore │  │ CatalogState │  │ StoreConfig │        │
//! │  │ Mutex<   │  │ Mutex<    │  │ Mutex<       │  │ read-only   │        │
//! │  │  User?>  │  │  Cart+    │  │  Catalog>    │  │             │        │
//! │  │ + slot   │  │  is_open> │  │              │  │             │        │
//! │  └──────────┘  └───────────┘  └──────────────┘  └─────────────┘        │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • AuthStore: slot I/O through the sqlx pool, user behind a Mutex      │
//! │  • CartStore / CatalogState: parking_lot Mutex, never held on .await   │
//! │  • StoreConfig: read-only after bootstrap                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod auth;
mod cart;
mod catalog;
mod config;
mod scope;

pub use auth::AuthStore;
pub use cart::{CartResponse, CartStore};
pub use catalog::CatalogState;
pub use config::{
    AuthSection, ConfigError, ConfigResult, DatabaseSection, StoreConfig, StoreSection,
    CONFIG_FILE_NAME, DATABASE_FILE_NAME,
};
pub use scope::Scope;

use thiserror::Error;
use tracing::info;

use novatime_db::{Database, DbConfig, DbError};

/// Failures while wiring the session at startup.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Database(#[from] DbError),

    #[error("Failed to create data directory: {0}")]
    DataDir(#[from] std::io::Error),
}

/// A fully wired session: the scope plus the database behind it.
#[derive(Debug)]
pub struct Storefront {
    scope: Scope,
    db: Database,
}

impl Storefront {
    /// Opens the configured database and wires every store.
    ///
    /// ## Startup Sequence
    /// 1. Resolve the database path (config, env, or platform data dir)
    /// 2. Connect and run migrations
    /// 3. Restore the persisted user
    /// 4. Manage AuthStore, CartStore, CatalogState and StoreConfig
    pub async fn bootstrap(config: StoreConfig) -> Result<Self, BootstrapError> {
        let path = config.database_path()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        info!(?path, "Database path determined");

        let db = Database::new(DbConfig::new(path)).await?;
        Self::with_database(config, db).await
    }

    /// Wires the stores over an already opened database.
    pub async fn with_database(config: StoreConfig, db: Database) -> Result<Self, BootstrapError> {
        let auth = AuthStore::new(
            db.slots(),
            config.auth_latency(),
            config.auth.session_slot.clone(),
        );
        auth.restore().await?;

        let mut scope = Scope::new();
        scope.manage(auth);
        scope.manage(CartStore::new());
        scope.manage(CatalogState::seeded());
        scope.manage(config);

        info!(stores = scope.len(), "State initialized");
        Ok(Storefront { scope, db })
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Closes the database pool.
    pub async fn shutdown(self) {
        self.db.close().await;
    }
}
