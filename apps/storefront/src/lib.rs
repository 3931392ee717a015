//! # NovaTime Storefront Library
//!
//! Session application for the NovaTime watch storefront: the stores a
//! view layer drives, the commands it invokes, and the two ways to reach
//! them (JSON-lines IPC and a CLI).
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs          ◄─── You are here (logging, entry point)
//! ├── cli.rs          ◄─── `novatime` subcommands
//! ├── ipc.rs          ◄─── stdin/stdout JSON-lines bridge
//! ├── state/
//! │   ├── mod.rs      ◄─── Storefront::bootstrap
//! │   ├── scope.rs    ◄─── Type-keyed store container
//! │   ├── auth.rs     ◄─── AuthStore (mock login, persisted user)
//! │   ├── cart.rs     ◄─── CartStore (line items, panel flag)
//! │   ├── catalog.rs  ◄─── CatalogState (admin-editable watches)
//! │   └── config.rs   ◄─── StoreConfig (TOML + env)
//! ├── commands/
//! │   ├── auth.rs     ◄─── get_session, login, register, logout
//! │   ├── cart.rs     ◄─── cart manipulation commands
//! │   ├── catalog.rs  ◄─── browsing and admin CRUD
//! │   └── config.rs   ◄─── get_config
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize Logging ─── tracing-subscriber, EnvFilter, stderr        │
//! │  2. Load StoreConfig ───── defaults → storefront.toml → NOVATIME_* env  │
//! │  3. Determine DB Path ──── --db / NOVATIME_DB_PATH / data dir           │
//! │  4. Connect to Database ── SQLite WAL, run pending migrations           │
//! │  5. Restore Session ────── slot "novatime_user" → AuthStore             │
//! │  6. Manage Stores ──────── Auth, Cart, Catalog, Config in the Scope     │
//! │  7. Run Subcommand ─────── ipc / login / register / logout / ...        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod ipc;
pub mod state;

use tracing_subscriber::EnvFilter;

pub use cli::{Cli, CliError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::{AuthStore, CartStore, CatalogState, Scope, StoreConfig, Storefront};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,novatime=debug,storefront=debug,sqlx=warn";

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr; stdout belongs to IPC responses and CLI output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Trace this crate only
/// - Default: [`DEFAULT_LOG_FILTER`]
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs one `novatime` invocation.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    tracing::info!("Starting NovaTime storefront");
    cli::execute(cli).await
}
