//! # novatime-db: Local Persistence for the NovaTime Storefront
//!
//! This crate provides the storefront's persisted slots on top of SQLite
//! with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        NovaTime Data Flow                               │
//! │                                                                         │
//! │  AuthStore::login / register / logout / restore                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    novatime-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │ SlotRepository │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│   get / set    │    │  (embedded)  │  │   │
//! │  │   │  SqlitePool   │    │   remove       │    │ 001_init.sql │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/storefront/novatime.db   (`slots` table)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use novatime_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/novatime.db")).await?;
//! db.slots().set("novatime_user", r#"{"id":"1"}"#).await?;
//! assert!(db.slots().get("novatime_user").await?.is_some());
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::slot::SlotRepository;
