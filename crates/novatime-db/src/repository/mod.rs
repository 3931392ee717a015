//! # Repository Module
//!
//! Database access behind a small typed API.
//!
//! ```text
//! AuthStore
//!      │  db.slots().set_json("novatime_user", &user)
//!      ▼
//! SlotRepository ── get / set / remove / get_json / set_json
//!      │  SQL
//!      ▼
//! slots (key TEXT PRIMARY KEY, value TEXT, updated_at TEXT)
//! ```
//!
//! ## Available Repositories
//!
//! - [`slot::SlotRepository`] - Named persisted values

pub mod slot;
