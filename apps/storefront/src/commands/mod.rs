//! # Commands Module
//!
//! Every operation a view can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── auth.rs     ◄─── Session, login, register, logout
//! ├── cart.rs     ◄─── Cart manipulation and the panel flag
//! ├── catalog.rs  ◄─── Browsing and admin CRUD
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  View (stdin line)                                                      │
//! │  {"cmd":"add_to_cart","args":{"watchId":3}}                             │
//! │         │                                                               │
//! │         │ (ipc::Request, serde tagged enum)                             │
//! │         ▼                                                               │
//! │  fn add_to_cart(                                                        │
//! │      scope: &Scope,          ◄── stores looked up by type              │
//! │      args: WatchIdArgs,      ◄── from "args"                           │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  {"ok":{"items":[...],"totals":{...},"isOpen":true}}  (stdout line)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command asks the scope only for the stores it needs:
//! ```rust,ignore
//! // Only needs the cart
//! fn get_cart(scope: &Scope) -> CartResponse { scope.state::<CartStore>().snapshot() }
//!
//! // Needs the catalog and the cart
//! fn add_to_cart(scope: &Scope, args: WatchIdArgs) -> ApiResult<CartResponse>
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod config;
