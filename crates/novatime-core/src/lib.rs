//! # novatime-core: Pure Domain Logic for the NovaTime Storefront
//!
//! This crate holds the storefront's domain rules as pure functions with
//! zero I/O dependencies. Everything that touches a clock, a database or
//! a timer lives in the crates above it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      NovaTime Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 View layer (any frontend)                       │   │
//! │  │    Catalog ──► Cart drawer ──► Auth modal ──► Admin panel      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON-lines IPC                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 Storefront commands (apps/storefront)           │   │
//! │  │    login, add_to_cart, add_watch, ...                           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ novatime-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌────────┐ ┌───────┐ ┌──────┐ ┌─────────┐ ┌─────────────┐    │   │
//! │  │   │ types  │ │ money │ │ cart │ │ catalog │ │ credentials │    │   │
//! │  │   │ Watch  │ │ Money │ │ Cart │ │ Catalog │ │  Directory  │    │   │
//! │  │   │ User   │ │       │ │      │ │         │ │             │    │   │
//! │  │   └────────┘ └───────┘ └──────┘ └─────────┘ └─────────────┘    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Watch, User, Credential, Role)
//! - [`money`] - Integer money in the store currency
//! - [`cart`] - Cart line items and totals
//! - [`catalog`] - The admin-editable watch list and its seed data
//! - [`credentials`] - The static demo credential directory
//! - [`error`] - Domain error types
//! - [`validation`] - Form and catalog validation
//!
//! ## Example Usage
//!
//! ```rust
//! use novatime_core::{Cart, Catalog};
//!
//! let catalog = Catalog::seeded();
//! let mut cart = Cart::new();
//!
//! let watch = catalog.get(1).unwrap();
//! cart.add(watch);
//! cart.add(watch);
//!
//! assert_eq!(cart.total_items(), 2);
//! assert_eq!(cart.total_price().amount(), 2 * watch.price);
//! ```

pub mod cart;
pub mod catalog;
pub mod credentials;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLineItem, CartTotals};
pub use catalog::Catalog;
pub use credentials::CredentialDirectory;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Name of the persisted slot holding the logged-in user.
pub const SESSION_SLOT_KEY: &str = "novatime_user";

/// Minimum password length accepted by the register form.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum length of free-text catalog fields (name, brand).
pub const MAX_NAME_LENGTH: usize = 200;

/// Highest price (or original price) the catalog editor accepts, in pesos.
pub const MAX_WATCH_PRICE: i64 = 1_000_000_000_000;
