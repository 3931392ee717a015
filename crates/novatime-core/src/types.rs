//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Credential    │   │      User       │   │      Watch      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  id             │   │  id (i64)       │       │
//! │  │  email          │   │  email          │   │  name, brand    │       │
//! │  │  password       │   │  name           │   │  price          │       │
//! │  │  name, role     │   │  role           │   │  original_price │       │
//! │  └─────────────────┘   └─────────────────┘   │  features       │       │
//! │     into_user()          persisted slot      │  in_stock       │       │
//! │     drops password                           └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Credential` never leaves the credential directory. Everything the
//! session stores or persists is a `User`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Role
// =============================================================================

/// Access level of a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular shopper.
    #[default]
    User,
    /// Can open the admin panel and edit the catalog.
    Admin,
}

// =============================================================================
// User
// =============================================================================

/// The public record of a logged-in user.
///
/// This is exactly what gets written to the persisted session slot:
/// `{"id", "email", "name", "role"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl User {
    /// Synthesizes the record of a freshly registered shopper.
    ///
    /// The id is the registration instant in unix milliseconds, rendered
    /// as a decimal string.
    pub fn registered(name: impl Into<String>, email: impl Into<String>, now_ms: i64) -> Self {
        User {
            id: now_ms.to_string(),
            email: email.into(),
            name: name.into(),
            role: Role::User,
        }
    }

    /// Checks if the user may use the admin panel.
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// =============================================================================
// Credential
// =============================================================================

/// A record of the static credential directory.
///
/// Holds the plain-text demo password, so it is deliberately neither
/// `Serialize` nor exported to TypeScript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub id: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub name: &'static str,
    pub role: Role,
}

impl Credential {
    /// Checks an exact (case-sensitive) email and password match.
    #[inline]
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }

    /// Converts to the public record, dropping the password.
    pub fn to_user(&self) -> User {
        User {
            id: self.id.to_string(),
            email: self.email.to_string(),
            name: self.name.to_string(),
            role: self.role,
        }
    }
}

impl From<&Credential> for User {
    fn from(credential: &Credential) -> Self {
        credential.to_user()
    }
}

// =============================================================================
// Watch
// =============================================================================

/// A watch offered in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Watch {
    /// Catalog identifier.
    pub id: i64,

    /// Display name (e.g. "CURREN Chronograph Silver").
    pub name: String,

    /// Brand shown above the name.
    pub brand: String,

    /// Current selling price in whole pesos.
    pub price: i64,

    /// Price before discount, shown struck through.
    pub original_price: i64,

    /// Image reference (path or URL).
    pub image: String,

    pub description: String,

    /// Ordered feature bullets.
    pub features: Vec<String>,

    pub in_stock: bool,
}

impl Watch {
    /// Builds a catalog entry from an admin draft and an assigned id.
    pub fn from_draft(id: i64, draft: WatchDraft) -> Self {
        Watch {
            id,
            name: draft.name,
            brand: draft.brand,
            price: draft.price,
            original_price: draft.original_price,
            image: draft.image,
            description: draft.description,
            features: draft.features,
            in_stock: draft.in_stock,
        }
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_amount(self.price)
    }

    /// Returns the original price as a Money type.
    #[inline]
    pub fn original_price(&self) -> Money {
        Money::from_amount(self.original_price)
    }

    /// Discount badge percentage; 0 when the watch is not discounted.
    pub fn discount_percent(&self) -> u32 {
        self.original_price().percent_saved_by(self.price())
    }

    /// How much the shopper saves against the original price.
    pub fn savings(&self) -> Money {
        if self.original_price > self.price {
            self.original_price() - self.price()
        } else {
            Money::zero()
        }
    }
}

// =============================================================================
// Watch Draft
// =============================================================================

/// Every watch field except the id: the admin panel's "new watch" form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WatchDraft {
    pub name: String,
    pub brand: String,
    pub price: i64,
    #[serde(default)]
    pub original_price: i64,
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

impl From<Watch> for WatchDraft {
    fn from(watch: Watch) -> Self {
        WatchDraft {
            name: watch.name,
            brand: watch.brand,
            price: watch.price,
            original_price: watch.original_price,
            image: watch.image,
            description: watch.description,
            features: watch.features,
            in_stock: watch.in_stock,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_credential() -> Credential {
        Credential {
            id: "1",
            email: "admin@novatime.com",
            password: "admin123",
            name: "Administrador",
            role: Role::Admin,
        }
    }

    #[test]
    fn test_role_default() {
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn test_credential_to_user_drops_password() {
        let user = admin_credential().to_user();
        assert_eq!(user.id, "1");
        assert_eq!(user.email, "admin@novatime.com");
        assert!(user.is_admin());

        let json = serde_json::to_value(&user).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        assert!(!obj.contains_key("password"));
        assert_eq!(obj["role"], "admin");
    }

    #[test]
    fn test_credential_matching_is_exact() {
        let cred = admin_credential();
        assert!(cred.matches("admin@novatime.com", "admin123"));
        assert!(!cred.matches("ADMIN@novatime.com", "admin123"));
        assert!(!cred.matches("admin@novatime.com", "admin1234"));
    }

    #[test]
    fn test_registered_user() {
        let user = User::registered("Ana", "ana@example.com", 1_760_000_000_123);
        assert_eq!(user.id, "1760000000123");
        assert_eq!(user.role, Role::User);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_watch_serializes_camel_case() {
        let watch = Watch {
            id: 7,
            name: "Test".into(),
            brand: "CURREN".into(),
            price: 100,
            original_price: 150,
            image: "/images/7.jpeg".into(),
            description: String::new(),
            features: vec!["Cronógrafo".into()],
            in_stock: false,
        };

        let json = serde_json::to_value(&watch).unwrap();
        assert_eq!(json["originalPrice"], 150);
        assert_eq!(json["inStock"], false);
        assert_eq!(watch.discount_percent(), 33);
        assert_eq!(watch.savings().amount(), 50);
    }

    #[test]
    fn test_watch_without_discount() {
        let draft = WatchDraft {
            name: "Plain".into(),
            brand: "GUESS".into(),
            price: 500,
            original_price: 0,
            image: "/images/x.jpeg".into(),
            description: String::new(),
            features: Vec::new(),
            in_stock: true,
        };
        let watch = Watch::from_draft(9, draft);
        assert_eq!(watch.discount_percent(), 0);
        assert!(watch.savings().is_zero());
    }

    #[test]
    fn test_draft_defaults_when_deserializing() {
        let draft: WatchDraft = serde_json::from_str(
            r#"{"name":"N","brand":"B","price":10,"image":"/i.jpeg"}"#,
        )
        .unwrap();
        assert!(draft.in_stock);
        assert!(draft.features.is_empty());
        assert_eq!(draft.original_price, 0);
    }
}
