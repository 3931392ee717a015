//! # Provider Scope
//!
//! Owns the session's stores and hands them to commands by type.
//!
//! ```text
//! scope.manage(CartStore::new());        ── once per type, at bootstrap
//!          │
//!          ▼
//! ┌─────────────────────────────────────────┐
//! │  TypeId(CartStore)    → Box<CartStore>  │
//! │  TypeId(AuthStore)    → Box<AuthStore>  │
//! │  TypeId(StoreConfig)  → Box<StoreConfig>│
//! └─────────────────────────────────────────┘
//!          │
//!          ▼
//! scope.state::<CartStore>()             ── from any command
//! ```
//!
//! Asking for a store that was never managed is a wiring bug, not a
//! runtime condition, so [`Scope::state`] panics and names the type.
//! [`Scope::try_state`] is there for callers that genuinely probe.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;

/// Type-keyed container of managed stores.
#[derive(Default)]
pub struct Scope {
    values: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    names: Vec<&'static str>,
}

impl Scope {
    /// Creates an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a value. Returns `false` (and keeps the existing value)
    /// if a value of this type is already managed.
    pub fn manage<T: Send + Sync + 'static>(&mut self, value: T) -> bool {
        let id = TypeId::of::<T>();
        if self.values.contains_key(&id) {
            return false;
        }
        self.values.insert(id, Box::new(value));
        self.names.push(type_name::<T>());
        true
    }

    /// Returns the managed value of type `T`.
    ///
    /// # Panics
    /// If no value of type `T` was managed.
    pub fn state<T: Send + Sync + 'static>(&self) -> &T {
        match self.try_state::<T>() {
            Some(value) => value,
            None => panic!(
                "state not managed for type `{}`; call Scope::manage before reading it",
                type_name::<T>()
            ),
        }
    }

    /// Returns the managed value of type `T`, if any.
    pub fn try_state<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
    }

    /// Number of managed values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope").field("managed", &self.names).finish()
    }
}
