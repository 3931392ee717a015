//! # Cart State
//!
//! Manages the session's shopping cart and the cart panel flag.
//!
//! ## Thread Safety
//! Cart and panel flag live together behind one `parking_lot::Mutex`, so
//! "add and open the panel" is a single atomic step for any observer.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  View Action              Command                 Cart State Change     │
//! │  ───────────              ───────                 ─────────────────     │
//! │                                                                         │
//! │  "Agregar al carrito" ──► add_to_cart() ───────► qty += 1 or push,     │
//! │                                                   panel opens          │
//! │                                                                         │
//! │  +/- buttons ───────────► update_cart_item() ──► qty = n (n<=0 drops)  │
//! │                                                                         │
//! │  Trash icon ────────────► remove_from_cart() ──► items.retain(..)      │
//! │                                                                         │
//! │  "Vaciar" ──────────────► clear_cart() ────────► items.clear()         │
//! │                                                                         │
//! │  Cart icon / close ─────► set_cart_open() ─────► is_open = flag        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use novatime_core::{Cart, CartLineItem, CartTotals, Money, Watch};

/// What a view needs to render the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineItem>,
    pub totals: CartTotals,
    pub is_open: bool,
}

#[derive(Debug, Default)]
struct CartSession {
    cart: Cart,
    is_open: bool,
}

impl CartSession {
    fn snapshot(&self) -> CartResponse {
        CartResponse {
            items: self.cart.items().to_vec(),
            totals: CartTotals::from(&self.cart),
            is_open: self.is_open,
        }
    }
}

/// The session's cart store.
#[derive(Debug, Default)]
pub struct CartStore {
    session: Mutex<CartSession>,
}

impl CartStore {
    /// Creates an empty, closed cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `watch` and opens the cart panel.
    pub fn add_to_cart(&self, watch: &Watch) -> CartResponse {
        let mut session = self.session.lock();
        let quantity = session.cart.add(watch);
        session.is_open = true;
        debug!(watch_id = watch.id, quantity, "Added to cart");
        session.snapshot()
    }

    /// Drops the line item for `watch_id`. No-op if absent.
    pub fn remove_from_cart(&self, watch_id: i64) -> CartResponse {
        let mut session = self.session.lock();
        if session.cart.remove(watch_id) {
            debug!(watch_id, "Removed from cart");
        }
        session.snapshot()
    }

    /// Sets a line item's quantity; `quantity <= 0` removes it.
    pub fn update_quantity(&self, watch_id: i64, quantity: i64) -> CartResponse {
        let mut session = self.session.lock();
        if !session.cart.update_quantity(watch_id, quantity) {
            debug!(watch_id, "Quantity update for a watch not in the cart");
        }
        session.snapshot()
    }

    /// Empties the cart. The panel flag is left as is.
    pub fn clear_cart(&self) -> CartResponse {
        let mut session = self.session.lock();
        session.cart.clear();
        session.snapshot()
    }

    pub fn is_cart_open(&self) -> bool {
        self.session.lock().is_open
    }

    pub fn set_cart_open(&self, open: bool) -> CartResponse {
        let mut session = self.session.lock();
        session.is_open = open;
        session.snapshot()
    }

    /// Sum of quantities.
    pub fn total_items(&self) -> u64 {
        self.session.lock().cart.total_items()
    }

    /// Sum of price × quantity.
    pub fn total_price(&self) -> Money {
        self.session.lock().cart.total_price()
    }

    /// Items, totals and panel flag in one consistent read.
    pub fn snapshot(&self) -> CartResponse {
        self.session.lock().snapshot()
    }
}
