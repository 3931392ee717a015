//! # Cart
//!
//! Line items and totals of the shopping cart.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operation                  Effect on items                             │
//! │  ─────────                  ───────────────                             │
//! │  add(watch)            ──►  existing id: quantity += 1                  │
//! │                             new id:      push { watch, quantity: 1 }    │
//! │  remove(id)            ──►  retain(id != watch.id), no-op if absent     │
//! │  update_quantity(id,n) ──►  n <= 0: remove(id)                          │
//! │                             n > 0:  quantity = n                        │
//! │  clear()               ──►  items.clear()                               │
//! │                                                                         │
//! │  total_items = Σ quantity        total_price = Σ price × quantity       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line item per watch id
//! - `quantity >= 1` while the line item exists
//!
//! Quantities are not checked against `Watch::in_stock`. They saturate at
//! `u32::MAX` and prices saturate at the `i64` bounds, so no sequence of
//! operations can panic or zero a line item.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Watch;

// =============================================================================
// Line Item
// =============================================================================

/// A watch plus the quantity of it in the cart.
///
/// Serializes flat: every watch field next to `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLineItem {
    #[serde(flatten)]
    pub watch: Watch,

    pub quantity: u32,
}

impl CartLineItem {
    /// Creates the line item for a watch added for the first time.
    pub fn new(watch: &Watch) -> Self {
        CartLineItem {
            watch: watch.clone(),
            quantity: 1,
        }
    }

    /// Watch id this line item is keyed by.
    #[inline]
    pub fn id(&self) -> i64 {
        self.watch.id
    }

    /// Price × quantity.
    pub fn line_total(&self) -> Money {
        self.watch.price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: an ordered list of line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Returns the line item for a watch id.
    pub fn get(&self, watch_id: i64) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id() == watch_id)
    }

    /// Adds one unit of a watch.
    ///
    /// Returns the quantity of the watch after the call.
    pub fn add(&mut self, watch: &Watch) -> u32 {
        if let Some(item) = self.items.iter_mut().find(|i| i.id() == watch.id) {
            item.quantity = item.quantity.saturating_add(1);
            return item.quantity;
        }

        self.items.push(CartLineItem::new(watch));
        1
    }

    /// Removes the line item for a watch id.
    ///
    /// Returns whether a line item was removed.
    pub fn remove(&mut self, watch_id: i64) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id() != watch_id);
        self.items.len() != initial_len
    }

    /// Sets the quantity of a line item.
    ///
    /// A quantity of zero or less removes the line item. An unknown id is
    /// left alone. Returns whether the cart changed.
    pub fn update_quantity(&mut self, watch_id: i64, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(watch_id);
        }

        // Quantities beyond u32 are clamped; the cart has no business cap.
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        match self.items.iter_mut().find(|i| i.id() == watch_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of distinct watches in the cart.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of price × quantity over all line items.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Cart totals summary for responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_items: u64,
    pub total_price: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_watch(id: i64, price: i64) -> Watch {
        Watch {
            id,
            name: format!("Watch {}", id),
            brand: "CURREN".to_string(),
            price,
            original_price: price + 50_000,
            image: format!("/images/{}.jpeg", id),
            description: String::new(),
            features: vec!["Cronógrafo".to_string()],
            in_stock: true,
        }
    }

    fn assert_totals_consistent(cart: &Cart) {
        let expected: i64 = cart
            .items()
            .iter()
            .map(|i| i.watch.price * i64::from(i.quantity))
            .sum();
        assert_eq!(cart.total_price().amount(), expected);
        assert!(cart.items().iter().all(|i| i.quantity >= 1));
    }

    #[test]
    fn test_add_distinct_watches() {
        let mut cart = Cart::new();
        for id in 1..=5 {
            assert_eq!(cart.add(&test_watch(id, 100_000 * id)), 1);
        }

        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.line_count(), 5);
        assert!(cart.items().iter().all(|i| i.quantity == 1));
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_add_same_watch_increments_by_one() {
        let mut cart = Cart::new();
        let watch = test_watch(1, 189_900);

        cart.add(&watch);
        assert_eq!(cart.add(&watch), 2);
        assert_eq!(cart.add(&watch), 3);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get(1).map(|i| i.quantity), Some(3));
        assert_eq!(cart.total_price().amount(), 3 * 189_900);
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&test_watch(3, 1));
        cart.add(&test_watch(1, 1));
        cart.add(&test_watch(3, 1));

        let ids: Vec<i64> = cart.items().iter().map(CartLineItem::id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add(&test_watch(1, 1000));
        cart.add(&test_watch(2, 2500));

        assert!(cart.update_quantity(1, 7));
        assert_eq!(cart.get(1).map(|i| i.quantity), Some(7));
        assert_totals_consistent(&cart);
        assert_eq!(cart.total_price().amount(), 7 * 1000 + 2500);

        // Zero removes
        assert!(cart.update_quantity(1, 0));
        assert!(cart.get(1).is_none());

        // Negative removes
        assert!(cart.update_quantity(2, -3));
        assert!(cart.is_empty());
        assert!(cart.total_price().is_zero());
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(&test_watch(1, 1000));

        assert!(!cart.update_quantity(99, 4));
        assert!(!cart.update_quantity(99, 0));
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_quantity_has_no_upper_bound() {
        let mut cart = Cart::new();
        let mut watch = test_watch(1, 10);
        watch.in_stock = false;
        cart.add(&watch);

        assert!(cart.update_quantity(1, 10_000));
        assert_eq!(cart.total_items(), 10_000);
        assert_eq!(cart.total_price().amount(), 100_000);
    }

    #[test]
    fn test_add_after_huge_update_saturates() {
        let mut cart = Cart::new();
        let watch = test_watch(1, 10);
        cart.add(&watch);

        assert!(cart.update_quantity(1, i64::MAX));
        assert_eq!(cart.get(1).map(|i| i.quantity), Some(u32::MAX));

        assert_eq!(cart.add(&watch), u32::MAX);
        assert_eq!(cart.get(1).map(|i| i.quantity), Some(u32::MAX));
        assert_eq!(cart.total_items(), u64::from(u32::MAX));
    }

    #[test]
    fn test_total_price_saturates() {
        let mut cart = Cart::new();
        let watch = test_watch(1, i64::MAX / 2 + 1);
        cart.add(&watch);
        cart.add(&watch);
        cart.add(&test_watch(2, i64::MAX / 2 + 1));

        assert_eq!(cart.total_price().amount(), i64::MAX);
        assert_eq!(CartTotals::from(&cart).total_price.amount(), i64::MAX);
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(&test_watch(1, 1000));

        assert!(!cart.remove(2));
        assert!(cart.remove(1));
        assert!(!cart.remove(1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&test_watch(1, 999));
        cart.add(&test_watch(2, 999));
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_line_item_serializes_flat() {
        let item = CartLineItem::new(&test_watch(4, 179_900));
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["id"], 4);
        assert_eq!(json["price"], 179_900);
        assert_eq!(json["quantity"], 1);
        assert!(json.get("watch").is_none());
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add(&test_watch(1, 189_900));
        cart.add(&test_watch(1, 189_900));
        cart.add(&test_watch(5, 459_900));

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_items, 3);
        assert_eq!(totals.total_price.amount(), 2 * 189_900 + 459_900);
    }
}
