//! # Cart Commands
//!
//! Commands for cart manipulation. Every command answers with the full
//! [`CartResponse`] so the view re-renders from one consistent snapshot.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌──────────┐  add_to_cart   ┌──────────┐  clear_cart / qty→0   ┌──────────┐
//! │  Empty   │───────────────►│ In Cart  │──────────────────────►│  Empty   │
//! │  closed  │  (panel opens) │  open    │                        │          │
//! └──────────┘                └──────────┘                        └──────────┘
//!                              │     ▲
//!              update_cart_item│     │add_to_cart (qty += 1)
//!              remove_from_cart└─────┘
//! ```

use serde::Deserialize;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::{CartResponse, CartStore, CatalogState, Scope};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchIdArgs {
    pub watch_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemArgs {
    pub watch_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartOpenArgs {
    pub open: bool,
}

/// Gets the current cart contents.
pub fn get_cart(scope: &Scope) -> CartResponse {
    debug!("get_cart command");
    scope.state::<CartStore>().snapshot()
}

/// Adds one unit of a catalog watch and opens the cart panel.
///
/// ## Behavior
/// - Watch already in cart: quantity increases by 1
/// - Otherwise: appended with quantity 1
/// - The line item keeps the catalog data as it was when first added
///
/// ## Errors
/// `NOT_FOUND` if the id is not in the catalog.
pub fn add_to_cart(scope: &Scope, args: WatchIdArgs) -> ApiResult<CartResponse> {
    debug!(watch_id = args.watch_id, "add_to_cart command");

    let watch = scope
        .state::<CatalogState>()
        .get(args.watch_id)
        .ok_or_else(|| ApiError::not_found("Watch", args.watch_id))?;

    Ok(scope.state::<CartStore>().add_to_cart(&watch))
}

/// Sets the quantity of a line item.
///
/// ## Behavior
/// - Quantity ≤ 0: removes the item
/// - Unknown id: cart unchanged
pub fn update_cart_item(scope: &Scope, args: UpdateCartItemArgs) -> CartResponse {
    debug!(watch_id = args.watch_id, quantity = args.quantity, "update_cart_item command");
    scope
        .state::<CartStore>()
        .update_quantity(args.watch_id, args.quantity)
}

/// Removes a line item. Unknown ids are ignored.
pub fn remove_from_cart(scope: &Scope, args: WatchIdArgs) -> CartResponse {
    debug!(watch_id = args.watch_id, "remove_from_cart command");
    scope.state::<CartStore>().remove_from_cart(args.watch_id)
}

/// Clears all items from the cart.
pub fn clear_cart(scope: &Scope) -> CartResponse {
    debug!("clear_cart command");
    scope.state::<CartStore>().clear_cart()
}

/// Opens or closes the cart panel.
pub fn set_cart_open(scope: &Scope, args: CartOpenArgs) -> CartResponse {
    debug!(open = args.open, "set_cart_open command");
    scope.state::<CartStore>().set_cart_open(args.open)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::scope;
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_add_known_watch() {
        let storefront = scope().await;
        let scope = storefront.scope();

        add_to_cart(scope, WatchIdArgs { watch_id: 1 }).unwrap();
        let response = add_to_cart(scope, WatchIdArgs { watch_id: 1 }).unwrap();

        assert!(response.is_open);
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.totals.total_items, 2);
        assert_eq!(
            response.totals.total_price,
            response.items[0].watch.price() * 2
        );
    }

    #[tokio::test]
    async fn test_add_unknown_watch() {
        let storefront = scope().await;
        let err = add_to_cart(storefront.scope(), WatchIdArgs { watch_id: 404 }).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(get_cart(storefront.scope()).items.is_empty());
    }

    #[tokio::test]
    async fn test_update_to_zero_removes() {
        let storefront = scope().await;
        let scope = storefront.scope();
        add_to_cart(scope, WatchIdArgs { watch_id: 4 }).unwrap();

        let response = update_cart_item(
            scope,
            UpdateCartItemArgs {
                watch_id: 4,
                quantity: 3,
            },
        );
        assert_eq!(response.items[0].quantity, 3);

        let response = update_cart_item(
            scope,
            UpdateCartItemArgs {
                watch_id: 4,
                quantity: 0,
            },
        );
        assert!(response.items.is_empty());
    }

    #[tokio::test]
    async fn test_panel_and_clear() {
        let storefront = scope().await;
        let scope = storefront.scope();
        add_to_cart(scope, WatchIdArgs { watch_id: 2 }).unwrap();
        add_to_cart(scope, WatchIdArgs { watch_id: 3 }).unwrap();

        assert!(!set_cart_open(scope, CartOpenArgs { open: false }).is_open);
        assert_eq!(remove_from_cart(scope, WatchIdArgs { watch_id: 2 }).items.len(), 1);
        assert!(clear_cart(scope).items.is_empty());
    }
}
