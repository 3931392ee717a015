//! # Catalog Commands
//!
//! Public browsing plus the admin panel's add/edit/delete.
//!
//! ## Admin Guard
//! ```text
//! add_watch / edit_watch / delete_watch
//!        │
//!        ▼
//! current user? ── none ──────► UNAUTHORIZED
//!        │
//!        ▼
//! role == admin? ── no ───────► FORBIDDEN
//!        │
//!        ▼
//! CatalogState (validated in novatime-core)
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::state::{AuthStore, CatalogState, Scope};
use novatime_core::{User, Watch, WatchDraft};

/// Watch as shown on a product card: catalog data plus display helpers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchDto {
    #[serde(flatten)]
    pub watch: Watch,
    pub discount_percent: u32,
    pub savings: i64,
}

impl From<Watch> for WatchDto {
    fn from(watch: Watch) -> Self {
        WatchDto {
            discount_percent: watch.discount_percent(),
            savings: watch.savings().amount(),
            watch,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetWatchArgs {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddWatchArgs {
    pub watch: WatchDraft,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditWatchArgs {
    pub watch: Watch,
}

/// Lists the catalog.
pub fn list_watches(scope: &Scope) -> Vec<WatchDto> {
    debug!("list_watches command");
    scope
        .state::<CatalogState>()
        .list()
        .into_iter()
        .map(WatchDto::from)
        .collect()
}

/// Gets one watch for the detail view.
pub fn get_watch(scope: &Scope, args: GetWatchArgs) -> ApiResult<WatchDto> {
    debug!(id = args.id, "get_watch command");
    scope
        .state::<CatalogState>()
        .get(args.id)
        .map(WatchDto::from)
        .ok_or_else(|| ApiError::not_found("Watch", args.id))
}

/// Adds a watch (admin only).
pub fn add_watch(scope: &Scope, args: AddWatchArgs) -> ApiResult<WatchDto> {
    debug!(name = %args.watch.name, "add_watch command");
    require_admin(scope)?;
    let watch = scope.state::<CatalogState>().add(args.watch)?;
    Ok(WatchDto::from(watch))
}

/// Replaces a watch (admin only).
pub fn edit_watch(scope: &Scope, args: EditWatchArgs) -> ApiResult<WatchDto> {
    debug!(id = args.watch.id, "edit_watch command");
    require_admin(scope)?;
    let watch = scope.state::<CatalogState>().edit(args.watch)?;
    Ok(WatchDto::from(watch))
}

/// Deletes a watch (admin only). Returns the removed watch.
///
/// Line items already in the cart keep their copy of the watch.
pub fn delete_watch(scope: &Scope, args: GetWatchArgs) -> ApiResult<WatchDto> {
    debug!(id = args.id, "delete_watch command");
    require_admin(scope)?;
    let watch = scope.state::<CatalogState>().delete(args.id)?;
    Ok(WatchDto::from(watch))
}

fn require_admin(scope: &Scope) -> ApiResult<User> {
    match scope.state::<AuthStore>().current_user() {
        None => Err(ApiError::unauthorized()),
        Some(user) if !user.is_admin() => {
            warn!(user_id = %user.id, "Admin operation rejected");
            Err(ApiError::forbidden())
        }
        Some(user) => Ok(user),
    }
}
