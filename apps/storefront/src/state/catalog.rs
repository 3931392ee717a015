//! # Catalog State
//!
//! The session's admin-editable watch list, seeded with the storefront's
//! opening collection. Edits last for the session only.

use chrono::Utc;
use parking_lot::Mutex;
use tracing::info;

use novatime_core::{Catalog, CoreResult, Watch, WatchDraft};

/// Thread-safe wrapper around [`Catalog`].
#[derive(Debug)]
pub struct CatalogState {
    catalog: Mutex<Catalog>,
}

impl CatalogState {
    /// Creates the state with the opening collection.
    pub fn seeded() -> Self {
        Self::from_catalog(Catalog::seeded())
    }

    pub fn from_catalog(catalog: Catalog) -> Self {
        CatalogState {
            catalog: Mutex::new(catalog),
        }
    }

    /// All watches in display order.
    pub fn list(&self) -> Vec<Watch> {
        self.catalog.lock().list().to_vec()
    }

    pub fn get(&self, id: i64) -> Option<Watch> {
        self.catalog.lock().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.catalog.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.lock().is_empty()
    }

    /// Adds a watch; the id comes from the wall clock.
    pub fn add(&self, draft: WatchDraft) -> CoreResult<Watch> {
        let watch = self
            .catalog
            .lock()
            .add(draft, Utc::now().timestamp_millis())?;
        info!(watch_id = watch.id, name = %watch.name, "Watch added");
        Ok(watch)
    }

    pub fn edit(&self, watch: Watch) -> CoreResult<Watch> {
        let id = watch.id;
        self.catalog.lock().edit(watch.clone())?;
        info!(watch_id = id, "Watch updated");
        Ok(watch)
    }

    pub fn delete(&self, id: i64) -> CoreResult<Watch> {
        let removed = self.catalog.lock().delete(id)?;
        info!(watch_id = id, "Watch deleted");
        Ok(removed)
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::seeded()
    }
}
