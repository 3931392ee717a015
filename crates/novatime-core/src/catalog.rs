//! # Catalog
//!
//! The admin-editable list of watches.
//!
//! ## Admin Panel Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Admin Panel                Catalog                                     │
//! │  ───────────                ───────                                     │
//! │  "New watch" form ────────► add(draft, now_ms)   → Watch with new id    │
//! │  Edit row ────────────────► edit(watch)          → replaced in place    │
//! │  Delete row ──────────────► delete(id)           → removed              │
//! │                                                                         │
//! │  Storefront grid ─────────► list() / get(id)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Id Assignment
//! New watches take the current unix time in milliseconds as their id.
//! If that would not be greater than every id already handed out (two
//! adds in the same millisecond, or a clock step backwards) the next id
//! after the highest one is used instead, so ids stay unique.

use crate::error::{CoreError, CoreResult};
use crate::types::{Watch, WatchDraft};
use crate::validation::validate_watch_draft;

/// The watch catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    watches: Vec<Watch>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog {
            watches: Vec::new(),
        }
    }

    /// Creates a catalog holding the storefront's initial watches.
    pub fn seeded() -> Self {
        Catalog {
            watches: initial_watches(),
        }
    }

    /// All watches in display order.
    pub fn list(&self) -> &[Watch] {
        &self.watches
    }

    /// Returns a watch by id.
    pub fn get(&self, id: i64) -> Option<&Watch> {
        self.watches.iter().find(|w| w.id == id)
    }

    /// Number of watches.
    pub fn len(&self) -> usize {
        self.watches.len()
    }

    /// Checks if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }

    /// Adds a watch from an admin draft.
    ///
    /// ## Arguments
    /// * `draft` - Validated before insertion
    /// * `now_ms` - Current unix time in milliseconds, the id candidate
    pub fn add(&mut self, draft: WatchDraft, now_ms: i64) -> CoreResult<Watch> {
        validate_watch_draft(&draft)?;

        let id = self.next_id(now_ms);
        let watch = Watch::from_draft(id, draft);
        self.watches.push(watch.clone());
        Ok(watch)
    }

    /// Replaces the watch with the same id.
    pub fn edit(&mut self, watch: Watch) -> CoreResult<()> {
        validate_watch_draft(&WatchDraft::from(watch.clone()))?;

        let slot = self
            .watches
            .iter_mut()
            .find(|w| w.id == watch.id)
            .ok_or(CoreError::WatchNotFound(watch.id))?;
        *slot = watch;
        Ok(())
    }

    /// Removes a watch by id, returning it.
    pub fn delete(&mut self, id: i64) -> CoreResult<Watch> {
        let index = self
            .watches
            .iter()
            .position(|w| w.id == id)
            .ok_or(CoreError::WatchNotFound(id))?;
        Ok(self.watches.remove(index))
    }

    fn next_id(&self, now_ms: i64) -> i64 {
        match self.watches.iter().map(|w| w.id).max() {
            Some(max) if now_ms <= max => max + 1,
            _ => now_ms,
        }
    }
}

/// The watches the storefront opens with.
pub fn initial_watches() -> Vec<Watch> {
    #[allow(clippy::too_many_arguments)]
    fn watch(
        id: i64,
        name: &str,
        brand: &str,
        price: i64,
        original_price: i64,
        image: &str,
        description: &str,
        features: [&str; 3],
    ) -> Watch {
        Watch {
            id,
            name: name.to_string(),
            brand: brand.to_string(),
            price,
            original_price,
            image: image.to_string(),
            description: description.to_string(),
            features: features.iter().map(|f| f.to_string()).collect(),
            in_stock: true,
        }
    }

    vec![
        watch(
            1,
            "CURREN Chronograph Silver",
            "CURREN",
            189_900,
            249_900,
            "/images/13.jpeg",
            "Reloj cronógrafo de acero inoxidable con diseño elegante y funcional.",
            ["Cronógrafo", "Acero Inoxidable", "Resistente al agua 30m"],
        ),
        watch(
            2,
            "CURREN Chronograph Black",
            "CURREN",
            199_900,
            259_900,
            "/images/14.jpeg",
            "Edición especial en negro con detalles en rojo.",
            ["Cronógrafo", "Acero Inoxidable", "Correa de metal"],
        ),
        watch(
            3,
            "CURREN Chronograph Gold",
            "CURREN",
            219_900,
            279_900,
            "/images/15.jpeg",
            "Diseño sofisticado con acabados en dorado y negro.",
            ["Cronógrafo", "Acero Inoxidable", "Tachymeter"],
        ),
        watch(
            4,
            "CURREN Classic Black Gold",
            "CURREN",
            179_900,
            229_900,
            "/images/16.jpeg",
            "Reloj clásico con detalles en oro rosa y negro mate.",
            ["24 horas", "Calendario", "Cronógrafo"],
        ),
        watch(
            5,
            "GUESS Executive Black",
            "GUESS",
            459_900,
            599_900,
            "/images/17.jpeg",
            "Reloj ejecutivo de lujo con diseño contemporáneo.",
            ["Movimiento Quartz", "Acero Inoxidable", "Multifunción"],
        ),
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    const NOW: i64 = 1_760_400_000_000;

    fn draft(name: &str) -> WatchDraft {
        WatchDraft {
            name: name.to_string(),
            brand: "CASIO".to_string(),
            price: 99_900,
            original_price: 129_900,
            image: "/images/20.jpeg".to_string(),
            description: "Digital".to_string(),
            features: vec!["Alarma".to_string()],
            in_stock: true,
        }
    }

    #[test]
    fn test_seeded_catalog() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.list().iter().all(|w| w.brand == "CURREN" || w.brand == "GUESS"));

        let guess = catalog.get(5).unwrap();
        assert_eq!(guess.price, 459_900);
        assert_eq!(guess.features.len(), 3);
        assert!(catalog.list().iter().all(|w| w.in_stock));
    }

    #[test]
    fn test_add_uses_clock_id() {
        let mut catalog = Catalog::seeded();
        let watch = catalog.add(draft("CASIO Vintage"), NOW).unwrap();

        assert_eq!(watch.id, NOW);
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.list().last(), Some(&watch));
    }

    #[test]
    fn test_add_in_same_millisecond_stays_unique() {
        let mut catalog = Catalog::seeded();
        let a = catalog.add(draft("A"), NOW).unwrap();
        let b = catalog.add(draft("B"), NOW).unwrap();
        let c = catalog.add(draft("C"), NOW - 10).unwrap();

        assert_eq!(a.id, NOW);
        assert_eq!(b.id, NOW + 1);
        assert_eq!(c.id, NOW + 2);
    }

    #[test]
    fn test_add_rejects_invalid_draft() {
        let mut catalog = Catalog::new();
        let mut bad = draft("X");
        bad.price = 0;

        let err = catalog.add(bad, NOW).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_edit() {
        let mut catalog = Catalog::seeded();
        let mut watch = catalog.get(2).cloned().unwrap();
        watch.in_stock = false;
        watch.price = 150_000;

        catalog.edit(watch).unwrap();
        let edited = catalog.get(2).unwrap();
        assert!(!edited.in_stock);
        assert_eq!(edited.price, 150_000);
        assert_eq!(catalog.list().iter().filter(|w| w.in_stock).count(), 4);

        // Position is preserved
        assert_eq!(catalog.list()[1].id, 2);
    }

    #[test]
    fn test_edit_unknown_id() {
        let mut catalog = Catalog::seeded();
        let ghost = Watch::from_draft(404, draft("Ghost"));
        assert!(matches!(
            catalog.edit(ghost),
            Err(CoreError::WatchNotFound(404))
        ));
    }

    #[test]
    fn test_delete() {
        let mut catalog = Catalog::seeded();
        let removed = catalog.delete(3).unwrap();
        assert_eq!(removed.name, "CURREN Chronograph Gold");
        assert!(catalog.get(3).is_none());
        assert_eq!(catalog.len(), 4);

        assert!(matches!(catalog.delete(3), Err(CoreError::WatchNotFound(3))));
    }
}
