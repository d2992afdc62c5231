//! Process-wide taxonomy handle with atomic replacement.

use crate::table::TaxonomyTable;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// Holds the current [`TaxonomyTable`].
///
/// Readers take an `Arc` snapshot and classify against it without further
/// locking. A reload builds a complete table first and then swaps the
/// pointer, so a snapshot taken before the swap keeps seeing the old table.
#[derive(Debug)]
pub struct SharedTaxonomy {
    current: RwLock<Arc<TaxonomyTable>>,
}

impl SharedTaxonomy {
    /// Wrap an already loaded table.
    pub fn new(table: TaxonomyTable) -> Self {
        Self {
            current: RwLock::new(Arc::new(table)),
        }
    }

    /// Snapshot of the current table.
    pub fn current(&self) -> Arc<TaxonomyTable> {
        // The lock only guards a pointer swap, so a poisoned lock still holds
        // a complete table.
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the current table, returning the previous one.
    pub fn publish(&self, table: TaxonomyTable) -> Arc<TaxonomyTable> {
        let next = Arc::new(table);
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        info!(rows = next.len(), "publishing GICS hierarchy");
        std::mem::replace(&mut *guard, next)
    }
}

impl From<TaxonomyTable> for SharedTaxonomy {
    fn from(table: TaxonomyTable) -> Self {
        Self::new(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::{RawTaxonomyRow, load};
    use std::thread;

    fn single(sector: &str) -> TaxonomyTable {
        load([RawTaxonomyRow::new(
            Some(sector),
            Some(sector),
            Some(sector),
            Some(sector),
        )])
        .unwrap()
    }

    #[test]
    fn test_publish_keeps_old_snapshots() {
        let shared = SharedTaxonomy::new(single("Energy"));
        let before = shared.current();

        let previous = shared.publish(single("Utilities"));

        assert!(before.is_sector("Energy"));
        assert!(!before.is_sector("Utilities"));
        assert!(Arc::ptr_eq(&before, &previous));
        assert!(shared.current().is_sector("Utilities"));
    }

    #[test]
    fn test_concurrent_readers() {
        let shared = Arc::new(SharedTaxonomy::from(single("Energy")));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    let table = shared.current();
                    table.classify("Energy", None, None).is_ok()
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
