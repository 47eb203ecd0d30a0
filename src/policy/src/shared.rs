//! Shared handle for live role tables
//!
//! A compiled table is immutable, so concurrent lookups only need a
//! shared reference. Policy reloads build a whole new table and swap it
//! in; sessions that grabbed the old table keep using it until their
//! `Arc` drops.

use crate::table::RoleTable;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// Cloneable handle to the role table currently in force.
///
/// `load` hands out a snapshot `Arc`; enforcement code should load once
/// per request and run all its checks against that snapshot so a reload
/// mid-request cannot mix two policy versions.
#[derive(Debug, Clone)]
pub struct SharedTable {
    inner: Arc<RwLock<Arc<RoleTable>>>,
}

impl SharedTable {
    /// Wrap a freshly compiled table.
    pub fn new(table: RoleTable) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(table))),
        }
    }

    /// Snapshot of the table currently in force.
    pub fn load(&self) -> Arc<RoleTable> {
        self.inner.read().clone()
    }

    /// Swap in a new table, returning the previous one.
    pub fn replace(&self, table: RoleTable) -> Arc<RoleTable> {
        let next = Arc::new(table);
        let prev = std::mem::replace(&mut *self.inner.write(), next);
        info!("role table replaced ({} roles)", self.load().len());
        prev
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closure::ClosureGenerator;
    use crate::hierarchy::RoleHierarchy;

    fn table_of(len: usize) -> RoleTable {
        ClosureGenerator::generate(&RoleHierarchy::new(len), 0).unwrap()
    }

    #[test]
    fn test_load_and_replace() {
        let shared = SharedTable::new(table_of(2));
        let old = shared.load();
        assert_eq!(old.len(), 2);

        let prev = shared.replace(table_of(5));
        assert_eq!(prev.len(), 2);
        assert_eq!(shared.load().len(), 5);

        // The snapshot taken before the swap is still usable.
        assert_eq!(old.len(), 2);
    }

    #[test]
    fn test_clones_see_the_swap() {
        let shared = SharedTable::new(table_of(1));
        let alias = shared.clone();
        shared.replace(table_of(3));
        assert_eq!(alias.load().len(), 3);
    }
}
