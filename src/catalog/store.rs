//! Shared handle to the current catalog index.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::debug;

use super::{CatalogIndex, Schema, WorkflowVariable};

/// Holds the current `CatalogIndex` behind an `ArcSwap`.
///
/// Readers take a snapshot with a single atomic load and keep using it for the
/// whole request. `rebuild` constructs a complete new index before storing it,
/// so a concurrent reader sees either the old or the new index, never a
/// partially populated one.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    inner: Arc<ArcSwap<CatalogIndex>>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(CatalogIndex::default())
    }
}

impl CatalogStore {
    /// Creates a store seeded with the given index.
    pub fn new(index: CatalogIndex) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(index)),
        }
    }

    /// Returns the current index snapshot.
    pub fn snapshot(&self) -> Arc<CatalogIndex> {
        self.inner.load_full()
    }

    /// Replaces the whole index with one built from the given metadata.
    pub fn rebuild(&self, schemas: &[Schema], workflow_variables: &[WorkflowVariable]) {
        let index = CatalogIndex::build(schemas, workflow_variables);
        self.inner.store(Arc::new(index));
        debug!("Catalog index swapped");
    }
}
