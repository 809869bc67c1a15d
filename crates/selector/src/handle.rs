//! Shared, reloadable access to a selector.
//!
//! Callers take a snapshot (`Arc<TechniqueSelector>`) and run against it;
//! `reload` builds a new selector and swaps the pointer. Requests already
//! holding the old snapshot finish on it.

use crate::engine::TechniqueSelector;
use promptsmith_core::{Catalog, CatalogError, SelectionRequest, SelectionResponse};
use std::sync::{Arc, RwLock};
use tracing::info;

#[derive(Debug)]
pub struct SelectorHandle {
    current: RwLock<Arc<TechniqueSelector>>,
}

impl SelectorHandle {
    pub fn new(selector: TechniqueSelector) -> Self {
        Self {
            current: RwLock::new(Arc::new(selector)),
        }
    }

    pub fn from_catalog(catalog: Catalog) -> Result<Self, CatalogError> {
        TechniqueSelector::new(catalog).map(Self::new)
    }

    /// The selector new requests should use.
    pub fn snapshot(&self) -> Arc<TechniqueSelector> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    pub fn select(&self, request: &SelectionRequest) -> SelectionResponse {
        self.snapshot().select(request)
    }

    /// Replace the catalog. On error the current selector stays in place.
    pub fn reload(&self, catalog: Catalog) -> Result<(), CatalogError> {
        let next = Arc::new(TechniqueSelector::new(catalog)?);
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = next;
        info!("Technique catalog reloaded");
        Ok(())
    }
}
