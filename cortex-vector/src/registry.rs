use std::sync::Arc;

use dashmap::DashMap;

use cortex_core::errors::{CortexError, CortexResult};

use crate::collection::InMemoryCollection;

/// Collection-management half of the adapter contract (spec.md §4.5:
/// `createCollection`, `collectionExists`). Each collection is an
/// independently dimensioned, independently locked `InMemoryCollection`.
#[derive(Default)]
pub struct CollectionRegistry {
    collections: DashMap<String, Arc<InMemoryCollection>>,
}

impl CollectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_collection(&self, name: &str, dimension: usize) -> CortexResult<Arc<InMemoryCollection>> {
        if self.collections.contains_key(name) {
            return Err(CortexError::invalid_input(
                "create_collection",
                format!("collection '{name}' already exists"),
            ));
        }
        let collection = Arc::new(InMemoryCollection::new(name, dimension));
        self.collections.insert(name.to_string(), collection.clone());
        Ok(collection)
    }

    pub fn collection_exists(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    pub fn collection(&self, name: &str) -> Option<Arc<InMemoryCollection>> {
        self.collections.get(name).map(|c| c.clone())
    }

    pub fn drop_collection(&self, name: &str) -> bool {
        self.collections.remove(name).is_some()
    }
}
