use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use cortex_core::errors::{CortexError, CortexResult};
use cortex_core::traits::{VectorMatch, VectorStore};

use crate::cosine::cosine_similarity;

/// A single stored vector plus its metadata (spec.md §4.5: `insert(coll,
/// embedding, metadata)`).
#[derive(Debug, Clone)]
struct Entry {
    vector: Vec<f32>,
    metadata: HashMap<String, Value>,
}

/// A scored candidate returned from `search_with_filter`, carrying the
/// metadata the pipeline needs without a second round-trip.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredHit {
    pub id: String,
    pub score: f64,
    pub metadata: HashMap<String, Value>,
}

/// One named collection: a flat, linearly-scanned in-process milvus-like
/// shim (spec.md §4.5: "suitable for tests"). Every vector in a collection
/// shares its declared `dimension`.
pub struct InMemoryCollection {
    name: String,
    dimension: usize,
    entries: DashMap<String, Entry>,
}

impl InMemoryCollection {
    pub fn new(name: impl Into<String>, dimension: usize) -> Self {
        Self {
            name: name.into(),
            dimension,
            entries: DashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn check_dimension(&self, vector: &[f32]) -> CortexResult<()> {
        if vector.len() != self.dimension {
            return Err(CortexError::invalid_input(
                "vector_insert",
                format!(
                    "expected dimension {}, got {}",
                    self.dimension,
                    vector.len()
                ),
            ));
        }
        Ok(())
    }

    pub fn upsert_with_metadata(
        &self,
        id: &str,
        vector: Vec<f32>,
        metadata: HashMap<String, Value>,
    ) -> CortexResult<()> {
        self.check_dimension(&vector)?;
        self.entries.insert(id.to_string(), Entry { vector, metadata });
        Ok(())
    }

    /// Matches `filter` as an equality-mapping on metadata; entries missing
    /// a filtered key are excluded (spec.md §4.5: client-side filtering).
    pub fn search_with_filter(
        &self,
        query: &[f32],
        limit: usize,
        filter: &HashMap<String, Value>,
    ) -> CortexResult<Vec<ScoredHit>> {
        self.check_dimension(query)?;
        let mut hits: Vec<ScoredHit> = self
            .entries
            .iter()
            .filter(|entry| {
                filter
                    .iter()
                    .all(|(k, v)| entry.value().metadata.get(k) == Some(v))
            })
            .map(|entry| ScoredHit {
                id: entry.key().clone(),
                score: cosine_similarity(query, &entry.value().vector),
                metadata: entry.value().metadata.clone(),
            })
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(limit);
        Ok(hits)
    }
}

#[async_trait]
impl VectorStore for InMemoryCollection {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn upsert(&self, id: &str, vector: &[f32]) -> CortexResult<()> {
        self.upsert_with_metadata(id, vector.to_vec(), HashMap::new())
    }

    async fn upsert_batch(&self, items: &[(String, Vec<f32>)]) -> CortexResult<()> {
        for (id, vector) in items {
            self.upsert_with_metadata(id, vector.clone(), HashMap::new())?;
        }
        Ok(())
    }

    async fn search(&self, query: &[f32], limit: usize) -> CortexResult<Vec<VectorMatch>> {
        let hits = self.search_with_filter(query, limit, &HashMap::new())?;
        Ok(hits
            .into_iter()
            .map(|h| VectorMatch { id: h.id, score: h.score })
            .collect())
    }

    async fn delete(&self, id: &str) -> CortexResult<bool> {
        Ok(self.entries.remove(id).is_some())
    }

    async fn get(&self, id: &str) -> CortexResult<Option<Vec<f32>>> {
        Ok(self.entries.get(id).map(|e| e.vector.clone()))
    }

    async fn len(&self) -> CortexResult<usize> {
        Ok(self.entries.len())
    }
}
