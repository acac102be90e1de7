use async_trait::async_trait;

use crate::errors::CortexResult;

/// A single vector-similarity hit.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorMatch {
    pub id: String,
    pub score: f64,
}

/// The vector backend seam (spec.md §4.5/§6: "VectorStore ... must be
/// pure-async; the dimension is fixed per collection").
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Dimension every vector in this collection must have.
    fn dimension(&self) -> usize;

    async fn upsert(&self, id: &str, vector: &[f32]) -> CortexResult<()>;

    async fn upsert_batch(&self, items: &[(String, Vec<f32>)]) -> CortexResult<()>;

    /// Top-`limit` nearest neighbors to `query`, ordered by descending score.
    async fn search(&self, query: &[f32], limit: usize) -> CortexResult<Vec<VectorMatch>>;

    async fn delete(&self, id: &str) -> CortexResult<bool>;

    async fn get(&self, id: &str) -> CortexResult<Option<Vec<f32>>>;

    async fn len(&self) -> CortexResult<usize>;
}
