use async_trait::async_trait;

use crate::errors::CortexResult;

/// Embedding generation provider (spec.md §6: "EmbeddingProvider").
///
/// Providers self-report rate-limit and auth failures via `CortexError`'s
/// `BackendTransient`/`BackendPermanent` kinds; the pipeline does not
/// interpret provider-specific codes.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of length `dimension()`.
    async fn embed(&self, text: &str) -> CortexResult<Vec<f32>>;

    /// Embed a batch of texts in one call.
    async fn embed_batch(&self, texts: &[String]) -> CortexResult<Vec<Vec<f32>>>;

    /// The fixed dimensionality of vectors this provider produces.
    fn dimension(&self) -> usize;

    /// Cheap liveness check; does not guarantee the next call succeeds.
    fn is_healthy(&self) -> bool;

    /// Release any resources (background trainers, connections) held by the
    /// provider. Idempotent.
    async fn close(&self) -> CortexResult<()>;
}
