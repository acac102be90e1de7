use std::sync::Arc;

use async_trait::async_trait;
use cortex_cache::{ObjectPool, TtlCache};
use cortex_core::config::EmbedderConfig;
use cortex_core::errors::{CortexError, CortexResult};
use cortex_core::traits::EmbeddingProvider;
use cortex_exec::ExecutionManager;

use crate::pools::{term_freq_pool, vector_pool};
use crate::projection::target_dims;
use crate::tokenizer::tokenize;
use crate::vector_ops::{cosine_similarity, l2_normalize};
use crate::vocabulary::Vocabulary;

struct Inner {
    dimension: usize,
    vocabulary: Vocabulary,
    vector_pool: ObjectPool<Vec<f32>>,
    term_freq_pool: ObjectPool<std::collections::HashMap<String, f64>>,
    query_cache: TtlCache<String, Vec<f32>>,
    exec: Arc<ExecutionManager>,
}

/// In-process TF-IDF embedding provider (spec.md §4.6).
///
/// Cheaply `Clone`-able (an `Arc` around shared state) so it can be moved
/// into `tokio::task::spawn_blocking` closures for the CPU-bound embedding
/// work without the caller needing to hold a reference across an await
/// point.
#[derive(Clone)]
pub struct TfIdfEmbedder {
    inner: Arc<Inner>,
}

impl TfIdfEmbedder {
    pub fn new(config: &EmbedderConfig, exec: Arc<ExecutionManager>) -> Self {
        let inner = Inner {
            dimension: config.dimension,
            vocabulary: Vocabulary::new(config.max_vocabulary_size),
            vector_pool: vector_pool(config.dimension, config.vector_pool_capacity),
            term_freq_pool: term_freq_pool(config.term_freq_pool_capacity),
            query_cache: TtlCache::new(
                config.query_cache_capacity,
                std::time::Duration::from_millis(config.query_cache_ttl_ms),
            ),
            exec,
        };
        Self { inner: Arc::new(inner) }
    }

    /// Rebuild the vocabulary and IDF table from a training corpus.
    pub fn train_on_corpus(&self, corpus: &[String]) {
        self.inner.vocabulary.train_on_corpus(corpus);
        self.inner.query_cache.invalidate_all();
    }

    /// The `k` vocabulary terms whose projected vector is most cosine-similar
    /// to `word`'s, excluding `word` itself. Empty if `word` isn't indexed.
    pub fn find_similar_words(&self, word: &str, k: usize) -> Vec<(String, f64)> {
        let lower = word.to_lowercase();
        let Some(query_vec) = self.per_term_vector(&lower) else {
            return Vec::new();
        };
        let mut scored: Vec<(String, f64)> = self
            .inner
            .vocabulary
            .terms()
            .into_iter()
            .filter(|t| *t != lower)
            .filter_map(|t| self.per_term_vector(&t).map(|v| (t, cosine_similarity(&query_vec, &v))))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored
    }

    pub fn vocabulary_size(&self) -> usize {
        self.inner.vocabulary.len()
    }

    fn per_term_vector(&self, term: &str) -> Option<Vec<f32>> {
        let v = self.inner.vocabulary.index_of(term)?;
        let idf = self.inner.vocabulary.idf(term);
        let dims = target_dims(v, self.inner.dimension);
        let mut vec = vec![0.0f32; self.inner.dimension];
        let split = idf / dims.len() as f64;
        for d in &dims {
            vec[*d] = split as f32;
        }
        l2_normalize(&mut vec);
        Some(vec)
    }

    fn compute_vector(&self, text: &str) -> Vec<f32> {
        let tokens = tokenize(text);
        let mut accumulator = self.inner.vector_pool.acquire();
        if tokens.is_empty() {
            let result = accumulator.clone();
            self.inner.vector_pool.release(accumulator);
            return result;
        }

        let mut tf = self.inner.term_freq_pool.acquire();
        for tok in &tokens {
            *tf.entry(tok.clone()).or_insert(0.0) += 1.0;
        }
        let total = tokens.len() as f64;

        for (term, count) in tf.iter() {
            if let Some(v) = self.inner.vocabulary.get_or_insert(term) {
                let freq = count / total;
                let idf = self.inner.vocabulary.idf(term);
                let weight = freq * idf;
                let dims = target_dims(v, self.inner.dimension);
                let split = weight / dims.len() as f64;
                for d in &dims {
                    accumulator[*d] += split as f32;
                }
            }
        }
        self.inner.term_freq_pool.release(tf);

        l2_normalize(&mut accumulator);
        let result = accumulator.clone();
        self.inner.vector_pool.release(accumulator);
        result
    }

    fn embed_cached(&self, text: &str) -> Vec<f32> {
        let key = blake3::hash(text.as_bytes()).to_hex().to_string();
        if let Some(cached) = self.inner.query_cache.get(&key) {
            return cached;
        }
        let vector = self.inner.exec.embedding().submit(|| self.compute_vector(text));
        self.inner.query_cache.insert(key, vector.clone());
        vector
    }
}

#[async_trait]
impl EmbeddingProvider for TfIdfEmbedder {
    async fn embed(&self, text: &str) -> CortexResult<Vec<f32>> {
        let this = self.clone();
        let text = text.to_string();
        tokio::task::spawn_blocking(move || this.embed_cached(&text))
            .await
            .map_err(|err| CortexError::BackendTransient {
                operation: "embed".to_string(),
                reason: err.to_string(),
            })
    }

    async fn embed_batch(&self, texts: &[String]) -> CortexResult<Vec<Vec<f32>>> {
        let this = self.clone();
        let texts = texts.to_vec();
        tokio::task::spawn_blocking(move || texts.iter().map(|t| this.embed_cached(t)).collect())
            .await
            .map_err(|err| CortexError::BackendTransient {
                operation: "embed_batch".to_string(),
                reason: err.to_string(),
            })
    }

    fn dimension(&self) -> usize {
        self.inner.dimension
    }

    fn is_healthy(&self) -> bool {
        true
    }

    async fn close(&self) -> CortexResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_core::config::ExecutionConfig;

    fn embedder(dimension: usize) -> TfIdfEmbedder {
        let exec = Arc::new(ExecutionManager::new(&ExecutionConfig::default()));
        let config = EmbedderConfig {
            dimension,
            ..Default::default()
        };
        TfIdfEmbedder::new(&config, exec)
    }

    #[tokio::test]
    async fn empty_text_returns_zero_vector() {
        let e = embedder(128);
        let v = e.embed("").await.unwrap();
        assert_eq!(v.len(), 128);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[tokio::test]
    async fn produces_correct_dimension() {
        let e = embedder(300);
        let v = e.embed("hello world test embedding").await.unwrap();
        assert_eq!(v.len(), 300);
    }

    #[tokio::test]
    async fn output_is_normalized() {
        let e = embedder(256);
        let v = e.embed("rust programming language systems").await.unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5 || norm == 0.0);
    }

    #[tokio::test]
    async fn deterministic_for_same_text() {
        let e = embedder(256);
        let a = e.embed("deterministic test").await.unwrap();
        let b = e.embed("deterministic test").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn batch_matches_individual() {
        let e = embedder(128);
        let texts = vec!["hello world".to_string(), "foo bar baz".to_string()];
        let batch = e.embed_batch(&texts).await.unwrap();
        for (i, text) in texts.iter().enumerate() {
            let single = e.embed(text).await.unwrap();
            assert_eq!(batch[i], single);
        }
    }

    #[tokio::test]
    async fn similar_texts_have_higher_cosine_than_dissimilar() {
        let e = embedder(256);
        let a = e.embed("rust programming language").await.unwrap();
        let b = e.embed("rust programming systems").await.unwrap();
        let c = e.embed("cooking recipes pasta").await.unwrap();

        let cos_ab: f32 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
        let cos_ac: f32 = a.iter().zip(&c).map(|(x, y)| x * y).sum();
        assert!(cos_ab >= cos_ac);
    }

    #[test]
    fn find_similar_words_is_empty_for_unknown_word() {
        let e = embedder(128);
        assert!(e.find_similar_words("nonexistent", 5).is_empty());
    }

    #[tokio::test]
    async fn find_similar_words_excludes_the_query_itself() {
        let e = embedder(128);
        e.embed("alpha beta gamma delta").await.unwrap();
        let results = e.find_similar_words("alpha", 10);
        assert!(results.iter().all(|(term, _)| term != "alpha"));
    }

    #[tokio::test]
    async fn vocabulary_drops_terms_past_capacity_without_error() {
        let exec = Arc::new(ExecutionManager::new(&ExecutionConfig::default()));
        let config = EmbedderConfig {
            dimension: 64,
            max_vocabulary_size: 2,
            ..Default::default()
        };
        let e = TfIdfEmbedder::new(&config, exec);
        e.embed("alpha beta gamma delta epsilon").await.unwrap();
        assert_eq!(e.vocabulary_size(), 2);
    }
}
