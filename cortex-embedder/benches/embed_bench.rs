//! Criterion benchmarks for cortex-embedder.
//!
//! Targets: single embed of a short document, batch embed of 50 documents,
//! and a trained vocabulary's `find_similar_words` lookup.

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};

use cortex_core::config::{EmbedderConfig, ExecutionConfig};
use cortex_core::traits::EmbeddingProvider;
use cortex_embedder::TfIdfEmbedder;
use cortex_exec::ExecutionManager;

fn embedder() -> TfIdfEmbedder {
    let exec = Arc::new(ExecutionManager::new(&ExecutionConfig::default()));
    TfIdfEmbedder::new(&EmbedderConfig::default(), exec)
}

fn bench_embed_single(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let e = embedder();
    c.bench_function("embed_single_document", |b| {
        b.iter(|| rt.block_on(e.embed("the quick brown fox jumps over the lazy dog")))
    });
}

fn bench_embed_batch(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let e = embedder();
    let texts: Vec<String> = (0..50)
        .map(|i| format!("document number {i} discusses rust systems programming"))
        .collect();
    c.bench_function("embed_batch_50_documents", |b| {
        b.iter(|| rt.block_on(e.embed_batch(&texts)))
    });
}

fn bench_find_similar_words(c: &mut Criterion) {
    let e = embedder();
    let corpus: Vec<String> = (0..200)
        .map(|i| format!("rust programming language document {i} systems memory safety"))
        .collect();
    e.train_on_corpus(&corpus);
    c.bench_function("find_similar_words_k10", |b| {
        b.iter(|| e.find_similar_words("rust", 10))
    });
}

criterion_group!(benches, bench_embed_single, bench_embed_batch, bench_find_similar_words);
criterion_main!(benches);
