use cortex_core::config::CortexConfig;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = CortexConfig::from_toml("").unwrap();

    assert_eq!(config.pipeline.max_batch_size, 50);
    assert_eq!(config.pipeline.max_retries, 3);
    assert_eq!(config.pipeline.retry_delay_ms, 1000);
    assert_eq!(config.pipeline.max_concurrent_operations, 100);

    assert_eq!(config.cache.memory_capacity, 10_000);
    assert_eq!(config.cache.memory_ttl_ms, 1_800_000);
    assert_eq!(config.cache.query_capacity, 5_000);
    assert_eq!(config.cache.query_ttl_ms, 600_000);

    assert_eq!(config.embedder.dimension, 300);
    assert_eq!(config.embedder.max_vocabulary_size, 10_000);

    assert_eq!(config.search.semantic_threshold, 0.7);
    assert_eq!(config.search.max_results, 10);
    assert_eq!(config.search.relevance_threshold, 0.3);

    assert_eq!(config.hybrid.semantic_weight, 0.6);
    assert_eq!(config.hybrid.keyword_weight, 0.3);
    assert_eq!(config.hybrid.fuzzy_weight, 0.1);

    assert_eq!(config.hierarchy.user_scope_weight, 0.4);
    assert_eq!(config.hierarchy.session_scope_weight, 0.3);
    assert_eq!(config.hierarchy.agent_scope_weight, 0.3);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[pipeline]
max_batch_size = 200
max_concurrent_operations = 16

[embedder]
dimension = 512
"#;
    let config = CortexConfig::from_toml(toml).unwrap();
    assert_eq!(config.pipeline.max_batch_size, 200);
    assert_eq!(config.pipeline.max_concurrent_operations, 16);
    // non-overridden field keeps its default
    assert_eq!(config.pipeline.max_retries, 3);
    assert_eq!(config.embedder.dimension, 512);
    assert_eq!(config.embedder.max_vocabulary_size, 10_000);
}

#[test]
fn config_serde_roundtrip() {
    let config = CortexConfig::default();
    let toml_str = config.to_toml().unwrap();
    let roundtripped = CortexConfig::from_toml(&toml_str).unwrap();
    assert_eq!(roundtripped.pipeline.max_batch_size, config.pipeline.max_batch_size);
    assert_eq!(roundtripped.embedder.dimension, config.embedder.dimension);
    assert_eq!(roundtripped.hybrid.semantic_weight, config.hybrid.semantic_weight);
}
