mod cache_config;
mod defaults;
mod embedder_config;
mod execution_config;
mod graph_config;
mod hierarchy_config;
mod hybrid_config;
mod logging_config;
mod pipeline_config;
mod search_config;

pub use cache_config::CacheConfig;
pub use embedder_config::EmbedderConfig;
pub use execution_config::ExecutionConfig;
pub use graph_config::GraphConfig;
pub use hierarchy_config::HierarchyConfig;
pub use hybrid_config::HybridConfig;
pub use logging_config::LoggingConfig;
pub use pipeline_config::PipelineConfig;
pub use search_config::SearchConfig;

use serde::{Deserialize, Serialize};

use crate::errors::CortexError;

/// Root configuration for a `CortexRuntime`. Every field nests a per-subsystem
/// config struct with its own `Default`; loading an empty TOML document
/// yields exactly the defaults enumerated in spec.md §6.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CortexConfig {
    pub pipeline: PipelineConfig,
    pub cache: CacheConfig,
    pub embedder: EmbedderConfig,
    pub search: SearchConfig,
    pub hybrid: HybridConfig,
    pub graph: GraphConfig,
    pub execution: ExecutionConfig,
    pub hierarchy: HierarchyConfig,
    pub logging: LoggingConfig,
}

impl CortexConfig {
    /// Parse a TOML document, filling in defaults for any omitted table or
    /// field. An empty string is valid input and yields `Self::default()`.
    pub fn from_toml(source: &str) -> Result<Self, CortexError> {
        toml::from_str(source).map_err(|err| {
            CortexError::invalid_input("CortexConfig::from_toml", err.to_string())
        })
    }

    pub fn to_toml(&self) -> Result<String, CortexError> {
        toml::to_string(self)
            .map_err(|err| CortexError::invalid_input("CortexConfig::to_toml", err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_all_defaults() {
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
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let toml = r#"
[pipeline]
max_batch_size = 200

[search]
max_results = 25
"#;
        let config = CortexConfig::from_toml(toml).unwrap();
        assert_eq!(config.pipeline.max_batch_size, 200);
        assert_eq!(config.pipeline.max_retries, 3);
        assert_eq!(config.search.max_results, 25);
        assert_eq!(config.search.semantic_threshold, 0.7);
    }

    #[test]
    fn serde_roundtrip_preserves_values() {
        let config = CortexConfig::default();
        let toml_str = config.to_toml().unwrap();
        let roundtripped = CortexConfig::from_toml(&toml_str).unwrap();
        assert_eq!(roundtripped.pipeline.max_batch_size, config.pipeline.max_batch_size);
        assert_eq!(roundtripped.embedder.dimension, config.embedder.dimension);
    }

    #[test]
    fn malformed_toml_surfaces_invalid_input() {
        let err = CortexConfig::from_toml("not valid = [[[").unwrap_err();
        assert_eq!(err.kind(), crate::errors::ErrorKind::InvalidInput);
    }
}
