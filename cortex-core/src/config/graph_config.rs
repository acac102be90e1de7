use serde::{Deserialize, Serialize};

use super::defaults;

/// In-process graph store configuration (spec.md §4.4).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Maximum hop count for relationship traversal queries.
    pub max_traversal_depth: usize,
    /// Number of shards the adjacency index is split across.
    pub shard_count: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_traversal_depth: defaults::DEFAULT_MAX_TRAVERSAL_DEPTH,
            shard_count: 16,
        }
    }
}
