use std::collections::HashMap;

use serde_json::Value;

use crate::errors::CortexResult;

/// A graph node (spec.md §4.4). Identity is the same id as the owning
/// `BaseMemory` when created via `createNodeWithId`.
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub properties: HashMap<String, Value>,
    pub user_id: Option<String>,
}

/// A directed, typed graph edge.
#[derive(Debug, Clone)]
pub struct GraphEdge {
    pub edge_id: String,
    pub src: String,
    pub dst: String,
    pub edge_type: String,
    pub properties: HashMap<String, Value>,
}

/// The in-process property graph seam (spec.md §4.4).
///
/// All operations are synchronous and programmatic: no I/O, no retry. Every
/// implementation must serialize mutations per node (a per-node or per-shard
/// lock) while letting reads proceed unblocked.
pub trait GraphStore: Send + Sync {
    fn create_node(&self, label: &str, properties: HashMap<String, Value>, user_id: Option<String>) -> CortexResult<String>;

    /// Used by the pipeline so `memoryId == nodeId`.
    fn create_node_with_id(&self, id: &str, label: &str, properties: HashMap<String, Value>, user_id: Option<String>) -> CortexResult<()>;

    fn get_node(&self, id: &str) -> CortexResult<Option<GraphNode>>;

    /// Merges `properties` into the existing node; rebuilds affected
    /// property-index entries.
    fn update_node(&self, id: &str, properties: HashMap<String, Value>) -> CortexResult<()>;

    /// Removes the node, cascade-deleting every incident edge and removing
    /// it from the label/property/user indices. Returns `false` if the node
    /// did not exist.
    fn delete_node(&self, id: &str) -> CortexResult<bool>;

    /// Requires both endpoints to exist; fails with `NotFound` otherwise.
    fn create_relationship(
        &self,
        src: &str,
        dst: &str,
        edge_type: &str,
        properties: HashMap<String, Value>,
    ) -> CortexResult<String>;

    /// Both in- and out-edges; `edge_type = None` returns all.
    fn get_relationships(&self, id: &str, edge_type: Option<&str>) -> CortexResult<Vec<GraphEdge>>;

    fn remove_relationship(&self, edge_id: &str) -> CortexResult<bool>;

    /// BFS from `id` out to `max_depth` across edges of the matching type
    /// (any direction). Excludes the start node. Ties within a layer break
    /// by ascending id.
    fn find_connected_nodes(&self, id: &str, edge_type: Option<&str>, max_depth: usize) -> CortexResult<Vec<GraphNode>>;

    /// Pre-order DFS with the same cycle handling as `find_connected_nodes`.
    fn depth_first_traversal(&self, id: &str, edge_type: Option<&str>, max_depth: usize) -> CortexResult<Vec<GraphNode>>;

    fn find_by_property(&self, name: &str, value: &Value) -> CortexResult<Vec<GraphNode>>;

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;
}
