use std::collections::{HashMap, HashSet};

use dashmap::DashMap;
use serde_json::Value;

use cortex_core::errors::{CortexError, CortexResult};
use cortex_core::traits::{GraphEdge, GraphNode, GraphStore};

use crate::property_index::PropertyIndex;
use crate::record::{EdgeRecord, NodeRecord};
use crate::traversal::{breadth_first, depth_first};

/// The in-process property graph (spec.md §4.4).
///
/// Three concurrent maps — `nodes`, `edges`, `user_index` — each sharded
/// internally by `DashMap`, which gives per-shard locking for free and
/// satisfies the "serialized per node by a per-node lock (or per-shard
/// lock)" consistency requirement without a bespoke sharding scheme.
pub struct InProcessGraphStore {
    nodes: DashMap<String, NodeRecord>,
    edges: DashMap<String, EdgeRecord>,
    user_index: DashMap<String, HashSet<String>>,
    relationship_type_index: DashMap<String, HashSet<String>>,
    property_index: PropertyIndex,
}

impl Default for InProcessGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InProcessGraphStore {
    pub fn new() -> Self {
        Self {
            nodes: DashMap::new(),
            edges: DashMap::new(),
            user_index: DashMap::new(),
            relationship_type_index: DashMap::new(),
            property_index: PropertyIndex::default(),
        }
    }

    fn to_public_node(&self, id: &str, record: &NodeRecord) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            label: record.label.clone(),
            properties: record.properties.clone(),
            user_id: record.user_id.clone(),
        }
    }

    fn to_public_edge(&self, record: &EdgeRecord) -> GraphEdge {
        GraphEdge {
            edge_id: record.edge_id.clone(),
            src: record.src.clone(),
            dst: record.dst.clone(),
            edge_type: record.edge_type.clone(),
            properties: record.properties.clone(),
        }
    }

    fn insert_node(&self, id: String, label: &str, properties: HashMap<String, Value>, user_id: Option<String>) {
        self.property_index.insert(&id, &properties);
        if let Some(uid) = &user_id {
            self.user_index.entry(uid.clone()).or_default().insert(id.clone());
        }
        self.nodes.insert(
            id,
            NodeRecord {
                label: label.to_string(),
                properties,
                user_id,
                incoming: HashSet::new(),
                outgoing: HashSet::new(),
            },
        );
    }

    /// Neighbor ids of `id` reachable by one hop across edges of the given
    /// type (any direction), used by both traversal functions.
    pub(crate) fn neighbors_of(&self, id: &str, edge_type: Option<&str>) -> Vec<String> {
        let Some(node) = self.nodes.get(id) else {
            return Vec::new();
        };
        let mut neighbors = Vec::new();
        for edge_id in node.incoming.iter().chain(node.outgoing.iter()) {
            if let Some(edge) = self.edges.get(edge_id) {
                if let Some(t) = edge_type {
                    if edge.edge_type != t {
                        continue;
                    }
                }
                let other = if edge.src == id { &edge.dst } else { &edge.src };
                neighbors.push(other.clone());
            }
        }
        neighbors
    }

    pub(crate) fn node_exists(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub(crate) fn get_node_public(&self, id: &str) -> Option<GraphNode> {
        self.nodes.get(id).map(|r| self.to_public_node(id, &r))
    }
}

impl GraphStore for InProcessGraphStore {
    fn create_node(&self, label: &str, properties: HashMap<String, Value>, user_id: Option<String>) -> CortexResult<String> {
        let id = uuid::Uuid::new_v4().to_string();
        self.insert_node(id.clone(), label, properties, user_id);
        Ok(id)
    }

    fn create_node_with_id(&self, id: &str, label: &str, properties: HashMap<String, Value>, user_id: Option<String>) -> CortexResult<()> {
        self.insert_node(id.to_string(), label, properties, user_id);
        Ok(())
    }

    fn get_node(&self, id: &str) -> CortexResult<Option<GraphNode>> {
        Ok(self.get_node_public(id))
    }

    fn update_node(&self, id: &str, properties: HashMap<String, Value>) -> CortexResult<()> {
        let mut entry = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| CortexError::not_found("update_node", id))?;
        let old_properties = entry.properties.clone();
        for (k, v) in &properties {
            entry.properties.insert(k.clone(), v.clone());
        }
        self.property_index.replace(id, &old_properties, &entry.properties.clone());
        Ok(())
    }

    fn delete_node(&self, id: &str) -> CortexResult<bool> {
        let Some((_, record)) = self.nodes.remove(id) else {
            return Ok(false);
        };
        for edge_id in record.incoming.iter().chain(record.outgoing.iter()) {
            if let Some((_, edge)) = self.edges.remove(edge_id) {
                let other = if edge.src == id { &edge.dst } else { &edge.src };
                if let Some(mut other_node) = self.nodes.get_mut(other) {
                    other_node.incoming.remove(edge_id);
                    other_node.outgoing.remove(edge_id);
                }
                self.relationship_type_index
                    .entry(edge.edge_type.clone())
                    .or_default()
                    .remove(edge_id);
            }
        }
        if let Some(uid) = &record.user_id {
            if let Some(mut ids) = self.user_index.get_mut(uid) {
                ids.remove(id);
            }
        }
        self.property_index.remove(id, &record.properties);
        Ok(true)
    }

    fn create_relationship(&self, src: &str, dst: &str, edge_type: &str, properties: HashMap<String, Value>) -> CortexResult<String> {
        if !self.node_exists(src) {
            return Err(CortexError::not_found("create_relationship", src));
        }
        if !self.node_exists(dst) {
            return Err(CortexError::not_found("create_relationship", dst));
        }
        let edge_id = uuid::Uuid::new_v4().to_string();
        self.edges.insert(
            edge_id.clone(),
            EdgeRecord {
                edge_id: edge_id.clone(),
                src: src.to_string(),
                dst: dst.to_string(),
                edge_type: edge_type.to_string(),
                properties,
            },
        );
        if let Some(mut node) = self.nodes.get_mut(src) {
            node.outgoing.insert(edge_id.clone());
        }
        if let Some(mut node) = self.nodes.get_mut(dst) {
            node.incoming.insert(edge_id.clone());
        }
        self.relationship_type_index
            .entry(edge_type.to_string())
            .or_default()
            .insert(edge_id.clone());
        Ok(edge_id)
    }

    fn get_relationships(&self, id: &str, edge_type: Option<&str>) -> CortexResult<Vec<GraphEdge>> {
        let Some(node) = self.nodes.get(id) else {
            return Ok(Vec::new());
        };
        let mut result = Vec::new();
        for edge_id in node.incoming.iter().chain(node.outgoing.iter()) {
            if let Some(edge) = self.edges.get(edge_id) {
                if let Some(t) = edge_type {
                    if edge.edge_type != t {
                        continue;
                    }
                }
                result.push(self.to_public_edge(&edge));
            }
        }
        Ok(result)
    }

    fn remove_relationship(&self, edge_id: &str) -> CortexResult<bool> {
        let Some((_, edge)) = self.edges.remove(edge_id) else {
            return Ok(false);
        };
        if let Some(mut node) = self.nodes.get_mut(&edge.src) {
            node.outgoing.remove(edge_id);
        }
        if let Some(mut node) = self.nodes.get_mut(&edge.dst) {
            node.incoming.remove(edge_id);
        }
        self.relationship_type_index
            .entry(edge.edge_type.clone())
            .or_default()
            .remove(edge_id);
        Ok(true)
    }

    fn find_connected_nodes(&self, id: &str, edge_type: Option<&str>, max_depth: usize) -> CortexResult<Vec<GraphNode>> {
        let ids = breadth_first(self, id, edge_type, max_depth);
        Ok(ids
            .into_iter()
            .filter_map(|nid| self.get_node_public(&nid))
            .collect())
    }

    fn depth_first_traversal(&self, id: &str, edge_type: Option<&str>, max_depth: usize) -> CortexResult<Vec<GraphNode>> {
        let ids = depth_first(self, id, edge_type, max_depth);
        Ok(ids
            .into_iter()
            .filter_map(|nid| self.get_node_public(&nid))
            .collect())
    }

    fn find_by_property(&self, name: &str, value: &Value) -> CortexResult<Vec<GraphNode>> {
        Ok(self
            .property_index
            .find(name, value)
            .into_iter()
            .filter_map(|id| self.get_node_public(&id))
            .collect())
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props() -> HashMap<String, Value> {
        HashMap::new()
    }

    #[test]
    fn create_and_get_node_round_trips() {
        let store = InProcessGraphStore::new();
        let id = store.create_node("memory", props(), Some("u1".to_string())).unwrap();
        let node = store.get_node(&id).unwrap().unwrap();
        assert_eq!(node.label, "memory");
        assert_eq!(node.user_id, Some("u1".to_string()));
    }

    #[test]
    fn create_node_with_id_uses_given_id() {
        let store = InProcessGraphStore::new();
        store.create_node_with_id("m1", "memory", props(), None).unwrap();
        assert!(store.get_node("m1").unwrap().is_some());
    }

    #[test]
    fn relationship_requires_both_endpoints() {
        let store = InProcessGraphStore::new();
        store.create_node_with_id("a", "memory", props(), None).unwrap();
        let err = store.create_relationship("a", "missing", "related_to", props()).unwrap_err();
        assert_eq!(err.kind(), cortex_core::errors::ErrorKind::NotFound);
    }

    #[test]
    fn delete_node_cascades_edges() {
        let store = InProcessGraphStore::new();
        store.create_node_with_id("a", "memory", props(), None).unwrap();
        store.create_node_with_id("b", "memory", props(), None).unwrap();
        store.create_relationship("a", "b", "related_to", props()).unwrap();
        assert_eq!(store.edge_count(), 1);

        store.delete_node("a").unwrap();
        assert_eq!(store.edge_count(), 0);
        let b_edges = store.get_relationships("b", None).unwrap();
        assert!(b_edges.is_empty());
    }

    #[test]
    fn delete_node_is_idempotent() {
        let store = InProcessGraphStore::new();
        store.create_node_with_id("a", "memory", props(), None).unwrap();
        assert!(store.delete_node("a").unwrap());
        assert!(!store.delete_node("a").unwrap());
    }

    #[test]
    fn find_by_property_locates_node() {
        let store = InProcessGraphStore::new();
        let mut p = HashMap::new();
        p.insert("color".to_string(), json!("blue"));
        store.create_node_with_id("a", "memory", p, None).unwrap();
        let found = store.find_by_property("color", &json!("blue")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "a");
    }

    #[test]
    fn update_node_merges_and_reindexes_properties() {
        let store = InProcessGraphStore::new();
        let mut p = HashMap::new();
        p.insert("color".to_string(), json!("blue"));
        store.create_node_with_id("a", "memory", p, None).unwrap();

        let mut update = HashMap::new();
        update.insert("color".to_string(), json!("red"));
        store.update_node("a", update).unwrap();

        assert!(store.find_by_property("color", &json!("blue")).unwrap().is_empty());
        assert_eq!(store.find_by_property("color", &json!("red")).unwrap().len(), 1);
    }

    #[test]
    fn find_connected_nodes_bfs_excludes_start() {
        let store = InProcessGraphStore::new();
        for id in ["a", "b", "c"] {
            store.create_node_with_id(id, "memory", props(), None).unwrap();
        }
        store.create_relationship("a", "b", "related_to", props()).unwrap();
        store.create_relationship("b", "c", "related_to", props()).unwrap();

        let connected = store.find_connected_nodes("a", None, 2).unwrap();
        let ids: Vec<&str> = connected.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }
}
