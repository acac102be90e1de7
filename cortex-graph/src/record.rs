use std::collections::{HashMap, HashSet};

use serde_json::Value;

/// Internal node representation. Carries its own incident edge id sets so
/// `delete_node` can cascade without a full scan (spec.md §4.4 "Storage").
#[derive(Debug, Clone)]
pub(crate) struct NodeRecord {
    pub label: String,
    pub properties: HashMap<String, Value>,
    pub user_id: Option<String>,
    pub incoming: HashSet<String>,
    pub outgoing: HashSet<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct EdgeRecord {
    pub edge_id: String,
    pub src: String,
    pub dst: String,
    pub edge_type: String,
    pub properties: HashMap<String, Value>,
}
