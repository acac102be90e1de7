use std::collections::HashMap;

use cortex_core::memory::{Importance, MemoryType};
use serde_json::Value;

/// A single `create`/`createBatch` request (spec.md §4.1).
///
/// `content` and `user_id` are the only fields spec.md's contract names
/// explicitly; the rest default to values a host embedding a bare `content`
/// string would expect (`Episodic`/`Medium`, no session, no tags).
#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub content: String,
    pub user_id: String,
    pub session_id: Option<String>,
    pub memory_type: MemoryType,
    pub importance: Importance,
    pub tags: Vec<String>,
    pub metadata: HashMap<String, Value>,
}

impl CreateRequest {
    pub fn new(content: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            user_id: user_id.into(),
            session_id: None,
            memory_type: MemoryType::Episodic,
            importance: Importance::Medium,
            tags: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_memory_type(mut self, memory_type: MemoryType) -> Self {
        self.memory_type = memory_type;
        self
    }

    pub fn with_importance(mut self, importance: Importance) -> Self {
        self.importance = importance;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_metadata(mut self, metadata: HashMap<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }
}
