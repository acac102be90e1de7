use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::confidence::Confidence;
use super::importance::Importance;
use super::types::MemoryType;

/// The universal memory record (spec.md §3 "Memory (record)").
///
/// Identity is `id`, stable for the record's lifetime. `content` is the raw
/// text the embedder and search engines operate on; `metadata` is an
/// open-ended bag the host application controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseMemory {
    /// Opaque identifier, unique across the process.
    pub id: String,
    /// Raw UTF-8 content. Must be non-empty (enforced at the pipeline boundary).
    pub content: String,
    /// Owning user. Never changes once set (invariant: "same id never has a
    /// different userId over its lifetime").
    pub user_id: String,
    /// Optional conversation/session scope.
    pub session_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub memory_type: MemoryType,
    pub importance: Importance,
    /// Order-preserving; matched case-insensitively by callers, stored as typed.
    pub tags: Vec<String>,
    pub metadata: HashMap<String, Value>,
    /// Confidence score, decays over time (`cortex-pipeline::decay`).
    #[serde(default)]
    pub confidence: Confidence,
    #[serde(default = "Utc::now")]
    pub last_accessed: DateTime<Utc>,
    #[serde(default)]
    pub access_count: u64,
    /// Archival is a query-time filter, not a physical delete (SPEC_FULL §2).
    #[serde(default)]
    pub archived: bool,
    /// blake3 hash of `content`, used for embedding-cache keys and dedup.
    #[serde(default)]
    pub content_hash: String,
}

impl BaseMemory {
    /// Construct a new memory with fresh timestamps and a computed content hash.
    pub fn new(
        id: String,
        content: String,
        user_id: String,
        memory_type: MemoryType,
        importance: Importance,
    ) -> Self {
        let now = Utc::now();
        let content_hash = Self::compute_content_hash(&content);
        Self {
            id,
            content,
            user_id,
            session_id: None,
            created_at: now,
            updated_at: now,
            memory_type,
            importance,
            tags: Vec::new(),
            metadata: HashMap::new(),
            confidence: Confidence::default(),
            last_accessed: now,
            access_count: 0,
            archived: false,
            content_hash,
        }
    }

    pub fn compute_content_hash(content: &str) -> String {
        blake3::hash(content.as_bytes()).to_hex().to_string()
    }

    /// Apply a content/metadata update, bumping `updated_at` and recomputing
    /// the content hash. `created_at` is untouched (spec.md §8 round-trip
    /// invariant).
    pub fn apply_update(&mut self, new_content: Option<String>, new_metadata: Option<HashMap<String, Value>>) {
        if let Some(content) = new_content {
            self.content_hash = Self::compute_content_hash(&content);
            self.content = content;
        }
        if let Some(metadata) = new_metadata {
            self.metadata = metadata;
        }
        self.updated_at = Utc::now();
    }

    /// Record an access: bumps `access_count` and `last_accessed`.
    pub fn record_access(&mut self) {
        self.access_count += 1;
        self.last_accessed = Utc::now();
    }

    /// Case-insensitive tag containment check (spec.md §3: "matched
    /// case-insensitively").
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

impl PartialEq for BaseMemory {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
