//! # cortex-test-support
//!
//! Shared `BaseMemory` fixtures used from `[dev-dependencies]` across the
//! workspace, so every crate's tests build synthetic memories the same way
//! instead of re-deriving `BaseMemory::new` boilerplate.

use std::collections::HashMap;

use cortex_core::memory::{BaseMemory, Importance, MemoryType};
use serde_json::Value;

/// Builder for a synthetic `BaseMemory`, defaulting to `Factual`/`Medium`
/// like `BaseMemory::new`, with chainable overrides for the fields tests
/// commonly vary.
pub struct MemoryBuilder {
    memory: BaseMemory,
}

impl MemoryBuilder {
    pub fn new(id: impl Into<String>, content: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            memory: BaseMemory::new(
                id.into(),
                content.into(),
                user_id.into(),
                MemoryType::Factual,
                Importance::Medium,
            ),
        }
    }

    pub fn memory_type(mut self, memory_type: MemoryType) -> Self {
        self.memory.memory_type = memory_type;
        self
    }

    pub fn importance(mut self, importance: Importance) -> Self {
        self.memory.importance = importance;
        self
    }

    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.memory.session_id = Some(session_id.into());
        self
    }

    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.memory.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn metadata(mut self, metadata: HashMap<String, Value>) -> Self {
        self.memory.metadata = metadata;
        self
    }

    pub fn access_count(mut self, count: u64) -> Self {
        self.memory.access_count = count;
        self
    }

    pub fn build(self) -> BaseMemory {
        self.memory
    }
}

/// Quick one-liner for tests that don't need the builder's overrides.
pub fn sample_memory(id: &str, content: &str, user_id: &str) -> BaseMemory {
    MemoryBuilder::new(id, content, user_id).build()
}

/// A small, varied corpus for TF-IDF training in integration tests
/// (spec.md §8 Scenario A's training set, generalized with a couple more
/// sentences so vocabulary-size tests have more than three documents).
pub fn sample_corpus() -> Vec<String> {
    vec![
        "the cat sat on the mat".to_string(),
        "dogs chase cats".to_string(),
        "the quick brown fox".to_string(),
        "rust is a systems programming language".to_string(),
        "the user prefers dark mode in the evening".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_apply() {
        let memory = MemoryBuilder::new("m1", "hello", "u1")
            .memory_type(MemoryType::Preference)
            .importance(Importance::High)
            .session_id("s1")
            .tags(["a", "b"])
            .access_count(7)
            .build();

        assert_eq!(memory.memory_type, MemoryType::Preference);
        assert_eq!(memory.importance, Importance::High);
        assert_eq!(memory.session_id.as_deref(), Some("s1"));
        assert_eq!(memory.tags, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(memory.access_count, 7);
    }

    #[test]
    fn sample_memory_has_non_empty_content() {
        let memory = sample_memory("m1", "hello world", "u1");
        assert!(!memory.content.is_empty());
    }
}
