use dashmap::DashMap;

use cortex_core::memory::BaseMemory;

/// Which of the three hierarchy levels a scope instance represents
/// (spec.md §4.7 redesign flag: "flatten deep inheritance to three
/// structurally identical scope objects... differentiated by retention
/// policy rather than class hierarchy").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RetentionPolicy {
    User,
    Session,
    Agent,
}

/// A single scored hit from `MemoryScope::search`.
#[derive(Debug, Clone)]
pub struct ScopedHit {
    pub memory: BaseMemory,
    pub score: f64,
}

/// One scope's records (spec.md §4.7: "each behaving as §4.1-lite: no
/// vector backend, in-process search over its own records"). All three
/// hierarchy levels share this single implementation, distinguished only by
/// their `RetentionPolicy` tag and which scope key (userId/sessionId/
/// agentId) records are stored under.
pub struct MemoryScope {
    policy: RetentionPolicy,
    records: DashMap<String, BaseMemory>,
}

impl MemoryScope {
    pub fn new(policy: RetentionPolicy) -> Self {
        Self { policy, records: DashMap::new() }
    }

    pub fn policy(&self) -> RetentionPolicy {
        self.policy
    }

    pub fn add(&self, memory: BaseMemory) -> String {
        let id = memory.id.clone();
        self.records.insert(id.clone(), memory);
        id
    }

    pub fn get(&self, id: &str) -> Option<BaseMemory> {
        self.records.get(id).map(|entry| entry.value().clone())
    }

    pub fn delete(&self, id: &str) -> bool {
        self.records.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn all(&self) -> Vec<BaseMemory> {
        self.records.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Lowercased token-match scoring, reusing the same formula
    /// `cortex-search::keyword` uses for its strategy, since a scope has no
    /// embedding index of its own to run semantic search against.
    pub fn search(&self, query: &str, limit: usize) -> Vec<ScopedHit> {
        let query_tokens: Vec<String> = query.to_lowercase().split_whitespace().map(str::to_string).collect();
        if query_tokens.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<ScopedHit> = self
            .records
            .iter()
            .filter_map(|entry| {
                let memory = entry.value();
                let content_tokens: Vec<String> =
                    memory.content.to_lowercase().split_whitespace().map(str::to_string).collect();
                let matched = query_tokens.iter().filter(|t| content_tokens.contains(t)).count();
                if matched == 0 {
                    return None;
                }
                let score = matched as f64 / query_tokens.len() as f64;
                Some(ScopedHit { memory: memory.clone(), score })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.memory.id.cmp(&b.memory.id))
        });
        hits.truncate(limit);
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_test_support::sample_memory;

    #[test]
    fn add_then_get_round_trips() {
        let scope = MemoryScope::new(RetentionPolicy::User);
        let memory = sample_memory("m1", "the cat sat on the mat", "u1");
        scope.add(memory);
        assert_eq!(scope.get("m1").unwrap().content, "the cat sat on the mat");
    }

    #[test]
    fn search_ranks_by_token_overlap() {
        let scope = MemoryScope::new(RetentionPolicy::Session);
        scope.add(sample_memory("m1", "the cat sat on the mat", "u1"));
        scope.add(sample_memory("m2", "cats and dogs", "u1"));

        let hits = scope.search("cat mat", 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].memory.id, "m1");
    }

    #[test]
    fn delete_removes_and_is_idempotent() {
        let scope = MemoryScope::new(RetentionPolicy::Agent);
        scope.add(sample_memory("m1", "hello", "u1"));
        assert!(scope.delete("m1"));
        assert!(!scope.delete("m1"));
        assert!(scope.get("m1").is_none());
    }
}
