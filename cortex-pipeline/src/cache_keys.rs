use std::collections::HashSet;

use dashmap::DashMap;

/// Deterministic query-cache key: `hash(query), userId, limit, threshold`
/// (spec.md §4.1 "Caches"). `blake3` gives a short, stable digest so the
/// key doesn't grow with query length.
pub fn query_cache_key(query: &str, user_id: &str, limit: usize, threshold: f64) -> String {
    let query_hash = blake3::hash(query.as_bytes()).to_hex();
    format!("{query_hash}:{user_id}:{limit}:{threshold:.6}")
}

/// Tracks which query-cache keys were produced for which `userId`, so a
/// write can invalidate surgically instead of flushing the whole cache
/// (spec.md §9 Open Question: "implementations may maintain a userId index
/// for surgical invalidation").
#[derive(Default)]
pub struct UserQueryIndex {
    keys_by_user: DashMap<String, HashSet<String>>,
}

impl UserQueryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, user_id: &str, cache_key: String) {
        self.keys_by_user.entry(user_id.to_string()).or_default().insert(cache_key);
    }

    /// Every cache key recorded for `user_id`, removing them from the index.
    pub fn take_keys_for_user(&self, user_id: &str) -> Vec<String> {
        self.keys_by_user
            .remove(user_id)
            .map(|(_, keys)| keys.into_iter().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_inputs_produce_the_same_key() {
        let a = query_cache_key("cat dog", "u1", 10, 0.3);
        let b = query_cache_key("cat dog", "u1", 10, 0.3);
        assert_eq!(a, b);
    }

    #[test]
    fn different_users_produce_different_keys() {
        let a = query_cache_key("cat dog", "u1", 10, 0.3);
        let b = query_cache_key("cat dog", "u2", 10, 0.3);
        assert_ne!(a, b);
    }

    #[test]
    fn take_keys_for_user_clears_the_index() {
        let index = UserQueryIndex::new();
        index.record("u1", "key-a".to_string());
        index.record("u1", "key-b".to_string());
        let mut keys = index.take_keys_for_user("u1");
        keys.sort();
        assert_eq!(keys, vec!["key-a".to_string(), "key-b".to_string()]);
        assert!(index.take_keys_for_user("u1").is_empty());
    }
}
