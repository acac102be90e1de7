use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use serde_json::Value;

/// Accelerates `findByProperty` (spec.md §4.4).
///
/// This index touches two map levels on every update (`propName →
/// valueKey → {id}`), so it gets its own coarse writer-lock rather than
/// per-node locking: "a coarse writer-lock / reader-free scheme is
/// sufficient" (spec.md §9). Values are keyed by their canonical JSON
/// string since `serde_json::Value` isn't `Hash`.
#[derive(Default)]
pub(crate) struct PropertyIndex {
    index: RwLock<HashMap<String, HashMap<String, HashSet<String>>>>,
}

fn value_key(value: &Value) -> String {
    value.to_string()
}

impl PropertyIndex {
    pub fn insert(&self, node_id: &str, properties: &HashMap<String, Value>) {
        let mut index = self.index.write().unwrap();
        for (name, value) in properties {
            index
                .entry(name.clone())
                .or_default()
                .entry(value_key(value))
                .or_default()
                .insert(node_id.to_string());
        }
    }

    pub fn remove(&self, node_id: &str, properties: &HashMap<String, Value>) {
        let mut index = self.index.write().unwrap();
        for (name, value) in properties {
            if let Some(by_value) = index.get_mut(name) {
                if let Some(ids) = by_value.get_mut(&value_key(value)) {
                    ids.remove(node_id);
                    if ids.is_empty() {
                        by_value.remove(&value_key(value));
                    }
                }
                if by_value.is_empty() {
                    index.remove(name);
                }
            }
        }
    }

    /// Replace `old` with `new` for a single node's properties, touching
    /// only the keys that actually changed.
    pub fn replace(&self, node_id: &str, old: &HashMap<String, Value>, new: &HashMap<String, Value>) {
        for (name, old_value) in old {
            if new.get(name) != Some(old_value) {
                let mut single = HashMap::new();
                single.insert(name.clone(), old_value.clone());
                self.remove(node_id, &single);
            }
        }
        let mut changed = HashMap::new();
        for (name, new_value) in new {
            if old.get(name) != Some(new_value) {
                changed.insert(name.clone(), new_value.clone());
            }
        }
        self.insert(node_id, &changed);
    }

    pub fn find(&self, name: &str, value: &Value) -> Vec<String> {
        let index = self.index.read().unwrap();
        index
            .get(name)
            .and_then(|by_value| by_value.get(&value_key(value)))
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_then_find_returns_node() {
        let idx = PropertyIndex::default();
        let mut props = HashMap::new();
        props.insert("color".to_string(), json!("red"));
        idx.insert("n1", &props);
        assert_eq!(idx.find("color", &json!("red")), vec!["n1".to_string()]);
    }

    #[test]
    fn remove_clears_entry() {
        let idx = PropertyIndex::default();
        let mut props = HashMap::new();
        props.insert("color".to_string(), json!("red"));
        idx.insert("n1", &props);
        idx.remove("n1", &props);
        assert!(idx.find("color", &json!("red")).is_empty());
    }

    #[test]
    fn replace_moves_node_between_value_buckets() {
        let idx = PropertyIndex::default();
        let mut old = HashMap::new();
        old.insert("color".to_string(), json!("red"));
        idx.insert("n1", &old);

        let mut new = HashMap::new();
        new.insert("color".to_string(), json!("blue"));
        idx.replace("n1", &old, &new);

        assert!(idx.find("color", &json!("red")).is_empty());
        assert_eq!(idx.find("color", &json!("blue")), vec!["n1".to_string()]);
    }
}
