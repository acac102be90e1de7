use cortex_core::config::HierarchyConfig;
use cortex_core::memory::{Importance, MemoryType};

/// Which scopes a single `addWithRouting` call wrote to (spec.md §4.7:
/// "a single call may write to multiple scopes; the returned RoutingResult
/// records which succeeded").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoutingResult {
    pub user: bool,
    pub session: bool,
    pub agent: bool,
}

/// Which scopes a memory of the given type/importance should target,
/// before any scope write is attempted (spec.md §4.7 routing policy
/// table). `PREFERENCE` takes priority over the importance-based rule
/// since it targets the same scopes either way.
pub fn route(memory_type: MemoryType, importance: Importance, config: &HierarchyConfig) -> RoutingResult {
    if memory_type == MemoryType::Preference {
        return RoutingResult { user: true, session: true, agent: false };
    }
    if importance >= config.routing_importance_threshold {
        return RoutingResult { user: true, session: true, agent: false };
    }
    if matches!(memory_type, MemoryType::Semantic | MemoryType::Factual | MemoryType::Procedural) {
        return RoutingResult { user: false, session: true, agent: true };
    }
    RoutingResult { user: false, session: true, agent: false }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preference_routes_to_user_and_session() {
        let result = route(MemoryType::Preference, Importance::Low, &HierarchyConfig::default());
        assert_eq!(result, RoutingResult { user: true, session: true, agent: false });
    }

    #[test]
    fn high_importance_routes_to_user_and_session() {
        let result = route(MemoryType::Episodic, Importance::High, &HierarchyConfig::default());
        assert_eq!(result, RoutingResult { user: true, session: true, agent: false });
    }

    #[test]
    fn semantic_low_importance_routes_to_agent_and_session() {
        let result = route(MemoryType::Semantic, Importance::Low, &HierarchyConfig::default());
        assert_eq!(result, RoutingResult { user: false, session: true, agent: true });
    }

    #[test]
    fn episodic_low_importance_routes_to_session_only() {
        let result = route(MemoryType::Episodic, Importance::Minimal, &HierarchyConfig::default());
        assert_eq!(result, RoutingResult { user: false, session: true, agent: false });
    }
}
