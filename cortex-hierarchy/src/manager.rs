use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;

use cortex_core::config::HierarchyConfig;
use cortex_core::memory::{BaseMemory, Importance, MemoryType};

use crate::analytics::SessionAnalytics;
use crate::conflict::{ConflictResolution, ConflictResolver, NoConflictResolver};
use crate::routing::{route, RoutingResult};
use crate::scope::{MemoryScope, RetentionPolicy, ScopedHit};

/// One fused hit from `search_across_hierarchy`, carrying which scope
/// contributed its winning score.
#[derive(Debug, Clone)]
pub struct HierarchyHit {
    pub memory: BaseMemory,
    pub fused_score: f64,
    pub winning_scope: &'static str,
}

/// Coordinates the user/session/agent scopes (spec.md §4.7): routes new
/// memories per policy, searches all three scopes in parallel and fuses by
/// weighted max, and handles end-of-session promotion.
///
/// Scopes are keyed by their owning id (`userId`, `sessionId`, `agentId`)
/// rather than one giant shared scope, so a lookup only ever touches the
/// caller's own records.
pub struct HierarchyManager {
    user_scopes: DashMap<String, Arc<MemoryScope>>,
    session_scopes: DashMap<String, Arc<MemoryScope>>,
    agent_scopes: DashMap<String, Arc<MemoryScope>>,
    session_analytics: DashMap<String, SessionAnalytics>,
    config: HierarchyConfig,
    conflict_resolver: Box<dyn ConflictResolver>,
}

impl HierarchyManager {
    pub fn new(config: HierarchyConfig) -> Self {
        Self {
            user_scopes: DashMap::new(),
            session_scopes: DashMap::new(),
            agent_scopes: DashMap::new(),
            session_analytics: DashMap::new(),
            config,
            conflict_resolver: Box::new(NoConflictResolver),
        }
    }

    pub fn with_conflict_resolver(mut self, resolver: Box<dyn ConflictResolver>) -> Self {
        self.conflict_resolver = resolver;
        self
    }

    fn user_scope(&self, user_id: &str) -> Arc<MemoryScope> {
        self.user_scopes
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(MemoryScope::new(RetentionPolicy::User)))
            .clone()
    }

    fn session_scope(&self, session_id: &str) -> Arc<MemoryScope> {
        self.session_scopes
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(MemoryScope::new(RetentionPolicy::Session)))
            .clone()
    }

    fn agent_scope(&self, agent_id: &str) -> Arc<MemoryScope> {
        self.agent_scopes
            .entry(agent_id.to_string())
            .or_insert_with(|| Arc::new(MemoryScope::new(RetentionPolicy::Agent)))
            .clone()
    }

    /// `addWithRouting(userId, sessionId, agentId, content, type, importance)`
    /// (spec.md §4.7). Conflict resolution runs against the user scope only,
    /// since that's the one scope intended as authoritative.
    pub fn add_with_routing(
        &self,
        user_id: &str,
        session_id: &str,
        agent_id: &str,
        content: impl Into<String>,
        memory_type: MemoryType,
        importance: Importance,
    ) -> (RoutingResult, Vec<(ConflictResolution, String)>) {
        let targets = route(memory_type, importance, &self.config);
        let content = content.into();
        let mut conflicts = Vec::new();
        let mut result = RoutingResult::default();

        if targets.user {
            let user_scope = self.user_scope(user_id);
            let incoming = BaseMemory::new(
                uuid::Uuid::new_v4().to_string(),
                content.clone(),
                user_id.to_string(),
                memory_type,
                importance,
            );
            for existing in user_scope.all() {
                if let Some(resolution) = self.conflict_resolver.resolve(&existing, &incoming) {
                    conflicts.push((resolution, existing.id.clone()));
                    if resolution == ConflictResolution::KeepOld {
                        continue;
                    }
                    if resolution == ConflictResolution::Supersede {
                        user_scope.delete(&existing.id);
                    }
                }
            }
            user_scope.add(incoming);
            result.user = true;
        }
        if targets.session {
            let session_scope = self.session_scope(session_id);
            let mut incoming = BaseMemory::new(
                uuid::Uuid::new_v4().to_string(),
                content.clone(),
                user_id.to_string(),
                memory_type,
                importance,
            );
            incoming.session_id = Some(session_id.to_string());
            session_scope.add(incoming);
            result.session = true;
        }
        if targets.agent {
            let agent_scope = self.agent_scope(agent_id);
            let incoming = BaseMemory::new(
                uuid::Uuid::new_v4().to_string(),
                content,
                user_id.to_string(),
                memory_type,
                importance,
            );
            agent_scope.add(incoming);
            result.agent = true;
        }

        (result, conflicts)
    }

    /// `searchAcrossHierarchy(userId, sessionId, agentId, query, limit)`
    /// (spec.md §4.7): all three scopes searched independently, fused by
    /// `max(score * weight)` per id, same fusion shape as
    /// `cortex-search::hybrid`'s strategy fusion.
    pub async fn search_across_hierarchy(
        &self,
        user_id: &str,
        session_id: &str,
        agent_id: &str,
        query: &str,
        limit: usize,
    ) -> Vec<HierarchyHit> {
        let started = Instant::now();
        let user_scope = self.user_scope(user_id);
        let session_scope = self.session_scope(session_id);
        let agent_scope = self.agent_scope(agent_id);
        let query_owned = query.to_string();

        let user_query = query_owned.clone();
        let session_query = query_owned.clone();
        let agent_query = query_owned;

        let (user_hits, session_hits, agent_hits) = tokio::join!(
            tokio::task::spawn_blocking(move || user_scope.search(&user_query, usize::MAX)),
            tokio::task::spawn_blocking(move || session_scope.search(&session_query, usize::MAX)),
            tokio::task::spawn_blocking(move || agent_scope.search(&agent_query, usize::MAX)),
        );
        let user_hits = user_hits.unwrap_or_default();
        let session_hits = session_hits.unwrap_or_default();
        let agent_hits = agent_hits.unwrap_or_default();

        let mut by_id: HashMap<String, (BaseMemory, f64, &'static str)> = HashMap::new();
        let scoped = [
            ("user", user_hits, self.config.user_scope_weight),
            ("session", session_hits, self.config.session_scope_weight),
            ("agent", agent_hits, self.config.agent_scope_weight),
        ];
        for (scope_name, hits, weight) in scoped {
            for ScopedHit { memory, score } in hits {
                let weighted = score * weight;
                by_id
                    .entry(memory.id.clone())
                    .and_modify(|(_, best_score, best_scope)| {
                        if weighted > *best_score {
                            *best_score = weighted;
                            *best_scope = scope_name;
                        }
                    })
                    .or_insert((memory, weighted, scope_name));
            }
        }

        let mut hits: Vec<HierarchyHit> = by_id
            .into_values()
            .map(|(memory, fused_score, winning_scope)| HierarchyHit { memory, fused_score, winning_scope })
            .collect();
        hits.sort_by(|a, b| {
            b.fused_score
                .partial_cmp(&a.fused_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.memory.id.cmp(&b.memory.id))
        });
        hits.truncate(limit);

        if !session_id.is_empty() {
            let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
            self.session_analytics.entry(session_id.to_string()).or_default().record(latency_ms);
        }

        hits
    }

    /// Current retrieval-count/average-latency snapshot for a session, or
    /// `None` if that session has never been searched (SPEC_FULL §2
    /// "session analytics").
    pub fn session_analytics(&self, session_id: &str) -> Option<SessionAnalytics> {
        self.session_analytics.get(session_id).map(|entry| *entry.value())
    }

    /// `endSessionWithTransfer(sessionId, userId)` (spec.md §4.7): promotes
    /// qualifying session memories into the user scope, then deletes the
    /// session scope entirely.
    pub fn end_session_with_transfer(&self, session_id: &str, user_id: &str) -> usize {
        let Some((_, session_scope)) = self.session_scopes.remove(session_id) else {
            return 0;
        };
        self.session_analytics.remove(session_id);
        let user_scope = self.user_scope(user_id);

        let mut transferred = 0;
        for memory in session_scope.all() {
            let qualifies = memory.importance >= self.config.transfer_importance_threshold
                || matches!(
                    memory.memory_type,
                    MemoryType::Preference | MemoryType::Factual | MemoryType::Semantic
                );
            if qualifies {
                user_scope.add(memory);
                transferred += 1;
            }
        }
        transferred
    }

    pub fn user_scope_len(&self, user_id: &str) -> usize {
        self.user_scopes.get(user_id).map(|s| s.len()).unwrap_or(0)
    }

    pub fn session_scope_len(&self, session_id: &str) -> usize {
        self.session_scopes.get(session_id).map(|s| s.len()).unwrap_or(0)
    }

    pub fn agent_scope_len(&self, agent_id: &str) -> usize {
        self.agent_scopes.get(agent_id).map(|s| s.len()).unwrap_or(0)
    }

    pub fn session_scope_exists(&self, session_id: &str) -> bool {
        self.session_scopes.contains_key(session_id)
    }

    pub fn user_scope_count(&self) -> usize {
        self.user_scopes.len()
    }

    pub fn session_scope_count(&self) -> usize {
        self.session_scopes.len()
    }

    pub fn agent_scope_count(&self) -> usize {
        self.agent_scopes.len()
    }
}
