use serde::{Deserialize, Serialize};

use crate::constants;
use crate::memory::Importance;

/// Cross-scope fusion weights and routing thresholds for the
/// user/session/agent hierarchy (spec.md §4.7, SPEC_FULL supplement).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    pub user_scope_weight: f64,
    pub session_scope_weight: f64,
    pub agent_scope_weight: f64,
    /// `addWithRouting` sends USER+SESSION when importance is at least
    /// this (spec.md §4.7 routing table).
    pub routing_importance_threshold: Importance,
    /// `endSessionWithTransfer` promotes a session memory into the user
    /// scope when its importance is at least this (spec.md §4.7).
    pub transfer_importance_threshold: Importance,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            user_scope_weight: constants::HIERARCHY_FUSION_WEIGHT_USER,
            session_scope_weight: constants::HIERARCHY_FUSION_WEIGHT_SESSION,
            agent_scope_weight: constants::HIERARCHY_FUSION_WEIGHT_AGENT,
            routing_importance_threshold: Importance::Medium,
            transfer_importance_threshold: Importance::Medium,
        }
    }
}
