//! User/session/agent memory scopes, routing policy, cross-scope fusion,
//! and conflict resolution (spec.md §4.7).

mod analytics;
mod conflict;
mod manager;
mod routing;
mod scope;

pub use analytics::SessionAnalytics;
pub use conflict::{ConflictResolution, ConflictResolver, NoConflictResolver};
pub use manager::{HierarchyHit, HierarchyManager};
pub use routing::{route, RoutingResult};
pub use scope::{MemoryScope, RetentionPolicy, ScopedHit};
