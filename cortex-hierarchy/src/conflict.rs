use cortex_core::memory::BaseMemory;

/// What a `ConflictResolver` decides to do with a candidate update that
/// contradicts an existing user-scope record (spec.md §4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictResolution {
    Merge,
    KeepOld,
    KeepNew,
    Supersede,
}

/// Detects and resolves semantic contradictions between an incoming memory
/// and an existing user-scope record. Detection is left to the host
/// (spec.md §4.7: "detection is domain-specific; the core merely requires
/// a pluggable comparator"); this crate only defines the seam and a default
/// that never flags a conflict.
pub trait ConflictResolver: Send + Sync {
    /// Returns `Some(resolution)` if `incoming` conflicts with `existing`,
    /// `None` if they can coexist.
    fn resolve(&self, existing: &BaseMemory, incoming: &BaseMemory) -> Option<ConflictResolution>;
}

/// Never detects a conflict; every incoming memory is written alongside
/// existing ones. The default when a host supplies no comparator.
pub struct NoConflictResolver;

impl ConflictResolver for NoConflictResolver {
    fn resolve(&self, _existing: &BaseMemory, _incoming: &BaseMemory) -> Option<ConflictResolution> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_test_support::sample_memory;

    #[test]
    fn no_conflict_resolver_never_flags_a_conflict() {
        let resolver = NoConflictResolver;
        let existing = sample_memory("m1", "likes coffee", "u1");
        let incoming = sample_memory("m2", "likes tea", "u1");
        assert_eq!(resolver.resolve(&existing, &incoming), None);
    }
}
