use chrono::Utc;
use cortex_core::memory::{BaseMemory, Confidence};

/// Confidence decay (SPEC_FULL §2 supplement): a temporal factor reused
/// from §4.3.1's recency function, combined with a usage boost so
/// frequently-accessed memories resist decay.
///
/// `usage_boost = min(1.5, 1 + log10(access_count + 1) * 0.2)`.
pub fn decayed_confidence(memory: &BaseMemory) -> Confidence {
    let days_old = (Utc::now() - memory.updated_at).num_seconds() as f64 / 86_400.0;
    let recency = (1.0 / (days_old.max(0.0) + 1.0)).max(0.1);
    let usage_boost = (1.0 + ((memory.access_count + 1) as f64).log10() * 0.2).min(1.5);
    Confidence::new(memory.confidence.value() * recency * usage_boost)
}

/// Whether a memory's decayed confidence has dropped below the archival
/// threshold. Archival is a query-time filter, never a physical delete
/// (SPEC_FULL §2): callers are expected to set `memory.archived = true` and
/// persist it, not remove the record.
pub fn should_archive(memory: &BaseMemory) -> bool {
    decayed_confidence(memory).is_archival()
}
