use cortex_core::memory::{BaseMemory, Importance};

/// Access stats handed to a `Reclassifier` (SPEC_FULL §2 supplement).
#[derive(Debug, Clone, Copy)]
pub struct AccessStats {
    pub access_count: u64,
    pub days_since_created: f64,
}

impl AccessStats {
    pub fn from_memory(memory: &BaseMemory) -> Self {
        let days_since_created =
            (chrono::Utc::now() - memory.created_at).num_seconds() as f64 / 86_400.0;
        Self {
            access_count: memory.access_count,
            days_since_created: days_since_created.max(0.0),
        }
    }
}

/// A pluggable hook invoked opportunistically on read (not a background
/// job, so it never competes with the batch scheduler for I/O), grounded on
/// the teacher workspace's reclassification subsystem.
pub type Reclassifier = Box<dyn Fn(&BaseMemory, AccessStats) -> Importance + Send + Sync>;

/// The default reclassifier: a memory accessed often enough, often enough
/// recently, is promoted one importance step; the pipeline never demotes
/// automatically (only an explicit `update` can lower importance).
pub fn default_reclassifier() -> Reclassifier {
    Box::new(|memory, stats| {
        if stats.access_count >= 20 && stats.days_since_created < 30.0 {
            promote(memory.importance)
        } else {
            memory.importance
        }
    })
}

fn promote(importance: Importance) -> Importance {
    Importance::from_ordinal((importance.ordinal() + 1).min(Importance::Critical.ordinal()))
        .unwrap_or(importance)
}
