/// Per-session retrieval counters (SPEC_FULL §2 "session analytics"): how
/// many times a session's scope has been searched and the running average
/// latency of those searches, folded into `cortex-runtime`'s `stats()`
/// per-scope breakdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionAnalytics {
    pub retrieval_count: u64,
    pub average_latency_ms: f64,
}

impl SessionAnalytics {
    /// Folds one more observed latency into the running average without
    /// keeping the individual samples around.
    pub(crate) fn record(&mut self, latency_ms: f64) {
        let count = self.retrieval_count + 1;
        self.average_latency_ms =
            (self.average_latency_ms * self.retrieval_count as f64 + latency_ms) / count as f64;
        self.retrieval_count = count;
    }
}
