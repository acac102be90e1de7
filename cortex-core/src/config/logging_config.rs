use serde::{Deserialize, Serialize};

use super::defaults;

/// Logging/observability configuration. Wraps an `EnvFilter`-compatible
/// directive string consumed by `tracing-subscriber` at runtime start-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. "info" or
    /// "cortex_pipeline=debug,cortex_search=info".
    pub level: String,
    /// Emit JSON-formatted log lines instead of human-readable ones.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::DEFAULT_LOG_LEVEL.to_string(),
            json: false,
        }
    }
}
