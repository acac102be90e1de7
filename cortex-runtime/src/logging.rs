use cortex_core::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Installs a global `tracing` subscriber from `LoggingConfig`. Library
/// code never calls this itself (SPEC_FULL §1.1); only a host binary
/// embedding `cortex-runtime` should, once, at start-up.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if config.json {
        let _ = subscriber.json().try_init();
    } else {
        let _ = subscriber.try_init();
    }
}
