//! Top-level wiring for the Cortex memory system: the public API a host
//! process embeds (spec.md §6).

mod logging;
mod runtime;
mod stats;

pub use cortex_core::config::CortexConfig;
pub use cortex_pipeline::CreateRequest;
pub use logging::init_tracing;
pub use runtime::{CortexRuntime, SearchScope};
pub use stats::RuntimeStats;
