//! # cortex-core
//!
//! Foundation crate for the Cortex memory system.
//! Defines the memory record, config, errors, constants, and the trait
//! seams every other crate in the workspace implements or consumes.

pub mod config;
pub mod constants;
pub mod errors;
pub mod memory;
pub mod traits;

pub use config::CortexConfig;
pub use errors::{CortexError, CortexResult, ErrorKind};
pub use memory::{BaseMemory, Confidence, Importance, MemoryType};
