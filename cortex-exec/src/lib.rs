//! # cortex-exec
//!
//! Worker-pool execution manager: splits vector math, embedding, memory
//! management, and I/O work across four independently sized rayon pools.

mod manager;
mod pool;

pub use manager::{ExecutionManager, ExecutionStats};
pub use pool::{ExecutionPool, PoolStats};
