mod base;
mod confidence;
mod importance;
mod types;

pub use base::BaseMemory;
pub use confidence::Confidence;
pub use importance::Importance;
pub use types::MemoryType;
