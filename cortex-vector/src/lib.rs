mod collection;
mod cosine;
mod registry;

pub use collection::{InMemoryCollection, ScoredHit};
pub use registry::CollectionRegistry;
