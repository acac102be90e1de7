mod cosine;
mod fuzzy;
mod hybrid;
mod keyword;
mod scoring;
mod semantic;
mod synonyms;

pub use hybrid::{FusedHit, HybridSearchEngine, RankedResult, SearchContext};
pub use semantic::{SearchRunConfig, SemanticHit, SemanticIndex};
pub use synonyms::SynonymTable;
