mod embedding;
mod graph_store;
mod llm;
mod vector_store;

pub use embedding::EmbeddingProvider;
pub use graph_store::{GraphEdge, GraphNode, GraphStore};
pub use llm::{ChatMessage, LlmConfig, LlmProvider, LlmResponse};
pub use vector_store::{VectorMatch, VectorStore};
