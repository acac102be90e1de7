use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::CortexResult;

/// A single chat message for `LlmProvider::chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Tunables passed through to the provider; fields are advisory, a provider
/// may ignore ones it doesn't support.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmConfig {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// An LLM completion or chat result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub text: String,
    pub tokens_used: u32,
}

/// Optional collaborator used only for classification/importance scoring
/// (spec.md §6). The memory pipeline never requires one.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn completion(&self, prompt: &str, config: &LlmConfig) -> CortexResult<LlmResponse>;

    async fn chat(&self, messages: &[ChatMessage], config: &LlmConfig) -> CortexResult<LlmResponse>;
}
