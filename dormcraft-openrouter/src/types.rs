use serde::{Deserialize, Serialize};

/// Sampling parameters forwarded to the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

/// A single-turn request to the OpenRouter API.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenRouterRequest {
    pub model: String,
    /// Optional system instruction sent before the prompt.
    pub system: Option<String>,
    pub prompt: String,
    pub params: Option<GenerationParams>,
}

/// Token accounting reported by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
}

/// The assistant's reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub model: Option<String>,
    pub stop_reason: Option<String>,
    pub usage: Option<TokenUsage>,
}
