//! Completion client interface and types

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Request to an AI provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// System instruction framing the generation task
    pub system: Option<String>,

    /// The user prompt to send
    pub prompt: String,

    /// Model identifier (e.g. "gpt-4o", "gemini-1.5-flash")
    pub model: String,

    /// Temperature for sampling (0.0 - 1.0)
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter
    pub top_p: Option<f32>,

    /// Top-k sampling parameter (honored by providers that support it)
    pub top_k: Option<u32>,

    /// Maximum tokens to generate
    pub max_output_tokens: Option<u32>,
}

impl CompletionRequest {
    /// Create a new completion request
    pub fn new(prompt: String, model: String) -> Self {
        Self {
            system: None,
            prompt,
            model,
            temperature: None,
            top_p: None,
            top_k: None,
            max_output_tokens: None,
        }
    }

    /// Set the system instruction
    pub fn with_system(mut self, system: String) -> Self {
        self.system = Some(system);
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set nucleus sampling
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Set top-k sampling
    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Set max output tokens
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }
}

/// Response from an AI provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The generated text
    pub content: String,

    /// Model that generated the response
    pub model: String,

    /// Number of tokens used
    pub tokens_used: u32,

    /// Finish reason (e.g. "stop", "length")
    pub finish_reason: String,
}

impl CompletionResponse {
    /// Create a new completion response
    pub fn new(content: String, model: String) -> Self {
        Self {
            content,
            model,
            tokens_used: 0,
            finish_reason: "stop".to_string(),
        }
    }

    /// Set tokens used
    pub fn with_tokens(mut self, tokens: u32) -> Self {
        self.tokens_used = tokens;
        self
    }

    /// Set finish reason
    pub fn with_finish_reason(mut self, reason: String) -> Self {
        self.finish_reason = reason;
        self
    }
}

/// Async completion client trait, one implementation per provider backend
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Issue one non-streaming completion call
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Get the name of this client
    fn name(&self) -> &str;
}
