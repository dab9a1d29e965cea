//! OpenAI-compatible provider implementation
//!
//! Serves every backend speaking the OpenAI chat-completions wire shape:
//! OpenAI itself, Mistral and Cerebras, each with its own base endpoint.

use crate::client::{CompletionClient, CompletionRequest, CompletionResponse};
use crate::error::{LlmError, Result};
use magicui_core::Provider;
use reqwest::Client;
use serde_json::json;

/// Chat-completions provider for OpenAI-compatible backends
pub struct OpenAiCompatProvider {
    api_key: String,
    base_url: String,
    name: &'static str,
    client: Client,
}

impl OpenAiCompatProvider {
    /// Create an adapter for one of the OpenAI-compatible variants.
    ///
    /// `Gemini` and `Anthropic` have their own adapters; passing them here
    /// falls back to the OpenAI endpoint, which is a caller bug rather than
    /// a runtime error worth plumbing.
    pub fn new(provider: Provider, api_key: String) -> Self {
        let base_url = match provider {
            Provider::Mistral => "https://api.mistral.ai/v1",
            Provider::Cerebras => "https://api.cerebras.ai/v1",
            _ => "https://api.openai.com/v1",
        };
        Self {
            api_key,
            base_url: base_url.to_string(),
            name: provider.as_str(),
            client: Client::new(),
        }
    }

    /// Create with a custom base URL (e.g. for Azure OpenAI or a proxy)
    pub fn with_base_url(provider: Provider, api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            name: provider.as_str(),
            client: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl CompletionClient for OpenAiCompatProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        // Build messages
        let mut messages = Vec::new();
        if let Some(system) = &request.system {
            messages.push(json!({
                "role": "system",
                "content": system
            }));
        }
        messages.push(json!({
            "role": "user",
            "content": request.prompt
        }));

        // Build request body
        let mut body = json!({
            "model": request.model,
            "messages": messages,
        });
        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(top_p) = request.top_p {
            body["top_p"] = json!(top_p);
        }
        if let Some(max_tokens) = request.max_output_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        // Make API call
        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiCallFailed(format!("{} API call failed: {}", self.name, e)))?;

        let status = resp.status();
        let resp_text = resp
            .text()
            .await
            .map_err(|e| LlmError::ApiCallFailed(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(LlmError::ApiCallFailed(format!(
                "{} API error ({}): {}",
                self.name, status, resp_text
            )));
        }

        // Parse response
        let resp_json: serde_json::Value = serde_json::from_str(&resp_text)
            .map_err(|e| LlmError::ApiCallFailed(format!("Failed to parse response: {}", e)))?;

        let content = resp_json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| LlmError::InvalidResponse("No content in response".to_string()))?
            .to_string();

        let finish_reason = resp_json["choices"][0]["finish_reason"]
            .as_str()
            .unwrap_or("stop")
            .to_string();

        let tokens_used = resp_json["usage"]["total_tokens"].as_u64().unwrap_or(0) as u32;

        Ok(CompletionResponse::new(content, request.model)
            .with_tokens(tokens_used)
            .with_finish_reason(finish_reason))
    }

    fn name(&self) -> &str {
        self.name
    }
}
