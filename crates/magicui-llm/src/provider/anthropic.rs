//! Anthropic provider implementation

use crate::client::{CompletionClient, CompletionRequest, CompletionResponse};
use crate::error::{LlmError, Result};
use reqwest::Client;
use serde_json::json;

/// Anthropic (Claude) provider
pub struct AnthropicProvider {
    api_key: String,
    base_url: String,
    client: Client,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: "https://api.anthropic.com/v1".to_string(),
            client: Client::new(),
        }
    }

    /// Create with a custom base URL
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            client: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl CompletionClient for AnthropicProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        // max_tokens is required by the Messages API
        let mut body = json!({
            "model": request.model,
            "messages": [{
                "role": "user",
                "content": request.prompt
            }],
            "max_tokens": request.max_output_tokens.unwrap_or(4096),
        });

        if let Some(system) = &request.system {
            body["system"] = json!(system);
        }
        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(top_p) = request.top_p {
            body["top_p"] = json!(top_p);
        }
        if let Some(top_k) = request.top_k {
            body["top_k"] = json!(top_k);
        }

        // Make API call
        let resp = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiCallFailed(format!("Anthropic API call failed: {}", e)))?;

        let status = resp.status();
        let resp_text = resp
            .text()
            .await
            .map_err(|e| LlmError::ApiCallFailed(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(LlmError::ApiCallFailed(format!(
                "Anthropic API error ({}): {}",
                status, resp_text
            )));
        }

        // Parse response
        let resp_json: serde_json::Value = serde_json::from_str(&resp_text)
            .map_err(|e| LlmError::ApiCallFailed(format!("Failed to parse response: {}", e)))?;

        let content_blocks = resp_json["content"]
            .as_array()
            .ok_or_else(|| LlmError::InvalidResponse("No content in response".to_string()))?;

        let mut content = String::new();
        for block in content_blocks {
            if block["type"].as_str() == Some("text") {
                if let Some(text) = block["text"].as_str() {
                    content.push_str(text);
                }
            }
        }

        let finish_reason = resp_json["stop_reason"]
            .as_str()
            .unwrap_or("end_turn")
            .to_string();

        let tokens_used = resp_json["usage"]["input_tokens"].as_u64().unwrap_or(0) as u32
            + resp_json["usage"]["output_tokens"].as_u64().unwrap_or(0) as u32;

        Ok(CompletionResponse::new(content, request.model)
            .with_tokens(tokens_used)
            .with_finish_reason(finish_reason))
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anthropic_provider_creation() {
        let provider = AnthropicProvider::new("test-key".to_string());
        assert_eq!(provider.name(), "anthropic");
        assert_eq!(provider.base_url, "https://api.anthropic.com/v1");
    }
}
