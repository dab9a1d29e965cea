//! Theme, provider and AI configuration types

use serde::{Deserialize, Serialize};

/// AI provider backend.
///
/// Closed variant set: adding a provider means adding a variant here plus an
/// adapter in `magicui-llm`, not touching the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[serde(rename = "openai")]
    OpenAi,
    Gemini,
    Anthropic,
    Mistral,
    Cerebras,
}

impl Provider {
    /// Route a model name to a provider by known substrings.
    ///
    /// Returns `None` for unrecognized names; the caller decides the
    /// baseline fallback.
    pub fn from_model(model: &str) -> Option<Provider> {
        let model = model.to_ascii_lowercase();
        if model.contains("gemini") {
            Some(Provider::Gemini)
        } else if model.contains("gpt") || model.contains("o3") || model.contains("o4") {
            Some(Provider::OpenAi)
        } else if model.contains("claude") {
            Some(Provider::Anthropic)
        } else if model.contains("mistral") || model.contains("magistral") {
            Some(Provider::Mistral)
        } else if model.contains("llama") || model.contains("cerebras") || model.contains("groq") {
            Some(Provider::Cerebras)
        } else {
            None
        }
    }

    /// Lowercase provider name, as used in cache keys and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
            Provider::Anthropic => "anthropic",
            Provider::Mistral => "mistral",
            Provider::Cerebras => "cerebras",
        }
    }

    /// Model used when the request does not name one.
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-4o-mini",
            Provider::Gemini => "gemini-1.5-flash",
            Provider::Anthropic => "claude-3-5-haiku-latest",
            Provider::Mistral => "mistral-small-latest",
            Provider::Cerebras => "llama-3.3-70b",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::Mistral => "MISTRAL_API_KEY",
            Provider::Cerebras => "CEREBRAS_API_KEY",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-request AI configuration. Everything is optional; missing values fall
/// back to the environment and the generator defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiConfig {
    pub provider: Option<Provider>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub top_k: Option<u32>,
    pub max_output_tokens: Option<u32>,
}

impl AiConfig {
    /// Resolve the provider: explicit config wins, then model-substring
    /// routing, then the nominated baseline.
    pub fn resolved_provider(&self, baseline: Provider) -> Provider {
        if let Some(provider) = self.provider {
            return provider;
        }
        self.model
            .as_deref()
            .and_then(Provider::from_model)
            .unwrap_or(baseline)
    }

    /// Resolve the model name for an already-resolved provider.
    pub fn resolved_model(&self, provider: Provider) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| provider.default_model().to_string())
    }
}

/// Visual theme supplied with every generation request: either a semantic
/// map of style tokens or a free-text description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Theme {
    Text(String),
    Tokens(serde_json::Map<String, serde_json::Value>),
}

impl Theme {
    /// Serialize for cache keys and prompts: strings pass through unchanged,
    /// token maps become canonical JSON.
    pub fn serialized(&self) -> String {
        match self {
            Theme::Text(text) => text.clone(),
            Theme::Tokens(tokens) => {
                serde_json::to_string(tokens).unwrap_or_else(|_| "{}".to_string())
            }
        }
    }
}

/// A cached generation artifact. Immutable once written; a newer entry under
/// the same key supersedes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Normalized UI code returned by the provider.
    pub code: String,
    /// Write time, epoch milliseconds.
    pub timestamp: i64,
}

impl CacheEntry {
    pub fn new(code: String, timestamp: i64) -> Self {
        Self { code, timestamp }
    }

    /// Fresh iff `now - timestamp < ttl_millis`.
    pub fn is_fresh(&self, now_millis: i64, ttl_millis: i64) -> bool {
        now_millis - self.timestamp < ttl_millis
    }
}
