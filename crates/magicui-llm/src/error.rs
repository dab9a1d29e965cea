//! Error types for the MagicUI LLM module

use thiserror::Error;

/// Result type alias for LLM operations
pub type Result<T> = std::result::Result<T, LlmError>;

/// LLM module errors
#[derive(Debug, Error)]
pub enum LlmError {
    /// External API call failed
    #[error("External API call failed: {0}")]
    ApiCallFailed(String),

    /// No API key resolvable for the provider
    #[error("API key for provider {provider} is missing (set {env_var} or MAGICUI_API_KEY)")]
    MissingApiKey {
        provider: &'static str,
        env_var: &'static str,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Invalid response format
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Provider returned no usable text
    #[error("AI returned an empty response")]
    EmptyResponse,

    /// Generation exceeded the configured timeout
    #[error("UI generation timed out after {0}ms")]
    Timeout(u64),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl LlmError {
    /// Classify this error into a provider error kind.
    pub fn kind(&self) -> ProviderErrorKind {
        match self {
            LlmError::MissingApiKey { .. } => ProviderErrorKind::InvalidApiKey,
            LlmError::Timeout(_) => ProviderErrorKind::Unknown,
            LlmError::ApiCallFailed(message) => ProviderErrorKind::classify(message),
            _ => ProviderErrorKind::Unknown,
        }
    }

    /// Message suitable for the response envelope: classified upstream
    /// failures get their mapped user-facing text, everything else its
    /// display form.
    pub fn user_message(&self) -> String {
        match self {
            LlmError::ApiCallFailed(message) => {
                let kind = ProviderErrorKind::classify(message);
                if kind == ProviderErrorKind::Unknown {
                    self.to_string()
                } else {
                    kind.user_message().to_string()
                }
            }
            other => other.to_string(),
        }
    }
}

/// Sub-kinds of upstream provider failures, classified by inspecting the
/// upstream error text for known substrings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    InvalidApiKey,
    QuotaExceeded,
    RateLimitExceeded,
    SafetyBlock,
    Unknown,
}

impl ProviderErrorKind {
    /// Classify an upstream error message. Idempotent over the mapped
    /// user-facing messages, so the server layer can re-classify envelope
    /// errors for status mapping.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_ascii_lowercase();
        if message.contains("API_KEY_INVALID")
            || lower.contains("invalid api key")
            || lower.contains("incorrect api key")
            || lower.contains("invalid x-api-key")
            || lower.contains("401")
            || (lower.contains("api key") && lower.contains("missing"))
        {
            ProviderErrorKind::InvalidApiKey
        } else if message.contains("QUOTA_EXCEEDED")
            || lower.contains("insufficient_quota")
            || lower.contains("quota exceeded")
        {
            ProviderErrorKind::QuotaExceeded
        } else if message.contains("RATE_LIMIT_EXCEEDED")
            || lower.contains("rate limit")
            || lower.contains("429")
        {
            ProviderErrorKind::RateLimitExceeded
        } else if message.contains("SAFETY") || lower.contains("blocked due to safety") {
            ProviderErrorKind::SafetyBlock
        } else {
            ProviderErrorKind::Unknown
        }
    }

    /// User-facing message for this kind.
    pub fn user_message(&self) -> &'static str {
        match self {
            ProviderErrorKind::InvalidApiKey => {
                "Invalid API key. Please check your AI provider API key."
            }
            ProviderErrorKind::QuotaExceeded => "API quota exceeded. Please try again later.",
            ProviderErrorKind::RateLimitExceeded => {
                "Rate limit exceeded. Please wait a moment before trying again."
            }
            ProviderErrorKind::SafetyBlock => {
                "Content was blocked due to safety concerns. Please try rephrasing your description."
            }
            ProviderErrorKind::Unknown => "An unexpected error occurred. Please try again.",
        }
    }

    /// HTTP status the server layer maps this kind to.
    pub fn http_status(&self) -> u16 {
        match self {
            ProviderErrorKind::InvalidApiKey => 401,
            ProviderErrorKind::QuotaExceeded => 429,
            ProviderErrorKind::RateLimitExceeded => 429,
            ProviderErrorKind::SafetyBlock => 400,
            ProviderErrorKind::Unknown => 500,
        }
    }
}
