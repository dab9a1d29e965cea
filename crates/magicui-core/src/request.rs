//! Generation request payload and validation

use crate::types::{AiConfig, Theme};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A request missing one of its required fields.
///
/// Raised before any cache or provider interaction.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Invalid request payload: {0}")]
pub struct InvalidRequest(pub String);

/// One generation attempt's full input. Owned by the caller, transient.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationRequest {
    /// Optional stable identifier. When present it defines cache identity
    /// directly, decoupling structural regeneration from runtime data.
    pub id: Option<String>,

    /// Module name, required. Keys the client state machine when `id` is
    /// absent.
    pub module_name: String,

    /// Natural-language intent, required.
    pub description: String,

    /// Arbitrary JSON used as prompt context and runtime template values.
    /// Never trusted as code.
    pub data: serde_json::Value,

    /// Product requirements text, contextual.
    pub project_prd: Option<String>,

    /// Visual theme, contextual.
    pub theme: Option<Theme>,

    /// Caller-supplied version label; absent means "latest".
    pub version_number: Option<String>,

    /// Changes prompt framing (component vs full-page layout), not identity.
    pub is_full_page: bool,

    /// Bypasses the cache read, never the cache write.
    pub force_regenerate: bool,

    /// Provider/model/key overrides with environment fallback.
    pub ai_config: AiConfig,
}

impl GenerationRequest {
    /// Minimal constructor for the two required fields.
    pub fn new(module_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            description: description.into(),
            data: serde_json::Value::Null,
            ..Default::default()
        }
    }

    /// Reject requests missing `module_name` or `description`. Runs before
    /// the cache and the provider are touched.
    pub fn validate(&self) -> Result<(), InvalidRequest> {
        if self.module_name.trim().is_empty() {
            return Err(InvalidRequest("moduleName is required".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(InvalidRequest("description is required".to_string()));
        }
        Ok(())
    }

    /// The `id`, if it is usable for cache identity. Whitespace-only ids are
    /// treated as absent to prevent collisions on the empty string.
    pub fn cache_id(&self) -> Option<&str> {
        match self.id.as_deref().map(str::trim) {
            Some("") | None => None,
            Some(id) => Some(id),
        }
    }

    /// Version label reported on failure envelopes.
    pub fn fallback_version(&self) -> String {
        self.version_number
            .clone()
            .unwrap_or_else(|| "1.0.0".to_string())
    }
}
