//! Deterministic cache-key derivation
//!
//! Pure function mapping a generation request to a stable string key. With
//! an `id`, the key scopes by id + provider + model so runtime data changes
//! reuse the cached structure. Without one, the data is baked into the key:
//! any data change means a new artifact, because the data shaped the prompt.

use crate::request::GenerationRequest;

/// Sentinel used when the request names no provider or model.
const DEFAULT_SENTINEL: &str = "default";

/// Derive the cache key for a request. Pure, deterministic, no I/O.
pub fn derive_key(request: &GenerationRequest) -> String {
    let provider = request
        .ai_config
        .provider
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_SENTINEL.to_string());
    let model = request
        .ai_config
        .model
        .clone()
        .unwrap_or_else(|| DEFAULT_SENTINEL.to_string());

    if let Some(id) = request.cache_id() {
        return format!("magicui-id:{id}-provider:{provider}-model:{model}");
    }

    let version = request.version_number.as_deref().unwrap_or("latest");
    let theme = request
        .theme
        .as_ref()
        .map(|t| t.serialized())
        .unwrap_or_else(|| "null".to_string());
    let data = serialize_value(&request.data);
    let prd = request.project_prd.as_deref().unwrap_or("no_prd");

    format!(
        "{}:{}:{}:{}:{}-provider:{}-model:{}",
        request.module_name, version, theme, data, prd, provider, model
    )
}

/// Strings pass through unchanged, everything else is canonical JSON
/// (serde_json maps are key-ordered).
fn serialize_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| "null".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Provider, Theme};

    fn request_with_data(data: serde_json::Value) -> GenerationRequest {
        let mut request = GenerationRequest::new("card", "product card");
        request.data = data;
        request
    }

    #[test]
    fn test_identical_requests_share_a_key() {
        let a = request_with_data(serde_json::json!({"name": "Mug", "price": 9.99}));
        let b = request_with_data(serde_json::json!({"name": "Mug", "price": 9.99}));
        assert_eq!(derive_key(&a), derive_key(&b));
    }

    #[test]
    fn test_data_change_changes_key_without_id() {
        let a = request_with_data(serde_json::json!({"name": "Mug"}));
        let b = request_with_data(serde_json::json!({"name": "Bowl"}));
        assert_ne!(derive_key(&a), derive_key(&b));
    }

    #[test]
    fn test_data_change_keeps_key_with_id() {
        let mut a = request_with_data(serde_json::json!({"name": "Mug"}));
        let mut b = request_with_data(serde_json::json!({"name": "Bowl"}));
        a.id = Some("m1".to_string());
        b.id = Some("m1".to_string());
        assert_eq!(derive_key(&a), derive_key(&b));
    }

    #[test]
    fn test_id_key_scopes_by_provider_and_model() {
        let mut a = GenerationRequest::new("card", "product card");
        a.id = Some("m1".to_string());
        let mut b = a.clone();
        b.ai_config.provider = Some(Provider::OpenAi);
        b.ai_config.model = Some("gpt-4o".to_string());

        assert_eq!(
            derive_key(&a),
            "magicui-id:m1-provider:default-model:default"
        );
        assert_eq!(derive_key(&b), "magicui-id:m1-provider:openai-model:gpt-4o");
        assert_ne!(derive_key(&a), derive_key(&b));
    }

    #[test]
    fn test_whitespace_id_falls_through_to_composite() {
        let mut a = request_with_data(serde_json::json!({"name": "Mug"}));
        a.id = Some("  ".to_string());
        let key = derive_key(&a);
        assert!(!key.starts_with("magicui-id:"));
        assert!(key.starts_with("card:latest:"));
    }

    #[test]
    fn test_theme_text_passes_through() {
        let mut a = request_with_data(serde_json::Value::Null);
        a.theme = Some(Theme::Text("dark mode".to_string()));
        assert!(derive_key(&a).contains(":dark mode:"));
    }

    #[test]
    fn test_version_label_in_composite_key() {
        let mut a = request_with_data(serde_json::Value::Null);
        let mut b = a.clone();
        b.version_number = Some("2.0.0".to_string());
        assert!(derive_key(&a).contains(":latest:"));
        assert!(derive_key(&b).contains(":2.0.0:"));
        assert_ne!(derive_key(&a), derive_key(&b));
    }

    #[test]
    fn test_force_regenerate_does_not_change_key() {
        let a = request_with_data(serde_json::json!({"name": "Mug"}));
        let mut b = a.clone();
        b.force_regenerate = true;
        assert_eq!(derive_key(&a), derive_key(&b));
    }
}
