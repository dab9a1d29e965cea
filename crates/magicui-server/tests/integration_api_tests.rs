//! Integration tests for REST API endpoints
//!
//! These tests drive the real router end-to-end with a generator backed by
//! an in-memory cache and a mock provider. No real LLM backend is touched.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use magicui_core::Provider;
use magicui_llm::{
    CompletionClient, GeneratorConfig, MemoryCacheStore, MockProvider, ProviderResolver,
    UiGenerator,
};
use magicui_server::api::create_router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Resolver that hands every request the same mock provider
struct MockResolver {
    provider: Arc<MockProvider>,
}

impl ProviderResolver for MockResolver {
    fn resolve(&self, _provider: Provider, _api_key: String) -> Arc<dyn CompletionClient> {
        self.provider.clone()
    }
}

/// Build a router whose generator talks to the given mock provider
fn test_app(provider: MockProvider) -> (Router, Arc<MockProvider>) {
    let provider = Arc::new(provider);
    let generator = UiGenerator::new(Arc::new(MemoryCacheStore::new()))
        .with_resolver(Arc::new(MockResolver {
            provider: provider.clone(),
        }))
        .with_config(GeneratorConfig::default());
    (create_router(Arc::new(generator)), provider)
}

fn generation_body(module_name: &str) -> Value {
    json!({
        "id": format!("test-{module_name}"),
        "moduleName": module_name,
        "description": "a product card with name and price",
        "data": {"name": "Mug", "price": 9.99},
        "aiConfig": {"apiKey": "test-key"}
    })
}

async fn post_generation(app: &Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/generate-magic-ui")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = test_app(MockProvider::new());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_get_generation_route_reports_running() {
    let (app, _) = test_app(MockProvider::new());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/generate-magic-ui")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(json["message"].as_str().unwrap().contains("running"));
}

#[tokio::test]
async fn test_generate_returns_normalized_code() {
    let (app, provider) = test_app(MockProvider::with_response(
        "```html\n<div class=\"p-4\">{{name}}</div>\n```",
    ));

    let (status, json) = post_generation(&app, generation_body("card")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["code"], "<div class=\"p-4\">{{name}}</div>");
    assert!(json["version"].as_str().unwrap().ends_with('Z'));
    assert!(json.get("error").is_none());
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_repeat_request_served_from_cache() {
    let (app, provider) = test_app(MockProvider::with_response("<div>cached me</div>"));

    let (_, first) = post_generation(&app, generation_body("card")).await;
    let (status, second) = post_generation(&app, generation_body("card")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["success"], true);
    assert_eq!(second["code"], first["code"]);
    assert_eq!(
        second["version"].as_str().unwrap(),
        format!("cached-{}", first["version"].as_str().unwrap())
    );
    // the second request never reached the provider
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_force_regenerate_bypasses_cache() {
    let (app, provider) = test_app(MockProvider::with_response("<div>fresh</div>"));

    let (_, first) = post_generation(&app, generation_body("card")).await;

    let mut body = generation_body("card");
    body["forceRegenerate"] = json!(true);
    let (status, forced) = post_generation(&app, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(forced["success"], true);
    assert!(!forced["version"].as_str().unwrap().starts_with("cached-"));
    assert_ne!(forced["version"], first["version"]);
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn test_validation_failure_is_400() {
    let (app, provider) = test_app(MockProvider::new());

    let body = json!({
        "moduleName": "",
        "description": "a card",
        "aiConfig": {"apiKey": "test-key"}
    });
    let (status, json) = post_generation(&app, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request payload"));
    assert_eq!(json["version"], "1.0.0");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let (app, _) = test_app(MockProvider::new());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/generate-magic-ui")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("JSON"));
}

#[tokio::test]
async fn test_invalid_api_key_is_401() {
    let (app, _) = test_app(MockProvider::failing(
        "Gemini API error (400): API_KEY_INVALID",
    ));

    let (status, json) = post_generation(&app, generation_body("card")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("Invalid API key"));
}

#[tokio::test]
async fn test_rate_limit_is_429() {
    let (app, _) = test_app(MockProvider::failing(
        "OpenAI API error (429): Rate limit reached for requests",
    ));

    let (status, json) = post_generation(&app, generation_body("card")).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("Rate limit"));
}

#[tokio::test]
async fn test_empty_model_output_is_500() {
    let (app, _) = test_app(MockProvider::with_response("   "));

    let (status, json) = post_generation(&app, generation_body("card")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "AI returned an empty response");
}

#[tokio::test]
async fn test_panicking_backend_becomes_generic_500_envelope() {
    use magicui_core::{GenerationBackend, GenerationRequest, GenerationResponse};

    struct PanickingBackend;

    #[async_trait::async_trait]
    impl GenerationBackend for PanickingBackend {
        async fn generate(&self, _request: GenerationRequest) -> GenerationResponse {
            panic!("backend invariant violated");
        }
    }

    let app = create_router(Arc::new(PanickingBackend));
    let (status, json) = post_generation(&app, generation_body("card")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("unexpected error"));
    // panic detail never leaks into the response
    assert!(!json["error"].as_str().unwrap().contains("invariant"));
}

#[tokio::test]
async fn test_different_ids_generate_independently() {
    let (app, provider) = test_app(MockProvider::with_response("<div/>"));

    let (_, _) = post_generation(&app, generation_body("card")).await;
    let (_, second) = post_generation(&app, generation_body("hero")).await;

    // distinct cache identity, so the second module is a fresh generation
    assert!(!second["version"].as_str().unwrap().starts_with("cached-"));
    assert_eq!(provider.call_count(), 2);
}
