//! API endpoint handlers
//!
//! The generation handler maps the infallible response envelope onto HTTP
//! statuses: the body is always the envelope itself, the status reflects
//! what went wrong. Validation failures are 400, key problems 401,
//! quota/rate pressure 429, everything else 500.

use super::extractors::JsonExtractor;
use super::types::*;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use magicui_core::{GenerationRequest, GenerationResponse};
use magicui_llm::ProviderErrorKind;
use tracing::{info, warn};

/// Health check endpoint
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET probe for the generation route
pub(super) async fn generation_running() -> Json<RunningResponse> {
    Json(RunningResponse {
        message: "MagicUI generation endpoint is running".to_string(),
    })
}

/// Generation endpoint
#[axum::debug_handler]
pub(super) async fn generate(
    State(state): State<AppState>,
    JsonExtractor(request): JsonExtractor<GenerationRequest>,
) -> Response {
    info!(
        module = %request.module_name,
        force = request.force_regenerate,
        "received generation request"
    );

    let envelope = state.generator.generate(request).await;
    let status = envelope_status(&envelope);
    if !envelope.success {
        warn!(status = status.as_u16(), error = ?envelope.error, "generation failed");
    }

    (status, Json(envelope)).into_response()
}

/// HTTP status for a response envelope.
fn envelope_status(envelope: &GenerationResponse) -> StatusCode {
    if envelope.success {
        return StatusCode::OK;
    }
    let error = envelope.error.as_deref().unwrap_or_default();
    if error.starts_with("Invalid request payload") {
        return StatusCode::BAD_REQUEST;
    }
    StatusCode::from_u16(ProviderErrorKind::classify(error).http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_maps_to_200() {
        let envelope = GenerationResponse::generated("<div/>".to_string());
        assert_eq!(envelope_status(&envelope), StatusCode::OK);
    }

    #[test]
    fn test_validation_failure_maps_to_400() {
        let envelope =
            GenerationResponse::failure("Invalid request payload: moduleName is required", "1.0.0");
        assert_eq!(envelope_status(&envelope), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_key_maps_to_401() {
        let envelope = GenerationResponse::failure(
            "API key for provider gemini is missing (set GEMINI_API_KEY or MAGICUI_API_KEY)",
            "1.0.0",
        );
        assert_eq!(envelope_status(&envelope), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_rate_limit_maps_to_429() {
        let envelope = GenerationResponse::failure(
            "Rate limit exceeded. Please wait a moment before trying again.",
            "1.0.0",
        );
        assert_eq!(envelope_status(&envelope), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_unknown_failure_maps_to_500() {
        let envelope = GenerationResponse::failure("AI returned an empty response", "1.0.0");
        assert_eq!(
            envelope_status(&envelope),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
