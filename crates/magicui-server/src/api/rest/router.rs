//! Router creation and configuration
//!
//! Creates Axum routers for REST API endpoints.

use super::handlers::*;
use super::types::AppState;
use crate::error::ServerError;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Router};
use magicui_core::GenerationBackend;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create REST API router
pub fn create_router(generator: Arc<dyn GenerationBackend>) -> Router {
    let state = AppState { generator };

    Router::new()
        .route("/health", get(health))
        .route(
            "/api/generate-magic-ui",
            get(generation_running).post(generate),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

/// Outermost fallback: an unwinding handler becomes a generic 500 envelope
/// instead of a dropped connection.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(%detail, "request handler panicked");

    ServerError::InternalError("An unexpected error occurred. Please try again.".to_string())
        .into_response()
}
