//! Request/response type definitions and shared state

use magicui_core::GenerationBackend;
use serde::Serialize;
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// The generation backend behind the endpoint. In production this is a
    /// `UiGenerator`; integration tests inject mock-backed instances.
    pub generator: Arc<dyn GenerationBackend>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Response for GET probes of the generation route
#[derive(Debug, Serialize)]
pub struct RunningResponse {
    pub message: String,
}
