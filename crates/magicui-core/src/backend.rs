//! Generation backend seam
//!
//! The client state machine talks to "something that can generate" through
//! this trait: the in-process orchestrator in `magicui-llm`, the HTTP
//! backend in `magicui-client`, or a test double.

use crate::request::GenerationRequest;
use crate::response::GenerationResponse;
use async_trait::async_trait;

/// A capability that fulfills generation requests.
///
/// Infallible by contract: expected failures come back inside the envelope
/// with `success = false`, never as an `Err`.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> GenerationResponse;
}
