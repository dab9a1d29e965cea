//! Mock provider for testing

use crate::client::{CompletionClient, CompletionRequest, CompletionResponse};
use crate::error::{LlmError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Mock completion provider for testing.
///
/// Counts invocations (for de-duplication assertions), can delay responses
/// to widen race windows, and can be switched into a failure mode.
pub struct MockProvider {
    response: String,
    failure: Option<String>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self {
            response: "<div id=\"response-ui-div-id\" class=\"response-ui-div-class\"><p>{{name}}</p></div>".to_string(),
            failure: None,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create with a custom response
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            ..Self::new()
        }
    }

    /// Create a provider that fails every call with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    /// Delay each call, widening race windows for concurrency tests
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Handle onto the invocation counter
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }

    /// Number of completed invocations
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CompletionClient for MockProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.failure {
            return Err(LlmError::ApiCallFailed(message.clone()));
        }
        Ok(CompletionResponse::new(self.response.clone(), request.model).with_tokens(10))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
