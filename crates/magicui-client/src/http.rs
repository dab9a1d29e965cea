//! HTTP generation backend
//!
//! Posts the request JSON to a MagicUI server endpoint and folds transport
//! failures into failure envelopes, so the controller sees the same
//! infallible surface as the in-process orchestrator.

use async_trait::async_trait;
use magicui_core::{GenerationBackend, GenerationRequest, GenerationResponse};
use std::time::Duration;
use tracing::{debug, error};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Backend that delegates generation to a remote MagicUI server.
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBackend {
    /// `endpoint` is the full URL of the generation route, e.g.
    /// `http://localhost:4000/api/generate-magic-ui`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl GenerationBackend for HttpBackend {
    async fn generate(&self, request: GenerationRequest) -> GenerationResponse {
        let fallback_version = request.fallback_version();
        debug!(module = %request.module_name, endpoint = %self.endpoint, "posting generation request");

        let sent = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, "generation request failed to send");
                return GenerationResponse::failure(
                    format!("Failed to reach generation service: {err}"),
                    fallback_version,
                );
            }
        };

        // the server returns the envelope on error statuses too, so decode
        // the body regardless of status
        match response.json::<GenerationResponse>().await {
            Ok(envelope) => envelope,
            Err(err) => {
                error!(error = %err, "generation response could not be decoded");
                GenerationResponse::failure(
                    format!("Invalid response from generation service: {err}"),
                    fallback_version,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_endpoint_folds_into_failure_envelope() {
        // nothing listens on this port
        let backend = HttpBackend::new("http://127.0.0.1:1/api/generate-magic-ui");
        let mut request = GenerationRequest::new("card", "a product card");
        request.version_number = Some("3.1.0".to_string());

        let response = backend.generate(request).await;
        assert!(!response.success);
        assert_eq!(response.version, "3.1.0");
        assert!(response
            .error
            .as_deref()
            .unwrap()
            .contains("Failed to reach generation service"));
    }
}
