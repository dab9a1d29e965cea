//! Versioned generation response envelope

use crate::time::{iso_from_millis, now_iso};
use crate::types::CacheEntry;
use serde::{Deserialize, Serialize};

/// Uniform response envelope returned by the orchestrator and the HTTP
/// endpoint. Expected failures are folded into this value; the pipeline
/// never throws them past its boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub success: bool,

    /// Present iff `success` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// ISO timestamp (fresh), `"cached-" + ISO` (cache hit), or a
    /// caller-supplied fallback label on error.
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResponse {
    /// Fresh generation, versioned by the current time.
    pub fn generated(code: String) -> Self {
        Self {
            success: true,
            code: Some(code),
            version: now_iso(),
            error: None,
        }
    }

    /// Fresh generation versioned by an explicit timestamp, so the response
    /// version agrees with the cache entry written alongside it.
    pub fn generated_at(code: String, timestamp_millis: i64) -> Self {
        Self {
            success: true,
            code: Some(code),
            version: iso_from_millis(timestamp_millis),
            error: None,
        }
    }

    /// Cache hit, versioned by the entry's write time.
    pub fn cached(entry: &CacheEntry) -> Self {
        Self {
            success: true,
            code: Some(entry.code.clone()),
            version: format!("cached-{}", iso_from_millis(entry.timestamp)),
            error: None,
        }
    }

    /// Failure envelope carrying the caller's fallback version label.
    pub fn failure(error: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            success: false,
            code: None,
            version: version.into(),
            error: Some(error.into()),
        }
    }

    /// True for responses served from the cache rather than the provider.
    pub fn is_cached(&self) -> bool {
        self.success && self.version.starts_with("cached-")
    }
}
