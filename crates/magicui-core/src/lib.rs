//! MagicUI core types
//!
//! Shared vocabulary for the MagicUI generation pipeline:
//! - Generation requests and the versioned response envelope
//! - Theme and AI-provider configuration
//! - Cache entries and deterministic cache-key derivation
//! - The `GenerationBackend` seam consumed by the client state machine
//!
//! This crate holds no I/O. Providers, caching and orchestration live in
//! `magicui-llm`; rendering lives in `magicui-render`.

pub use backend::GenerationBackend;
pub use cache_key::derive_key;
pub use request::{GenerationRequest, InvalidRequest};
pub use response::GenerationResponse;
pub use time::{iso_from_millis, now_iso, now_millis};
pub use types::{AiConfig, CacheEntry, Provider, Theme};

pub mod backend;
pub mod cache_key;
pub mod request;
pub mod response;
pub mod time;
pub mod types;
