//! MagicUI LLM integration
//!
//! This crate implements the generation-request pipeline behind MagicUI:
//! - Provider adapters: multiple AI backends behind one completion trait
//! - Response normalization: extracting renderable code from raw model text
//! - Caching: TTL-aware key-value stores (file-backed and in-memory)
//! - Orchestration: `UiGenerator`, which validates, consults the cache,
//!   de-duplicates concurrent identical requests, calls the provider and
//!   writes results through
//!
//! Expected failures never escape `UiGenerator::generate` as errors; they
//! come back inside the `GenerationResponse` envelope.

pub use cache::{CacheStore, FileCacheStore, MemoryCacheStore, CACHE_TTL_MILLIS};
pub use client::{CompletionClient, CompletionRequest, CompletionResponse};
pub use error::{LlmError, ProviderErrorKind, Result};
pub use extract::{extract_code, looks_like_component};
pub use generator::{GeneratorConfig, HttpProviderResolver, ProviderResolver, UiGenerator};
pub use prompt::{build_user_prompt, system_instruction, OutputMode};

// Re-export providers
pub use provider::{AnthropicProvider, GeminiProvider, MockProvider, OpenAiCompatProvider};

pub mod cache;
pub mod client;
pub mod error;
pub mod extract;
pub mod generator;
pub mod prompt;
pub mod provider;
