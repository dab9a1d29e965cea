//! AI provider implementations
//!
//! One adapter per backend behind the `CompletionClient` trait. Adding a
//! provider means adding a variant to `magicui_core::Provider` and an
//! adapter here; the orchestrator does not change.

mod anthropic;
mod gemini;
mod mock;
mod openai_compat;

pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use mock::MockProvider;
pub use openai_compat::OpenAiCompatProvider;
