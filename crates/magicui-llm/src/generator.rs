//! Generation orchestrator
//!
//! `UiGenerator` drives one generation request end to end: validate, derive
//! the cache key, serve fresh cache hits, collapse concurrent identical
//! requests onto one provider call, normalize the model output and write it
//! through to the cache. Expected failures are returned inside the
//! `GenerationResponse` envelope; `generate` never errors.

use crate::cache::{CacheStore, CACHE_TTL_MILLIS};
use crate::client::{CompletionClient, CompletionRequest};
use crate::error::{LlmError, Result};
use crate::extract::{extract_code, looks_like_component};
use crate::prompt::{build_user_prompt, system_instruction, OutputMode};
use crate::provider::{AnthropicProvider, GeminiProvider, OpenAiCompatProvider};
use dashmap::DashMap;
use magicui_core::time::now_millis;
use magicui_core::{derive_key, CacheEntry, GenerationRequest, GenerationResponse, Provider};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};

/// Generic fallback environment variable, checked after the
/// provider-specific one.
const GENERIC_API_KEY_ENV: &str = "MAGICUI_API_KEY";

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Provider used when neither the config nor the model name selects one
    pub baseline_provider: Provider,
    /// Artifact kind requested from the model
    pub output_mode: OutputMode,
    /// Maximum age at which a cache entry is still served
    pub cache_ttl_millis: i64,
    /// Upper bound on one provider call; the call is raced against this
    pub generation_timeout: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            baseline_provider: Provider::Gemini,
            output_mode: OutputMode::Html,
            cache_ttl_millis: CACHE_TTL_MILLIS,
            generation_timeout: Duration::from_secs(30),
        }
    }
}

impl GeneratorConfig {
    /// Set the baseline provider
    pub fn with_baseline_provider(mut self, provider: Provider) -> Self {
        self.baseline_provider = provider;
        self
    }

    /// Set the output mode
    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = mode;
        self
    }

    /// Set the cache TTL
    pub fn with_cache_ttl_millis(mut self, ttl: i64) -> Self {
        self.cache_ttl_millis = ttl;
        self
    }

    /// Set the generation timeout
    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }
}

/// Maps a resolved provider variant to a completion client.
///
/// The production resolver constructs real HTTP adapters; tests inject one
/// returning mocks.
pub trait ProviderResolver: Send + Sync {
    fn resolve(&self, provider: Provider, api_key: String) -> Arc<dyn CompletionClient>;
}

/// Default resolver building the HTTP provider adapters
pub struct HttpProviderResolver;

impl ProviderResolver for HttpProviderResolver {
    fn resolve(&self, provider: Provider, api_key: String) -> Arc<dyn CompletionClient> {
        match provider {
            Provider::Gemini => Arc::new(GeminiProvider::new(api_key)),
            Provider::Anthropic => Arc::new(AnthropicProvider::new(api_key)),
            other => Arc::new(OpenAiCompatProvider::new(other, api_key)),
        }
    }
}

/// The generation orchestrator
pub struct UiGenerator {
    cache: Arc<dyn CacheStore>,
    resolver: Arc<dyn ProviderResolver>,
    config: GeneratorConfig,
    /// In-flight generations keyed by cache key. A second caller for the
    /// same key awaits the same settlement instead of issuing a duplicate
    /// provider call. Same-process only; no cross-process lock.
    pending: DashMap<String, Arc<OnceCell<GenerationResponse>>>,
}

impl UiGenerator {
    /// Create a generator over a cache store, with the default HTTP
    /// provider resolver and configuration
    pub fn new(cache: Arc<dyn CacheStore>) -> Self {
        Self {
            cache,
            resolver: Arc::new(HttpProviderResolver),
            config: GeneratorConfig::default(),
            pending: DashMap::new(),
        }
    }

    /// Replace the provider resolver
    pub fn with_resolver(mut self, resolver: Arc<dyn ProviderResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Drop every cached artifact
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    /// Run one generation request through the pipeline.
    ///
    /// Returns a success envelope (fresh or cached) or a failure envelope;
    /// never an `Err`.
    pub async fn generate(&self, request: GenerationRequest) -> GenerationResponse {
        if let Err(err) = request.validate() {
            warn!(module = %request.module_name, %err, "rejecting generation request");
            return GenerationResponse::failure(
                "Invalid request payload",
                request.fallback_version(),
            );
        }

        let provider = request
            .ai_config
            .resolved_provider(self.config.baseline_provider);
        let api_key = match resolve_api_key(provider, request.ai_config.api_key.as_deref()) {
            Ok(api_key) => api_key,
            Err(err) => {
                warn!(provider = %provider, %err, "generation request has no usable API key");
                return GenerationResponse::failure(err.to_string(), request.fallback_version());
            }
        };

        let key = derive_key(&request);

        // Cache read is skipped under force_regenerate; the write below
        // still happens, so a forced result becomes the new baseline
        if !request.force_regenerate {
            let entries = self.cache.read_all().await;
            if let Some(entry) = entries.get(&key) {
                if entry.is_fresh(now_millis(), self.config.cache_ttl_millis) {
                    debug!(module = %request.module_name, "cache hit");
                    return GenerationResponse::cached(entry);
                }
            }
        }

        let cell = self
            .pending
            .entry(key.clone())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();
        let response = cell
            .get_or_init(|| self.generate_fresh(&request, provider, api_key, &key))
            .await
            .clone();
        // Evict only the cell this caller awaited. After a failure
        // settlement a retry may already have installed a newer in-flight
        // cell under the same key; that one must survive.
        self.pending
            .remove_if(&key, |_, pending| Arc::ptr_eq(pending, &cell));
        response
    }

    /// Cache-miss path: call the provider under the timeout, normalize and
    /// write through.
    async fn generate_fresh(
        &self,
        request: &GenerationRequest,
        provider: Provider,
        api_key: String,
        key: &str,
    ) -> GenerationResponse {
        let client = self.resolver.resolve(provider, api_key);
        let mode = self.config.output_mode;
        let model = request.ai_config.resolved_model(provider);

        let mut completion = CompletionRequest::new(build_user_prompt(request, mode), model)
            .with_system(system_instruction(mode).to_string())
            .with_temperature(request.ai_config.temperature.unwrap_or(0.7));
        if let Some(top_p) = request.ai_config.top_p {
            completion = completion.with_top_p(top_p);
        }
        if let Some(top_k) = request.ai_config.top_k {
            completion = completion.with_top_k(top_k);
        }
        if let Some(max_tokens) = request.ai_config.max_output_tokens {
            completion = completion.with_max_output_tokens(max_tokens);
        }

        info!(
            module = %request.module_name,
            provider = %provider,
            model = %completion.model,
            "generating UI"
        );

        let completed =
            match tokio::time::timeout(self.config.generation_timeout, client.complete(completion))
                .await
            {
                Err(_) => {
                    let err =
                        LlmError::Timeout(self.config.generation_timeout.as_millis() as u64);
                    error!(module = %request.module_name, %err, "generation timed out");
                    return GenerationResponse::failure(
                        err.to_string(),
                        request.fallback_version(),
                    );
                }
                Ok(Err(err)) => {
                    error!(module = %request.module_name, %err, "provider call failed");
                    return GenerationResponse::failure(
                        err.user_message(),
                        request.fallback_version(),
                    );
                }
                Ok(Ok(response)) => response,
            };

        let code = extract_code(&completed.content);
        if code.is_empty() {
            warn!(module = %request.module_name, "provider returned no usable text");
            return GenerationResponse::failure(
                "AI returned an empty response",
                request.fallback_version(),
            );
        }
        if mode == OutputMode::ReactJsx && !looks_like_component(&code) {
            // Best effort only; the render sandbox is the hard gate
            warn!(
                module = %request.module_name,
                "generated code does not look like a function component"
            );
        }

        let now = now_millis();
        let mut entries = self.cache.read_all().await;
        entries.insert(key.to_string(), CacheEntry::new(code.clone(), now));
        self.cache.write_all(&entries).await;

        GenerationResponse::generated_at(code, now)
    }
}

#[async_trait::async_trait]
impl magicui_core::GenerationBackend for UiGenerator {
    async fn generate(&self, request: GenerationRequest) -> GenerationResponse {
        UiGenerator::generate(self, request).await
    }
}

/// Resolve the API key: explicit request config, then the provider-specific
/// environment variable, then the generic fallback.
fn resolve_api_key(provider: Provider, requested: Option<&str>) -> Result<String> {
    if let Some(api_key) = requested {
        if !api_key.trim().is_empty() {
            return Ok(api_key.to_string());
        }
    }
    if let Ok(api_key) = std::env::var(provider.api_key_env()) {
        if !api_key.trim().is_empty() {
            return Ok(api_key);
        }
    }
    if let Ok(api_key) = std::env::var(GENERIC_API_KEY_ENV) {
        if !api_key.trim().is_empty() {
            return Ok(api_key);
        }
    }
    Err(LlmError::MissingApiKey {
        provider: provider.as_str(),
        env_var: provider.api_key_env(),
    })
}
