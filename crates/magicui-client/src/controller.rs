//! Module controller driving the generation lifecycle
//!
//! One `MagicUi` instance owns one mounted module. It triggers the
//! automatic initial generation, exposes manual regeneration, and applies
//! completions to the shared store. Completions are fenced by a monotonic
//! per-controller ticket: a result is applied only if no newer generation
//! was issued while it was in flight, so a slow automatic completion can
//! never clobber a fresher manual one.

use crate::store::{LogLevel, MagicUiStore};
use magicui_core::{GenerationBackend, GenerationRequest};
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Controller for one module instance.
///
/// Re-mounting under a new `id` means constructing a new controller; data
/// changes alone never re-trigger generation.
pub struct MagicUi {
    store: MagicUiStore,
    backend: Arc<dyn GenerationBackend>,
    request: GenerationRequest,
    /// Ticket counter; the highest issued ticket is the only one whose
    /// completion gets applied.
    latest: AtomicU64,
    mounted: AtomicBool,
}

impl MagicUi {
    pub fn new(
        store: MagicUiStore,
        backend: Arc<dyn GenerationBackend>,
        request: GenerationRequest,
    ) -> Self {
        Self {
            store,
            backend,
            request,
            latest: AtomicU64::new(0),
            mounted: AtomicBool::new(false),
        }
    }

    fn module_name(&self) -> &str {
        &self.request.module_name
    }

    /// Run the automatic initial generation. A no-op until the store has
    /// been initialized, and at most once per controller.
    pub async fn mount(&self) {
        if !self.store.is_initialized().await {
            warn!(
                module = self.module_name(),
                "store not initialized, skipping automatic generation"
            );
            return;
        }
        if self.mounted.swap(true, Ordering::SeqCst) {
            return;
        }
        self.issue(false).await;
    }

    /// Force a fresh generation, bypassing the cache. Refused while another
    /// generation for this module is already in flight.
    pub async fn regenerate(&self) {
        if self.store.module(self.module_name()).await.is_generating {
            warn!(
                module = self.module_name(),
                "generation already in flight, ignoring regenerate"
            );
            self.store
                .add_log(
                    self.module_name(),
                    LogLevel::Warn,
                    "Regenerate ignored: generation already in flight",
                    None,
                )
                .await;
            return;
        }
        self.issue(true).await;
    }

    /// Issue one generation and apply its completion if still current.
    async fn issue(&self, force_regenerate: bool) {
        let name = self.module_name().to_string();
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        self.store.begin_generation(&name).await;
        self.store
            .add_log(
                &name,
                LogLevel::Info,
                if force_regenerate {
                    "Regeneration started"
                } else {
                    "Generation started"
                },
                None,
            )
            .await;

        let request = self.build_request(force_regenerate).await;
        let response = self.backend.generate(request).await;

        if self.latest.load(Ordering::SeqCst) != ticket {
            warn!(module = %name, ticket, "discarding stale generation result");
            self.store.settle_generation(&name).await;
            return;
        }

        if response.success {
            let code = response.code.unwrap_or_default();
            info!(module = %name, version = %response.version, "generation applied");
            self.store
                .add_log(
                    &name,
                    LogLevel::Info,
                    "Generation succeeded",
                    Some(json!({ "version": response.version })),
                )
                .await;
            self.store
                .complete_generation(&name, code, response.version)
                .await;
        } else {
            let error = response
                .error
                .unwrap_or_else(|| "Unknown generation error".to_string());
            self.store
                .add_log(
                    &name,
                    LogLevel::Error,
                    "Generation failed",
                    Some(json!({ "error": error })),
                )
                .await;
            self.store.fail_generation(&name, error).await;
        }
    }

    /// Assemble the outgoing request from the controller's template and the
    /// store's current context.
    async fn build_request(&self, force_regenerate: bool) -> GenerationRequest {
        let mut request = self.request.clone();
        request.force_regenerate = force_regenerate;
        if request.theme.is_none() {
            request.theme = self.store.theme().await;
        }
        if request.project_prd.is_none() {
            request.project_prd = self.store.project_prd().await;
        }
        request
    }
}
