//! Explicitly-scoped client-side generation state
//!
//! A `MagicUiStore` holds everything the module controllers share: the
//! installed theme and product context, per-module generation state, and a
//! bounded diagnostic log per module. Stores are constructed per scope and
//! passed explicitly; there is no process-global instance, so independent
//! surfaces (or tests) never bleed state into each other.

use magicui_core::{now_millis, Theme};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Diagnostic logs kept per module. Older entries are evicted first.
const MAX_MODULE_LOGS: usize = 256;

/// Severity of a module diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// One diagnostic entry attached to a module.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleLog {
    pub id: String,
    pub level: LogLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

/// Generation state tracked for one module.
#[derive(Debug, Clone, Default)]
pub struct ModuleState {
    /// Latest generated artifact, ready for the sandbox adapter.
    pub code: Option<String>,
    /// Version label of the latest successful generation.
    pub version: Option<String>,
    /// Bumped on every applied success; lets views detect refreshes.
    pub generation: u64,
    pub is_generating: bool,
    /// Epoch milliseconds of the last applied success.
    pub last_generated: Option<i64>,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct StoreState {
    theme: Option<Theme>,
    project_prd: Option<String>,
    modules: HashMap<String, ModuleState>,
    logs: HashMap<String, VecDeque<ModuleLog>>,
}

/// Shared handle to one scope's generation state. Cloning is cheap and all
/// clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct MagicUiStore {
    inner: Arc<RwLock<StoreState>>,
}

impl MagicUiStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the scope context in one step. Controllers hold off automatic
    /// generation until this has happened.
    pub async fn initialize(&self, theme: Theme, project_prd: impl Into<String>) {
        let mut state = self.inner.write().await;
        state.theme = Some(theme);
        state.project_prd = Some(project_prd.into());
    }

    pub async fn set_theme(&self, theme: Theme) {
        self.inner.write().await.theme = Some(theme);
    }

    pub async fn set_project_prd(&self, project_prd: impl Into<String>) {
        self.inner.write().await.project_prd = Some(project_prd.into());
    }

    /// True once both theme and product context are installed.
    pub async fn is_initialized(&self) -> bool {
        let state = self.inner.read().await;
        state.theme.is_some() && state.project_prd.is_some()
    }

    pub async fn theme(&self) -> Option<Theme> {
        self.inner.read().await.theme.clone()
    }

    pub async fn project_prd(&self) -> Option<String> {
        self.inner.read().await.project_prd.clone()
    }

    /// Snapshot of one module's state.
    pub async fn module(&self, name: &str) -> ModuleState {
        self.inner
            .read()
            .await
            .modules
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    /// Mark a module as generating and clear its previous error.
    pub async fn begin_generation(&self, name: &str) {
        let mut state = self.inner.write().await;
        let module = state.modules.entry(name.to_string()).or_default();
        module.is_generating = true;
        module.error = None;
    }

    /// Apply a successful generation result.
    pub async fn complete_generation(&self, name: &str, code: String, version: String) {
        let mut state = self.inner.write().await;
        let module = state.modules.entry(name.to_string()).or_default();
        module.code = Some(code);
        module.version = Some(version);
        module.generation += 1;
        module.is_generating = false;
        module.last_generated = Some(now_millis());
        module.error = None;
    }

    /// Record a failed generation. Existing code is kept so the last good
    /// artifact stays on screen.
    pub async fn fail_generation(&self, name: &str, error: impl Into<String>) {
        let mut state = self.inner.write().await;
        let module = state.modules.entry(name.to_string()).or_default();
        module.is_generating = false;
        module.error = Some(error.into());
    }

    /// Clear a module's generating flag without touching its result. Used
    /// when a completion is discarded as stale.
    pub async fn settle_generation(&self, name: &str) {
        let mut state = self.inner.write().await;
        if let Some(module) = state.modules.get_mut(name) {
            module.is_generating = false;
        }
    }

    /// Append a diagnostic entry, evicting the oldest past the cap.
    pub async fn add_log(
        &self,
        name: &str,
        level: LogLevel,
        message: impl Into<String>,
        data: Option<serde_json::Value>,
    ) {
        let mut state = self.inner.write().await;
        let logs = state.logs.entry(name.to_string()).or_default();
        if logs.len() >= MAX_MODULE_LOGS {
            logs.pop_front();
        }
        logs.push_back(ModuleLog {
            id: uuid::Uuid::new_v4().to_string(),
            level,
            message: message.into(),
            data,
            timestamp: now_millis(),
        });
    }

    pub async fn logs(&self, name: &str) -> Vec<ModuleLog> {
        self.inner
            .read()
            .await
            .logs
            .get(name)
            .map(|logs| logs.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub async fn clear_logs(&self, name: &str) {
        self.inner.write().await.logs.remove(name);
    }

    /// Drop everything, returning the store to its pre-initialize state.
    pub async fn reset(&self) {
        *self.inner.write().await = StoreState::default();
    }
}
