//! MagicUI client generation state machine
//!
//! The embedder-facing side of the pipeline:
//! - `MagicUiStore`: explicitly-scoped shared state (theme and product
//!   context, per-module generation state, bounded diagnostic logs)
//! - `MagicUi`: per-module controller with automatic generation on mount,
//!   manual regeneration and stale-completion fencing
//! - `HttpBackend`: `GenerationBackend` over a remote MagicUI server
//!
//! Controllers work against the `GenerationBackend` trait, so the same
//! state machine runs in-process (against `UiGenerator`) or remotely.

pub use controller::MagicUi;
pub use http::HttpBackend;
pub use store::{LogLevel, MagicUiStore, ModuleLog, ModuleState};

pub mod controller;
pub mod http;
pub mod store;
