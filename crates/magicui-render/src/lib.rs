//! MagicUI rendering sandbox adapter
//!
//! Takes normalized, AI-generated UI code plus runtime data and prepares an
//! isolated display surface:
//! - `template`: `{{placeholder}}` substitution with array expansion
//! - `validate`: static allow-list checks on untrusted component sources
//! - `sandbox`: assembly of self-contained iframe documents with contained
//!   error fragments
//!
//! The isolation mechanism itself (the embedding of the frame) belongs to
//! the host platform; this crate produces what goes inside it.

pub use error::RenderError;
pub use sandbox::{build_frame, render_error_fragment, FrameMode, RenderOptions, SandboxFrame};
pub use template::render_template;
pub use validate::validate_component_source;

pub mod error;
pub mod sandbox;
pub mod template;
pub mod validate;
