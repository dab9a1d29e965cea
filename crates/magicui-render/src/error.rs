//! Error types for the MagicUI render module

use thiserror::Error;

/// Rendering and validation errors.
///
/// These are contained at the sandbox boundary: a failed render becomes an
/// error fragment inside the frame, never a crash in the host page.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RenderError {
    /// Source does not have the expected component shape
    #[error("Generated code is not a single function component: {0}")]
    NotAComponent(String),

    /// Source contains a token the sandbox refuses to execute
    #[error("Generated code contains a disallowed token: {0}")]
    DisallowedToken(String),

    /// Source is empty after normalization
    #[error("Generated code is empty")]
    EmptyCode,
}
