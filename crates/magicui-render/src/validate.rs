//! Static validation of AI-generated component sources
//!
//! The model output is untrusted input. Before any execution inside the
//! sandbox, the source must pass an allow-list shape check (a single
//! function expression) and contain none of the tokens that would let it
//! reach outside its frame. This is stage one of the two-stage pipeline;
//! stage two is execution strictly inside the isolation boundary.

use crate::error::RenderError;
use regex::Regex;

/// Tokens that disqualify a component source from execution.
const DISALLOWED_TOKENS: &[&str] = &[
    "import ",
    "require(",
    "eval(",
    "Function(",
    "document.cookie",
    "window.top",
    "window.parent",
    "XMLHttpRequest",
    "fetch(",
];

/// Check that a source string is a single arrow-function component free of
/// disallowed tokens.
pub fn validate_component_source(source: &str) -> Result<(), RenderError> {
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return Err(RenderError::EmptyCode);
    }

    let arrow_head = Regex::new(r"(?s)^\(.*?\)\s*=>").unwrap();
    if !arrow_head.is_match(trimmed) {
        let head: String = trimmed.chars().take(40).collect();
        return Err(RenderError::NotAComponent(head));
    }

    for token in DISALLOWED_TOKENS {
        if trimmed.contains(token) {
            return Err(RenderError::DisallowedToken(token.to_string()));
        }
    }

    Ok(())
}
