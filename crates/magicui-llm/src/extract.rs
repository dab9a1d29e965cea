//! Code extraction utilities for cleaning model responses
//!
//! Models are instructed to return bare code, but they routinely wrap it in
//! markdown fences or pad it with whitespace anyway. This module cleans that
//! up without ever failing: the caller treats an empty result as "empty AI
//! response", and shape problems surface later in the render sandbox.

use regex::Regex;

/// Extract renderable UI code from a raw model response.
///
/// Looks for a fenced code block (triple backtick with an optional language
/// tag) and returns its trimmed interior; without a fence the trimmed raw
/// text is returned unchanged. Idempotent: extracting an already-extracted
/// string is a no-op.
pub fn extract_code(raw: &str) -> String {
    let fence = Regex::new(r"(?s)```(?:[a-zA-Z]*)[ \t]*\r?\n?(.*?)```").unwrap();
    if let Some(captures) = fence.captures(raw) {
        if let Some(interior) = captures.get(1) {
            return interior.as_str().trim().to_string();
        }
    }
    raw.trim().to_string()
}

/// Check whether a source string has the expected JSX component shape: a
/// parameter list followed by an arrow. A failed check is advisory, never a
/// hard failure at this layer.
pub fn looks_like_component(code: &str) -> bool {
    let arrow_head = Regex::new(r"(?s)^\(.*?\)\s*=>").unwrap();
    arrow_head.is_match(code.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_fenced_html() {
        let raw = "Here you go:\n```html\n<div class=\"p-4\">{{name}}</div>\n```\nEnjoy!";
        assert_eq!(extract_code(raw), "<div class=\"p-4\">{{name}}</div>");
    }

    #[test]
    fn test_extract_fenced_without_language_tag() {
        let raw = "```\n<p>hello</p>\n```";
        assert_eq!(extract_code(raw), "<p>hello</p>");
    }

    #[test]
    fn test_extract_fenced_jsx() {
        let raw = "```jsx\n({ data }) => <div>{data.name}</div>\n```";
        assert_eq!(extract_code(raw), "({ data }) => <div>{data.name}</div>");
    }

    #[test]
    fn test_unfenced_input_passes_through_trimmed() {
        let raw = "  <div>plain</div>\n";
        assert_eq!(extract_code(raw), "<div>plain</div>");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let inputs = [
            "```html\n<div>a</div>\n```",
            "<div>b</div>",
            "   spaced   ",
            "",
            "```\n\n```",
        ];
        for input in inputs {
            let once = extract_code(input);
            let twice = extract_code(&once);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_empty_fence_yields_empty_string() {
        assert_eq!(extract_code("```html\n```"), "");
        assert_eq!(extract_code("   "), "");
    }

    #[test]
    fn test_multiline_interior_preserved() {
        let raw = "```html\n<div>\n  <p>line</p>\n</div>\n```";
        assert_eq!(extract_code(raw), "<div>\n  <p>line</p>\n</div>");
    }

    #[test]
    fn test_looks_like_component() {
        assert!(looks_like_component("({ data }) => <div>{data.x}</div>"));
        assert!(looks_like_component("(props) => {\n  return <div/>;\n}"));
        assert!(looks_like_component("() => <span>static</span>"));
        assert!(!looks_like_component("<div>not a component</div>"));
        assert!(!looks_like_component("function Component() { return null; }"));
    }
}
