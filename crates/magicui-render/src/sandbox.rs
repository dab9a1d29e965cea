//! Assembly of self-contained sandbox frame documents
//!
//! The host platform embeds generated UI inside an isolated frame. This
//! module builds the full `srcdoc` document that goes into it: a minimal
//! HTML shell with the Tailwind runtime, a mount div, and either the
//! template-substituted markup (HTML mode) or a validation-gated component
//! source with its runtime data (JSX mode). Failures never escape the
//! frame; they become an error fragment document instead.

use crate::error::RenderError;
use crate::template::render_template;
use crate::validate::validate_component_source;

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

/// How the generated code should be mounted inside the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameMode {
    /// Templated HTML markup, substituted before embedding
    #[default]
    HtmlTemplate,
    /// Arrow-function component source, executed by the frame runtime
    JsxComponent,
}

/// Options controlling frame assembly.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub mode: FrameMode,
    /// Full-page modules own the whole viewport instead of flowing inline.
    pub is_full_page: bool,
}

impl RenderOptions {
    pub fn html() -> Self {
        Self::default()
    }

    pub fn jsx() -> Self {
        Self {
            mode: FrameMode::JsxComponent,
            ..Self::default()
        }
    }

    pub fn full_page(mut self, is_full_page: bool) -> Self {
        self.is_full_page = is_full_page;
        self
    }
}

/// A ready-to-embed frame document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxFrame {
    /// Complete HTML document for the frame's `srcdoc` attribute.
    pub srcdoc: String,
    pub is_full_page: bool,
}

/// Build the frame document for a piece of generated code and its runtime
/// data.
///
/// Invalid JSX sources are contained: the returned frame shows the error
/// fragment rather than executing anything.
pub fn build_frame(code: &str, data: &serde_json::Value, options: RenderOptions) -> SandboxFrame {
    let body = match options.mode {
        FrameMode::HtmlTemplate => frame_document(&render_template(code, data), options),
        FrameMode::JsxComponent => match validate_component_source(code) {
            Ok(()) => component_document(code, data, options),
            Err(err) => {
                tracing::warn!(error = %err, "rejected component source, rendering error fragment");
                render_error_fragment(&err.to_string())
            }
        },
    };

    SandboxFrame {
        srcdoc: body,
        is_full_page: options.is_full_page,
    }
}

/// A contained error document shown in place of a failed render.
pub fn render_error_fragment(message: &str) -> String {
    format!(
        "{}<div style=\"padding:12px;border:1px solid #fca5a5;border-radius:8px;\
background:#fef2f2;color:#b91c1c;font-size:14px\">UI generation error: {}</div>{}",
        document_head(false),
        escape_html(message),
        DOCUMENT_TAIL
    )
}

fn frame_document(content: &str, options: RenderOptions) -> String {
    format!(
        "{}<div id=\"root\">{}</div>{}",
        document_head(options.is_full_page),
        content,
        DOCUMENT_TAIL
    )
}

/// Embed a validated component source and its data for the frame runtime.
/// Both are serialized as JSON so no source text is interpreted as markup.
fn component_document(source: &str, data: &serde_json::Value, options: RenderOptions) -> String {
    let payload = serde_json::json!({
        "component": source,
        "data": data,
    });
    format!(
        "{}<div id=\"root\"></div>\n<script type=\"application/json\" id=\"magicui-component\">{}</script>{}",
        document_head(options.is_full_page),
        escape_json_script(&payload.to_string()),
        DOCUMENT_TAIL
    )
}

fn document_head(is_full_page: bool) -> String {
    let body_style = if is_full_page {
        "margin:0;min-height:100vh;font-family:system-ui,-apple-system,sans-serif"
    } else {
        "margin:0;font-family:system-ui,-apple-system,sans-serif"
    };
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<script src=\"{TAILWIND_CDN}\"></script>\n</head>\n<body style=\"{body_style}\">\n"
    )
}

const DOCUMENT_TAIL: &str = "\n</body>\n</html>";

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Keep an embedded JSON payload from terminating its own script element.
fn escape_json_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_html_frame_contains_substituted_markup() {
        let frame = build_frame(
            "<h1 class=\"text-xl\">{{title}}</h1>",
            &json!({"title": "Dashboard"}),
            RenderOptions::html(),
        );
        assert!(frame.srcdoc.starts_with("<!DOCTYPE html>"));
        assert!(frame.srcdoc.contains(TAILWIND_CDN));
        assert!(frame.srcdoc.contains("<h1 class=\"text-xl\">Dashboard</h1>"));
        assert!(frame.srcdoc.contains("id=\"root\""));
        assert!(!frame.is_full_page);
    }

    #[test]
    fn test_full_page_frame_fills_viewport() {
        let frame = build_frame(
            "<main>{{title}}</main>",
            &json!({"title": "Landing"}),
            RenderOptions::html().full_page(true),
        );
        assert!(frame.is_full_page);
        assert!(frame.srcdoc.contains("min-height:100vh"));
    }

    #[test]
    fn test_jsx_frame_embeds_component_and_data() {
        let frame = build_frame(
            "({ data }) => <div>{data.name}</div>",
            &json!({"name": "Ada"}),
            RenderOptions::jsx(),
        );
        assert!(frame.srcdoc.contains("id=\"magicui-component\""));
        let start = frame.srcdoc.find("id=\"magicui-component\">").unwrap()
            + "id=\"magicui-component\">".len();
        let end = frame.srcdoc[start..].find("</script>").unwrap() + start;
        let payload: serde_json::Value =
            serde_json::from_str(&frame.srcdoc[start..end].replace("<\\/", "</")).unwrap();
        assert_eq!(payload["component"], "({ data }) => <div>{data.name}</div>");
        assert_eq!(payload["data"]["name"], "Ada");
    }

    #[test]
    fn test_invalid_jsx_renders_error_fragment() {
        let frame = build_frame(
            "({ data }) => { fetch('https://example.com'); return <div/>; }",
            &json!({}),
            RenderOptions::jsx(),
        );
        assert!(frame.srcdoc.contains("UI generation error:"));
        assert!(frame.srcdoc.contains("disallowed token"));
        assert!(!frame.srcdoc.contains("magicui-component"));
    }

    #[test]
    fn test_error_fragment_escapes_markup() {
        let doc = render_error_fragment("<script>alert(1)</script>");
        assert!(!doc.contains("<script>alert(1)"));
        assert!(doc.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_component_payload_cannot_break_out_of_script() {
        let frame = build_frame(
            "({ data }) => <div>{'</scr' + 'ipt>'}</div>",
            &json!({}),
            RenderOptions::jsx(),
        );
        let script_start = frame.srcdoc.find("<script type=\"application/json\"").unwrap();
        let interior = &frame.srcdoc[script_start..];
        // exactly one closing tag, the one we emitted
        assert_eq!(interior.matches("</script>").count(), 1);
    }
}
