//! Prompt templates for UI generation
//!
//! Two output modes are supported: templated HTML (Tailwind utility classes
//! with `{{placeholder}}` tokens resolved at render time) and a
//! self-contained React functional component source string. The system
//! instructions are fixed; the user prompt carries the request specifics.

use magicui_core::GenerationRequest;
use serde::{Deserialize, Serialize};

/// Which kind of artifact the provider is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// HTML fragment with `{{placeholder}}` tokens for dynamic fields.
    Html,
    /// React functional component as a source-code string.
    ReactJsx,
}

impl Default for OutputMode {
    fn default() -> Self {
        OutputMode::Html
    }
}

/// System instruction for templated HTML output.
pub const HTML_SYSTEM_INSTRUCTION: &str = r#"
You are a highly specialized UI generation agent. Your task is to generate fully-formed, production-ready HTML UI components using only TailwindCSS utility classes.

You will be provided:
- A PRD describing project goals, UX principles, tone and UI standards (if available)
- A Theme defining color palette, typography and layout guidelines (if available)
- A generation request with a description, a module name and optional JSON data

GENERATION STRATEGY:
* When data is included, extract all relevant fields and reflect them visually. Wrap every dynamic field with {{ }} templating syntax, e.g. <h2>{{productName}}</h2>, never hardcoded text.
* When data is partial or absent, infer a typical structure from the description and template all expected content with {{placeholders}} suitable for runtime data binding.

OUTPUT RULES:
* Return complete HTML using TailwindCSS only, wrapped in:
  <div id="response-ui-div-id" class="response-ui-div-class"> ... </div>
* No inline styles, third-party classes or libraries. Tailwind is globally available.
* Always complete: visually polished, responsive, immediately renderable.
* Every <img> must carry an onerror fallback to https://placehold.co/ with an inferred size, e.g. onerror="this.onerror=null; this.src='https://placehold.co/600x400';".
* Output HTML only. Never wrap the output in markdown fences and never add commentary or metadata.
"#;

/// System instruction for React/JSX component output.
pub const REACT_JSX_SYSTEM_INSTRUCTION: &str = r#"
You are a highly specialized UI generation agent. Your task is to generate a single, self-contained, visually stunning React functional component as a JavaScript string, using JSX and only TailwindCSS utility classes, based on the project PRD, the visual theme, and the request description, data and module name.

OUTPUT RULES:
* The output MUST be a string containing a single React functional component, for example: ({ data }) => { /* JSX and logic here */ }.
* The component accepts a single prop named data carrying the JSON data for rendering.
* All UI elements are written in JSX, styled exclusively with TailwindCSS utility classes. Never use inline styles, <style> tags or classes from other libraries.
* If data (or a property of it) is an array, the component MUST use .map() to render each item with a unique key prop.
* Every <img> tag MUST include an onError fallback: onError={(e) => { e.target.onerror = null; e.target.src='https://placehold.co/600x400?text=Image+Not+Found'; }} with an inferred size.
* Add interactivity only if the description asks for it, using simple inline stubs.
* Ensure responsiveness using Tailwind's sm:, md: and lg: prefixes.

NEVER INCLUDE:
* Markdown fences around the component code.
* Explanations or commentary outside the code string.
* import statements of any kind; assume React is globally available.
"#;

/// System instruction for an output mode.
pub fn system_instruction(mode: OutputMode) -> &'static str {
    match mode {
        OutputMode::Html => HTML_SYSTEM_INSTRUCTION,
        OutputMode::ReactJsx => REACT_JSX_SYSTEM_INSTRUCTION,
    }
}

/// Build the user prompt for a generation request.
pub fn build_user_prompt(request: &GenerationRequest, mode: OutputMode) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!("Module Name: {}\n", request.module_name));
    prompt.push_str(&format!("Description: {}\n", request.description));
    prompt.push_str(&format!(
        "Data: {}\n",
        serde_json::to_string_pretty(&request.data).unwrap_or_else(|_| "null".to_string())
    ));
    prompt.push_str(&format!(
        "ID: {}\n",
        request.cache_id().unwrap_or("N/A")
    ));
    if let Some(prd) = &request.project_prd {
        prompt.push_str(&format!("Project PRD: {prd}\n"));
    }
    if let Some(theme) = &request.theme {
        prompt.push_str(&format!("Theme: {}\n", theme.serialized()));
    }
    prompt.push_str(if request.is_full_page {
        "Type: Full Page UI\n"
    } else {
        "Type: UI Component\n"
    });

    match mode {
        OutputMode::Html => {
            prompt.push_str(
                "\nPlease generate the HTML/Tailwind code based on these details and the system \
                 instructions. Remember to use {{placeholder}} syntax for dynamic data points, and \
                 give images onerror fallbacks to https://placehold.co/.\n",
            );
        }
        OutputMode::ReactJsx => {
            prompt.push_str(
                "\nPlease generate the React JSX component code as a JavaScript string based on \
                 these details and the system instructions. The component should expect a 'data' \
                 prop, map over array data with unique keys, and use onError image fallbacks. \
                 Output ONLY the component code string, without markdown fences or explanations.\n",
            );
        }
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use magicui_core::Theme;

    #[test]
    fn test_user_prompt_carries_request_fields() {
        let mut request = GenerationRequest::new("product_card", "a product card with price");
        request.data = serde_json::json!({"name": "Mug", "price": 9.99});
        request.id = Some("m1".to_string());
        request.project_prd = Some("An e-commerce storefront".to_string());
        request.theme = Some(Theme::Text("dark, rounded".to_string()));

        let prompt = build_user_prompt(&request, OutputMode::Html);
        assert!(prompt.contains("Module Name: product_card"));
        assert!(prompt.contains("Description: a product card with price"));
        assert!(prompt.contains("\"name\": \"Mug\""));
        assert!(prompt.contains("ID: m1"));
        assert!(prompt.contains("Project PRD: An e-commerce storefront"));
        assert!(prompt.contains("Theme: dark, rounded"));
        assert!(prompt.contains("Type: UI Component"));
        assert!(prompt.contains("{{placeholder}}"));
    }

    #[test]
    fn test_full_page_framing() {
        let mut request = GenerationRequest::new("landing", "landing page");
        request.is_full_page = true;
        let prompt = build_user_prompt(&request, OutputMode::Html);
        assert!(prompt.contains("Type: Full Page UI"));
    }

    #[test]
    fn test_jsx_mode_closing_instruction() {
        let request = GenerationRequest::new("card", "a card");
        let prompt = build_user_prompt(&request, OutputMode::ReactJsx);
        assert!(prompt.contains("'data' prop"));
        assert!(!prompt.contains("{{placeholder}}"));
    }

    #[test]
    fn test_system_instruction_selection() {
        assert!(system_instruction(OutputMode::Html).contains("{{ }}"));
        assert!(system_instruction(OutputMode::ReactJsx).contains("React functional component"));
    }
}
