//! Placeholder substitution for templated HTML artifacts
//!
//! Generated HTML carries `{{fieldName}}` tokens for dynamic values. At
//! render time every top-level field of the runtime data is substituted
//! globally, and whatever remains unresolved is blanked out. A leftover
//! literal `{{...}}` in the displayed output is a display correctness bug.

use regex::Regex;

/// Substitute runtime data into a template.
///
/// Object data replaces each `{{key}}` occurrence with the field value.
/// Array data repeats the whole template once per element and concatenates
/// the fragments. Any other data shape leaves the template untouched apart
/// from the final blanking pass.
pub fn render_template(template: &str, data: &serde_json::Value) -> String {
    let rendered = match data {
        serde_json::Value::Array(items) => {
            let mut aggregated = String::new();
            for item in items {
                aggregated.push_str(&substitute_fields(template, item));
            }
            aggregated
        }
        other => substitute_fields(template, other),
    };

    blank_unresolved(&rendered)
}

/// Replace `{{key}}` globally for each top-level field of an object.
fn substitute_fields(template: &str, data: &serde_json::Value) -> String {
    let serde_json::Value::Object(fields) = data else {
        return template.to_string();
    };

    let mut rendered = template.to_string();
    for (key, value) in fields {
        let pattern = format!(r"\{{\{{\s*{}\s*\}}\}}", regex::escape(key));
        let placeholder = Regex::new(&pattern).unwrap();
        rendered = placeholder
            .replace_all(&rendered, display_value(value).as_str())
            .into_owned();
    }
    rendered
}

/// Remove every placeholder that survived substitution.
fn blank_unresolved(rendered: &str) -> String {
    let leftover = Regex::new(r"\{\{\s*[^}]+\s*\}\}").unwrap();
    leftover.replace_all(rendered, "").into_owned()
}

/// Display form of a field value: strings verbatim, null empty, everything
/// else as JSON.
fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
