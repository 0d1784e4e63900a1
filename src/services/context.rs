//! Context formatter: retrieved component records to a bounded text block.

use serde_json::Value;

use crate::domain::models::RetrievedComponent;

/// Fixed sentinel returned when no components were retrieved
pub const NO_RESULTS_SENTINEL: &str = "No matching components were found.";

/// Retrieval bookkeeping keys never shown to the model.
///
/// `category` and `name` are excluded here only because they are already
/// rendered in the block header.
const EXCLUDED_KEYS: [&str; 6] = [
    "category",
    "name",
    "id",
    "source",
    "created_at",
    "updated_at",
];

/// Build a human-readable context block from retrieved components.
///
/// One block per component, 1-indexed, listing category, name, similarity as
/// a percentage with two decimals, then every remaining non-empty attribute
/// in the record's insertion order.
pub fn build_context(components: &[RetrievedComponent]) -> String {
    if components.is_empty() {
        return NO_RESULTS_SENTINEL.to_string();
    }

    let mut sections = vec!["### Retrieved PC component information:".to_string()];

    for (index, component) in components.iter().enumerate() {
        let metadata = &component.metadata;
        let mut lines = vec![
            format!("\n[Component {}]", index + 1),
            format!("- category: {}", attribute_text(metadata.get("category"))),
            format!("- name: {}", attribute_text(metadata.get("name"))),
            format!("- similarity: {:.2}%", component.similarity * 100.0),
        ];

        for (key, value) in metadata {
            if EXCLUDED_KEYS.contains(&key.as_str()) || is_empty(value) {
                continue;
            }
            lines.push(format!("- {}: {}", key, render_value(value)));
        }

        sections.push(lines.join("\n"));
    }

    sections.join("\n")
}

fn attribute_text(value: Option<&Value>) -> String {
    match value {
        Some(value) if !is_empty(value) => render_value(value),
        _ => "N/A".to_string(),
    }
}

/// Strings render without surrounding quotes; everything else as JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
