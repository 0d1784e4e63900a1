//! Classification of batch embedding response payloads.
//!
//! The remote batch endpoint's contract is not guaranteed stable: depending on
//! model and endpoint version, a batch call may answer with a nested list of
//! vectors, a keyed `embeddings` field, or a single flat vector when the
//! service silently ignored batching. A pure classification step maps the raw
//! payload to a tagged shape so the embedder's fallback control flow never has
//! to sniff JSON itself.

use serde_json::Value;

/// Tagged shape of a batch embedding response payload
#[derive(Debug, Clone, PartialEq)]
pub enum BatchResponseShape {
    /// One flat numeric vector. For a multi-text chunk this signals that the
    /// service ignored batching and answered for a single input.
    SingleVector(Vec<f32>),
    /// A nested sequence of vectors, one per input
    VectorList(Vec<Vec<f32>>),
    /// Vectors found under an `embeddings` key
    KeyedList(Vec<Vec<f32>>),
    /// Anything that does not match a known shape
    Unrecognized,
}

impl BatchResponseShape {
    /// Short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SingleVector(_) => "single-vector",
            Self::VectorList(_) => "vector-list",
            Self::KeyedList(_) => "keyed-list",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// Classify a raw batch response payload into a [`BatchResponseShape`].
///
/// Pure function: no I/O, no failure signaling. Unexpected payloads map to
/// [`BatchResponseShape::Unrecognized`] rather than an error.
pub fn classify_batch_response(payload: &Value) -> BatchResponseShape {
    // Keyed form: {"embeddings": [...]}
    if let Some(keyed) = payload.get("embeddings").and_then(Value::as_array) {
        return match vectors_from_items(keyed) {
            Some(vectors) => BatchResponseShape::KeyedList(vectors),
            None => BatchResponseShape::Unrecognized,
        };
    }

    // Singleton form: {"embedding": {"values": [...]}} or {"embedding": [...]}
    if let Some(single) = payload.get("embedding") {
        return match vector_from_item(single) {
            Some(vector) => BatchResponseShape::SingleVector(vector),
            None => BatchResponseShape::Unrecognized,
        };
    }

    if let Some(items) = payload.as_array() {
        // A flat numeric sequence is one vector, not a batch
        if !items.is_empty() && items.iter().all(Value::is_number) {
            return match numeric_vector(items) {
                Some(vector) => BatchResponseShape::SingleVector(vector),
                None => BatchResponseShape::Unrecognized,
            };
        }
        return match vectors_from_items(items) {
            Some(vectors) => BatchResponseShape::VectorList(vectors),
            None => BatchResponseShape::Unrecognized,
        };
    }

    BatchResponseShape::Unrecognized
}

/// Extract one vector from an item that is either a flat numeric array or an
/// object carrying a `values` array.
fn vector_from_item(item: &Value) -> Option<Vec<f32>> {
    match item {
        Value::Array(numbers) => numeric_vector(numbers),
        Value::Object(map) => numeric_vector(map.get("values")?.as_array()?),
        _ => None,
    }
}

fn vectors_from_items(items: &[Value]) -> Option<Vec<Vec<f32>>> {
    items.iter().map(vector_from_item).collect()
}

fn numeric_vector(numbers: &[Value]) -> Option<Vec<f32>> {
    numbers
        .iter()
        .map(|number| number.as_f64().map(|value| value as f32))
        .collect()
}
