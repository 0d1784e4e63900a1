//! Retrieved component records supplied by the retrieval pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A component record returned by the retrieval pipeline.
///
/// The attribute mapping is free-form: `category` and `name` are expected but
/// not required, and arbitrary spec fields (socket, capacity, wattage, ...)
/// may appear alongside retrieval bookkeeping keys. Attribute iteration
/// follows insertion order of the mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievedComponent {
    /// Free-form attribute mapping (category, name, spec fields, ...)
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Similarity score in [0, 1] assigned by the retrieval pipeline
    #[serde(default)]
    pub similarity: f64,
}

impl RetrievedComponent {
    /// Build a component from key/value attribute pairs and a similarity score.
    ///
    /// Convenience for tests and callers that assemble records by hand.
    pub fn from_attributes<I, K, V>(attributes: I, similarity: f64) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let metadata = attributes
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            metadata,
            similarity,
        }
    }
}
