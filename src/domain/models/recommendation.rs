//! Structured result entities decoded from model responses.
//!
//! These mirror the output schemas requested in the prompts. Every field
//! carries a serde default so a model response that omits optional fields
//! still decodes; a response that is not a JSON object at all does not.

use serde::{Deserialize, Serialize};

/// A structured recommendation produced from a model response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationResult {
    /// Analysis of the user's requirements. On decode fallback this holds the
    /// raw model output verbatim.
    #[serde(default)]
    pub analysis: String,
    /// Recommended components, in the order the model listed them
    #[serde(default)]
    pub components: Vec<RecommendedComponent>,
    /// Total estimated price across all recommended components
    #[serde(default)]
    pub total_price: f64,
    /// Additional advice and caveats
    #[serde(default)]
    pub additional_notes: Option<String>,
}

/// A single recommended component entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendedComponent {
    /// Component category (cpu, gpu, memory, ...)
    #[serde(default)]
    pub category: String,
    /// Product name
    #[serde(default)]
    pub name: String,
    /// Estimated price
    #[serde(default)]
    pub price: f64,
    /// Notable features
    #[serde(default)]
    pub features: Vec<String>,
    /// Why this component fits the request
    #[serde(default)]
    pub why_recommended: String,
}

/// A structured comparison across several components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Per-component assessments, in the order the model listed them
    #[serde(default)]
    pub comparison: Vec<ComponentComparison>,
    /// The strongest overall option and why
    #[serde(default)]
    pub best_choice: String,
    /// The best value option and why
    #[serde(default)]
    pub budget_choice: String,
}

/// Pros/cons assessment for one compared component
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentComparison {
    /// Product name
    #[serde(default)]
    pub component_name: String,
    /// Strengths
    #[serde(default)]
    pub pros: Vec<String>,
    /// Weaknesses
    #[serde(default)]
    pub cons: Vec<String>,
    /// Price-to-performance assessment
    #[serde(default)]
    pub value_for_money: String,
    /// Who this component suits best
    #[serde(default)]
    pub recommended_for: String,
}
