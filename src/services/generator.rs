//! Generation orchestration and structured response decoding.
//!
//! The decoder is deliberately asymmetric: a recommendation that fails to
//! parse degrades to a result carrying the raw text as its analysis, while a
//! comparison that fails to parse escalates. A degraded comparison has no
//! useful content; a degraded recommendation at least carries the analysis.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::errors::GenerationError;
use crate::domain::models::{
    ComparisonResult, GenerationConfig, RecommendationResult, RetrievedComponent,
};
use crate::domain::ports::{GenerationApi, GenerationParams};
use crate::services::context::build_context;
use crate::services::extract_json_from_response;
use crate::services::prompt::{build_comparison_prompt, build_recommendation_prompt};

/// Number of leading characters of a raw response kept for diagnostics
const RESPONSE_PREFIX_LEN: usize = 80;

/// Generation orchestrator
///
/// Formats retrieved components into a context block, composes the prompt,
/// calls the generation port, and decodes the structured answer. Stateless
/// between calls; safe to share across concurrent requests.
pub struct RecommendationGenerator {
    api: Arc<dyn GenerationApi>,
    config: GenerationConfig,
}

impl RecommendationGenerator {
    /// Create a new generator over a transport implementation
    pub fn new(api: Arc<dyn GenerationApi>, config: GenerationConfig) -> Self {
        Self { api, config }
    }

    /// Generate a recommendation for a user query over retrieved components.
    ///
    /// A response that violates the requested JSON schema degrades to a
    /// result whose analysis is the raw model output; only transport failures
    /// escalate.
    pub async fn generate_recommendation(
        &self,
        user_query: &str,
        components: &[RetrievedComponent],
        instruction_override: Option<&str>,
    ) -> Result<RecommendationResult, GenerationError> {
        let context = build_context(components);
        let prompt = build_recommendation_prompt(user_query, &context, instruction_override);
        let params = GenerationParams {
            temperature: self.config.temperature,
            max_output_tokens: self.config.max_output_tokens,
        };

        let raw = self.api.generate_content(&prompt, &params).await?;
        info!(
            "recommendation generated for query '{}'",
            query_prefix(user_query)
        );
        Ok(decode_recommendation(&raw))
    }

    /// Generate a comparison across retrieved components.
    ///
    /// Unlike recommendations, a schema violation here escalates as a decode
    /// error.
    pub async fn generate_comparison(
        &self,
        components: &[RetrievedComponent],
    ) -> Result<ComparisonResult, GenerationError> {
        let context = build_context(components);
        let prompt = build_comparison_prompt(&context);
        let params = GenerationParams {
            temperature: self.config.comparison_temperature,
            max_output_tokens: self.config.max_output_tokens,
        };

        let raw = self.api.generate_content(&prompt, &params).await?;
        info!("comparison generated for {} components", components.len());
        decode_comparison(&raw)
    }
}

/// Decode a recommendation from raw model output.
///
/// Falls back to a degraded result when the output does not parse: the
/// analysis holds the raw text verbatim, the component list is empty, and the
/// total price is zero. The caller always receives a well-typed result.
pub fn decode_recommendation(raw: &str) -> RecommendationResult {
    let json_str = extract_json_from_response(raw);
    match serde_json::from_str::<RecommendationResult>(&json_str) {
        Ok(result) => result,
        Err(err) => {
            error!("recommendation response was not valid JSON, degrading: {err}");
            RecommendationResult {
                analysis: raw.to_string(),
                components: Vec::new(),
                total_price: 0.0,
                additional_notes: None,
            }
        }
    }
}

/// Decode a comparison from raw model output.
///
/// No fallback: a parse failure propagates as
/// [`GenerationError::Decode`].
pub fn decode_comparison(raw: &str) -> Result<ComparisonResult, GenerationError> {
    let json_str = extract_json_from_response(raw);
    serde_json::from_str::<ComparisonResult>(&json_str).map_err(|err| {
        error!("comparison response was not valid JSON: {err}");
        GenerationError::Decode {
            reason: err.to_string(),
            response_prefix: raw.chars().take(RESPONSE_PREFIX_LEN).collect(),
        }
    })
}

fn query_prefix(query: &str) -> String {
    query.chars().take(50).collect()
}
