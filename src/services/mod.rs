//! Service layer: the recommendation core's four components.
//!
//! - [`embedder`]: retry/backoff embedding client with batch fallback
//! - [`context`]: retrieved-record to context-block formatting
//! - [`prompt`]: prompt composition with restated output schemas
//! - [`generator`]: generation orchestration and response decoding

pub mod context;
pub mod embedder;
pub mod generator;
pub mod prompt;
pub mod response_shape;

pub use context::{build_context, NO_RESULTS_SENTINEL};
pub use embedder::Embedder;
pub use generator::{decode_comparison, decode_recommendation, RecommendationGenerator};
pub use prompt::{build_comparison_prompt, build_recommendation_prompt, DEFAULT_INSTRUCTION};

/// Extract a JSON object from a response that might have surrounding text.
///
/// Models asked for JSON sometimes wrap it in prose or a code fence; taking
/// the outermost brace pair recovers the object in both cases. Returns the
/// trimmed input unchanged when no object is found.
pub fn extract_json_from_response(response: &str) -> String {
    let trimmed = response.trim();

    // If it already looks like JSON, use it directly
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return trimmed.to_string();
    }

    // Try to find a JSON object in the response
    if let Some(start) = trimmed.find('{') {
        if let Some(end) = trimmed.rfind('}') {
            if end > start {
                return trimmed[start..=end].to_string();
            }
        }
    }

    // Return as-is if no JSON found
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_plain() {
        let input = r#"{"analysis": "test"}"#;
        assert_eq!(extract_json_from_response(input), r#"{"analysis": "test"}"#);
    }

    #[test]
    fn test_extract_json_code_block() {
        let input = "```json\n{\"analysis\": \"test\"}\n```";
        assert_eq!(extract_json_from_response(input), r#"{"analysis": "test"}"#);
    }

    #[test]
    fn test_extract_json_with_surrounding_prose() {
        let input = "Here is the result:\n{\"analysis\": \"test\"}\nHope that helps!";
        assert_eq!(extract_json_from_response(input), r#"{"analysis": "test"}"#);
    }

    #[test]
    fn test_extract_json_none_found() {
        let input = "  plain text answer  ";
        assert_eq!(extract_json_from_response(input), "plain text answer");
    }
}
