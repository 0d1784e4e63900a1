//! Prompt composition for recommendation and comparison generations.
//!
//! The output schema is restated in every prompt: the remote model keeps no
//! session state across calls, so each request must carry the full contract.

/// Default role instruction for recommendation prompts
pub const DEFAULT_INSTRUCTION: &str = "You are Spckit AI, an expert assistant that recommends \
PC components tailored to the user's requirements, budget, and intended use. Base every \
recommendation strictly on the retrieved component information you are given.";

/// Compose a recommendation prompt from instruction, context, and query.
///
/// `instruction_override` replaces the default role instruction for this call
/// only. The user query is embedded verbatim; bounding its size is the
/// caller's responsibility.
pub fn build_recommendation_prompt(
    query: &str,
    context: &str,
    instruction_override: Option<&str>,
) -> String {
    let instruction = instruction_override.unwrap_or(DEFAULT_INSTRUCTION);

    format!(
        r#"{instruction}

{context}

User request: "{query}"

Using the retrieved component information above, recommend PC components that match the user's request.

Respond with a JSON object in the following format:
{{
    "analysis": "Detailed analysis of the user's requirements",
    "components": [
        {{
            "category": "Component category",
            "name": "Product name",
            "price": estimated price as a number,
            "features": ["feature 1", "feature 2", "feature 3"],
            "why_recommended": "Reason for the recommendation"
        }}
    ],
    "total_price": total estimated price as a number,
    "additional_notes": "Additional advice and caveats"
}}

IMPORTANT: Do not guess at details missing from the retrieved component information; recommend only from what is provided."#
    )
}

/// Compose a comparison prompt from a context block.
pub fn build_comparison_prompt(context: &str) -> String {
    format!(
        r#"Compare the following PC components:

{context}

Summarize each component's strengths, weaknesses, value for money, and ideal audience as a JSON object:

{{
    "comparison": [
        {{
            "component_name": "Product name",
            "pros": ["strength 1", "strength 2"],
            "cons": ["weakness 1", "weakness 2"],
            "value_for_money": "Price-to-performance assessment",
            "recommended_for": "Who this component suits best"
        }}
    ],
    "best_choice": "The strongest overall option and why",
    "budget_choice": "The best value option and why"
}}"#
    )
}
