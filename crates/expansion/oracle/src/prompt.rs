//! Prompt construction for theme discovery.

use crate::types::OracleContext;

/// Upper bound on message samples placed in one prompt.
pub const MAX_PROMPT_SAMPLES: usize = 50;

pub const SYSTEM_PROMPT: &str =
    "You are an expert at analyzing customer service patterns and intent classification.";

/// Build the user prompt asking for 3-5 uncovered themes as JSON.
pub fn build_theme_prompt(samples: &[String], context: &OracleContext) -> String {
    let intents = context
        .existing_intents
        .iter()
        .map(|i| {
            let name = if i.name.trim().is_empty() { "Unknown" } else { i.name.as_str() };
            let description = if i.description.trim().is_empty() {
                "No description"
            } else {
                i.description.as_str()
            };
            format!("- {}: {}", name, description)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let messages = samples
        .iter()
        .take(MAX_PROMPT_SAMPLES)
        .map(|m| format!("- {}", m))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Analyze the following customer messages and identify common themes or patterns that are NOT well covered by the existing intent categories.

EXISTING INTENTS:
{intents}

CUSTOMER MESSAGES:
{messages}

Identify 3-5 distinct themes in these messages that might warrant new intent categories. For each theme:
1. Name the theme
2. Describe what customers are asking about
3. List 2-3 example messages
4. Explain why this is distinct from existing intents

Respond in JSON format:
{{
    "themes": [
        {{
            "name": "Theme Name",
            "description": "What this theme covers",
            "examples": ["example1", "example2"],
            "distinction": "Why this is different from existing intents"
        }}
    ]
}}"#
    )
}
