//! Parsing of oracle replies into candidate themes.
//!
//! Models often wrap the JSON document in prose or code fences. The reply
//! is tried as strict JSON first, then the first balanced `{...}` object
//! found in the text.

use crate::error::{OracleError, OracleResult};
use crate::types::{CandidateTheme, ThemeDocument};

/// Extract candidate themes from raw model output.
pub fn parse_theme_response(raw: &str) -> OracleResult<Vec<CandidateTheme>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(OracleError::MalformedResponse("empty reply".into()));
    }

    if let Ok(doc) = serde_json::from_str::<ThemeDocument>(trimmed) {
        return Ok(clean(doc));
    }

    let embedded = extract_first_json_object(trimmed)
        .ok_or_else(|| OracleError::MalformedResponse("no JSON object in reply".into()))?;

    serde_json::from_str::<ThemeDocument>(&embedded)
        .map(clean)
        .map_err(|e| OracleError::MalformedResponse(e.to_string()))
}

fn clean(doc: ThemeDocument) -> Vec<CandidateTheme> {
    doc.themes
        .into_iter()
        .filter(|t| !t.name.trim().is_empty())
        .collect()
}

/// First balanced `{...}` span, string-literal aware.
fn extract_first_json_object(raw: &str) -> Option<String> {
    let start = raw.find('{')?;
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in raw[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(raw[start..start + idx + 1].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{"themes": [{"name": "Gift Cards", "description": "Buying and redeeming gift cards",
        "examples": ["can I buy a gift card"], "distinction": "No payment intent covers vouchers"}]}"#;

    #[test]
    fn parses_strict_json() {
        let themes = parse_theme_response(DOC).unwrap();
        assert_eq!(themes.len(), 1);
        assert_eq!(themes[0].name, "Gift Cards");
        assert_eq!(themes[0].examples, vec!["can I buy a gift card"]);
    }

    #[test]
    fn parses_fenced_json() {
        let raw = format!("Here is my analysis:\n```json\n{}\n```\nLet me know!", DOC);
        let themes = parse_theme_response(&raw).unwrap();
        assert_eq!(themes[0].distinction, "No payment intent covers vouchers");
    }

    #[test]
    fn braces_inside_strings_do_not_end_object() {
        let raw = r#"Result: {"themes": [{"name": "Odd {brace}", "description": "has a \" quote }"}]} trailing {"#;
        let themes = parse_theme_response(raw).unwrap();
        assert_eq!(themes[0].name, "Odd {brace}");
    }

    #[test]
    fn drops_nameless_candidates() {
        let themes = parse_theme_response(r#"{"themes": [{"name": " "}, {"name": "Shipping"}]}"#).unwrap();
        assert_eq!(themes.len(), 1);
    }

    #[test]
    fn rejects_prose_and_empty() {
        assert!(matches!(
            parse_theme_response("I could not find any themes."),
            Err(OracleError::MalformedResponse(_))
        ));
        assert!(matches!(parse_theme_response("   "), Err(OracleError::MalformedResponse(_))));
        assert!(matches!(
            parse_theme_response("{\"themes\": [ {\"name\": "),
            Err(OracleError::MalformedResponse(_))
        ));
    }

    #[test]
    fn missing_themes_key_is_empty() {
        assert!(parse_theme_response("{}").unwrap().is_empty());
    }
}
