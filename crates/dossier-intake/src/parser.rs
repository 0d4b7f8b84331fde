//! Parse LLM output into extracted fields and category suggestions

use crate::error::IntakeError;
use dossier_domain::{CategorySuggestion, ExtractedFields, Priority};
use serde_json::{Map, Value};
use tracing::warn;

/// Parse an extraction answer into fields
///
/// Missing keys and `null` values become empty fields; only an answer that is
/// not a JSON object at all is an error.
pub fn parse_extracted_fields(response: &str) -> Result<ExtractedFields, IntakeError> {
    let object = parse_object(response)?;
    let fields = serde_json::from_value(Value::Object(object))?;
    Ok(fields)
}

/// Parse a category suggestion answer
pub fn parse_category_suggestion(response: &str) -> Result<CategorySuggestion, IntakeError> {
    let object = parse_object(response)?;

    let suggested_category = object
        .get("suggestedCategory")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            IntakeError::InvalidFormat("Missing or invalid 'suggestedCategory'".to_string())
        })?
        .to_string();

    let reason = object
        .get("reason")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .trim()
        .to_string();

    let priority = match object.get("priority").and_then(|v| v.as_str()) {
        Some(text) => Priority::parse(text).unwrap_or_else(|| {
            warn!("Unknown priority '{}' in suggestion, using medium", text);
            Priority::Medium
        }),
        None => Priority::Medium,
    };

    Ok(CategorySuggestion {
        suggested_category,
        reason,
        priority,
    })
}

fn parse_object(response: &str) -> Result<Map<String, Value>, IntakeError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(json_str)
        .map_err(|e| IntakeError::InvalidFormat(format!("JSON parse error: {}", e)))?;

    match json {
        Value::Object(object) => Ok(object),
        _ => Err(IntakeError::InvalidFormat(
            "Expected JSON object".to_string(),
        )),
    }
}

/// Extract JSON from response, handling markdown code blocks and chatter
/// around the object
fn extract_json(response: &str) -> Result<&str, IntakeError> {
    let mut trimmed = response.trim();

    if let Some(rest) = trimmed.strip_prefix("```") {
        // Drop the fence line (```json or ```) and the closing fence
        let body = rest.split_once('\n').map(|(_, body)| body).ok_or_else(|| {
            IntakeError::InvalidFormat("Empty code block".to_string())
        })?;
        trimmed = body.trim_end().trim_end_matches("```").trim();
    }

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&trimmed[start..=end]),
        _ => Err(IntakeError::InvalidFormat(
            "No JSON object in response".to_string(),
        )),
    }
}
