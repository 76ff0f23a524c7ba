//! Strict validation of raw translation payloads.
//!
//! The remote service is asked for a schema-constrained response, but the
//! payload is still checked field by field before it is accepted as a result.
//! Partial or malformed payloads are rejected rather than coerced.

use serde_json::Value;
use thiserror::Error;

use crate::models::TranslationResult;

/// A payload's failure to conform to the active result schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Fields permitted by the version-1 schema.
const ALLOWED_FIELDS: [&str; 3] = ["translation", "interpretation", "spiritualMessage"];

/// Validates a raw payload against the version-1 result schema.
///
/// Requires all three fields, with non-empty strings and a non-empty
/// interpretation sequence, and rejects unknown fields so that other schema
/// generations (such as the four-field per-word shape) are never silently
/// accepted. No network or state side effects.
pub fn validate(raw: &Value) -> Result<TranslationResult, ValidationError> {
    let object = raw
        .as_object()
        .ok_or_else(|| ValidationError::new("payload is not a JSON object"))?;

    if let Some(unknown) = object.keys().find(|key| !ALLOWED_FIELDS.contains(&key.as_str())) {
        return Err(ValidationError::new(format!(
            "payload carries unknown field '{unknown}'"
        )));
    }

    let translation = require_text(object, "translation")?;
    let spiritual_message = require_text(object, "spiritualMessage")?;

    let interpretation_raw = object
        .get("interpretation")
        .ok_or_else(|| ValidationError::new("missing field 'interpretation'"))?
        .as_array()
        .ok_or_else(|| ValidationError::new("field 'interpretation' is not an array"))?;
    if interpretation_raw.is_empty() {
        return Err(ValidationError::new("field 'interpretation' is empty"));
    }
    let mut interpretation = Vec::with_capacity(interpretation_raw.len());
    for (index, step) in interpretation_raw.iter().enumerate() {
        let text = step.as_str().ok_or_else(|| {
            ValidationError::new(format!("interpretation step {index} is not a string"))
        })?;
        if text.trim().is_empty() {
            return Err(ValidationError::new(format!(
                "interpretation step {index} is empty"
            )));
        }
        interpretation.push(text.to_string());
    }

    Ok(TranslationResult {
        translation,
        interpretation,
        spiritual_message,
    })
}

fn require_text(
    object: &serde_json::Map<String, Value>,
    field: &str,
) -> Result<String, ValidationError> {
    let value = object
        .get(field)
        .ok_or_else(|| ValidationError::new(format!("missing field '{field}'")))?;
    let text = value
        .as_str()
        .ok_or_else(|| ValidationError::new(format!("field '{field}' is not a string")))?;
    if text.trim().is_empty() {
        return Err(ValidationError::new(format!("field '{field}' is empty")));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn well_formed() -> Value {
        json!({
            "translation": "The stone speaks in patience",
            "interpretation": [
                "**ST** carries the weight of stone",
                "the repeated vowels slow the breath"
            ],
            "spiritualMessage": "Move slowly and you will be heard"
        })
    }

    #[test]
    fn test_accepts_well_formed_payload() {
        let result = validate(&well_formed()).unwrap();
        assert_eq!(result.translation, "The stone speaks in patience");
        assert_eq!(result.interpretation.len(), 2);
        assert_eq!(result.spiritual_message, "Move slowly and you will be heard");
    }

    #[test]
    fn test_rejects_missing_spiritual_message() {
        let mut payload = well_formed();
        payload.as_object_mut().unwrap().remove("spiritualMessage");
        let err = validate(&payload).unwrap_err();
        assert!(err.0.contains("spiritualMessage"));
    }

    #[test]
    fn test_rejects_empty_translation() {
        let mut payload = well_formed();
        payload["translation"] = json!("   ");
        assert!(validate(&payload).is_err());
    }

    #[test]
    fn test_rejects_wrong_interpretation_type() {
        let mut payload = well_formed();
        payload["interpretation"] = json!("a single string, not a list");
        let err = validate(&payload).unwrap_err();
        assert!(err.0.contains("interpretation"));
    }

    #[test]
    fn test_rejects_empty_interpretation_list() {
        let mut payload = well_formed();
        payload["interpretation"] = json!([]);
        assert!(validate(&payload).is_err());
    }

    #[test]
    fn test_rejects_other_schema_generation() {
        let mut payload = well_formed();
        payload.as_object_mut().unwrap().insert(
            "wordInsights".to_string(),
            json!([{ "word": "om", "insight": "a beginning" }]),
        );
        let err = validate(&payload).unwrap_err();
        assert!(err.0.contains("wordInsights"));
    }

    #[test]
    fn test_rejects_non_object_payload() {
        assert!(validate(&json!("not an object")).is_err());
        assert!(validate(&json!(null)).is_err());
    }
}
