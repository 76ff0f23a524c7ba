//! Translation result and error models.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Active version of the translation result schema.
///
/// Version 1 is the three-field shape. The remote service has also produced
/// a four-field shape with per-word insights at times; that shape is rejected
/// by validation rather than coerced.
pub const SCHEMA_VERSION: u8 = 1;

/// A structured translation returned by the remote service.
///
/// All three fields are required and non-empty for a result to be accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TranslationResult {
    /// The single coherent spiritual sentence decoded from the input.
    pub translation: String,
    /// Ordered interpretation steps explaining how letters and sounds were read.
    pub interpretation: Vec<String>,
    /// The distilled, gentle message for the user.
    pub spiritual_message: String,
}

impl TranslationResult {
    /// JSON Schema describing the version-1 result shape, sent with each
    /// request so the remote service constrains its output to it.
    #[must_use]
    pub fn output_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "translation": { "type": "string" },
                "interpretation": {
                    "type": "array",
                    "items": { "type": "string" }
                },
                "spiritualMessage": { "type": "string" }
            },
            "required": ["translation", "interpretation", "spiritualMessage"],
            "additionalProperties": false
        })
    }
}

/// User-facing failure detail shown in place of a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    /// Human-readable description of what went wrong.
    pub message: String,
}

impl ErrorDetail {
    /// Creates an error detail from any printable message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
