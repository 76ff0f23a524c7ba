//! Translator seam between the orchestrator and the remote language service.
//!
//! The remote call is treated as an opaque procedure that accepts a prompt
//! and returns JSON. The trait keeps the orchestrator testable with stubs and
//! keeps transport details out of the core.

use serde_json::Value;
use thiserror::Error;

use crate::models::TranslationResult;
use crate::services::validator::ValidationError;

/// Persona instructions sent with every translation request.
///
/// The remote model is asked to treat the composed letters as a message worth
/// decoding, never dismissing the input as noise, and to answer in the fixed
/// three-part shape: translation, interpretation steps, spiritual message.
pub const SYSTEM_INSTRUCTIONS: &str = "\
You are a spiritual text translator. Transform the user's gibberish into a \
meaningful spiritual reading in three steps: \
1. Translate the gibberish into a single, coherent, profound spiritual or \
philosophical sentence, using intuitive, symbolic, and phonetic \
interpretation to uncover hidden meaning, metaphor, or poetic essence. \
2. Provide a short ordered list of interpretation steps explaining how \
specific letters, sounds, or patterns were read, bolding the interpreted \
elements with markdown. \
3. Distill the meaning into a simplified, gentle spiritual message that \
expresses what the spirit may be trying to convey in clear, compassionate \
terms. \
Never dismiss the input as random noise; always find a meaningful \
interpretation, even if abstract or mystical. \
Respond with a JSON object holding exactly three keys: \"translation\", \
\"interpretation\", and \"spiritualMessage\".";

/// One translation request: the composed text plus the fixed persona and the
/// schema the response must conform to.
#[derive(Debug, Clone)]
pub struct TranslateRequest {
    /// The full composed text, sent verbatim as the prompt.
    pub prompt: String,
    /// Fixed persona text sent as system instructions.
    pub system_instructions: String,
    /// JSON Schema the response is constrained to.
    pub output_schema: Value,
}

impl TranslateRequest {
    /// Builds the request for a composed text, attaching the persona and the
    /// active result schema.
    #[must_use]
    pub fn for_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instructions: SYSTEM_INSTRUCTIONS.to_string(),
            output_schema: TranslationResult::output_schema(),
        }
    }
}

/// Failure modes of one translation attempt.
///
/// All variants surface to the user in place of a result; none are retried
/// automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// The composed text was empty after trimming. Rejected locally, before
    /// any remote call.
    #[error("there is nothing to translate yet")]
    EmptyInput,
    /// The remote call itself failed (network, timeout, or service error).
    #[error("{0}")]
    RemoteCall(String),
    /// A response arrived but did not conform to the result schema.
    #[error("the translation arrived in an unreadable form: {0}")]
    SchemaValidation(String),
}

impl From<ValidationError> for TranslateError {
    fn from(err: ValidationError) -> Self {
        Self::SchemaValidation(err.0)
    }
}

/// Message used when a remote failure carries no description of its own.
pub const GENERIC_REMOTE_FAILURE: &str = "the translation service did not respond";

/// The single capability the orchestrator needs from a remote client.
///
/// Implementations perform exactly one remote call per invocation and return
/// the raw response payload; schema validation happens in the orchestrator.
pub trait Translator: Send + Sync {
    /// Performs one translation call and returns the raw response payload.
    fn translate(&self, request: &TranslateRequest) -> Result<Value, TranslateError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_carries_persona_and_schema() {
        let request = TranslateRequest::for_prompt("XQZZT");
        assert_eq!(request.prompt, "XQZZT");
        assert!(request.system_instructions.contains("spiritual text translator"));
        assert!(request.output_schema["required"].is_array());
    }

    #[test]
    fn test_validation_error_converts() {
        let err: TranslateError = ValidationError("missing field 'translation'".to_string()).into();
        assert!(matches!(err, TranslateError::SchemaValidation(_)));
    }
}
