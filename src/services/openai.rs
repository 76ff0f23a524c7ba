//! Blocking client for an OpenAI-compatible chat-completions endpoint.
//!
//! Runs on the orchestrator's worker thread, so the blocking call never
//! touches the UI loop. Transport, authentication, and model selection all
//! come from configuration; the core only sees the [`Translator`] trait.

use std::env;
use std::fmt::Display;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::TranslatorConfig;
use crate::models::SCHEMA_VERSION;
use crate::services::translator::{
    TranslateError, TranslateRequest, Translator, GENERIC_REMOTE_FAILURE,
};

/// Translator backed by an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiTranslator {
    client: Client,
    api_base: String,
    model: String,
    temperature: f32,
    api_key: Option<String>,
    api_key_env: String,
}

impl OpenAiTranslator {
    /// Builds the client from configuration.
    ///
    /// A missing API key is not an error here: the board stays usable and the
    /// failure surfaces on the first submission instead.
    pub fn from_config(config: &TranslatorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client for the translation service")?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            api_key: env::var(&config.api_key_env).ok(),
            api_key_env: config.api_key_env.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

impl Translator for OpenAiTranslator {
    fn translate(&self, request: &TranslateRequest) -> Result<Value, TranslateError> {
        let Some(api_key) = &self.api_key else {
            return Err(TranslateError::RemoteCall(format!(
                "no API key found; set the {} environment variable",
                self.api_key_env
            )));
        };

        let body = json!({
            "model": self.model,
            "temperature": self.temperature,
            "messages": [
                { "role": "system", "content": request.system_instructions },
                { "role": "user", "content": request.prompt }
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": format!("translation_result_v{SCHEMA_VERSION}"),
                    "strict": true,
                    "schema": request.output_schema
                }
            }
        });

        debug!(model = %self.model, prompt_len = request.prompt.len(), "sending translation request");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .map_err(remote_failure)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::RemoteCall(format!(
                "translation service returned HTTP {status}"
            )));
        }

        let envelope: Value = response.json().map_err(remote_failure)?;
        let content = envelope["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                TranslateError::RemoteCall("response carried no message content".to_string())
            })?;

        serde_json::from_str(content).map_err(|err| {
            TranslateError::SchemaValidation(format!("response body is not valid JSON: {err}"))
        })
    }
}

/// Maps a transport error to a remote-call failure, falling back to a generic
/// message when the error has no description of its own.
fn remote_failure(err: impl Display) -> TranslateError {
    let message = err.to_string();
    if message.trim().is_empty() {
        TranslateError::RemoteCall(GENERIC_REMOTE_FAILURE.to_string())
    } else {
        TranslateError::RemoteCall(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslatorConfig;

    #[test]
    fn test_missing_api_key_fails_without_remote_call() {
        let config = TranslatorConfig {
            api_key_env: "SEANCE_TEST_KEY_THAT_IS_NOT_SET".to_string(),
            ..TranslatorConfig::default()
        };
        let translator = OpenAiTranslator::from_config(&config).unwrap();
        let err = translator
            .translate(&TranslateRequest::for_prompt("ABX"))
            .unwrap_err();
        match err {
            TranslateError::RemoteCall(message) => {
                assert!(message.contains("SEANCE_TEST_KEY_THAT_IS_NOT_SET"));
            }
            other => panic!("expected RemoteCall, got {other:?}"),
        }
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = TranslatorConfig {
            api_base: "https://example.test/v1/".to_string(),
            ..TranslatorConfig::default()
        };
        let translator = OpenAiTranslator::from_config(&config).unwrap();
        assert_eq!(translator.endpoint(), "https://example.test/v1/chat/completions");
    }
}
