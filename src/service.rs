//! Cloudflare Workers AI client for generating translations.
//!
//! Replies come doubly wrapped: the HTTP body is an envelope whose
//! `result.response` field is itself a JSON document containing the
//! actual translation under a `response` key. Both layers are decoded
//! here so the rest of the crate only ever sees a [`GenerationResult`].

use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Errors from one generation attempt. All variants are retryable; the
/// review loop decides how long to keep trying.
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("service returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("reply envelope had no result.response text")]
    EmptyReply,

    #[error("reply payload was not the expected JSON: {0}")]
    MalformedPayload(String),

    #[error("reply contained an empty translation")]
    EmptyTranslation,
}

/// The decoded inner payload of a successful generation.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GenerationResult {
    pub response: String,
}

/// Something that can turn a prompt into a translation.
///
/// The review loop is written against this trait so tests can drive it
/// with a scripted generator instead of a live endpoint.
pub trait Generator {
    fn generate(&self, prompt: &str) -> std::result::Result<GenerationResult, ServiceError>;
}

/// HTTP envelope around the model output.
#[derive(Debug, Deserialize)]
struct ServiceReply {
    result: Option<ReplyResult>,
}

#[derive(Debug, Deserialize)]
struct ReplyResult {
    response: Option<String>,
}

/// Decode a raw HTTP body into a [`GenerationResult`].
///
/// Stage one parses the envelope and extracts `result.response`; stage
/// two parses that string as the model's own JSON document. A reply that
/// survives both stages but carries a whitespace-only translation is
/// still an error, since persisting it would poison the corpus.
pub fn parse_reply(body: &str) -> std::result::Result<GenerationResult, ServiceError> {
    let envelope: ServiceReply = serde_json::from_str(body)
        .map_err(|e| ServiceError::MalformedPayload(format!("envelope: {}", e)))?;

    let inner = envelope
        .result
        .and_then(|r| r.response)
        .ok_or(ServiceError::EmptyReply)?;
    if inner.trim().is_empty() {
        return Err(ServiceError::EmptyReply);
    }

    let result: GenerationResult = serde_json::from_str(&inner)
        .map_err(|e| ServiceError::MalformedPayload(format!("model output: {}", e)))?;
    if result.response.trim().is_empty() {
        return Err(ServiceError::EmptyTranslation);
    }

    Ok(result)
}

/// Blocking client for the Workers AI REST endpoint.
pub struct WorkersAiClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    token: String,
}

impl WorkersAiClient {
    /// Build a client for one account/model pair.
    ///
    /// With no timeout configured, requests wait indefinitely; slow model
    /// inference is normal and the operator can always interrupt.
    pub fn new(
        api_base: &str,
        account_id: &str,
        model: &str,
        token: String,
        timeout_secs: Option<u64>,
    ) -> crate::error::Result<Self> {
        let mut builder = reqwest::blocking::Client::builder();
        builder = match timeout_secs {
            Some(secs) => builder.timeout(Duration::from_secs(secs)),
            None => builder.timeout(None),
        };
        let http = builder.build().map_err(|e| {
            crate::error::DeslangError::UserError(format!("failed to build HTTP client: {}", e))
        })?;

        let endpoint = format!(
            "{}/{}/ai/run/{}",
            api_base.trim_end_matches('/'),
            account_id,
            model
        );

        Ok(Self {
            http,
            endpoint,
            token,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Generator for WorkersAiClient {
    fn generate(&self, prompt: &str) -> std::result::Result<GenerationResult, ServiceError> {
        // The prompt rides in both message slots; the model sees the
        // instructions as system context and as the user turn.
        let body = json!({
            "messages": [
                { "role": "system", "content": prompt },
                { "role": "user", "content": prompt },
            ]
        });

        let reply = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = reply.status();
        let text = reply
            .text()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ServiceError::Api {
                status: status.as_u16(),
                body: snippet(&text),
            });
        }

        parse_reply(&text)
    }
}

/// First checkpoint of a possibly huge error body.
fn snippet(text: &str) -> String {
    const LIMIT: usize = 200;
    let trimmed = text.trim();
    if trimmed.chars().count() <= LIMIT {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(LIMIT).collect();
        format!("{}...", cut)
    }
}
