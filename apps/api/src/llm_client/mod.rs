//! LLM Client — the single point of entry for hosted text-generation calls.
//!
//! Talks to a Hugging Face style inference endpoint: one POST per request,
//! no automatic retries. A 503 means the model is still loading and is
//! reported separately so callers can tell the user to wait.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

const MAX_NEW_TOKENS: u32 = 600;
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.9;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model is still loading")]
    ModelLoading,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
    options: GenerationOptions,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
    top_p: f32,
    do_sample: bool,
    return_full_text: bool,
}

#[derive(Debug, Serialize)]
struct GenerationOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// Either `[{"generated_text": ...}, ...]` or `{"generated_text": ...}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerationResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
}

impl GenerationResponse {
    fn into_text(self) -> Option<String> {
        match self {
            GenerationResponse::Batch(items) => items.into_iter().next().map(|g| g.generated_text),
            GenerationResponse::Single(g) => Some(g.generated_text),
        }
    }
}

/// Pulls the generated text out of a decoded response body.
pub fn extract_generated_text(body: &Value) -> Result<String, LlmError> {
    serde_json::from_value::<GenerationResponse>(body.clone())
        .ok()
        .and_then(GenerationResponse::into_text)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| LlmError::UnexpectedShape(body.to_string()))
}

/// Client for the hosted text-generation endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl LlmClient {
    /// `timeout` of `None` leaves the transport default in place.
    pub fn new(
        api_url: String,
        token: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, LlmError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            api_url,
            token,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Sends one prompt and returns the generated text.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = GenerationRequest {
            inputs: prompt,
            parameters: GenerationParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                temperature: TEMPERATURE,
                top_p: TOP_P,
                do_sample: true,
                return_full_text: false,
            },
            options: GenerationOptions {
                wait_for_model: true,
            },
        };

        let mut request = self.client.post(&self.api_url).json(&request_body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::SERVICE_UNAVAILABLE {
            warn!("Hugging Face API returned {}: model is loading", status);
            return Err(LlmError::ModelLoading);
        }

        if !status.is_success() {
            let body = response.text().await.map_err(|e| {
                warn!("Hugging Face API returned {} with an unreadable body: {}", status, e);
                e
            })?;
            warn!("Hugging Face API returned {}: {}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: Value = response.json().await?;
        let text = extract_generated_text(&body)?;

        debug!("Generation succeeded: {} chars", text.chars().count());
        Ok(text)
    }
}
