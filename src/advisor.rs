use crate::config::Settings;
use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Returned when the completion service answers with nothing usable.
pub const NO_CHOICES: &str = "No completion choices found.";

pub const MAX_TOKENS: u32 = 150;

/// Turns a prompt into advisory text.
#[async_trait]
pub trait Advisor: Send + Sync {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    max_tokens: u32,
}

/// Client for a text-completion endpoint speaking the `choices[].text` response shape.
pub struct CompletionClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl CompletionClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: settings.completions_url.clone(),
            api_key: settings.api_key.clone(),
        }
    }
}

/// Pull `choices[0].text` out of a decoded response body, falling back to [`NO_CHOICES`].
pub fn first_choice_text(body: Option<&Map<String, Value>>) -> String {
    body.and_then(|b| b.get("choices"))
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("text"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| NO_CHOICES.to_string())
}

#[async_trait]
impl Advisor for CompletionClient {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        let request = CompletionRequest {
            prompt,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Completion request to {} failed", self.url))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Completion endpoint returned {}", status);
        }

        // Consumes the response; the connection is released once the body is read.
        let body = response
            .bytes()
            .await
            .context("Failed to read completion response body")?;
        debug!("Completion response: {} bytes", body.len());

        // `null` decodes to None; any other non-object body is fatal.
        let decoded: Option<Map<String, Value>> =
            serde_json::from_slice(&body).context("Completion response is not a JSON object")?;

        Ok(first_choice_text(decoded.as_ref()))
    }
}
