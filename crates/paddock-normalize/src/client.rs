//! HTTP client for the external classification service.
//!
//! Speaks the chat-completions dialect so it can point at the hosted API or
//! any compatible local endpoint. All calls go through the shared retry
//! policy; response content is parsed defensively, including JSON wrapped
//! in markdown code fences — smaller models fence their output even when
//! told not to.

use std::time::Duration;

use regex::Regex;
use reqwest::Client;

use crate::error::NormalizeError;
use crate::retry::retry_with_backoff;
use crate::types::{CompletionRequest, CompletionResponse, Message};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Client for the classification service.
///
/// Use [`ClassifierClient::new`] for production or
/// [`ClassifierClient::with_base_url`] to point at a mock server in tests.
pub struct ClassifierClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl ClassifierClient {
    /// Creates a client pointed at the hosted service.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: Option<String>,
        model: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, NormalizeError> {
        Self::with_base_url(
            api_key,
            model,
            timeout_secs,
            max_retries,
            backoff_base_ms,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock,
    /// or a local compatible endpoint).
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: Option<String>,
        model: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, NormalizeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("paddock/0.1 (listing-normalization)")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.to_owned(),
            max_retries,
            backoff_base_ms,
        })
    }

    /// Sends one instruction/input pair and returns the raw completion text.
    ///
    /// Overload-class failures are retried per the policy in
    /// [`crate::retry`]; rate limits and hard errors come back on the first
    /// attempt.
    ///
    /// # Errors
    ///
    /// - [`NormalizeError::RateLimited`] on HTTP 429.
    /// - [`NormalizeError::Overloaded`] on 5xx after retries are exhausted.
    /// - [`NormalizeError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`NormalizeError::Deserialize`] / [`NormalizeError::EmptyResponse`]
    ///   when the body is not a usable completion.
    /// - [`NormalizeError::Http`] on network failure.
    pub async fn complete(
        &self,
        instruction: &str,
        input: &str,
    ) -> Result<String, NormalizeError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.complete_once(instruction, input)
        })
        .await
    }

    async fn complete_once(
        &self,
        instruction: &str,
        input: &str,
    ) -> Result<String, NormalizeError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = CompletionRequest {
            model: &self.model,
            temperature: 0.0,
            messages: vec![
                Message {
                    role: "system",
                    content: instruction.to_owned(),
                },
                Message {
                    role: "user",
                    content: input.to_owned(),
                },
            ],
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.as_u16() == 429 {
            let detail = response.text().await.unwrap_or_default();
            return Err(NormalizeError::RateLimited(detail));
        }
        if status.is_server_error() {
            return Err(NormalizeError::Overloaded {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(NormalizeError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        let parsed: CompletionResponse =
            serde_json::from_str(&text).map_err(|e| NormalizeError::Deserialize {
                context: "chat completion envelope".to_owned(),
                source: e,
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(NormalizeError::EmptyResponse)
    }
}

/// Parse a JSON object or array out of completion text.
///
/// Tries, in order: the whole string; the inside of a ```-fenced block; the
/// outermost `{...}`/`[...]` span. Returns `None` when nothing parses —
/// the caller falls back, it never errors out.
#[must_use]
pub(crate) fn parse_json_payload(content: &str) -> Option<serde_json::Value> {
    let trimmed = content.trim();
    if let Ok(value) = serde_json::from_str(trimmed) {
        return Some(value);
    }

    let fence_re = Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("valid regex");
    if let Some(caps) = fence_re.captures(trimmed) {
        if let Ok(value) = serde_json::from_str(caps[1].trim()) {
            return Some(value);
        }
    }

    for (open, close) in [('{', '}'), ('[', ']')] {
        if let (Some(start), Some(end)) = (trimmed.find(open), trimmed.rfind(close)) {
            if start < end {
                if let Ok(value) = serde_json::from_str(&trimmed[start..=end]) {
                    return Some(value);
                }
            }
        }
    }

    None
}
