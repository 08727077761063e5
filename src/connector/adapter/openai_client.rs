use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::application::ChatClient;
use crate::domain::ChatError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
/// Canonical marker the provider embeds in rate-limit error bodies.
const RATE_LIMIT_CODE: &str = "rate_limit_exceeded";

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(serde::Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Minimal subset of the chat-completions response we care about.
#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// HTTP client for the OpenAI chat-completions API (and compatible endpoints
/// such as a locally hosted server).
///
/// Implements [`ChatClient`] so the extraction use case stays decoupled from
/// transport and serialization details. The API key is supplied per call and
/// sent as a bearer token on that request only — never installed as a default
/// header, so concurrent calls with different keys cannot interfere.
pub struct OpenAiChatClient {
    client: reqwest::Client,
    model: String,
    /// Full endpoint URL (base + CHAT_COMPLETIONS_PATH).
    url: String,
}

impl OpenAiChatClient {
    pub fn new(model: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{CHAT_COMPLETIONS_PATH}", base.trim_end_matches('/'));
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            model: model.into(),
            url,
        }
    }

    /// Classify a non-success HTTP response. Rate limiting is recognized by
    /// the 429 status or by the provider's canonical error code appearing in
    /// the body; everything else is a plain failure.
    fn classify_failure(status: reqwest::StatusCode, body: &str) -> ChatError {
        let detail = format!("API returned {status}: {body}");
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS || body.contains(RATE_LIMIT_CODE) {
            ChatError::RateLimited(detail)
        } else {
            ChatError::Other(detail)
        }
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(
        &self,
        api_key: &str,
        system: &str,
        user: &str,
    ) -> Result<String, ChatError> {
        let request = ApiRequest {
            model: &self.model,
            messages: vec![
                ApiMessage {
                    role: "system",
                    content: system,
                },
                ApiMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::other(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAiChatClient: API returned {status}");
            return Err(Self::classify_failure(status, &body));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ChatError::other(format!("failed to parse response: {e}")))?;

        api_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ChatError::other("no choices in response"))
    }
}
