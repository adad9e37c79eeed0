use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::completion::{
    errors::CompletionError,
    types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat},
};
use crate::config::Config;

/// A text-in, text-out language model.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one system and one user message; return the first answer verbatim.
    async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError>;

    /// Whether the client has what it needs to make calls.
    fn is_configured(&self) -> bool;
}

/// OpenAI-compatible chat-completions client.
pub struct OpenAiClient {
    http: Client,
    endpoint: Url,
    api_key: Option<String>,
    model: String,
    json_mode: bool,
    timeout: Duration,
}

impl OpenAiClient {
    pub fn from_config(config: &Config) -> Result<Self, CompletionError> {
        let mut base = config.openai_base_url().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let endpoint = Url::parse(&base)
            .and_then(|base| base.join("chat/completions"))
            .map_err(|e| CompletionError::InvalidBaseUrl(format!("{base}: {e}")))?;

        let http = Client::builder()
            .timeout(config.completion_timeout())
            .build()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            endpoint,
            api_key: config.openai_api_key().map(str::to_string),
            model: config.openai_model().to_string(),
            json_mode: config.json_mode(),
            timeout: config.completion_timeout(),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    fn map_reqwest_error(&self, err: reqwest::Error) -> CompletionError {
        if err.is_timeout() {
            CompletionError::Timeout(self.timeout)
        } else {
            CompletionError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    #[instrument(skip_all, fields(model = %self.model, prompt_chars = user.chars().count()))]
    async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(CompletionError::MissingApiKey)?;

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            response_format: self.json_mode.then(ResponseFormat::json_object),
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "completion service rejected request");
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                return Err(CompletionError::UnexpectedResponse {
                    reason: format!("undecodable completion response: {e}"),
                    raw: body,
                });
            }
        };

        let Some(choice) = parsed.choices.into_iter().next() else {
            return Err(CompletionError::UnexpectedResponse {
                reason: "completion response has no choices".to_string(),
                raw: body,
            });
        };

        let Some(content) = choice.message.content else {
            return Err(CompletionError::UnexpectedResponse {
                reason: "first choice has no message content".to_string(),
                raw: body,
            });
        };

        debug!(answer_chars = content.chars().count(), "completion received");
        Ok(content)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
