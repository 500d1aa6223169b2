//! OpenAI-compatible `/chat/completions` client.
use std::env;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ChatCompletion, ChatMessage, ChatReply, ChatRequest, CompletionError};

/// Request parameters and endpoint for the chat service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Bearer token; requests are sent unauthenticated when absent.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            max_tokens: 200,
            top_p: 1.0,
        }
    }
}

impl ChatConfig {
    /// Defaults overridden by `OPENAI_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Overrides fields set in the environment, leaving the rest untouched.
    pub fn apply_env(&mut self) {
        if let Some(key) = read_env::<String>("OPENAI_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(url) = read_env::<String>("OPENAI_BASE_URL") {
            self.base_url = url;
        }
        if let Some(model) = read_env::<String>("OPENAI_MODEL") {
            self.model = model;
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: u64,
}

/// Chat completion over HTTP.
pub struct OpenAiChat {
    config: ChatConfig,
    http_client: reqwest::Client,
}

impl OpenAiChat {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

/// Maps a non-success HTTP status onto the completion error set.
fn classify_status(status: StatusCode, body: String) -> CompletionError {
    let message = format!("{status}: {body}");
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CompletionError::Unauthorized(message),
        StatusCode::TOO_MANY_REQUESTS => CompletionError::RateLimited(message),
        StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::BAD_GATEWAY
        | StatusCode::GATEWAY_TIMEOUT => CompletionError::ServiceUnavailable(message),
        StatusCode::BAD_REQUEST
        | StatusCode::NOT_FOUND
        | StatusCode::PAYLOAD_TOO_LARGE
        | StatusCode::UNPROCESSABLE_ENTITY => CompletionError::InvalidRequest(message),
        _ => CompletionError::Api(message),
    }
}

fn classify_transport(error: reqwest::Error) -> CompletionError {
    if error.is_connect() || error.is_timeout() {
        CompletionError::ServiceUnavailable(error.to_string())
    } else {
        CompletionError::Api(error.to_string())
    }
}

#[async_trait]
impl ChatCompletion for OpenAiChat {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, CompletionError> {
        let body = CompletionBody {
            model: &self.config.model,
            messages: request.messages(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            top_p: self.config.top_p,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        };

        debug!(
            "Sending chat completion: model={}, {} messages",
            body.model,
            body.messages.len()
        );

        let mut http_request = self.http_client.post(self.endpoint()).json(&body);
        if let Some(key) = &self.config.api_key {
            http_request = http_request.bearer_auth(key);
        }

        let response = http_request.send().await.map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(classify_status(status, error_text));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Api(format!("malformed completion response: {e}")))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::Api("completion returned no choices".to_string()))?;

        Ok(ChatReply {
            text,
            total_tokens: parsed.usage.total_tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_error_kinds() {
        let kind = |code: u16| {
            classify_status(StatusCode::from_u16(code).unwrap(), String::new()).kind()
        };
        assert_eq!(kind(401), "unauthorized");
        assert_eq!(kind(429), "rate_limited");
        assert_eq!(kind(503), "service_unavailable");
        assert_eq!(kind(400), "invalid_request");
        assert_eq!(kind(500), "api");
    }

    #[test]
    fn body_carries_fixed_sampling_parameters() {
        let config = ChatConfig::default();
        let request = ChatRequest::new("sys", vec!["hi".to_string()]);
        let body = CompletionBody {
            model: &config.model,
            messages: request.messages(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            top_p: config.top_p,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["max_tokens"], 200);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }

    #[test]
    fn response_parses_first_choice_and_usage() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"I choose to: A) move north"}}],"usage":{"total_tokens":42}}"#;
        let parsed: CompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "I choose to: A) move north");
        assert_eq!(parsed.usage.total_tokens, 42);
    }

    #[test]
    fn config_table_fills_missing_fields_with_defaults() {
        let config: ChatConfig = serde_json::from_str(r#"{"model":"gpt-4o-mini"}"#).unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, 200);
        assert_eq!(config.api_key, None);
    }
}
