use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::ports::completion_provider::{
    ChatMessage, CompletionError, CompletionProvider, CompletionRequest,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";

#[derive(Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenAiClientConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_factor: f64,
}

impl Default for OpenAiClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 30,
            max_retries: 1,
            backoff_factor: 1.5,
        }
    }
}

impl OpenAiClientConfig {
    fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis((self.backoff_factor.powi(attempt as i32 - 1) * 1000.0) as u64)
    }

    /// Worst-case wall time of one `complete` call: every attempt runs to its
    /// timeout and every backoff sleep is taken.
    pub fn request_budget(&self) -> Duration {
        let attempts = Duration::from_secs(self.timeout_secs) * (self.max_retries + 1);
        (1..=self.max_retries).fold(attempts, |total, attempt| total + self.backoff(attempt))
    }
}

/// Chat-completions client for OpenAI-compatible endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiCompletionProvider {
    client: Client,
    config: OpenAiClientConfig,
}

impl OpenAiCompletionProvider {
    pub fn new(config: OpenAiClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    async fn execute_request(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError> {
        let body = ChatCompletionsRequest {
            model: &self.config.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout(self.config.timeout_secs)
                } else {
                    CompletionError::NetworkError(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(CompletionError::ApiError(format!("{}: {}", status, detail)));
        }

        let parsed = response
            .json::<ChatCompletionsResponse>()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| CompletionError::InvalidResponse("No completion returned".to_string()))
    }
}

fn is_retryable(error: &CompletionError) -> bool {
    match error {
        CompletionError::NetworkError(_) | CompletionError::Timeout(_) => true,
        CompletionError::ApiError(msg) => {
            msg.starts_with(StatusCode::TOO_MANY_REQUESTS.as_str())
                || msg.starts_with('5')
        }
        _ => false,
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletionProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| CompletionError::NotConfigured("OPENAI_API_KEY is not set".to_string()))?;

        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.execute_request(api_key, &request).await {
                Ok(content) => {
                    debug!(model = %self.config.model, attempts, "Completion received");
                    return Ok(content);
                }
                Err(e) if attempts <= self.config.max_retries && is_retryable(&e) => {
                    warn!(attempt = attempts, error = %e, "Completion request failed, retrying");
                    tokio::time::sleep(self.config.backoff(attempts)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let messages = vec![ChatMessage::system("시스템"), ChatMessage::user("질문")];
        let body = ChatCompletionsRequest {
            model: "gpt-4o",
            messages: &messages,
            max_tokens: Some(1500),
            temperature: None,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "질문");
        assert_eq!(json["max_tokens"], 1500);
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let provider = OpenAiCompletionProvider::new(OpenAiClientConfig {
            base_url: "http://localhost:8080/v1/".to_string(),
            ..OpenAiClientConfig::default()
        })
        .unwrap();
        assert_eq!(provider.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let provider = OpenAiCompletionProvider::new(OpenAiClientConfig::default()).unwrap();
        let result = provider
            .complete(CompletionRequest {
                messages: vec![ChatMessage::user("hi")],
                max_tokens: None,
                temperature: None,
            })
            .await;
        assert!(matches!(result, Err(CompletionError::NotConfigured(_))));
    }

    #[test]
    fn test_only_transient_failures_are_retried() {
        assert!(is_retryable(&CompletionError::NetworkError("reset".to_string())));
        assert!(is_retryable(&CompletionError::ApiError("429 Too Many Requests: slow down".to_string())));
        assert!(is_retryable(&CompletionError::ApiError("503 Service Unavailable: ".to_string())));
        assert!(!is_retryable(&CompletionError::ApiError("401 Unauthorized: bad key".to_string())));
        assert!(is_retryable(&CompletionError::Timeout(30)));
    }

    #[test]
    fn test_request_budget_covers_retry() {
        let config = OpenAiClientConfig {
            timeout_secs: 30,
            max_retries: 1,
            backoff_factor: 1.5,
            ..OpenAiClientConfig::default()
        };
        // two 30s attempts plus one 1s backoff
        assert_eq!(config.request_budget(), Duration::from_secs(61));

        let no_retry = OpenAiClientConfig {
            max_retries: 0,
            ..config
        };
        assert_eq!(no_retry.request_budget(), Duration::from_secs(30));
    }
}
