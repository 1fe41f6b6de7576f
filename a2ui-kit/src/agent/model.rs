//! Model client: sends instructions plus one user query, returns reply text.

use futures::future::BoxFuture;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use url::Url;

/// Failure of the upstream model call.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse response JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("model returned no content")]
    EmptyReply,
}

/// The opaque model boundary.
pub trait ModelClient: Send + Sync {
    fn complete<'a>(
        &'a self,
        instructions: &'a str,
        query: &'a str,
    ) -> BoxFuture<'a, Result<String, ModelError>>;
}

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            api_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
        }
    }
}

/// Non-streaming client for `{api_url}/chat/completions`.
#[derive(Debug, Clone)]
pub struct OpenAiCompatClient {
    config: ModelConfig,
    endpoint: Url,
    http: reqwest::Client,
}

impl OpenAiCompatClient {
    pub fn new(config: ModelConfig) -> Result<Self, ModelError> {
        let endpoint = completions_endpoint(&config.api_url)?;
        Ok(OpenAiCompatClient {
            config,
            endpoint,
            http: reqwest::Client::new(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn send_non_streaming(&self, instructions: &str, query: &str) -> Result<String, ModelError> {
        let body = json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": instructions},
                {"role": "user", "content": query},
            ],
            "stream": false,
        });

        ::log::info!(
            "[A2UI agent] Non-streaming POST to {} with model {}",
            self.endpoint,
            self.config.model
        );

        let mut request = self
            .http
            .post(self.endpoint.clone())
            .header("Content-Type", "application/json")
            .json(&body);
        if !self.config.api_key.is_empty() {
            request = request.header("Authorization", format!("Bearer {}", self.config.api_key));
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(ModelError::Status { status, body });
        }

        let text = response.text().await?;
        ::log::info!("[A2UI agent] Response length: {} bytes", text.len());

        parse_completion(&text)
    }
}

impl ModelClient for OpenAiCompatClient {
    fn complete<'a>(
        &'a self,
        instructions: &'a str,
        query: &'a str,
    ) -> BoxFuture<'a, Result<String, ModelError>> {
        Box::pin(self.send_non_streaming(instructions, query))
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Extract the first choice's text from a chat completion body.
fn parse_completion(text: &str) -> Result<String, ModelError> {
    let completion: ChatCompletionResponse = serde_json::from_str(text)?;
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(ModelError::EmptyReply)
}

fn completions_endpoint(api_url: &str) -> Result<Url, ModelError> {
    let invalid = |reason: String| ModelError::InvalidUrl {
        url: api_url.to_string(),
        reason,
    };

    let base = Url::parse(api_url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", base.scheme())));
    }

    let joined = format!("{}/chat/completions", base.as_str().trim_end_matches('/'));
    Url::parse(&joined).map_err(|e| invalid(e.to_string()))
}
