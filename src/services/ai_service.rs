use crate::config::LlmConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const SYSTEM_PROMPT: &str = "You are a helpful assistant for generating educational questions.";
pub const ERROR_SENTINEL_PREFIX: &str = "Error querying LLM API: ";
pub const NO_OUTPUT_SENTINEL: &str = "No output received from the API.";

/// Text returned by the model, or a sentinel describing why there is none.
/// Always treated as untrusted input by the parsers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawModelResponse(String);

impl RawModelResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_sentinel(&self) -> bool {
        self.0.starts_with(ERROR_SENTINEL_PREFIX) || self.0 == NO_OUTPUT_SENTINEL
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Only fails when the backend is not configured. Transport and HTTP
    /// failures come back as sentinel text.
    async fn generate(&self, prompt: &str) -> Result<RawModelResponse>;
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Clone)]
pub struct AIService {
    client: Client,
    config: LlmConfig,
}

impl AIService {
    pub fn new(config: LlmConfig, client: Client) -> Self {
        Self { client, config }
    }

    async fn chat_completion(&self, api_key: &str, prompt: &str) -> reqwest::Result<Option<String>> {
        let payload = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            seed: self.config.seed,
        };

        let body: ChatResponse = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&payload)
            .timeout(self.config.timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(body.choices.into_iter().next().map(|c| c.message.content))
    }
}

#[async_trait]
impl TextGenerator for AIService {
    async fn generate(&self, prompt: &str) -> Result<RawModelResponse> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            Error::Config("LLM API key is missing. Set LLM_API_KEY in the environment.".to_string())
        })?;

        tracing::info!(model = %self.config.model, prompt_len = prompt.len(), "Sending generation request");
        match self.chat_completion(api_key, prompt).await {
            Ok(Some(content)) => Ok(RawModelResponse::new(content)),
            Ok(None) => {
                tracing::warn!("LLM returned no choices");
                Ok(RawModelResponse::new(NO_OUTPUT_SENTINEL))
            }
            Err(e) => {
                tracing::error!(error = %e, "LLM request failed");
                Ok(RawModelResponse::new(format!("{}{}", ERROR_SENTINEL_PREFIX, e)))
            }
        }
    }
}
