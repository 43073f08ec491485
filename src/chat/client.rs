//! Chat-completion client for the hosted language model
//!
//! The orchestrator talks to the model through the `LanguageModel` trait;
//! `GroqClient` is the production implementation (OpenAI-compatible
//! chat-completion endpoint, bearer auth). The API key comes from
//! configuration, never from source.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{CompanionError, Result};
use crate::types::ChatMessage;

/// Default chat-completion API base URL
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Request timeout (30 seconds)
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Sampling and length parameters for one completion call
#[derive(Debug, Clone, Copy)]
pub struct CompletionParams {
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: Option<f64>,
}

/// Language-generation collaborator seam
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Run one chat completion and return the assistant's reply text
    async fn complete(&self, messages: &[ChatMessage], params: CompletionParams) -> Result<String>;
}

/// Chat-completion client for the Groq API
#[derive(Debug, Clone)]
pub struct GroqClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GroqClient {
    /// Create a client with default endpoint and model
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, DEFAULT_API_URL, DEFAULT_MODEL)
    }

    /// Create a client against a custom endpoint/model
    pub fn with_config(
        api_key: impl Into<String>,
        base_url: &str,
        model: &str,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(CompanionError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.to_string(),
        })
    }

    /// Create a client from the `GROQ_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY").map_err(|_| {
            CompanionError::Config("GROQ_API_KEY is not set in the environment".to_string())
        })?;
        Self::new(api_key)
    }

    /// Current model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl LanguageModel for GroqClient {
    async fn complete(&self, messages: &[ChatMessage], params: CompletionParams) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CompanionError::Api(format!("HTTP {}: {}", status, error_text)));
        }

        let completion: ChatCompletionResponse = response.json().await?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                CompanionError::MalformedResponse(
                    "chat completion had no message content".to_string(),
                )
            })
    }
}

/// Chat-completion request body
#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
}

/// Chat-completion response body (only the fields the core depends on)
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}
