use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Failures talking to the completion endpoint. These are fatal to the run:
/// no stage retries a transport or auth error.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("failed to reach completion endpoint: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion endpoint returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("completion response contained no message content")]
    EmptyResponse,
}

/// The external text-completion service: one prompt in, one free-form
/// completion out. Stages depend on this trait so tests can substitute a
/// scripted implementation.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Configuration for the Azure OpenAI chat-completions client
#[derive(Debug, Clone)]
pub struct AzureOpenAiConfig {
    /// Deployment name (from AZURE_OPENAI_DEPLOYMENT_NAME env var)
    pub deployment: String,
    /// API version (from AZURE_OPENAI_API_VERSION env var)
    pub api_version: String,
    /// Resource endpoint, e.g. "https://my-resource.openai.azure.com"
    pub endpoint: String,
    /// API key (from AZURE_OPENAI_API_KEY env var)
    pub api_key: String,
    /// Temperature (0 = deterministic extraction)
    pub temperature: f64,
    /// Maximum tokens in response
    pub max_tokens: u32,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl AzureOpenAiConfig {
    /// Create config from environment variables. A missing variable is an
    /// error: refusing to start beats sending requests with empty
    /// credentials.
    pub fn from_env() -> Result<Self> {
        let deployment = std::env::var("AZURE_OPENAI_DEPLOYMENT_NAME")
            .context("AZURE_OPENAI_DEPLOYMENT_NAME environment variable not set")?;
        let api_version = std::env::var("AZURE_OPENAI_API_VERSION")
            .context("AZURE_OPENAI_API_VERSION environment variable not set")?;
        let endpoint = std::env::var("AZURE_OPENAI_ENDPOINT")
            .context("AZURE_OPENAI_ENDPOINT environment variable not set")?;
        let api_key = std::env::var("AZURE_OPENAI_API_KEY")
            .context("AZURE_OPENAI_API_KEY environment variable not set")?;

        Ok(Self {
            deployment,
            api_version,
            endpoint,
            api_key,
            temperature: 0.0,
            max_tokens: 1024,
            request_timeout: Duration::from_secs(60),
        })
    }

    /// Create with custom settings
    pub fn new(endpoint: String, deployment: String, api_version: String, api_key: String) -> Self {
        Self {
            deployment,
            api_version,
            endpoint,
            api_key,
            temperature: 0.0,
            max_tokens: 1024,
            request_timeout: Duration::from_secs(60),
        }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }
}

/// Azure OpenAI chat-completions client
pub struct AzureOpenAiClient {
    client: Client,
    config: AzureOpenAiConfig,
}

impl AzureOpenAiClient {
    pub fn new(config: AzureOpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl CompletionService for AzureOpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        debug!("Sending completion request ({} prompt chars)", prompt.len());

        let request = ChatRequest {
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_tokens),
        };

        let response = self
            .client
            .post(self.config.completions_url())
            .header("api-key", &self.config.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(CompletionError::Transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api { status, body }.into());
        }

        let response: ChatResponse = response.json().await.map_err(CompletionError::Transport)?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| CompletionError::EmptyResponse.into())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
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
