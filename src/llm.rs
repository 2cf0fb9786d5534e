//! Model completion backends.
//!
//! Two providers are supported: the hosted Gemini API over plain HTTP, and a
//! local Ollama instance. Both sit behind [`LlmProvider`] so the orchestrator
//! and the pass-through endpoint never know which one they are talking to,
//! and tests can substitute a canned implementation.
//!
//! Completion calls are single-shot: no retries, and unlike the data tools no
//! timeout either, so a hung model call blocks its request.

use async_trait::async_trait;
use ollama_rs::generation::completion::request::GenerationRequest;
use ollama_rs::generation::options::GenerationOptions;
use ollama_rs::Ollama;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::TARGET_LLM_REQUEST;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("provider quota exhausted")]
    Quota,
    #[error("model not found")]
    ModelNotFound,
    #[error("provider returned status {status}: {message}")]
    Provider { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
}

impl LlmError {
    fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::TOO_MANY_REQUESTS => LlmError::Quota,
            StatusCode::NOT_FOUND => LlmError::ModelNotFound,
            _ => LlmError::Provider {
                status: status.as_u16(),
                message,
            },
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        LlmError::Transport(e.to_string())
    }
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Short provider name used in diagnostics, e.g. "Gemini".
    fn label(&self) -> &str;
}

/// The shape a provider hands reply content back in. Gemini frames replies as
/// a list of part blocks; other backends return a bare string; anything else
/// is kept as raw JSON. [`ReplyContent::normalize`] is the only place that
/// flattens the three cases into text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ReplyContent {
    Text(String),
    Blocks { parts: Vec<ReplyBlock> },
    Other(Value),
}

#[derive(Debug, Deserialize)]
pub struct ReplyBlock {
    #[serde(default)]
    pub text: String,
}

impl ReplyContent {
    /// The string itself for plain text, the first block's text for a block
    /// list, and the raw JSON rendered back to a string as a last resort.
    pub fn normalize(self) -> String {
        match self {
            ReplyContent::Text(text) => text.trim().to_string(),
            ReplyContent::Blocks { parts } => parts
                .into_iter()
                .next()
                .map(|block| block.text.trim().to_string())
                .unwrap_or_default(),
            ReplyContent::Other(Value::Null) => String::new(),
            ReplyContent::Other(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ReplyContent>,
}

impl GenerateContentResponse {
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(ReplyContent::normalize)
            .unwrap_or_default()
    }
}

/// Hosted Gemini backend, spoken to directly over HTTP.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, api_key: String, model: String, temperature: f32) -> Self {
        Self {
            http,
            api_key,
            model,
            temperature,
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/{}:generateContent", GEMINI_API_BASE, self.model);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "temperature": self.temperature },
        });

        debug!(target: TARGET_LLM_REQUEST, "Sending prompt to {}", self.model);

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::from_status(status, message));
        }

        let payload: GenerateContentResponse = response.json().await?;
        let text = payload.into_text();
        debug!(target: TARGET_LLM_REQUEST, "Received {} bytes of reply text", text.len());
        Ok(text)
    }

    fn label(&self) -> &str {
        "Gemini"
    }
}

/// Local Ollama backend.
pub struct OllamaClient {
    client: Ollama,
    model: String,
    temperature: f32,
}

impl OllamaClient {
    pub fn new(host: &str, port: u16, model: String, temperature: f32) -> Self {
        Self {
            client: Ollama::new(host.to_string(), port),
            model,
            temperature,
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let mut request = GenerationRequest::new(self.model.clone(), prompt.to_string());
        request.options = Some(GenerationOptions::default().temperature(self.temperature));

        debug!(target: TARGET_LLM_REQUEST, "Sending prompt to {}", self.model);

        let response = self
            .client
            .generate(request)
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        Ok(response.response)
    }

    fn label(&self) -> &str {
        "Ollama"
    }
}
