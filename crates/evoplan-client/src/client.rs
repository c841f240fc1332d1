//! Completion client
//!
//! One `generate` call maps to exactly one HTTP POST against the configured
//! backend. There is no retry, no backoff, and no request mutation: a failed
//! call fails the caller's entire run, which is the intended recovery
//! semantics for this pipeline.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use evoplan_core::{Backend, EvoplanError, GenerationConfig, GenerationResult, Result};

use crate::wire::{
    parse_chat_body, parse_native_body, ChatCompletionRequest, NativeGenerateRequest,
    CHAT_COMPLETIONS_PATH, NATIVE_GENERATE_PATH,
};

/// Anything that can turn a prompt into completed text
///
/// The orchestrator is generic over this trait so tests can substitute a
/// scripted backend for the HTTP client.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    /// Issue a single blocking completion request
    async fn generate(&self, prompt: &str) -> Result<GenerationResult>;
}

/// HTTP completion client over one of the two fixed backend shapes
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    config: GenerationConfig,
}

impl CompletionClient {
    /// Create a client for the given run configuration
    ///
    /// Validates sampling bounds up front; the configuration is immutable
    /// for the client's lifetime.
    pub fn new(config: GenerationConfig) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EvoplanError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// The run configuration this client was built with
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// POST a JSON body and return the decoded JSON response
    async fn post_json<B: Serialize>(&self, url: &str, body: &B) -> Result<Value> {
        tracing::debug!("POST {}", url);

        let response = self.http.post(url).json(body).send().await.map_err(|e| {
            if e.is_timeout() {
                EvoplanError::Network(format!(
                    "request timed out after {:?}: {}",
                    self.config.timeout, e
                ))
            } else {
                EvoplanError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown".to_string());
            return Err(EvoplanError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| EvoplanError::MalformedResponse(format!("invalid JSON body: {}", e)))
    }

    async fn generate_native(&self, prompt: &str) -> Result<String> {
        let url = format!("{}{}", self.config.endpoint_base, NATIVE_GENERATE_PATH);
        let request = NativeGenerateRequest::new(prompt, &self.config);
        let body = self.post_json(&url, &request).await?;
        parse_native_body(body)
    }

    async fn generate_chat(&self, prompt: &str) -> Result<String> {
        let url = format!("{}{}", self.config.endpoint_base, CHAT_COMPLETIONS_PATH);
        let request = ChatCompletionRequest::new(prompt, &self.config);
        let body = self.post_json(&url, &request).await?;
        parse_chat_body(body)
    }
}

#[async_trait]
impl CompletionApi for CompletionClient {
    async fn generate(&self, prompt: &str) -> Result<GenerationResult> {
        tracing::debug!(
            "Dispatching completion ({} backend, {} prompt chars)",
            self.config.backend,
            prompt.len()
        );

        let text = match self.config.backend {
            Backend::NativeCompletion => self.generate_native(prompt).await?,
            Backend::ChatCompletion => self.generate_chat(prompt).await?,
        };

        tracing::info!(
            "Completion finished ({} chars from model {})",
            text.len(),
            self.config.model
        );

        Ok(GenerationResult::new(text))
    }
}
