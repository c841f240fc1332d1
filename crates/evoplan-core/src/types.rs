//! Type definitions for evoplan runs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{EvoplanError, Result};

/// Inclusive temperature bounds accepted by both backends
pub const TEMPERATURE_RANGE: (f32, f32) = (0.0, 1.5);

/// Inclusive max_tokens bounds accepted by both backends
pub const MAX_TOKENS_RANGE: (u32, u32) = (128, 8192);

/// Default request timeout in seconds
///
/// Local models routinely take minutes on long prompts; this is a tunable,
/// not a protocol constant.
pub const DEFAULT_TIMEOUT_SECS: u64 = 180;

const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Backend request/response shape for obtaining a text completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Ollama-native `/api/generate` contract
    #[default]
    NativeCompletion,
    /// OpenAI-compatible `/v1/chat/completions` contract
    ChatCompletion,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::NativeCompletion => write!(f, "native"),
            Backend::ChatCompletion => write!(f, "chat"),
        }
    }
}

impl std::str::FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "native" => Ok(Backend::NativeCompletion),
            "chat" => Ok(Backend::ChatCompletion),
            _ => Err(format!("Invalid backend: {}. Use native or chat.", s)),
        }
    }
}

/// Orchestration mode for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Three-pass draft -> critique -> revise pipeline
    #[default]
    SelfEvolving,
    /// Single draft call, no critique or revision
    SinglePass,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::SelfEvolving => write!(f, "self-evolving"),
            Mode::SinglePass => write!(f, "single-pass"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "self-evolving" | "self_evolving" => Ok(Mode::SelfEvolving),
            "single-pass" | "single_pass" => Ok(Mode::SinglePass),
            _ => Err(format!(
                "Invalid mode: {}. Use self-evolving or single-pass.",
                s
            )),
        }
    }
}

/// Immutable configuration for one run's completion calls
///
/// Constructed fresh at the start of each run and passed explicitly through
/// the orchestrator and client. Never re-read or mutated mid-run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Base URL of the inference server (no trailing slash)
    pub endpoint_base: String,
    /// Model identifier as the server knows it
    pub model: String,
    /// Which of the two fixed wire contracts to speak
    pub backend: Backend,
    /// Sampling temperature, valid range [0.0, 1.5]
    pub temperature: f32,
    /// Completion length cap, valid range [128, 8192]
    pub max_tokens: u32,
    /// Per-request timeout
    #[serde(skip, default = "default_timeout")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

impl GenerationConfig {
    /// Create a configuration with default sampling parameters
    pub fn new(endpoint_base: impl Into<String>, model: impl Into<String>) -> Self {
        let endpoint_base: String = endpoint_base.into();
        Self {
            endpoint_base: endpoint_base.trim_end_matches('/').to_string(),
            model: model.into(),
            backend: Backend::default(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: default_timeout(),
        }
    }

    /// Set the backend shape
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the completion length cap
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check bounds before any request is dispatched
    pub fn validate(&self) -> Result<()> {
        if self.endpoint_base.trim().is_empty() {
            return Err(EvoplanError::InvalidRequest(
                "endpoint base URL is empty".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(EvoplanError::InvalidRequest("model is empty".to_string()));
        }
        let (t_min, t_max) = TEMPERATURE_RANGE;
        if !(t_min..=t_max).contains(&self.temperature) {
            return Err(EvoplanError::InvalidRequest(format!(
                "temperature {} outside [{}, {}]",
                self.temperature, t_min, t_max
            )));
        }
        let (m_min, m_max) = MAX_TOKENS_RANGE;
        if !(m_min..=m_max).contains(&self.max_tokens) {
            return Err(EvoplanError::InvalidRequest(format!(
                "max_tokens {} outside [{}, {}]",
                self.max_tokens, m_min, m_max
            )));
        }
        Ok(())
    }
}

/// Result from a single completion call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    /// The generated text
    pub text: String,
    /// When this result was produced
    pub timestamp: DateTime<Utc>,
}

impl GenerationResult {
    /// Wrap generated text with the current timestamp
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// The three artifacts of one self-evolving run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanArtifacts {
    /// First-pass plan from the task prompt
    pub draft: GenerationResult,
    /// Bullet-point improvement list generated against the draft
    pub critique: GenerationResult,
    /// Revised plan incorporating the critique
    pub final_plan: GenerationResult,
}

/// What a run produced, by mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RunOutcome {
    /// Full draft/critique/final triple
    SelfEvolving(PlanArtifacts),
    /// Draft-equivalent output only
    SinglePass(GenerationResult),
}

impl RunOutcome {
    /// The text the presentation layer should treat as the primary output
    pub fn primary_text(&self) -> &str {
        match self {
            RunOutcome::SelfEvolving(artifacts) => &artifacts.final_plan.text,
            RunOutcome::SinglePass(result) => &result.text,
        }
    }
}
