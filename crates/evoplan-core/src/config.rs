//! Environment defaults for evoplan
//!
//! Two environment-style defaults are read once at process start and used
//! only as initial values for the run configuration. Nothing re-reads the
//! environment during a run.

use serde::{Deserialize, Serialize};

/// Default inference server base URL when `OLLAMA_API_BASE` is unset
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:11434";

/// Default model identifier when `OLLAMA_MODEL` is unset
pub const DEFAULT_MODEL: &str = "llama3.2:1b";

/// Startup defaults sourced from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvDefaults {
    /// Inference server base URL, trailing slash stripped
    pub api_base: String,
    /// Default model identifier
    pub model: String,
}

impl EnvDefaults {
    /// Read `OLLAMA_API_BASE` and `OLLAMA_MODEL`, falling back to local
    /// Ollama defaults
    pub fn from_env() -> Self {
        let api_base = std::env::var("OLLAMA_API_BASE")
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();
        let model =
            std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Self { api_base, model }
    }
}

impl Default for EnvDefaults {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}
