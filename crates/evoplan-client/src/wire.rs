//! Wire formats for the two completion backends
//!
//! Request bodies are fixed shapes; nothing is auto-detected. Response
//! parsing is deliberately asymmetric, preserving the upstream contract:
//! the native shape degrades gracefully when the `response` field is
//! missing (the whole JSON object is serialized as the text), while the
//! chat shape fails hard on a missing `choices[0].message.content` path.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use evoplan_core::{EvoplanError, GenerationConfig, Result};

/// Path suffix for the native generate endpoint
pub const NATIVE_GENERATE_PATH: &str = "/api/generate";

/// Path suffix for the OpenAI-compatible chat endpoint
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Sampling options nested in the native request body
#[derive(Debug, Clone, Serialize)]
pub struct NativeOptions {
    pub temperature: f32,
    pub num_predict: u32,
}

/// Ollama-native `/api/generate` request body
#[derive(Debug, Clone, Serialize)]
pub struct NativeGenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub options: NativeOptions,
}

impl NativeGenerateRequest {
    /// Build the native payload for one prompt
    pub fn new(prompt: &str, config: &GenerationConfig) -> Self {
        Self {
            model: config.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: NativeOptions {
                temperature: config.temperature,
                num_predict: config.max_tokens,
            },
        }
    }
}

/// Single chat message in the OpenAI-compatible shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// OpenAI-compatible `/v1/chat/completions` request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

impl ChatCompletionRequest {
    /// Build the chat payload: one user message carrying the whole prompt
    pub fn new(prompt: &str, config: &GenerationConfig) -> Self {
        Self {
            model: config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            stream: false,
        }
    }
}

/// OpenAI-compatible response, only the fields we read
#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Extract completion text from a native response body
///
/// Returns the `response` string field when present; otherwise serializes
/// the entire object so the caller still sees what the server said.
pub fn parse_native_body(body: Value) -> Result<String> {
    match body.get("response").and_then(Value::as_str) {
        Some(text) => Ok(text.to_string()),
        None => Ok(serde_json::to_string(&body)?),
    }
}

/// Extract completion text from a chat response body
///
/// Fails with `MalformedResponse` when `choices[0].message.content` does
/// not exist; this shape is strict.
pub fn parse_chat_body(body: Value) -> Result<String> {
    let response: ChatCompletionResponse = serde_json::from_value(body)
        .map_err(|e| EvoplanError::MalformedResponse(format!("chat completion body: {}", e)))?;

    response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| EvoplanError::MalformedResponse("empty choices array".to_string()))?
        .message
        .content
        .ok_or_else(|| EvoplanError::MalformedResponse("missing message content".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use evoplan_core::Backend;
    use serde_json::json;

    // 0.5 survives the f32 -> f64 widening serde_json applies, so payload
    // equality checks stay exact
    fn config() -> GenerationConfig {
        GenerationConfig::new("http://localhost:11434", "llama3.2:1b")
            .with_temperature(0.5)
            .with_max_tokens(1000)
    }

    #[test]
    fn test_native_payload_shape() {
        let payload = serde_json::to_value(NativeGenerateRequest::new("hello", &config())).unwrap();
        assert_eq!(
            payload,
            json!({
                "model": "llama3.2:1b",
                "prompt": "hello",
                "stream": false,
                "options": {"temperature": 0.5, "num_predict": 1000}
            })
        );
    }

    #[test]
    fn test_chat_payload_shape() {
        let payload =
            serde_json::to_value(ChatCompletionRequest::new("hello", &config())).unwrap();
        assert_eq!(
            payload,
            json!({
                "model": "llama3.2:1b",
                "messages": [{"role": "user", "content": "hello"}],
                "temperature": 0.5,
                "max_tokens": 1000,
                "stream": false
            })
        );
    }

    #[test]
    fn test_chat_payload_uses_chat_backend_config() {
        let config = config().with_backend(Backend::ChatCompletion);
        let request = ChatCompletionRequest::new("p", &config);
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");
    }

    #[test]
    fn test_parse_native_response_field() {
        let text = parse_native_body(json!({"response": "X"})).unwrap();
        assert_eq!(text, "X");
    }

    #[test]
    fn test_parse_native_fallback_serializes_object() {
        let text = parse_native_body(json!({"foo": "bar"})).unwrap();
        assert_eq!(text, r#"{"foo":"bar"}"#);
    }

    #[test]
    fn test_parse_native_non_string_response_falls_back() {
        let text = parse_native_body(json!({"response": 42})).unwrap();
        assert_eq!(text, r#"{"response":42}"#);
    }

    #[test]
    fn test_parse_chat_happy_path() {
        let body = json!({"choices": [{"message": {"content": "Y"}}]});
        assert_eq!(parse_chat_body(body).unwrap(), "Y");
    }

    #[test]
    fn test_parse_chat_missing_choices_is_malformed() {
        let err = parse_chat_body(json!({"object": "chat.completion"})).unwrap_err();
        assert!(matches!(err, EvoplanError::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_chat_empty_choices_is_malformed() {
        let err = parse_chat_body(json!({"choices": []})).unwrap_err();
        assert!(matches!(err, EvoplanError::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_chat_null_content_is_malformed() {
        let body = json!({"choices": [{"message": {"content": null}}]});
        let err = parse_chat_body(body).unwrap_err();
        assert!(matches!(err, EvoplanError::MalformedResponse(_)));
    }
}
