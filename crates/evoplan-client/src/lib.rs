//! HTTP completion client for evoplan
//!
//! Speaks the two fixed wire contracts selected by [`evoplan_core::Backend`]:
//! the Ollama-native `/api/generate` shape and the OpenAI-compatible
//! `/v1/chat/completions` shape. Every `generate` call issues exactly one
//! HTTP POST: failures are fatal to the caller's run, never retried here.

mod client;
mod wire;

pub use client::{CompletionApi, CompletionClient};
pub use wire::{
    parse_chat_body, parse_native_body, ChatCompletionRequest, ChatMessage,
    NativeGenerateRequest, NativeOptions, CHAT_COMPLETIONS_PATH, NATIVE_GENERATE_PATH,
};
