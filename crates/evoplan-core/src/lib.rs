//! # evoplan-core
//!
//! Core types for the evoplan self-evolving planning pipeline.
//!
//! Evoplan turns a free-text goal into a project plan by chaining text
//! completions against a local inference server: draft, critique, revise.
//!
//! ## Core paradigm
//!
//! - Every run captures an immutable [`GenerationConfig`] up front; nothing
//!   re-reads configuration mid-run
//! - Backend selection is a tagged variant ([`Backend`]), not a boolean flag
//! - A run either yields the full artifact set or a single error; there are
//!   no partial results and no retries

mod config;
mod error;
mod types;

pub use config::EnvDefaults;
pub use error::{EvoplanError, Result};
pub use types::*;
