//! Self-evolving orchestration for evoplan
//!
//! Sequences completion calls into the draft -> critique -> revise pipeline,
//! holds the fixed prompt templates, and offers best-effort extraction of a
//! fenced HTML block for live preview.

mod orchestrator;
pub mod preview;
pub mod prompt;

pub use orchestrator::Orchestrator;
pub use preview::extract_html;
