//! End-to-end pipeline tests over the public API with a scripted backend

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use evoplan_client::CompletionApi;
use evoplan_core::{EvoplanError, GenerationResult, Mode, Result, RunOutcome};
use evoplan_orchestrator::{extract_html, Orchestrator};

/// Backend that answers every prompt with a canned page and counts calls
struct CannedApi {
    reply: String,
    calls: AtomicUsize,
}

impl CannedApi {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CompletionApi for &CannedApi {
    async fn generate(&self, _prompt: &str) -> Result<GenerationResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(GenerationResult::new(self.reply.clone()))
    }
}

#[tokio::test]
async fn test_self_evolving_run_yields_all_three_artifacts() {
    let api = CannedApi::new("Plan body\n```html\n<p>hi</p>\n```");
    let orchestrator = Orchestrator::new(&api);

    let outcome = orchestrator
        .run("build a reading tracker", Mode::SelfEvolving)
        .await
        .unwrap();

    assert_eq!(api.calls.load(Ordering::SeqCst), 3);
    match &outcome {
        RunOutcome::SelfEvolving(artifacts) => {
            assert!(!artifacts.draft.text.is_empty());
            assert!(!artifacts.critique.text.is_empty());
            assert!(!artifacts.final_plan.text.is_empty());
        }
        RunOutcome::SinglePass(_) => panic!("wrong outcome variant"),
    }

    // Preview extraction works on the primary output
    assert_eq!(extract_html(outcome.primary_text()).unwrap(), "<p>hi</p>");
}

#[tokio::test]
async fn test_single_pass_run_issues_one_call() {
    let api = CannedApi::new("just the draft");
    let orchestrator = Orchestrator::new(&api);

    let outcome = orchestrator
        .run("plan a pantry inventory tool", Mode::SinglePass)
        .await
        .unwrap();

    assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    assert_eq!(outcome.primary_text(), "just the draft");
    assert_eq!(extract_html(outcome.primary_text()), None);
}

#[tokio::test]
async fn test_validation_precedes_any_call() {
    let api = CannedApi::new("never used");
    let orchestrator = Orchestrator::new(&api);

    let err = orchestrator.run("  ", Mode::SinglePass).await.unwrap_err();
    assert!(matches!(err, EvoplanError::InvalidRequest(_)));
    assert_eq!(api.calls.load(Ordering::SeqCst), 0);
}
