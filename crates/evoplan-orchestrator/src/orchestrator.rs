//! Self-evolving orchestrator
//!
//! A strict must-succeed-in-order pipeline: draft, critique, revise. Any
//! step failure aborts the run immediately and propagates the underlying
//! error; no partial artifacts are returned, no step is retried, and no
//! compensating action is taken. That absence of recovery is the designed
//! behavior for this scope.

use tracing::info;
use uuid::Uuid;

use evoplan_client::CompletionApi;
use evoplan_core::{
    EvoplanError, GenerationResult, Mode, PlanArtifacts, Result, RunOutcome,
};

use crate::prompt;

/// Orchestrator over any completion backend
///
/// Generic so tests can drive the pipeline with a scripted backend instead
/// of a live HTTP client.
pub struct Orchestrator<C: CompletionApi> {
    client: C,
}

impl<C: CompletionApi> Orchestrator<C> {
    /// Create an orchestrator around a completion client
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Run one full orchestration in the requested mode
    pub async fn run(&self, goal: &str, mode: Mode) -> Result<RunOutcome> {
        let goal = validated_goal(goal)?;

        let run_id = Uuid::new_v4();
        info!("Starting {} run {}", mode, run_id);

        match mode {
            Mode::SelfEvolving => Ok(RunOutcome::SelfEvolving(self.self_evolve(goal).await?)),
            Mode::SinglePass => Ok(RunOutcome::SinglePass(self.single_pass(goal).await?)),
        }
    }

    /// Three-pass pipeline: draft, critique the verbatim draft, revise with
    /// both verbatim texts
    pub async fn self_evolve(&self, goal: &str) -> Result<PlanArtifacts> {
        let goal = validated_goal(goal)?;

        info!("Phase 1/3: drafting plan");
        let draft = self
            .client
            .generate(&prompt::with_system(
                prompt::PLAN_SYSTEM,
                &prompt::plan_task(goal),
            ))
            .await?;

        info!("Phase 2/3: critiquing draft ({} chars)", draft.text.len());
        let critique = self
            .client
            .generate(&prompt::with_system(
                prompt::PLAN_SYSTEM,
                &prompt::critique(&draft.text),
            ))
            .await?;

        info!(
            "Phase 3/3: revising plan ({} chars of critique)",
            critique.text.len()
        );
        let final_plan = self
            .client
            .generate(&prompt::with_system(
                prompt::PLAN_SYSTEM,
                &prompt::revise(&draft.text, &critique.text),
            ))
            .await?;

        Ok(PlanArtifacts {
            draft,
            critique,
            final_plan,
        })
    }

    /// Single draft-equivalent call using the same task template
    pub async fn single_pass(&self, goal: &str) -> Result<GenerationResult> {
        let goal = validated_goal(goal)?;

        info!("Single pass: drafting plan");
        self.client
            .generate(&prompt::with_system(
                prompt::PLAN_SYSTEM,
                &prompt::plan_task(goal),
            ))
            .await
    }

    /// Website mode: one call with the UI prompt pair
    ///
    /// Selected by `--website` or [`prompt::wants_website`]; the goal is
    /// interpolated into the task the same way [`prompt::plan_task`] does.
    pub async fn generate_website(&self, goal: &str) -> Result<GenerationResult> {
        let goal = validated_goal(goal)?;

        info!("Website mode: generating page");
        self.client
            .generate(&prompt::with_system(
                prompt::UI_SYSTEM,
                &prompt::ui_task(goal),
            ))
            .await
    }
}

/// Reject empty or whitespace-only goals before any network call
fn validated_goal(goal: &str) -> Result<&str> {
    let goal = goal.trim();
    if goal.is_empty() {
        return Err(EvoplanError::InvalidRequest(
            "goal is empty; enter a goal first".to_string(),
        ));
    }
    Ok(goal)
}
