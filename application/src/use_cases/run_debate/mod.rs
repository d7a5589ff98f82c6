//! Run Debate use case
//!
//! Drives the debate state machine end to end:
//!
//! ```text
//! Propose → Critique → Revise → ReEvaluate → Specialist → Verdict → Vote
//!                                                            ↑        │
//!                                                       ReviseAgain ←─┤
//!                                                                     └→ Approved | Rejected
//! ```
//!
//! Every call goes through the [`AdmissionController`] and then the
//! [`LlmGateway`]. Agents act one after another, in roster order, and each
//! sees every step completed before it.

mod types;
mod voting;

pub use types::{RunDebateError, RunDebateInput};

use crate::admission::{Admission, AdmissionController};
use crate::config::DebateParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{DebateProgressNotifier, NoProgress};
use crate::use_cases::shared::{is_cancelled, send_cancellable};
use council_domain::{
    Agent, ConversationTurn, CouncilCatalog, DebatePhase, DebateResult, DebateStep, DomainError,
    Question, RoleBuckets, TurnBuilder, TurnHistory, VoteRound,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use types::CallError;

/// Use case for running a council debate
pub struct RunDebateUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    admission: Arc<AdmissionController>,
    catalog: Arc<CouncilCatalog>,
    params: DebateParams,
    cancellation_token: Option<CancellationToken>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

/// Mutable state of one run; private to that run
struct DebateState<'a> {
    input: &'a RunDebateInput,
    history: TurnHistory,
    candidate: String,
    rounds: Vec<VoteRound>,
    revision_rounds: usize,
}

impl<G: LlmGateway + 'static> RunDebateUseCase<G> {
    pub fn new(
        gateway: Arc<G>,
        admission: Arc<AdmissionController>,
        catalog: Arc<CouncilCatalog>,
    ) -> Self {
        Self {
            gateway,
            admission,
            catalog,
            params: DebateParams::default(),
            cancellation_token: None,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_params(mut self, params: DebateParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Execute the debate without progress reporting
    pub async fn execute(&self, input: RunDebateInput) -> Result<DebateResult, RunDebateError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the debate with progress callbacks
    ///
    /// Returns a result whenever the state machine terminates, approved or
    /// not. Any failure outside the vote aborts the run with no result.
    pub async fn execute_with_progress(
        &self,
        input: RunDebateInput,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<DebateResult, RunDebateError> {
        if is_cancelled(&self.cancellation_token) {
            return Err(RunDebateError::Cancelled);
        }
        self.catalog.validate_roster(&input.agents)?;

        let buckets = RoleBuckets::partition(&input.agents);
        if buckets.is_degraded() {
            let defaulted: Vec<_> = buckets.defaulted.iter().map(|r| r.as_str()).collect();
            warn!(
                "Council has no agent for role(s) {}; reusing other agents, which narrows the debate",
                defaulted.join(", ")
            );
        }

        info!(
            "Starting debate with {} agents (max {} revision rounds)",
            input.agents.len(),
            self.params.max_revision_rounds
        );
        self.conversation_logger.log(ConversationEvent::new(
            "debate_started",
            serde_json::json!({
                "question": input.question.content(),
                "agents": input.agents,
                "has_context": input.context.is_some(),
                "max_revision_rounds": self.params.max_revision_rounds,
                "rule": self.params.rule.to_string(),
            }),
        ));

        let outcome = self.run(&input, &buckets, progress).await;

        match &outcome {
            Ok(result) => {
                info!(
                    "Debate finished: {} ({})",
                    result.outcome, result.vote_summary
                );
                self.conversation_logger.log(ConversationEvent::new(
                    "debate_finished",
                    serde_json::json!({
                        "approved": result.approved,
                        "vote_summary": result.vote_summary,
                        "revision_rounds": result.revision_rounds,
                        "steps": result.step_count(),
                        "final_answer": result.final_answer,
                    }),
                ));
            }
            Err(e) => {
                warn!("Debate failed: {}", e);
                self.conversation_logger.log(ConversationEvent::new(
                    "debate_failed",
                    serde_json::json!({
                        "error": e.to_string(),
                        "phase": e.phase().map(|p| p.as_str()),
                    }),
                ));
            }
        }

        outcome
    }

    async fn run(
        &self,
        input: &RunDebateInput,
        buckets: &RoleBuckets<'_>,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<DebateResult, RunDebateError> {
        let mut state = DebateState {
            input,
            history: TurnHistory::new(),
            candidate: String::new(),
            rounds: Vec::new(),
            revision_rounds: 0,
        };
        let mut phase = DebatePhase::Propose;

        loop {
            let next = match phase {
                DebatePhase::Propose | DebatePhase::Revise => {
                    self.run_phase(phase, &buckets.thinkers, &input.question, &mut state, progress)
                        .await?;
                    phase.next()
                }
                DebatePhase::Critique | DebatePhase::ReEvaluate => {
                    self.run_phase(phase, &buckets.critics, &input.question, &mut state, progress)
                        .await?;
                    phase.next()
                }
                DebatePhase::Specialist => {
                    if !buckets.specialists.is_empty() {
                        self.run_phase(
                            phase,
                            &buckets.specialists,
                            &input.question,
                            &mut state,
                            progress,
                        )
                        .await?;
                    }
                    phase.next()
                }
                DebatePhase::Verdict => {
                    if let Some(verdict) = self
                        .run_phase(phase, &buckets.judges, &input.question, &mut state, progress)
                        .await?
                    {
                        state.candidate = verdict;
                    }
                    phase.next()
                }
                DebatePhase::Vote => {
                    let round = self.vote_round(&state, progress).await?;
                    let after = DebatePhase::after_vote(
                        round.approved,
                        state.revision_rounds,
                        self.params.max_revision_rounds,
                    );
                    state.rounds.push(round);
                    Some(after)
                }
                DebatePhase::ReviseAgain => {
                    state.revision_rounds += 1;
                    let summary = state
                        .rounds
                        .last()
                        .map(|r| r.summary.clone())
                        .unwrap_or_default();
                    info!(
                        "Revision round {}/{}",
                        state.revision_rounds, self.params.max_revision_rounds
                    );
                    let revised = input
                        .question
                        .with_instruction(&TurnBuilder::revision_instruction(&summary));
                    self.run_phase(phase, &buckets.thinkers, &revised, &mut state, progress)
                        .await?;
                    phase.next()
                }
                DebatePhase::Approved | DebatePhase::Rejected => break,
            };

            // Every non-terminal phase has a successor
            phase = next.unwrap_or(DebatePhase::Rejected);
        }

        Ok(DebateResult::conclude(
            input.question.content(),
            state.history,
            state.candidate,
            state.rounds,
            state.revision_rounds,
        ))
    }

    /// Run every agent of `actors` once, in order, appending each step.
    ///
    /// Returns the content of the last step.
    async fn run_phase(
        &self,
        phase: DebatePhase,
        actors: &[&Agent],
        question: &Question,
        state: &mut DebateState<'_>,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<Option<String>, RunDebateError> {
        let Some(step_type) = phase.step_type() else {
            return Ok(None);
        };

        info!("Phase: {} ({} agents)", phase, actors.len());
        progress.on_phase_start(&phase, actors.len());

        let mut last = None;
        for agent in actors {
            if is_cancelled(&self.cancellation_token) {
                return Err(RunDebateError::Cancelled);
            }

            let system_prompt = self.system_prompt(agent)?;
            let turns = TurnBuilder::debate_turns(
                system_prompt,
                &state.history,
                question.content(),
                state.input.context.as_deref(),
            );

            progress.on_turn_start(agent, step_type);
            let (content, admission) = self
                .dispatch(agent, &turns, progress)
                .await
                .map_err(|e| e.into_run_error(phase, agent))?;

            let step = DebateStep::new(agent, step_type, content, admission.provider, admission.model);
            debug!(
                "{} completed {} via {}/{}",
                step.agent_name, step.step_type, step.provider, step.model
            );
            state.history.append(step.clone());
            progress.on_step(&step);
            self.conversation_logger.log(ConversationEvent::new(
                "debate_step",
                serde_json::to_value(&step).unwrap_or_default(),
            ));
            last = Some(step.content);
        }

        Ok(last)
    }

    fn system_prompt(&self, agent: &Agent) -> Result<&str, RunDebateError> {
        self.catalog.system_prompt(&agent.role).ok_or_else(|| {
            RunDebateError::Configuration(DomainError::UnknownRole {
                agent: agent.name.clone(),
                role: agent.role.to_string(),
            })
        })
    }

    /// Admit and send one call for `agent`.
    ///
    /// The fallback event fires before the call is sent, so it always
    /// precedes the step produced from the reply. A slot acquired after
    /// cancellation is released unsent.
    async fn dispatch(
        &self,
        agent: &Agent,
        turns: &[ConversationTurn],
        progress: &dyn DebateProgressNotifier,
    ) -> Result<(String, Admission), CallError> {
        let admission = self
            .admission
            .acquire(&agent.provider, &agent.model)
            .map_err(CallError::Admission)?;

        // Only calls that are actually sent may count against a limit
        if is_cancelled(&self.cancellation_token) {
            self.admission.release(&admission);
            return Err(CallError::Gateway(GatewayError::Cancelled));
        }

        if admission.substituted {
            warn!(
                "Provider {} is rate-limited; {} uses {} ({})",
                agent.provider, agent.name, admission.provider, admission.model
            );
            progress.on_provider_fallback(&agent.provider, &admission.provider);
            self.conversation_logger.log(ConversationEvent::new(
                "provider_fallback",
                serde_json::json!({
                    "agent": agent.id,
                    "original": agent.provider,
                    "substitute": admission.provider,
                    "model": admission.model,
                }),
            ));
        }

        debug!(
            "Dispatching {} to {}/{}",
            agent.name, admission.provider, admission.model
        );
        let content = send_cancellable(
            self.gateway.as_ref(),
            &admission.provider,
            &admission.model,
            turns,
            self.params.call_timeout,
            &self.cancellation_token,
        )
        .await
        .map_err(CallError::Gateway)?;

        Ok((content, admission))
    }
}

#[cfg(test)]
mod tests;
