//! Vote phase: every agent votes on the candidate answer

use super::types::RunDebateError;
use super::{DebateState, RunDebateUseCase};
use crate::ports::conversation_logger::ConversationEvent;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::DebateProgressNotifier;
use crate::use_cases::shared::is_cancelled;
use council_domain::{DebatePhase, StepType, TurnBuilder, Vote, VoteRound, parse_vote};
use tracing::{info, warn};

impl<G: LlmGateway + 'static> RunDebateUseCase<G> {
    /// Collect one vote from every agent in the roster and tally them.
    ///
    /// A failed call never aborts the round: that agent's vote becomes
    /// NEEDS REVISION carrying the failure. Only cancellation and
    /// configuration problems propagate.
    pub(super) async fn vote_round(
        &self,
        state: &DebateState<'_>,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<VoteRound, RunDebateError> {
        let agents = &state.input.agents;
        info!("Phase: {} ({} agents)", DebatePhase::Vote, agents.len());
        progress.on_phase_start(&DebatePhase::Vote, agents.len());

        let mut votes = Vec::with_capacity(agents.len());
        for agent in agents {
            if is_cancelled(&self.cancellation_token) {
                return Err(RunDebateError::Cancelled);
            }

            let turns = TurnBuilder::vote_turns(
                self.system_prompt(agent)?,
                state.input.question.content(),
                &state.candidate,
            );

            progress.on_turn_start(agent, StepType::Vote);
            let vote = match self.dispatch(agent, &turns, progress).await {
                Ok((raw, _)) => {
                    let (choice, reason) = parse_vote(&raw);
                    Vote::new(agent, choice, reason, raw)
                }
                Err(e) if e.is_cancelled() => return Err(RunDebateError::Cancelled),
                Err(e) => {
                    warn!("Vote from {} unavailable: {}", agent.name, e);
                    Vote::unavailable(agent, e)
                }
            };

            info!("{} votes {}", vote.agent_name, vote.choice);
            progress.on_vote(&vote);
            votes.push(vote);
        }

        let round = VoteRound::new(state.revision_rounds, votes, &self.params.rule);
        info!(
            "Vote round {}: {} ({})",
            round.round,
            round.summary,
            if round.approved { "approved" } else { "not approved" }
        );
        progress.on_round_complete(&round);
        self.conversation_logger.log(ConversationEvent::new(
            "vote_round",
            serde_json::to_value(&round).unwrap_or_default(),
        ));

        Ok(round)
    }
}
