//! Progress notification port
//!
//! Defines the events emitted while a debate runs. Events are delivered
//! synchronously, in the order steps complete.

use council_domain::{Agent, DebatePhase, DebateStep, StepType, Vote, VoteRound};

/// Callback for progress updates during a debate
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, spinner, etc.)
pub trait DebateProgressNotifier: Send + Sync {
    /// Called after every completed debate step
    fn on_step(&self, step: &DebateStep);

    /// Called when admission control routed a call away from `original`.
    ///
    /// Always fires before the step that used `substitute`.
    fn on_provider_fallback(&self, original: &str, substitute: &str);

    /// Called when a phase starts with the number of agents acting in it
    fn on_phase_start(&self, _phase: &DebatePhase, _actors: usize) {}

    /// Called right before an agent's call is dispatched
    fn on_turn_start(&self, _agent: &Agent, _step_type: StepType) {}

    /// Called for each collected vote
    fn on_vote(&self, _vote: &Vote) {}

    /// Called when a voting round has been tallied
    fn on_round_complete(&self, _round: &VoteRound) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DebateProgressNotifier for NoProgress {
    fn on_step(&self, _step: &DebateStep) {}
    fn on_provider_fallback(&self, _original: &str, _substitute: &str) {}
}
