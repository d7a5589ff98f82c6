use super::*;
use crate::admission::ManualClock;
use crate::ports::llm_gateway::GatewayError;
use async_trait::async_trait;
use council_domain::{
    BackendType, ProviderSpec, Role, RoleSpec, StepType, Vote, VoteChoice,
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

// ==================== Mocks ====================

type Responder = dyn Fn(&str, &[ConversationTurn]) -> Result<String, GatewayError> + Send + Sync;

struct MockGateway {
    responder: Box<Responder>,
    calls: Mutex<Vec<(String, String, Vec<ConversationTurn>)>>,
}

impl MockGateway {
    fn new(
        responder: impl Fn(&str, &[ConversationTurn]) -> Result<String, GatewayError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Debate turns get "<provider> reply <n>", vote turns get `vote`
    fn scripted(vote: &'static str) -> Self {
        let counter = AtomicUsize::new(0);
        Self::new(move |provider, turns| {
            if is_vote(turns) {
                Ok(vote.to_string())
            } else {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                Ok(format!("{} reply {}", provider, n))
            }
        })
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn user_turns(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, _, turns)| turns[1].content.clone())
            .collect()
    }
}

#[async_trait]
impl LlmGateway for MockGateway {
    async fn send(
        &self,
        provider: &str,
        model: &str,
        turns: &[ConversationTurn],
    ) -> Result<String, GatewayError> {
        self.calls
            .lock()
            .unwrap()
            .push((provider.to_string(), model.to_string(), turns.to_vec()));
        (self.responder)(provider, turns)
    }
}

/// Never replies; cancels `token` on the call numbered `cancel_on`
struct StallingGateway {
    token: Option<CancellationToken>,
    cancel_on: usize,
    calls: AtomicUsize,
}

#[async_trait]
impl LlmGateway for StallingGateway {
    async fn send(
        &self,
        provider: &str,
        _model: &str,
        _turns: &[ConversationTurn],
    ) -> Result<String, GatewayError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n < self.cancel_on {
            return Ok(format!("{} reply {}", provider, n));
        }
        if let Some(token) = &self.token {
            token.cancel();
        }
        std::future::pending().await
    }
}

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<String>>,
}

impl Recorder {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn steps(&self) -> usize {
        self.events().iter().filter(|e| e.starts_with("step:")).count()
    }
}

impl DebateProgressNotifier for Recorder {
    fn on_step(&self, step: &DebateStep) {
        self.events.lock().unwrap().push(format!(
            "step:{}:{}:{}",
            step.step_type, step.agent_id, step.provider
        ));
    }

    fn on_provider_fallback(&self, original: &str, substitute: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("fallback:{}->{}", original, substitute));
    }

    fn on_vote(&self, vote: &Vote) {
        self.events
            .lock()
            .unwrap()
            .push(format!("vote:{}:{}", vote.agent_id, vote.choice));
    }

    fn on_round_complete(&self, round: &VoteRound) {
        self.events
            .lock()
            .unwrap()
            .push(format!("round:{}:{}", round.round, round.approved));
    }
}

#[derive(Default)]
struct RecordingLogger {
    types: Mutex<Vec<&'static str>>,
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.types.lock().unwrap().push(event.event_type);
    }
}

// ==================== Fixtures ====================

fn is_vote(turns: &[ConversationTurn]) -> bool {
    turns
        .last()
        .is_some_and(|t| t.content.contains("cast your vote"))
}

fn provider(id: &str, backend: BackendType, rpm: u32) -> ProviderSpec {
    ProviderSpec::new(id, id.to_uppercase(), backend, format!("{}-default", id)).with_limits(rpm, 1000)
}

/// x and w share a backend; y and z are each alone in theirs
fn catalog_with_x_rpm(rpm: u32) -> Arc<CouncilCatalog> {
    Arc::new(CouncilCatalog::new(
        vec![
            provider("x", BackendType::OpenAiCompatible, rpm),
            provider("y", BackendType::Google, 100),
            provider("z", BackendType::Cohere, 100),
            provider("w", BackendType::OpenAiCompatible, 100),
        ],
        RoleSpec::defaults(),
    ))
}

fn catalog() -> Arc<CouncilCatalog> {
    catalog_with_x_rpm(100)
}

fn admission_for(catalog: &CouncilCatalog) -> Arc<AdmissionController> {
    Arc::new(AdmissionController::new(catalog, Arc::new(ManualClock::new())))
}

fn council() -> Vec<Agent> {
    vec![
        Agent::new("a", "A", Role::Thinker, "x", "mx"),
        Agent::new("b", "B", Role::Critic, "y", "my"),
        Agent::new("c", "C", Role::Judge, "z", "mz"),
    ]
}

fn input(agents: Vec<Agent>) -> RunDebateInput {
    RunDebateInput::new(Question::new("Q").unwrap(), agents)
}

fn use_case<G: LlmGateway + 'static>(gateway: Arc<G>) -> RunDebateUseCase<G> {
    let catalog = catalog();
    let admission = admission_for(&catalog);
    RunDebateUseCase::new(gateway, admission, catalog)
}

fn order(result: &DebateResult) -> Vec<(StepType, &str)> {
    result
        .steps
        .iter()
        .map(|s| (s.step_type, s.agent_id.as_str()))
        .collect()
}

// ==================== Tests ====================

#[tokio::test]
async fn test_round_trip_unanimous_approval() {
    let gateway = Arc::new(MockGateway::scripted("APPROVE\nSolid answer."));
    let recorder = Recorder::default();

    let result = use_case(gateway.clone())
        .execute_with_progress(input(council()), &recorder)
        .await
        .unwrap();

    assert_eq!(
        order(&result),
        vec![
            (StepType::Proposal, "a"),
            (StepType::Critique, "b"),
            (StepType::Revision, "a"),
            (StepType::ReEvaluation, "b"),
            (StepType::Verdict, "c"),
        ]
    );
    assert!(result.approved);
    assert_eq!(result.outcome, DebatePhase::Approved);
    assert_eq!(
        result.vote_summary,
        "APPROVE: 3/3 | REJECT: 0/3 | NEEDS REVISION: 0/3"
    );
    let voters: Vec<_> = result.votes.iter().map(|v| v.agent_id.as_str()).collect();
    assert_eq!(voters, vec!["a", "b", "c"]);
    assert_eq!(result.votes[0].reason, "Solid answer.");
    assert_eq!(result.final_answer, "z reply 4");
    assert_eq!(result.revision_rounds, 0);
    assert_eq!(result.rounds.len(), 1);
    assert_eq!(result.history.len(), 5);
    assert_eq!(gateway.call_count(), 8);

    assert_eq!(
        recorder.events(),
        vec![
            "step:proposal:a:x",
            "step:critique:b:y",
            "step:revision:a:x",
            "step:re-evaluation:b:y",
            "step:verdict:c:z",
            "vote:a:APPROVE",
            "vote:b:APPROVE",
            "vote:c:APPROVE",
            "round:0:true",
        ]
    );
}

#[tokio::test]
async fn test_each_step_sees_prior_history() {
    let gateway = Arc::new(MockGateway::scripted("APPROVE"));
    use_case(gateway.clone())
        .execute(input(council()).with_context("notes.txt body"))
        .await
        .unwrap();

    let users = gateway.user_turns();
    assert_eq!(users[0], "## Attached Context\nnotes.txt body\n\n## Question\nQ\n");
    assert_eq!(
        users[1],
        "## Attached Context\nnotes.txt body\n\n## Question\nQ\n\n## Debate So Far\n**A:**\nx reply 0\n"
    );
    assert!(users[4].contains("**B:**\ny reply 3\n"));
    // Vote prompts carry the candidate, not the history
    assert!(users[5].contains("## Proposed Final Answer\nz reply 4"));
    assert!(!users[5].contains("Debate So Far"));
}

#[tokio::test]
async fn test_rate_limited_provider_falls_back_before_step() {
    let catalog = catalog_with_x_rpm(1);
    let admission = admission_for(&catalog);
    admission.record_request("x");

    let gateway = Arc::new(MockGateway::scripted("APPROVE"));
    let recorder = Recorder::default();
    let result = RunDebateUseCase::new(gateway.clone(), admission, catalog)
        .execute_with_progress(input(council()), &recorder)
        .await
        .unwrap();

    let events = recorder.events();
    assert_eq!(events[0], "fallback:x->w");
    assert_eq!(events[1], "step:proposal:a:w");

    let proposal = &result.steps[0];
    assert_eq!(proposal.provider, "w");
    assert_eq!(proposal.model, "w-default");
    assert!(proposal.used_fallback(&council()[0]));

    let (provider, model, _) = gateway.calls.lock().unwrap()[0].clone();
    assert_eq!((provider.as_str(), model.as_str()), ("w", "w-default"));
}

#[tokio::test]
async fn test_revision_loop_stops_after_max_rounds() {
    let gateway = Arc::new(MockGateway::scripted("REJECT\nNot convincing."));
    let result = use_case(gateway.clone()).execute(input(council())).await.unwrap();

    assert!(!result.approved);
    assert_eq!(result.outcome, DebatePhase::Rejected);
    assert_eq!(result.revision_rounds, 2);
    assert_eq!(result.rounds.len(), 3);
    assert_eq!(
        order(&result)[5..].to_vec(),
        vec![
            (StepType::Revision, "a"),
            (StepType::Verdict, "c"),
            (StepType::Revision, "a"),
            (StepType::Verdict, "c"),
        ]
    );
    // Best-effort answer is the last verdict
    assert_eq!(result.final_answer, "z reply 8");
    assert_eq!(
        result.vote_summary,
        "APPROVE: 0/3 | REJECT: 3/3 | NEEDS REVISION: 0/3"
    );

    let revise_again = gateway
        .user_turns()
        .into_iter()
        .find(|u| u.contains("The council voted:"))
        .unwrap();
    assert!(revise_again.starts_with(
        "## Question\nQ\n\nThe council voted: APPROVE: 0/3 | REJECT: 3/3 | NEEDS REVISION: 0/3. Please revise your solution to address the concerns raised.\n"
    ));
}

#[tokio::test]
async fn test_approval_in_second_round_stops_loop() {
    let votes = AtomicUsize::new(0);
    let steps = AtomicUsize::new(0);
    let gateway = Arc::new(MockGateway::new(move |provider, turns| {
        if is_vote(turns) {
            let n = votes.fetch_add(1, Ordering::SeqCst);
            Ok(if n < 3 { "REJECT" } else { "APPROVE" }.to_string())
        } else {
            Ok(format!("{} reply {}", provider, steps.fetch_add(1, Ordering::SeqCst)))
        }
    }));
    let recorder = Recorder::default();

    let result = use_case(gateway)
        .execute_with_progress(input(council()), &recorder)
        .await
        .unwrap();

    assert!(result.approved);
    assert_eq!(result.revision_rounds, 1);
    assert_eq!(result.rounds.len(), 2);
    assert!(!result.rounds[0].approved);
    assert_eq!(result.rounds[1].round, 1);
    assert_eq!(result.steps.len(), 7);
    assert_eq!(result.final_answer, "z reply 6");

    let rounds: Vec<_> = recorder
        .events()
        .into_iter()
        .filter(|e| e.starts_with("round:"))
        .collect();
    assert_eq!(rounds, vec!["round:0:false", "round:1:true"]);
}

#[tokio::test]
async fn test_zero_revision_rounds_rejects_immediately() {
    let gateway = Arc::new(MockGateway::scripted("NEEDS REVISION\nMissing detail."));
    let result = use_case(gateway)
        .with_params(DebateParams::default().with_max_revision_rounds(0))
        .execute(input(council()))
        .await
        .unwrap();

    assert!(!result.approved);
    assert_eq!(result.steps.len(), 5);
    assert_eq!(result.final_answer, "z reply 4");
    assert_eq!(result.votes[0].choice, VoteChoice::NeedsRevision);
}

#[tokio::test]
async fn test_failed_vote_becomes_needs_revision() {
    let steps = AtomicUsize::new(0);
    let gateway = Arc::new(MockGateway::new(move |provider, turns| {
        if is_vote(turns) {
            if provider == "z" {
                Err(GatewayError::ConnectionError("refused".to_string()))
            } else {
                Ok("APPROVE".to_string())
            }
        } else {
            Ok(format!("{} reply {}", provider, steps.fetch_add(1, Ordering::SeqCst)))
        }
    }));

    let result = use_case(gateway).execute(input(council())).await.unwrap();

    let judge_vote = &result.votes[2];
    assert_eq!(judge_vote.choice, VoteChoice::NeedsRevision);
    assert!(judge_vote.reason.contains("refused"));
    assert!(result.approved);
    assert_eq!(
        result.vote_summary,
        "APPROVE: 2/3 | REJECT: 0/3 | NEEDS REVISION: 1/3"
    );
}

#[tokio::test]
async fn test_unparsable_vote_counts_as_approval() {
    let gateway = Arc::new(MockGateway::scripted("Looks fine to me."));
    let result = use_case(gateway).execute(input(council())).await.unwrap();

    assert!(result.approved);
    assert_eq!(result.votes[0].reason, "Looks fine to me.");
}

#[tokio::test]
async fn test_phase_failure_aborts_debate() {
    let steps = AtomicUsize::new(0);
    let gateway = Arc::new(MockGateway::new(move |provider, turns| {
        if provider == "y" && !is_vote(turns) {
            Err(GatewayError::RequestFailed("HTTP 500".to_string()))
        } else {
            Ok(format!("{} reply {}", provider, steps.fetch_add(1, Ordering::SeqCst)))
        }
    }));
    let recorder = Recorder::default();
    let logger = Arc::new(RecordingLogger::default());

    let err = use_case(gateway)
        .with_conversation_logger(logger.clone())
        .execute_with_progress(input(council()), &recorder)
        .await
        .unwrap_err();

    match err {
        RunDebateError::PhaseFailed {
            phase,
            agent,
            source,
        } => {
            assert_eq!(phase, DebatePhase::Critique);
            assert_eq!(agent, "B");
            assert!(matches!(source, GatewayError::RequestFailed(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(recorder.steps(), 1);
    assert_eq!(
        logger.types.lock().unwrap().last().copied(),
        Some("debate_failed")
    );
}

#[tokio::test]
async fn test_admission_exhaustion_aborts_before_any_call() {
    let catalog = catalog();
    let admission = admission_for(&catalog);
    for provider in ["x", "y", "z", "w"] {
        for _ in 0..100 {
            admission.record_request(provider);
        }
    }

    let gateway = Arc::new(MockGateway::scripted("APPROVE"));
    let err = RunDebateUseCase::new(gateway.clone(), admission, catalog)
        .execute(input(council()))
        .await
        .unwrap_err();

    // The user-facing message carries every provider's usage
    let message = err.to_string();
    assert!(message.contains("x: 100/100 rpm, 100/1000 rpd"));
    assert!(message.contains("w: 100/100 rpm, 100/1000 rpd"));

    match err {
        RunDebateError::AdmissionExhausted { phase, agent, .. } => {
            assert_eq!(phase, DebatePhase::Propose);
            assert_eq!(agent, "A");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(gateway.call_count(), 0);
}

#[tokio::test]
async fn test_unknown_provider_is_configuration_error() {
    let gateway = Arc::new(MockGateway::scripted("APPROVE"));
    let mut agents = council();
    agents[1].provider = "nowhere".to_string();

    let err = use_case(gateway.clone()).execute(input(agents)).await.unwrap_err();

    assert!(matches!(
        err,
        RunDebateError::Configuration(DomainError::UnknownProvider { .. })
    ));
    assert_eq!(gateway.call_count(), 0);
}

#[tokio::test]
async fn test_single_agent_plays_every_role() {
    let gateway = Arc::new(MockGateway::scripted("APPROVE"));
    let solo = vec![Agent::new("solo", "Solo", Role::Thinker, "x", "mx")];

    let result = use_case(gateway).execute(input(solo)).await.unwrap();

    assert!(result.steps.iter().all(|s| s.agent_id == "solo"));
    assert_eq!(
        result.steps.iter().map(|s| s.step_type).collect::<Vec<_>>(),
        vec![
            StepType::Proposal,
            StepType::Critique,
            StepType::Revision,
            StepType::ReEvaluation,
            StepType::Verdict,
        ]
    );
    assert_eq!(result.vote_summary, "APPROVE: 1/1 | REJECT: 0/1 | NEEDS REVISION: 0/1");
}

#[tokio::test]
async fn test_specialists_speak_before_verdict() {
    let gateway = Arc::new(MockGateway::scripted("APPROVE"));
    let mut agents = council();
    agents.insert(2, Agent::new("r", "R", Role::Researcher, "w", "mw"));

    let result = use_case(gateway).execute(input(agents)).await.unwrap();

    assert_eq!(result.steps[4].step_type, StepType::Specialist);
    assert_eq!(result.steps[4].agent_id, "r");
    assert_eq!(result.steps[5].step_type, StepType::Verdict);
    assert_eq!(result.votes.len(), 4);
}

#[tokio::test]
async fn test_transcript_events() {
    let gateway = Arc::new(MockGateway::scripted("APPROVE"));
    let logger = Arc::new(RecordingLogger::default());
    use_case(gateway)
        .with_conversation_logger(logger.clone())
        .execute(input(council()))
        .await
        .unwrap();

    let types = logger.types.lock().unwrap().clone();
    assert_eq!(types.first().copied(), Some("debate_started"));
    assert_eq!(types.iter().filter(|t| **t == "debate_step").count(), 5);
    assert_eq!(types.iter().filter(|t| **t == "vote_round").count(), 1);
    assert_eq!(types.last().copied(), Some("debate_finished"));
}

#[tokio::test]
async fn test_cancelled_before_start() {
    let gateway = Arc::new(MockGateway::scripted("APPROVE"));
    let token = CancellationToken::new();
    token.cancel();

    let err = use_case(gateway.clone())
        .with_cancellation(token)
        .execute(input(council()))
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(gateway.call_count(), 0);
}

#[tokio::test]
async fn test_cancellation_during_call_appends_nothing() {
    let token = CancellationToken::new();
    let gateway = Arc::new(StallingGateway {
        token: Some(token.clone()),
        cancel_on: 1,
        calls: AtomicUsize::new(0),
    });
    let recorder = Recorder::default();

    let err = use_case(gateway)
        .with_cancellation(token)
        .execute_with_progress(input(council()), &recorder)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    // Only the proposal completed; the interrupted critique left no step
    assert_eq!(recorder.steps(), 1);
}

/// Cancels `token` as soon as the first turn starts
struct CancelOnTurnStart {
    token: CancellationToken,
}

impl DebateProgressNotifier for CancelOnTurnStart {
    fn on_step(&self, _step: &DebateStep) {}

    fn on_provider_fallback(&self, _original: &str, _substitute: &str) {}

    fn on_turn_start(&self, _agent: &Agent, _step_type: StepType) {
        self.token.cancel();
    }
}

#[tokio::test]
async fn test_cancelled_turn_does_not_consume_rate_limit() {
    let gateway = Arc::new(MockGateway::scripted("APPROVE"));
    let catalog = catalog();
    let admission = admission_for(&catalog);
    let token = CancellationToken::new();
    let notifier = CancelOnTurnStart {
        token: token.clone(),
    };

    let err = RunDebateUseCase::new(gateway.clone(), admission.clone(), catalog)
        .with_cancellation(token)
        .execute_with_progress(input(council()), &notifier)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(gateway.call_count(), 0);
    let x = admission.stats().into_iter().find(|u| u.provider == "x").unwrap();
    assert_eq!(x.rpm_used, gateway.call_count());
    assert_eq!(x.rpd_used, 0);
}

#[tokio::test(start_paused = true)]
async fn test_call_timeout_fails_phase() {
    let gateway = Arc::new(StallingGateway {
        token: None,
        cancel_on: 0,
        calls: AtomicUsize::new(0),
    });

    let err = use_case(gateway)
        .with_params(DebateParams::default().with_call_timeout(Duration::from_secs(1)))
        .execute(input(council()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RunDebateError::PhaseFailed {
            phase: DebatePhase::Propose,
            source: GatewayError::Timeout,
            ..
        }
    ));
}
