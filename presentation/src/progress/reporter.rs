//! Progress reporting for debate execution

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use council_application::{DebateProgressNotifier, NoProgress};
use council_domain::{Agent, DebatePhase, DebateStep, StepType, Vote, VoteRound};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Reports debate progress with a spinner per phase
///
/// Completed steps, fallbacks and votes are printed above the spinner.
pub struct ProgressReporter {
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            phase_bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.phase_bar.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Print a line above the spinner, or to stderr when it is hidden
    fn line(&self, text: String) {
        match self.bar().as_ref() {
            Some(pb) if !pb.is_hidden() => pb.println(text),
            _ => eprintln!("{}", text),
        }
    }

    fn finish_phase(&self) {
        if let Some(pb) = self.bar().take() {
            pb.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.finish_phase();
    }
}

impl DebateProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &DebatePhase, actors: usize) {
        self.finish_phase();

        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(phase.display_name());
        pb.set_message(format!("{} agent(s)", actors));
        pb.enable_steady_tick(Duration::from_millis(100));

        self.line(format!("{} {}", "->".cyan(), phase.display_name().bold()));
        *self.bar() = Some(pb);
    }

    fn on_turn_start(&self, agent: &Agent, step_type: StepType) {
        if let Some(pb) = self.bar().as_ref() {
            pb.set_message(format!("{} is working on the {}...", agent.name, step_type));
        }
    }

    fn on_step(&self, step: &DebateStep) {
        self.line(format!(
            "  {} {} [{}] {}",
            "v".green(),
            step.agent_name,
            step.step_type,
            format!("{}/{}", step.provider, step.model).dimmed()
        ));
    }

    fn on_provider_fallback(&self, original: &str, substitute: &str) {
        self.line(format!(
            "  {} {} is rate-limited, using {}",
            "!".yellow().bold(),
            original,
            substitute.bold()
        ));
    }

    fn on_vote(&self, vote: &Vote) {
        self.line(format!(
            "  {} {}",
            ConsoleFormatter::choice_label(vote.choice),
            vote.agent_name
        ));
    }

    fn on_round_complete(&self, round: &VoteRound) {
        let verdict = if round.approved {
            "approved".green().bold()
        } else {
            "not approved".red().bold()
        };
        self.line(format!("  {} ({})", round.summary, verdict));
        self.finish_phase();
    }
}

/// Simple text-based progress (no spinner)
///
/// One plain line per event, suited to logs and pipes.
pub struct SimpleProgress;

impl SimpleProgress {
    fn phase_line(phase: &DebatePhase, actors: usize) -> String {
        format!("{} ({} agents)", phase.display_name(), actors)
    }

    fn step_line(step: &DebateStep) -> String {
        format!(
            "  {} [{}] {}/{}",
            step.agent_name, step.step_type, step.provider, step.model
        )
    }

    fn fallback_line(original: &str, substitute: &str) -> String {
        format!("  {} is rate-limited, using {}", original, substitute)
    }

    fn vote_line(vote: &Vote) -> String {
        format!("  {} {}", vote.choice.keyword(), vote.agent_name)
    }
}

impl DebateProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &DebatePhase, actors: usize) {
        eprintln!("{}", Self::phase_line(phase, actors));
    }

    fn on_step(&self, step: &DebateStep) {
        eprintln!("{}", Self::step_line(step));
    }

    fn on_provider_fallback(&self, original: &str, substitute: &str) {
        eprintln!("{}", Self::fallback_line(original, substitute));
    }

    fn on_vote(&self, vote: &Vote) {
        eprintln!("{}", Self::vote_line(vote));
    }

    fn on_round_complete(&self, round: &VoteRound) {
        eprintln!("  {}", round.summary);
    }
}

/// How a run reports its progress on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// Spinner with colored lines
    Spinner,
    /// Plain lines, no spinner
    Plain,
    /// Nothing
    Silent,
}

impl ProgressMode {
    /// `quiet` wins; plain output is used when asked for or when stderr is
    /// not a terminal.
    pub fn select(quiet: bool, plain: bool, stderr_is_terminal: bool) -> Self {
        if quiet {
            ProgressMode::Silent
        } else if plain || !stderr_is_terminal {
            ProgressMode::Plain
        } else {
            ProgressMode::Spinner
        }
    }

    pub fn notifier(self) -> Box<dyn DebateProgressNotifier> {
        match self {
            ProgressMode::Spinner => Box::new(ProgressReporter::new()),
            ProgressMode::Plain => Box::new(SimpleProgress),
            ProgressMode::Silent => Box::new(NoProgress),
        }
    }
}
