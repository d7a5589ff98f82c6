//! Console output formatter for debate results

use colored::{ColoredString, Colorize};
use council_domain::{DebateResult, VoteChoice, VoteRound};

/// Formats debate results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete debate: every step, every vote round and the verdict
    pub fn format(result: &DebateResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("AI Council Debate"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n\n",
            "Question:".cyan().bold(),
            result.question
        ));

        output.push_str(&Self::section_header("Debate"));
        for step in &result.steps {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!(
                    "── {} · {} ({}/{}) ──",
                    step.agent_name, step.step_type, step.provider, step.model
                )
                .yellow()
                .bold(),
                step.content
            ));
        }

        for round in &result.rounds {
            output.push_str(&Self::section_header(&Self::round_title(round)));
            output.push_str(&Self::format_round(round));
        }

        output.push_str(&Self::section_header("Final Answer"));
        output.push_str(&format!("\n{}\n", result.final_answer));

        output.push('\n');
        output.push_str(&Self::verdict_banner(result));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &DebateResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the final answer and vote summary only (concise output)
    pub fn format_answer_only(result: &DebateResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== AI Council Answer ===".cyan().bold()
        ));
        output.push_str(&format!("{} {}\n\n", "Q:".bold(), result.question));
        output.push_str(&result.final_answer);
        output.push_str("\n\n");
        output.push_str(&Self::verdict_banner(result));

        output
    }

    fn verdict_banner(result: &DebateResult) -> String {
        let title = if result.approved {
            "Council Approved".green().bold()
        } else {
            "Council did not approve".red().bold()
        };

        let mut banner = format!("{}", title);
        if !result.vote_summary.is_empty() {
            banner.push_str(&format!("  {}", result.vote_summary.dimmed()));
        }
        if result.revision_rounds > 0 {
            banner.push_str(&format!(
                "\n{}",
                format!("after {} revision round(s)", result.revision_rounds).dimmed()
            ));
        }
        banner.push('\n');
        banner
    }

    fn round_title(round: &VoteRound) -> String {
        if round.round == 0 {
            "Council Vote".to_string()
        } else {
            format!("Council Vote (after revision {})", round.round)
        }
    }

    fn format_round(round: &VoteRound) -> String {
        let mut output = String::new();
        for vote in &round.votes {
            output.push_str(&format!(
                "  {:<16} {}: {}\n",
                Self::choice_label(vote.choice),
                vote.agent_name,
                vote.reason
            ));
        }
        output.push_str(&format!("\n  {}\n", round.summary));
        output
    }

    pub(crate) fn choice_label(choice: VoteChoice) -> ColoredString {
        match choice {
            VoteChoice::Approve => choice.keyword().green(),
            VoteChoice::Reject => choice.keyword().red(),
            VoteChoice::NeedsRevision => choice.keyword().yellow(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{
        Agent, DebateStep, QuorumRule, Role, StepType, TurnHistory, Vote,
    };

    fn result(approve: bool) -> DebateResult {
        let thinker = Agent::new("t", "Thinker 1", Role::Thinker, "groq", "llama");
        let judge = Agent::new("j", "Judge", Role::Judge, "google", "gemini");

        let mut history = TurnHistory::new();
        history.append(DebateStep::new(&thinker, StepType::Proposal, "Use Rust.", "groq", "llama"));
        history.append(DebateStep::new(
            &judge,
            StepType::Verdict,
            "Rust it is.",
            "cerebras",
            "llama3.1-70b",
        ));

        let choice = if approve {
            VoteChoice::Approve
        } else {
            VoteChoice::Reject
        };
        let votes = vec![
            Vote::new(&thinker, choice, "Fine.", "..."),
            Vote::new(&judge, choice, "Agreed.", "..."),
        ];
        let round = VoteRound::new(0, votes, &QuorumRule::Majority);

        DebateResult::conclude("Which language?", history, "Rust it is.".to_string(), vec![round], 0)
    }

    #[test]
    fn test_format_full_lists_steps_votes_and_verdict() {
        let text = ConsoleFormatter::format(&result(true));
        assert!(text.contains("Which language?"));
        assert!(text.contains("Thinker 1 · proposal (groq/llama)"));
        assert!(text.contains("Judge · verdict (cerebras/llama3.1-70b)"));
        assert!(text.contains("Agreed."));
        assert!(text.contains("APPROVE: 2/2"));
        assert!(text.contains("Council Approved"));
    }

    #[test]
    fn test_format_answer_only() {
        let text = ConsoleFormatter::format_answer_only(&result(false));
        assert!(text.contains("Rust it is."));
        assert!(text.contains("Council did not approve"));
        assert!(!text.contains("proposal"));
    }

    #[test]
    fn test_format_json_round_trips() {
        let json = ConsoleFormatter::format_json(&result(true));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["approved"], true);
        assert_eq!(value["final_answer"], "Rust it is.");
        assert_eq!(value["steps"].as_array().unwrap().len(), 2);
        assert_eq!(value["outcome"], "approved");
    }
}
