//! Turn builder for debate and vote calls

use crate::debate::conversation::ConversationTurn;
use crate::debate::history::TurnHistory;

/// Assembles the ordered turns passed to the gateway
pub struct TurnBuilder;

impl TurnBuilder {
    /// Turns for a debate step: the role's system prompt, then a single user
    /// turn carrying the attached context, the question and the whole
    /// history so far, each entry labeled with its speaker.
    pub fn debate_turns(
        system_prompt: &str,
        history: &TurnHistory,
        question: &str,
        context: Option<&str>,
    ) -> Vec<ConversationTurn> {
        let mut parts: Vec<String> = Vec::new();

        if let Some(ctx) = context.filter(|c| !c.is_empty()) {
            parts.push(format!("## Attached Context\n{}\n", ctx));
        }

        parts.push(format!("## Question\n{}\n", question));

        if !history.is_empty() {
            parts.push("## Debate So Far".to_string());
            for entry in history.iter() {
                parts.push(format!("**{}:**\n{}\n", entry.agent_name, entry.content));
            }
        }

        vec![
            ConversationTurn::system(system_prompt),
            ConversationTurn::user(parts.join("\n")),
        ]
    }

    /// Turns asking an agent to vote on the candidate answer
    pub fn vote_turns(system_prompt: &str, question: &str, candidate: &str) -> Vec<ConversationTurn> {
        let prompt = format!(
            r#"## Question
{}

## Proposed Final Answer
{}

Based on the above, cast your vote. Reply with EXACTLY one of:
- APPROVE
- REJECT
- NEEDS REVISION

Then on the next line provide a brief (1-2 sentence) reason for your vote."#,
            question, candidate
        );

        vec![
            ConversationTurn::system(system_prompt),
            ConversationTurn::user(prompt),
        ]
    }

    /// Instruction appended to the question for a revision round
    pub fn revision_instruction(summary: &str) -> String {
        format!(
            "The council voted: {}. Please revise your solution to address the concerns raised.",
            summary
        )
    }
}
