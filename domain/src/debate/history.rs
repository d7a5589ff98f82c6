//! Append-only debate history

use super::entities::DebateStep;
use serde::{Deserialize, Serialize};

/// Ordered record of every completed step; the debate's entire memory.
///
/// The only mutation is [`TurnHistory::append`]. Entries are never edited
/// or removed once appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnHistory {
    entries: Vec<DebateStep>,
}

impl TurnHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, step: DebateStep) {
        self.entries.push(step);
    }

    pub fn entries(&self) -> &[DebateStep] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&DebateStep> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DebateStep> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::entities::Agent;
    use crate::agent::role::Role;
    use crate::debate::entities::StepType;

    #[test]
    fn test_append_preserves_order() {
        let agent = Agent::new("a", "A", Role::Thinker, "groq", "m");
        let mut history = TurnHistory::new();
        assert!(history.is_empty());

        history.append(DebateStep::new(&agent, StepType::Proposal, "first", "groq", "m"));
        history.append(DebateStep::new(&agent, StepType::Revision, "second", "groq", "m"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].content, "first");
        assert_eq!(history.last().unwrap().content, "second");
    }
}
