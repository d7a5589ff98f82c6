//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A question to be answered by the council (Value Object)
///
/// The text every agent sees under `## Question`. Revision rounds append
/// the council's feedback to it with [`Question::with_instruction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    content: String,
}

impl Question {
    /// Create a new question, rejecting empty or whitespace-only content
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::InvalidQuestion(
                "question cannot be empty".to_string(),
            ));
        }
        Ok(Self { content })
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Return a copy of this question with an extra instruction appended
    /// after a blank line.
    pub fn with_instruction(&self, instruction: &str) -> Self {
        Self {
            content: format!("{}\n\n{}", self.content, instruction),
        }
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Question {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Question::new(s)
    }
}

impl TryFrom<String> for Question {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Question::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::new("What is Rust?").unwrap();
        assert_eq!(q.content(), "What is Rust?");
    }

    #[test]
    fn test_empty_question_rejected() {
        assert!(Question::new("").is_err());
        assert!(Question::new("   \n").is_err());
    }

    #[test]
    fn test_with_instruction() {
        let q = Question::new("Q").unwrap();
        let revised = q.with_instruction("Please revise.");
        assert_eq!(revised.content(), "Q\n\nPlease revise.");
        // Original is untouched
        assert_eq!(q.content(), "Q");
    }
}
