//! Vote response parsing for council consensus.
//!
//! Extracts a [`VoteChoice`] and a reason from a free-form reply. Pure
//! text matching, no I/O.
//!
//! | Step | Looks at | Reason returned |
//! |------|----------|-----------------|
//! | 1 | first non-blank line | remaining non-blank lines joined with spaces |
//! | 2 | whole reply | whole reply |
//! | 3 | nothing matched | whole reply, vote is APPROVE |
//!
//! Keywords are matched case-insensitively in the order APPROVE, REJECT,
//! NEEDS REVISION.

use super::vote::VoteChoice;

/// Parse a vote reply into `(choice, reason)`.
///
/// An unparsable reply counts as [`VoteChoice::Approve`].
///
/// # Examples
///
/// ```
/// use council_domain::{parse_vote, VoteChoice};
///
/// let (choice, reason) = parse_vote("Reject\nThe proof is incomplete.");
/// assert_eq!(choice, VoteChoice::Reject);
/// assert_eq!(reason, "The proof is incomplete.");
///
/// let (choice, _) = parse_vote("Looks fine to me.");
/// assert_eq!(choice, VoteChoice::Approve);
/// ```
pub fn parse_vote(text: &str) -> (VoteChoice, String) {
    let text = text.trim();
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if let Some(first) = lines.first() {
        let first_upper = first.to_uppercase();
        for choice in VoteChoice::ALL {
            if first_upper.contains(choice.keyword()) {
                return (choice, lines[1..].join(" "));
            }
        }
    }

    let text_upper = text.to_uppercase();
    for choice in VoteChoice::ALL {
        if text_upper.contains(choice.keyword()) {
            return (choice, text.to_string());
        }
    }

    (VoteChoice::Approve, text.to_string())
}
