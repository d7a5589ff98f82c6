//! Consensus rules
//!
//! Decides whether a tally approves. The default, [`QuorumRule::Majority`],
//! requires strictly more than half of all collected votes to be APPROVE;
//! ties never approve.

use serde::{Deserialize, Serialize};

/// Rule for determining council consensus
///
/// # Example
///
/// ```
/// use council_domain::QuorumRule;
///
/// let rule = QuorumRule::Majority;
/// assert!(rule.is_satisfied(3, 4));  // 3/4 > 50%
/// assert!(!rule.is_satisfied(2, 4)); // a tie is not a majority
///
/// let strict = QuorumRule::Unanimous;
/// assert!(!strict.is_satisfied(2, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuorumRule {
    /// Strictly more than half must approve
    #[default]
    Majority,

    /// Every vote must approve
    Unanimous,

    /// At least n votes must approve
    AtLeast(usize),

    /// At least this percentage must approve (0-100)
    Percentage(u8),
}

impl QuorumRule {
    /// Check if the rule is satisfied given approval count and total votes.
    ///
    /// Zero votes never satisfy any rule.
    pub fn is_satisfied(&self, approvals: usize, total: usize) -> bool {
        if total == 0 {
            return false;
        }

        match self {
            QuorumRule::Majority => approvals * 2 > total,
            QuorumRule::Unanimous => approvals == total,
            QuorumRule::AtLeast(n) => approvals >= *n,
            QuorumRule::Percentage(p) => approvals >= Self::percentage_threshold(*p, total),
        }
    }

    fn percentage_threshold(p: u8, total: usize) -> usize {
        // ceil(total * p / 100) in integer arithmetic
        (total * p as usize).div_ceil(100)
    }
}

impl std::fmt::Display for QuorumRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuorumRule::Majority => write!(f, "majority (more than half)"),
            QuorumRule::Unanimous => write!(f, "unanimous (all must approve)"),
            QuorumRule::AtLeast(n) => write!(f, "at least {} approvals", n),
            QuorumRule::Percentage(p) => write!(f, "at least {}% approval", p),
        }
    }
}

impl std::str::FromStr for QuorumRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "majority" => Ok(QuorumRule::Majority),
            "unanimous" => Ok(QuorumRule::Unanimous),
            v if v.starts_with("at_least:") || v.starts_with("atleast:") => {
                let n = v
                    .split(':')
                    .nth(1)
                    .unwrap_or_default()
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid number in quorum rule: {}", s))?;
                Ok(QuorumRule::AtLeast(n))
            }
            v if v.starts_with("percentage:") || v.ends_with('%') => {
                let p = v
                    .trim_start_matches("percentage:")
                    .trim_end_matches('%')
                    .parse::<u8>()
                    .map_err(|_| format!("Invalid percentage in quorum rule: {}", s))?;
                if p > 100 {
                    return Err(format!("Percentage out of range: {}", p));
                }
                Ok(QuorumRule::Percentage(p))
            }
            _ => Err(format!(
                "Unknown quorum rule: {}. Valid: majority, unanimous, at_least:N, percentage:N or N%",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_majority_is_strict() {
        let rule = QuorumRule::Majority;

        assert!(!rule.is_satisfied(1, 3));
        assert!(rule.is_satisfied(2, 3));

        // 4 total: 2 is a tie, not a majority
        assert!(!rule.is_satisfied(2, 4));
        assert!(rule.is_satisfied(3, 4));

        assert!(rule.is_satisfied(1, 1));
        assert!(!rule.is_satisfied(1, 2));
    }

    #[test]
    fn test_unanimous_rule() {
        let rule = QuorumRule::Unanimous;
        assert!(!rule.is_satisfied(2, 3));
        assert!(rule.is_satisfied(3, 3));
    }

    #[test]
    fn test_at_least_rule() {
        let rule = QuorumRule::AtLeast(2);
        assert!(!rule.is_satisfied(1, 5));
        assert!(rule.is_satisfied(2, 5));
    }

    #[test]
    fn test_percentage_rule() {
        let rule = QuorumRule::Percentage(75);
        assert!(!rule.is_satisfied(2, 4));
        assert!(rule.is_satisfied(3, 4));
        // 5 total: ceil(3.75) = 4
        assert!(!rule.is_satisfied(3, 5));
        assert!(rule.is_satisfied(4, 5));
    }

    #[test]
    fn test_zero_total_never_satisfied() {
        assert!(!QuorumRule::Majority.is_satisfied(0, 0));
        assert!(!QuorumRule::AtLeast(0).is_satisfied(0, 0));
        assert!(!QuorumRule::Percentage(0).is_satisfied(0, 0));
    }

    #[test]
    fn test_parse_rule() {
        assert_eq!("majority".parse::<QuorumRule>(), Ok(QuorumRule::Majority));
        assert_eq!("Unanimous".parse::<QuorumRule>(), Ok(QuorumRule::Unanimous));
        assert_eq!("at_least:3".parse::<QuorumRule>(), Ok(QuorumRule::AtLeast(3)));
        assert_eq!(
            "percentage:60".parse::<QuorumRule>(),
            Ok(QuorumRule::Percentage(60))
        );
        assert_eq!("80%".parse::<QuorumRule>(), Ok(QuorumRule::Percentage(80)));
        assert!("150%".parse::<QuorumRule>().is_err());
        assert!("plurality".parse::<QuorumRule>().is_err());
    }
}
