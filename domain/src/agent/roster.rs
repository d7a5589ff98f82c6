//! Roster partition policy
//!
//! Splits a roster into the buckets that act in each debate phase. When a
//! bucket would be empty a degrading default applies so every phase still
//! has at least one actor:
//!
//! | Bucket  | Default when empty                        |
//! |---------|-------------------------------------------|
//! | thinker | first agent                               |
//! | critic  | second agent, or the first if only one    |
//! | judge   | last agent                                |
//!
//! Specialists are every agent whose role is not thinker, critic, or judge.
//! They are computed from declared roles only, so an agent pulled into a
//! defaulted bucket may also appear among the specialists.

use super::entities::Agent;
use super::role::Role;

/// Agents grouped by the phase they act in, in roster order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleBuckets<'a> {
    pub thinkers: Vec<&'a Agent>,
    pub critics: Vec<&'a Agent>,
    pub judges: Vec<&'a Agent>,
    pub specialists: Vec<&'a Agent>,
    /// Roles whose bucket was filled by the default policy
    pub defaulted: Vec<Role>,
}

impl<'a> RoleBuckets<'a> {
    /// Partition `agents` by declared role, applying the empty-bucket defaults.
    ///
    /// An empty roster yields empty buckets; callers reject it beforehand.
    pub fn partition(agents: &'a [Agent]) -> Self {
        let mut thinkers = Vec::new();
        let mut critics = Vec::new();
        let mut judges = Vec::new();
        let mut specialists = Vec::new();

        for agent in agents {
            match agent.role {
                Role::Thinker => thinkers.push(agent),
                Role::Critic => critics.push(agent),
                Role::Judge => judges.push(agent),
                _ => specialists.push(agent),
            }
        }

        let mut defaulted = Vec::new();

        if thinkers.is_empty() && !agents.is_empty() {
            thinkers.extend(agents.first());
            defaulted.push(Role::Thinker);
        }
        if critics.is_empty() && !agents.is_empty() {
            critics.extend(agents.get(1).or(agents.first()));
            defaulted.push(Role::Critic);
        }
        if judges.is_empty() && !agents.is_empty() {
            judges.extend(agents.last());
            defaulted.push(Role::Judge);
        }

        Self {
            thinkers,
            critics,
            judges,
            specialists,
            defaulted,
        }
    }

    /// Whether any bucket had to be filled by the default policy.
    ///
    /// A degraded council debates with fewer distinct perspectives.
    pub fn is_degraded(&self) -> bool {
        !self.defaulted.is_empty()
    }
}
