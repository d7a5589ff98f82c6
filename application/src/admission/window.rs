//! Sliding request windows for a single provider

use serde::Serialize;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

const MINUTE: Duration = Duration::from_secs(60);
const DAY: Duration = Duration::from_secs(86_400);

/// Timestamps of requests issued to one provider in the trailing minute
/// and the trailing day, together with the provider's limits.
///
/// Both windows are pruned before every read, so counts never include
/// entries older than their horizon. An entry exactly at the horizon is
/// still counted.
#[derive(Debug, Clone)]
pub struct RateWindow {
    rpm_limit: u32,
    rpd_limit: u32,
    minute: VecDeque<Instant>,
    day: VecDeque<Instant>,
}

impl RateWindow {
    pub fn new(rpm_limit: u32, rpd_limit: u32) -> Self {
        Self {
            rpm_limit,
            rpd_limit,
            minute: VecDeque::new(),
            day: VecDeque::new(),
        }
    }

    fn prune(&mut self, now: Instant) {
        while self
            .minute
            .front()
            .is_some_and(|t| now.saturating_duration_since(*t) > MINUTE)
        {
            self.minute.pop_front();
        }
        while self
            .day
            .front()
            .is_some_and(|t| now.saturating_duration_since(*t) > DAY)
        {
            self.day.pop_front();
        }
    }

    fn has_capacity(&self) -> bool {
        self.minute.len() < self.rpm_limit as usize && self.day.len() < self.rpd_limit as usize
    }

    /// Whether a request may be issued at `now`
    pub fn is_open(&mut self, now: Instant) -> bool {
        self.prune(now);
        self.has_capacity()
    }

    pub fn record(&mut self, now: Instant) {
        self.minute.push_back(now);
        self.day.push_back(now);
    }

    /// Prune, check and record as one step; returns whether the request was admitted
    pub fn try_admit(&mut self, now: Instant) -> bool {
        if self.is_open(now) {
            self.record(now);
            true
        } else {
            false
        }
    }

    /// Drop one request recorded at `at` that was never issued
    pub fn forget(&mut self, at: Instant) {
        for window in [&mut self.minute, &mut self.day] {
            if let Some(pos) = window.iter().rposition(|t| *t == at) {
                window.remove(pos);
            }
        }
    }

    pub fn usage(&mut self, provider: &str, now: Instant) -> ProviderUsage {
        self.prune(now);
        ProviderUsage {
            provider: provider.to_string(),
            rpm_used: self.minute.len(),
            rpm_limit: self.rpm_limit,
            rpd_used: self.day.len(),
            rpd_limit: self.rpd_limit,
            available: self.has_capacity(),
        }
    }
}

/// Usage snapshot for one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderUsage {
    pub provider: String,
    pub rpm_used: usize,
    pub rpm_limit: u32,
    pub rpd_used: usize,
    pub rpd_limit: u32,
    pub available: bool,
}

impl std::fmt::Display for ProviderUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}/{} rpm, {}/{} rpd",
            self.provider, self.rpm_used, self.rpm_limit, self.rpd_used, self.rpd_limit
        )
    }
}
