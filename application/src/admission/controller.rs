//! Admission controller

use super::clock::Clock;
use super::window::{ProviderUsage, RateWindow};
use council_domain::{BackendType, CouncilCatalog, ProviderSpec};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};

/// No configured provider can take a request right now
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    #[error(
        "All providers are currently rate-limited (preferred: {preferred}). Please wait. Usage: {}",
        usage_summary(.usage)
    )]
    Exhausted {
        preferred: String,
        usage: Vec<ProviderUsage>,
    },
}

fn usage_summary(usage: &[ProviderUsage]) -> String {
    usage
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A granted request slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    /// Provider the call must be sent to
    pub provider: String,
    /// Model to request from `provider`
    pub model: String,
    /// Whether `provider` differs from the preferred one
    pub substituted: bool,
    /// When the request was recorded against `provider`
    pub admitted_at: Instant,
}

struct ProviderSlot {
    id: String,
    backend: BackendType,
    default_model: String,
    window: Mutex<RateWindow>,
}

/// Decides whether a provider may be called right now and picks a
/// substitute when it may not.
///
/// Each provider's window sits behind its own lock, so calls to different
/// providers never contend. Safe to share between concurrent debates.
pub struct AdmissionController {
    clock: Arc<dyn Clock>,
    /// Configured providers in declaration order
    slots: Vec<ProviderSlot>,
    /// Windows for providers referenced at runtime but absent from the catalog
    adhoc: RwLock<HashMap<String, Arc<Mutex<RateWindow>>>>,
}

fn lock(window: &Mutex<RateWindow>) -> MutexGuard<'_, RateWindow> {
    // A panic while holding the lock cannot leave the window inconsistent
    window.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl AdmissionController {
    pub fn new(catalog: &CouncilCatalog, clock: Arc<dyn Clock>) -> Self {
        Self::from_providers(catalog.providers(), clock)
    }

    pub fn from_providers(providers: &[ProviderSpec], clock: Arc<dyn Clock>) -> Self {
        let slots = providers
            .iter()
            .map(|p| ProviderSlot {
                id: p.id.clone(),
                backend: p.backend.clone(),
                default_model: p.default_model.clone(),
                window: Mutex::new(RateWindow::new(p.rpm_limit, p.rpd_limit)),
            })
            .collect();

        Self {
            clock,
            slots,
            adhoc: RwLock::new(HashMap::new()),
        }
    }

    fn slot(&self, provider: &str) -> Option<&ProviderSlot> {
        self.slots.iter().find(|s| s.id == provider)
    }

    fn with_window<R>(&self, provider: &str, f: impl FnOnce(&mut RateWindow) -> R) -> R {
        if let Some(slot) = self.slot(provider) {
            return f(&mut lock(&slot.window));
        }

        let existing = self
            .adhoc
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .get(provider)
            .cloned();
        let window = match existing {
            Some(window) => window,
            None => {
                let mut adhoc = self.adhoc.write().unwrap_or_else(|p| p.into_inner());
                Arc::clone(adhoc.entry(provider.to_string()).or_insert_with(|| {
                    debug!("Tracking unconfigured provider {} with default limits", provider);
                    Arc::new(Mutex::new(RateWindow::new(
                        ProviderSpec::DEFAULT_RPM,
                        ProviderSpec::DEFAULT_RPD,
                    )))
                }))
            }
        };
        f(&mut lock(&window))
    }

    /// Whether `provider` is below both its per-minute and per-day limits
    pub fn can_request(&self, provider: &str) -> bool {
        let now = self.clock.now();
        self.with_window(provider, |w| w.is_open(now))
    }

    /// Record one issued request against `provider`
    pub fn record_request(&self, provider: &str) {
        let now = self.clock.now();
        self.with_window(provider, |w| w.record(now));
    }

    /// Fallback scan order for `preferred`: itself, then same-backend
    /// providers, then every other provider, each in declaration order.
    fn candidates<'a>(&'a self, preferred: &'a str) -> Vec<&'a str> {
        let backend = self.slot(preferred).map(|s| &s.backend);

        let mut same = Vec::new();
        let mut rest = Vec::new();
        for slot in self.slots.iter().filter(|s| s.id != preferred) {
            if Some(&slot.backend) == backend {
                same.push(slot.id.as_str());
            } else {
                rest.push(slot.id.as_str());
            }
        }

        let mut order = vec![preferred];
        order.extend(same);
        order.extend(rest);
        order
    }

    /// `preferred` itself when admissible, else the first admissible
    /// substitute, or `None` when every provider is limited.
    ///
    /// Does not record anything; see [`AdmissionController::acquire`].
    pub fn find_fallback(&self, preferred: &str) -> Option<String> {
        self.candidates(preferred)
            .into_iter()
            .find(|p| self.can_request(p))
            .map(str::to_string)
    }

    /// Select a provider for a call and record the request in one step.
    ///
    /// Each candidate's window is pruned, checked and recorded under its
    /// own lock, so concurrent callers can never both be admitted past a
    /// limit. A substitute is called with its own default model.
    pub fn acquire(&self, preferred: &str, model: &str) -> Result<Admission, AdmissionError> {
        for candidate in self.candidates(preferred) {
            let now = self.clock.now();
            if !self.with_window(candidate, |w| w.try_admit(now)) {
                continue;
            }

            if candidate == preferred {
                return Ok(Admission {
                    provider: candidate.to_string(),
                    model: model.to_string(),
                    substituted: false,
                    admitted_at: now,
                });
            }

            let model = self
                .slot(candidate)
                .map(|s| s.default_model.clone())
                .unwrap_or_else(|| model.to_string());
            debug!("Provider {} is rate-limited, using {}", preferred, candidate);
            return Ok(Admission {
                provider: candidate.to_string(),
                model,
                substituted: true,
                admitted_at: now,
            });
        }

        warn!("No provider can take a request (preferred: {})", preferred);
        Err(AdmissionError::Exhausted {
            preferred: preferred.to_string(),
            usage: self.stats(),
        })
    }

    /// Give back a slot taken by [`AdmissionController::acquire`] for a
    /// call that was never sent.
    pub fn release(&self, admission: &Admission) {
        debug!("Releasing unsent request slot on {}", admission.provider);
        self.with_window(&admission.provider, |w| w.forget(admission.admitted_at));
    }

    /// Fresh usage for every known provider, configured ones first
    pub fn stats(&self) -> Vec<ProviderUsage> {
        let now = self.clock.now();
        let mut usage: Vec<ProviderUsage> = self
            .slots
            .iter()
            .map(|s| lock(&s.window).usage(&s.id, now))
            .collect();

        let adhoc = self.adhoc.read().unwrap_or_else(|p| p.into_inner());
        let mut extra: Vec<_> = adhoc
            .iter()
            .map(|(id, window)| lock(window).usage(id, now))
            .collect();
        extra.sort_by(|a, b| a.provider.cmp(&b.provider));
        usage.extend(extra);
        usage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admission::ManualClock;
    use std::time::Duration;

    fn spec(id: &str, backend: BackendType, rpm: u32) -> ProviderSpec {
        ProviderSpec::new(id, id.to_uppercase(), backend, format!("{}-default", id))
            .with_limits(rpm, 1000)
    }

    fn controller(clock: Arc<ManualClock>) -> AdmissionController {
        AdmissionController::from_providers(
            &[
                spec("x", BackendType::OpenAiCompatible, 1),
                spec("g", BackendType::Google, 5),
                spec("y", BackendType::OpenAiCompatible, 5),
            ],
            clock,
        )
    }

    #[test]
    fn test_can_request_tracks_minute_window() {
        let clock = Arc::new(ManualClock::new());
        let admission = controller(clock.clone());

        assert!(admission.can_request("x"));
        admission.record_request("x");
        assert!(!admission.can_request("x"));

        clock.advance(Duration::from_secs(61));
        assert!(admission.can_request("x"));
    }

    #[test]
    fn test_find_fallback_returns_preferred_when_open() {
        let clock = Arc::new(ManualClock::new());
        let admission = controller(clock);
        // Exhaust everything else; preferred is still returned
        for _ in 0..5 {
            admission.record_request("g");
            admission.record_request("y");
        }
        assert_eq!(admission.find_fallback("x"), Some("x".to_string()));
    }

    #[test]
    fn test_find_fallback_prefers_same_backend() {
        let clock = Arc::new(ManualClock::new());
        let admission = controller(clock);
        admission.record_request("x");

        // "g" is declared before "y" but has a different backend
        assert_eq!(admission.find_fallback("x"), Some("y".to_string()));
    }

    #[test]
    fn test_find_fallback_any_backend_when_family_limited() {
        let clock = Arc::new(ManualClock::new());
        let admission = controller(clock);
        admission.record_request("x");
        for _ in 0..5 {
            admission.record_request("y");
        }
        assert_eq!(admission.find_fallback("x"), Some("g".to_string()));
    }

    #[test]
    fn test_find_fallback_none_when_all_limited() {
        let clock = Arc::new(ManualClock::new());
        let admission = controller(clock);
        admission.record_request("x");
        for _ in 0..5 {
            admission.record_request("g");
            admission.record_request("y");
        }
        assert_eq!(admission.find_fallback("x"), None);
    }

    #[test]
    fn test_acquire_records_and_substitutes_default_model() {
        let clock = Arc::new(ManualClock::new());
        let admission = controller(clock);

        let first = admission.acquire("x", "custom-model").unwrap();
        assert_eq!(first.provider, "x");
        assert_eq!(first.model, "custom-model");
        assert!(!first.substituted);

        let second = admission.acquire("x", "custom-model").unwrap();
        assert_eq!(second.provider, "y");
        assert_eq!(second.model, "y-default");
        assert!(second.substituted);

        let usage = admission.stats();
        assert_eq!(usage[0].rpm_used, 1);
        assert_eq!(usage[2].rpm_used, 1);
    }

    #[test]
    fn test_acquire_exhausted_reports_usage() {
        let clock = Arc::new(ManualClock::new());
        let admission = AdmissionController::from_providers(
            &[spec("x", BackendType::OpenAiCompatible, 1)],
            clock,
        );
        admission.acquire("x", "m").unwrap();

        let err = admission.acquire("x", "m").unwrap_err();
        assert!(err.to_string().ends_with("Usage: x: 1/1 rpm, 1/1000 rpd"));
        let AdmissionError::Exhausted { preferred, usage } = err;
        assert_eq!(preferred, "x");
        assert_eq!(usage.len(), 1);
        assert!(!usage[0].available);
    }

    #[test]
    fn test_release_returns_the_slot() {
        let clock = Arc::new(ManualClock::new());
        let admission = controller(clock);

        let granted = admission.acquire("x", "m").unwrap();
        assert!(!admission.can_request("x"));

        admission.release(&granted);
        assert!(admission.can_request("x"));
        assert_eq!(admission.stats()[0].rpm_used, 0);
        assert_eq!(admission.stats()[0].rpd_used, 0);
    }

    #[test]
    fn test_unknown_provider_gets_default_limits() {
        let clock = Arc::new(ManualClock::new());
        let admission = controller(clock);

        admission.record_request("mystery");
        let usage = admission.stats();
        let mystery = usage.iter().find(|u| u.provider == "mystery").unwrap();
        assert_eq!(mystery.rpm_limit, ProviderSpec::DEFAULT_RPM);
        assert_eq!(mystery.rpd_limit, ProviderSpec::DEFAULT_RPD);
        assert_eq!(mystery.rpm_used, 1);
    }

    #[test]
    fn test_concurrent_acquire_never_exceeds_limit() {
        let clock = Arc::new(ManualClock::new());
        let admission = Arc::new(AdmissionController::from_providers(
            &[spec("x", BackendType::OpenAiCompatible, 10)],
            clock,
        ));

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let admission = Arc::clone(&admission);
                std::thread::spawn(move || admission.acquire("x", "m").is_ok())
            })
            .collect();
        let admitted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(admitted, 10);
        assert_eq!(admission.stats()[0].rpm_used, 10);
    }
}
