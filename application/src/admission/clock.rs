//! Time source for rate windows

use std::time::Instant;

/// Monotonic time source
///
/// Injected into the [`AdmissionController`](super::AdmissionController) so
/// tests can advance time deterministically.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock [`Clock`] backed by [`Instant::now`]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(test)]
pub(crate) struct ManualClock {
    origin: Instant,
    offset: std::sync::Mutex<std::time::Duration>,
}

#[cfg(test)]
impl ManualClock {
    pub(crate) fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: std::sync::Mutex::new(std::time::Duration::ZERO),
        }
    }

    pub(crate) fn advance(&self, by: std::time::Duration) {
        *self.offset.lock().unwrap() += by;
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.offset.lock().unwrap()
    }
}
