//! Provider admission control
//!
//! Per-provider sliding-window rate limiting and fallback selection. Every
//! provider has a trailing-minute and a trailing-day window; a call is
//! admitted only when both are below their limits.
//!
//! ```text
//! acquire("groq") ──admissible──→ groq
//!        │
//!        └─limited──→ same backend type, declaration order ──→ any provider ──→ Exhausted
//! ```

mod clock;
mod controller;
mod window;

pub use clock::{Clock, SystemClock};
pub use controller::{Admission, AdmissionController, AdmissionError};
pub use window::{ProviderUsage, RateWindow};

#[cfg(test)]
pub(crate) use clock::ManualClock;
