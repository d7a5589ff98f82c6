//! Port for structured transcript logging.
//!
//! Defines the [`ConversationLogger`] trait for recording debate events
//! (steps, fallbacks, voting rounds, the outcome) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! debate transcript in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured debate event for logging.
///
/// Each event has a type string and a JSON payload; the adapter adds the
/// timestamp when it writes the record.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "debate_step", "vote_round").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging debate events to a structured log.
///
/// `log` is synchronous and non-fallible so a broken log file never
/// disturbs a running debate; write failures are ignored by adapters.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when the transcript is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
