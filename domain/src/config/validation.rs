//! Configuration issues.
//!
//! Loaders report problems as structured issues with a severity so the
//! caller can print warnings and abort on errors before any provider call
//! is made.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// No agents in the council.
    EmptyRoster,
    /// Two providers share the same id.
    DuplicateProvider { id: String },
    /// An agent references a provider that is not configured.
    UnknownProvider { agent: String, provider: String },
    /// An agent references a role that is not configured.
    UnknownRole { agent: String, role: String },
    /// A provider has a zero rate limit and will never be admitted.
    ZeroRateLimit { provider: String },
    /// A string field holds a value outside its accepted set.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// The per-call timeout is zero.
    InvalidTimeout,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
