//! Attachment ingestion
//!
//! Files and URLs supplied with a question are turned into one context
//! string that the engine places ahead of the question in every debate turn.

mod file;
mod loader;
mod url;

pub use file::{LoadedFile, extract_text_from_file};
pub use loader::{AttachmentLoader, UrlContent, format_context};
pub use url::{fetch_url_content, html_to_text, validate_url};

use std::time::Duration;
use thiserror::Error;

/// Errors raised while reading a file or fetching a URL
#[derive(Error, Debug)]
pub enum AttachmentError {
    #[error("File '{name}' is {size_mb:.1} MB, which exceeds the {limit_mb} MB limit.")]
    TooLarge {
        name: String,
        size_mb: f64,
        limit_mb: f64,
    },

    #[error("File type '{extension}' is not supported. Allowed: {allowed}")]
    UnsupportedType { extension: String, allowed: String },

    #[error("Could not extract any text from '{0}'.")]
    EmptyDocument(String),

    #[error("Failed to read PDF '{name}': {reason}")]
    Pdf { name: String, reason: String },

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid URL {0:?}")]
    InvalidUrl(String),

    #[error("Only http:// and https:// URLs are allowed. Got: {0:?}")]
    UnsupportedScheme(String),

    #[error("Requests to internal/private addresses are not allowed: {0:?}")]
    BlockedAddress(String),

    #[error("HTTP error {status} fetching {url}")]
    Http { url: String, status: u16 },

    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },
}

/// Limits applied to attachments
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentLimits {
    /// Largest accepted file in megabytes
    pub max_file_size_mb: f64,
    /// Lowercase extensions with the leading dot
    pub allowed_extensions: Vec<String>,
    /// Longest URL text kept before truncation
    pub max_url_chars: usize,
    pub url_timeout: Duration,
}

impl Default for AttachmentLimits {
    fn default() -> Self {
        Self {
            max_file_size_mb: 10.0,
            allowed_extensions: [
                ".txt", ".py", ".js", ".ts", ".md", ".json", ".csv", ".pdf", ".html", ".css",
                ".yaml", ".yml", ".sh", ".go", ".rs", ".java", ".c", ".cpp", ".h",
            ]
            .iter()
            .map(|e| e.to_string())
            .collect(),
            max_url_chars: 20_000,
            url_timeout: Duration::from_secs(15),
        }
    }
}

impl AttachmentLimits {
    pub fn allows_extension(&self, extension: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }
}
