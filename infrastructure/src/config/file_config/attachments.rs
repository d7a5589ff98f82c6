//! Attachment limits from TOML (`[attachments]` section)

use crate::attachments::AttachmentLimits;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw attachment configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAttachmentsConfig {
    /// Largest accepted file in megabytes
    pub max_file_size_mb: f64,
    /// Accepted file extensions, with the leading dot
    pub allowed_extensions: Vec<String>,
    /// Longest URL text kept before truncation
    pub max_url_chars: usize,
    /// Timeout for fetching one URL
    pub url_timeout_seconds: u64,
}

impl Default for FileAttachmentsConfig {
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
            url_timeout_seconds: 15,
        }
    }
}

impl FileAttachmentsConfig {
    pub fn to_limits(&self) -> AttachmentLimits {
        AttachmentLimits {
            max_file_size_mb: self.max_file_size_mb,
            allowed_extensions: self
                .allowed_extensions
                .iter()
                .map(|e| normalize_extension(e))
                .collect(),
            max_url_chars: self.max_url_chars,
            url_timeout: Duration::from_secs(self.url_timeout_seconds),
        }
    }
}

/// `"PDF"` and `".pdf"` both become `".pdf"`
fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}
