use super::file::{LoadedFile, extract_text_from_file};
use super::url::{fetch_url_content, validate_url};
use super::{AttachmentError, AttachmentLimits};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

const MAX_REDIRECTS: usize = 10;
const FAILED_URL: &str = "[Failed to fetch URL content]";

/// Fetched text of one URL; `None` when fetching failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlContent {
    pub url: String,
    pub content: Option<String>,
}

/// Loads attached files and URLs into a single context string
pub struct AttachmentLoader {
    limits: AttachmentLimits,
    client: reqwest::Client,
}

impl AttachmentLoader {
    /// Create a loader whose HTTP client re-validates every redirect target
    pub fn new(limits: AttachmentLimits) -> Result<Self, AttachmentError> {
        let policy = reqwest::redirect::Policy::custom(|attempt| {
            if attempt.previous().len() >= MAX_REDIRECTS {
                attempt.error("too many redirects")
            } else if validate_url(attempt.url().as_str()).is_err() {
                attempt.error("redirect to a blocked address")
            } else {
                attempt.follow()
            }
        });

        let client = reqwest::Client::builder()
            .redirect(policy)
            .build()
            .map_err(|e| AttachmentError::Fetch {
                url: String::new(),
                reason: e.to_string(),
            })?;

        Ok(Self { limits, client })
    }

    /// Read and extract one file from disk
    pub fn load_file(&self, path: &Path) -> Result<LoadedFile, AttachmentError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let io_error = |source| AttachmentError::Io {
            path: path.display().to_string(),
            source,
        };

        // Refuse oversized files without reading them
        let size = fs::metadata(path).map_err(io_error)?.len();
        let size_mb = size as f64 / (1024.0 * 1024.0);
        if size_mb > self.limits.max_file_size_mb {
            return Err(AttachmentError::TooLarge {
                name,
                size_mb,
                limit_mb: self.limits.max_file_size_mb,
            });
        }

        let bytes = fs::read(path).map_err(io_error)?;
        let text = extract_text_from_file(&name, &bytes, &self.limits)?;
        Ok(LoadedFile { name, text })
    }

    /// Fetch one URL, recording a failure instead of propagating it
    pub async fn load_url(&self, url: &str) -> UrlContent {
        let content = match fetch_url_content(&self.client, url, &self.limits).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Skipping URL content: {}", e);
                None
            }
        };
        UrlContent {
            url: url.to_string(),
            content,
        }
    }

    /// Build the attached-context string.
    ///
    /// Unreadable files are skipped with a warning; URLs that cannot be
    /// fetched still appear with a failure note.
    pub async fn build_context<P: AsRef<Path>>(&self, files: &[P], urls: &[String]) -> String {
        let mut loaded = Vec::new();
        for path in files {
            match self.load_file(path.as_ref()) {
                Ok(file) => {
                    info!("Attached {} ({} chars)", file.name, file.text.chars().count());
                    loaded.push(file);
                }
                Err(e) => warn!("Skipping attachment: {}", e),
            }
        }

        let mut fetched = Vec::with_capacity(urls.len());
        for url in urls {
            fetched.push(self.load_url(url).await);
        }

        format_context(&loaded, &fetched)
    }
}

/// Render file blocks then URL blocks, separated by blank lines
pub fn format_context(files: &[LoadedFile], urls: &[UrlContent]) -> String {
    let file_blocks = files
        .iter()
        .map(|f| format!("### File: {}\n```\n{}\n```", f.name, f.text));
    let url_blocks = urls.iter().map(|u| {
        format!(
            "### URL: {}\n{}",
            u.url,
            u.content.as_deref().unwrap_or(FAILED_URL)
        )
    });

    file_blocks.chain(url_blocks).collect::<Vec<_>>().join("\n\n")
}
