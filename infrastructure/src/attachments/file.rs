use super::{AttachmentError, AttachmentLimits};
use std::path::Path;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Text extracted from one attached file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub name: String,
    pub text: String,
}

/// Extract the text of an attached file.
///
/// The size limit is checked first, then the extension allow-list. PDFs go
/// through `pdf-extract`; every other type is decoded as UTF-8, falling
/// back to Latin-1 so no byte is lost.
pub fn extract_text_from_file(
    name: &str,
    bytes: &[u8],
    limits: &AttachmentLimits,
) -> Result<String, AttachmentError> {
    let size_mb = bytes.len() as f64 / BYTES_PER_MB;
    if size_mb > limits.max_file_size_mb {
        return Err(AttachmentError::TooLarge {
            name: name.to_string(),
            size_mb,
            limit_mb: limits.max_file_size_mb,
        });
    }

    let extension = extension_of(name);
    if !limits.allows_extension(&extension) {
        let mut allowed = limits.allowed_extensions.clone();
        allowed.sort();
        return Err(AttachmentError::UnsupportedType {
            extension,
            allowed: allowed.join(", "),
        });
    }

    if extension == ".pdf" {
        return extract_pdf(name, bytes);
    }

    Ok(decode_text(bytes))
}

fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        // Latin-1 maps every byte to the code point of the same value
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Lowercase extension with the leading dot, or an empty string
fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

fn extract_pdf(name: &str, bytes: &[u8]) -> Result<String, AttachmentError> {
    let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| AttachmentError::Pdf {
        name: name.to_string(),
        reason: e.to_string(),
    })?;

    if text.trim().is_empty() {
        return Err(AttachmentError::EmptyDocument(name.to_string()));
    }
    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        let text = extract_text_from_file("notes.md", b"# Title\nbody", &Default::default());
        assert_eq!(text.unwrap(), "# Title\nbody");
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert!(extract_text_from_file("MAIN.RS", b"fn main() {}", &Default::default()).is_ok());
    }

    #[test]
    fn test_invalid_utf8_falls_back_to_latin1() {
        let text = extract_text_from_file("data.csv", &[b'a', 0xff, b'b', 0xe9], &Default::default())
            .unwrap();
        assert_eq!(text, "a\u{ff}b\u{e9}");
    }

    #[test]
    fn test_valid_utf8_is_kept() {
        let text = extract_text_from_file("notes.txt", "caf\u{e9}".as_bytes(), &Default::default())
            .unwrap();
        assert_eq!(text, "caf\u{e9}");
    }

    #[test]
    fn test_unsupported_extension() {
        let err = extract_text_from_file("tool.exe", b"MZ", &Default::default()).unwrap_err();
        match err {
            AttachmentError::UnsupportedType { extension, allowed } => {
                assert_eq!(extension, ".exe");
                assert!(allowed.contains(".rs"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_extension_is_unsupported() {
        assert!(matches!(
            extract_text_from_file("Makefile", b"all:", &Default::default()),
            Err(AttachmentError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_size_limit_checked_before_type() {
        let limits = AttachmentLimits {
            max_file_size_mb: 0.001,
            ..Default::default()
        };
        let bytes = vec![b'x'; 2048];
        let err = extract_text_from_file("big.exe", &bytes, &limits).unwrap_err();
        assert!(matches!(err, AttachmentError::TooLarge { .. }));
        assert!(err.to_string().contains("exceeds the 0.001 MB limit"));
    }

    #[test]
    fn test_broken_pdf_is_an_error() {
        let err = extract_text_from_file("paper.pdf", b"not a pdf", &Default::default());
        assert!(matches!(err, Err(AttachmentError::Pdf { .. })));
    }
}
