//! JSONL transcript writer for debate events.
//!
//! Each [`ConversationEvent`] becomes one JSON line carrying `type` and an
//! RFC 3339 `timestamp` next to the event payload.

use council_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Transcript logger that appends one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Every line is flushed, so a
/// transcript survives an interrupted run.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open the transcript at `path`, appending to an existing file.
    ///
    /// Parent directories are created as needed. Returns `None` (after a
    /// warning) when the file cannot be opened; the debate runs without a
    /// transcript in that case.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(Self {
                writer: Mutex::new(BufWriter::new(file)),
                path: path.to_path_buf(),
            }),
            Err(e) => {
                warn!("Could not open transcript {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Merge `type` and `timestamp` into an object payload; other payloads are
/// nested under `data`.
fn to_record(event: ConversationEvent, timestamp: String) -> Value {
    let mut record = match event.payload {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            map
        }
    };
    record.insert("type".to_string(), Value::from(event.event_type));
    record.insert("timestamp".to_string(), Value::String(timestamp));
    Value::Object(record)
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let Ok(line) = serde_json::to_string(&to_record(event, timestamp)) else {
            return;
        };

        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            warn!("Failed to write transcript {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
