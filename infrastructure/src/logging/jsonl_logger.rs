//! JSONL file writer for conversation events.
//!
//! Each [`ConversationEvent`] is serialized as a single JSON line with a
//! `type` field and `timestamp`, appended to the file via a buffered writer.
//! Runs of the client append to the same file; a `session_started` record
//! marks where each run begins.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use serde_json::{Map, Value};
use std::sync::Mutex;
use therabot_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use tracing::{debug, warn};

/// JSONL conversation logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every record and
/// on `Drop`.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open (or create) the log at the given path for appending.
    ///
    /// Creates parent directories if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create conversation log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not open conversation log file {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        debug!("Conversation log: {}", path.display());

        let logger = Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        };
        logger.log(ConversationEvent::new(
            "session_started",
            serde_json::json!({ "client_version": env!("CARGO_PKG_VERSION") }),
        ));
        Some(logger)
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One log line: the payload's fields (or `data` for non-object payloads)
/// plus `type` and `timestamp`.
fn to_record(event: ConversationEvent, timestamp: String) -> Value {
    let mut fields = match event.payload {
        Value::Object(map) => map,
        other => Map::from_iter([("data".to_string(), other)]),
    };
    fields.insert("type".into(), Value::from(event.event_type));
    fields.insert("timestamp".into(), Value::from(timestamp));
    Value::Object(fields)
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let record = to_record(event, timestamp);

        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        if let Err(e) = serde_json::to_writer(&mut *writer, &record)
            .map_err(std::io::Error::from)
            .and_then(|()| writer.write_all(b"\n"))
            .and_then(|()| writer.flush())
        {
            warn!("Conversation log write to {} failed: {}", self.path.display(), e);
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
