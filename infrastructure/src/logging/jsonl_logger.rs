//! Append-only JSONL sink for run events.
//!
//! Every [`RunEvent`] becomes one line: `type` and `timestamp` first, then
//! the payload's own fields. Payloads that are not JSON objects are kept
//! under `data`. The file is opened for append, so one log accumulates
//! across CLI invocations.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use toolcall_application::ports::run_event_logger::{RunEvent, RunEventLogger};
use tracing::warn;

/// Why the run log could not be opened.
#[derive(Debug, Error)]
pub enum RunLogError {
    #[error("cannot create run log directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("cannot open run log {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
}

/// One line of the log.
#[derive(Serialize)]
struct Record {
    #[serde(rename = "type")]
    event_type: &'static str,
    timestamp: DateTime<Utc>,
    #[serde(flatten)]
    fields: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl Record {
    fn new(event: RunEvent, timestamp: DateTime<Utc>) -> Self {
        let (fields, data) = match event.payload {
            Value::Object(mut fields) => {
                // the envelope keys win
                fields.remove("type");
                fields.remove("timestamp");
                (fields, None)
            }
            other => (Map::new(), Some(other)),
        };
        Self {
            event_type: event.event_type,
            timestamp,
            fields,
            data,
        }
    }
}

/// [`RunEventLogger`] that appends one JSON object per line to a file.
#[derive(Debug)]
pub struct JsonlRunEventLogger {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
    write_failed: AtomicBool,
}

impl JsonlRunEventLogger {
    /// Open `path` for append, creating it and its parent directories.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RunLogError> {
        let path = path.into();

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| RunLogError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| RunLogError::Open {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
            write_failed: AtomicBool::new(false),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, record: &Record) -> io::Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        serde_json::to_writer(&mut *writer, record)?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}

impl RunEventLogger for JsonlRunEventLogger {
    fn log(&self, event: RunEvent) {
        let record = Record::new(event, Utc::now());
        if let Err(e) = self.append(&record) {
            // warn on the first failure only
            if !self.write_failed.swap(true, Ordering::Relaxed) {
                warn!(path = %self.path.display(), error = %e, "Run log write failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read_records(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let logger = JsonlRunEventLogger::open(dir.path().join("runs").join("agent.jsonl")).unwrap();

        logger.log(RunEvent::new("query_received", json!({"query": "Calculate 2 + 2"})));
        logger.log(RunEvent::new("answer_synthesized", json!(42)));

        let records = read_records(logger.path());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "query_received");
        assert_eq!(records[0]["query"], "Calculate 2 + 2");
        assert!(records[0].get("data").is_none());
        assert!(records[0]["timestamp"].as_str().unwrap().ends_with('Z'));
        assert_eq!(records[1]["data"], 42);
    }

    #[test]
    fn test_payload_cannot_override_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let logger = JsonlRunEventLogger::open(dir.path().join("agent.jsonl")).unwrap();

        logger.log(RunEvent::new(
            "tool_result",
            json!({"type": "spoofed", "timestamp": "yesterday", "tool": "calculator_tool"}),
        ));

        let records = read_records(logger.path());
        assert_eq!(records[0]["type"], "tool_result");
        assert_ne!(records[0]["timestamp"], "yesterday");
        assert_eq!(records[0]["tool"], "calculator_tool");
    }

    #[test]
    fn test_appends_across_loggers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.jsonl");

        for _ in 0..2 {
            let logger = JsonlRunEventLogger::open(&path).unwrap();
            logger.log(RunEvent::new("query_completed", json!({"success": true})));
        }

        assert_eq!(read_records(&path).len(), 2);
    }

    #[test]
    fn test_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let err = JsonlRunEventLogger::open(blocker.join("agent.jsonl")).unwrap_err();
        assert!(matches!(err, RunLogError::CreateDir { .. }));
        assert!(err.to_string().contains("cannot create run log directory"));
    }
}
