//! Structured JSONL logging for workbench runs.
//!
//! Every subcommand emits one JSON object per line so fuzzing campaign logs
//! can be concatenated and queried uniformly. Required fields: `timestamp`,
//! `trace_id`, `level`, `event`; the rest are optional context.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::HarnessError;

/// Severity level for log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Canonical structured log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unix epoch milliseconds as a string.
    pub timestamp: String,
    /// Identifier shared by every entry of one workbench invocation.
    pub trace_id: String,
    pub level: LogLevel,
    pub event: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_len: Option<usize>,
    /// Path of an artifact the subcommand wrote.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

impl LogEntry {
    /// New entry stamped with the current time.
    #[must_use]
    pub fn new(trace_id: &str, level: LogLevel, event: &str) -> Self {
        Self {
            timestamp: unix_millis().to_string(),
            trace_id: trace_id.to_string(),
            level,
            event: event.to_string(),
            trigger: None,
            input_len: None,
            artifact: None,
            detail: None,
        }
    }

    #[must_use]
    pub fn with_trigger(mut self, trigger: &str, input_len: usize) -> Self {
        self.trigger = Some(trigger.to_string());
        self.input_len = Some(input_len);
        self
    }

    #[must_use]
    pub fn with_artifact(mut self, path: &Path) -> Self {
        self.artifact = Some(path.display().to_string());
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.detail = Some(detail);
        self
    }
}

/// Where JSONL lines go.
enum LogSink {
    Stderr,
    File(std::fs::File),
}

/// Writes JSONL lines to a file or stderr.
pub struct LogEmitter {
    trace_id: String,
    sink: LogSink,
}

impl LogEmitter {
    /// Emit to stderr with a fresh trace id.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            trace_id: new_trace_id(),
            sink: LogSink::Stderr,
        }
    }

    /// Append to a file, creating parent directories.
    pub fn file(path: &Path) -> Result<Self, HarnessError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| HarnessError::io(parent, e))?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| HarnessError::io(path, e))?;
        Ok(Self {
            trace_id: new_trace_id(),
            sink: LogSink::File(file),
        })
    }

    /// Trace id shared by entries from this emitter.
    #[must_use]
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// Build an entry carrying this emitter's trace id.
    #[must_use]
    pub fn entry(&self, level: LogLevel, event: &str) -> LogEntry {
        LogEntry::new(&self.trace_id, level, event)
    }

    /// Serialize and write one line.
    pub fn emit(&mut self, entry: &LogEntry) -> Result<(), HarnessError> {
        let line = serde_json::to_string(entry)
            .map_err(|e| HarnessError::json(Path::new("<log>"), e))?;
        match &mut self.sink {
            LogSink::Stderr => {
                eprintln!("{line}");
                Ok(())
            }
            LogSink::File(file) => {
                writeln!(file, "{line}")?;
                file.flush()?;
                Ok(())
            }
        }
    }
}

/// Validate one JSONL line against the entry schema.
pub fn validate_log_line(line: &str) -> Result<LogEntry, serde_json::Error> {
    serde_json::from_str(line)
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

fn new_trace_id() -> String {
    format!("{:x}-{:x}", unix_millis(), std::process::id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_roundtrips_through_jsonl() {
        let entry = LogEntry::new("trace-1", LogLevel::Info, "trigger_armed")
            .with_trigger("instant_crash", 10)
            .with_detail(serde_json::json!({"sig": 11}));
        let line = serde_json::to_string(&entry).expect("serialize");
        let back = validate_log_line(&line).expect("validate");
        assert_eq!(back.trace_id, "trace-1");
        assert_eq!(back.event, "trigger_armed");
        assert_eq!(back.trigger.as_deref(), Some("instant_crash"));
        assert_eq!(back.input_len, Some(10));
    }

    #[test]
    fn optional_fields_are_omitted_from_output() {
        let entry = LogEntry::new("trace-2", LogLevel::Warn, "noop");
        let line = serde_json::to_string(&entry).expect("serialize");
        assert!(!line.contains("trigger"));
        assert!(!line.contains("artifact"));
    }

    #[test]
    fn malformed_line_is_rejected() {
        assert!(validate_log_line("{\"event\": \"missing-required\"}").is_err());
    }

    #[test]
    fn file_emitter_appends_lines() {
        let path = std::env::temp_dir().join(format!("faultline-log-{}.jsonl", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let mut emitter = LogEmitter::file(&path).expect("emitter");
        let first = emitter.entry(LogLevel::Info, "one");
        let second = emitter.entry(LogLevel::Info, "two");
        emitter.emit(&first).expect("emit");
        emitter.emit(&second).expect("emit");

        let contents = std::fs::read_to_string(&path).expect("read log");
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let entry = validate_log_line(line).expect("valid line");
            assert_eq!(entry.trace_id, emitter.trace_id());
        }

        let _ = std::fs::remove_file(&path);
    }
}
