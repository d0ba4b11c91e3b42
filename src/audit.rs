//! Audit logging of generated scripts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::input::CommandLine;
use crate::runner::GeneratedScript;

/// An audit log entry, one per processed command.
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    /// Timestamp of the event.
    pub timestamp: DateTime<Utc>,
    /// Line number in the input file.
    pub line: usize,
    /// Sequence index of the command within the run.
    pub index: usize,
    pub job_name: String,
    /// Where the script was (or should have been) written.
    pub path: PathBuf,
    pub written: bool,
    /// Write failure, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Whether the command was kept verbatim because it could not be tokenized.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub passthrough: bool,
    /// The raw command, truncated.
    pub command: String,
}

impl AuditEntry {
    /// Create a new audit entry for a command and the script made from it.
    pub fn new(command: &CommandLine, script: &GeneratedScript) -> Self {
        Self {
            timestamp: Utc::now(),
            line: command.number,
            index: script.index,
            job_name: script.job_name.clone(),
            path: script.path.clone(),
            written: script.write_error.is_none(),
            error: script.write_error.clone(),
            passthrough: script.passthrough,
            command: truncate_string(&command.text, 200),
        }
    }
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len - 3;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

/// Audit logger for writing entries to a file.
pub struct AuditLogger {
    file: File,
}

impl AuditLogger {
    /// Open or create an audit log file.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    /// Write an audit entry to the log.
    pub fn log(&mut self, entry: &AuditEntry) -> std::io::Result<()> {
        let json = serde_json::to_string(entry)?;
        writeln!(self.file, "{}", json)?;
        self.file.flush()
    }

    /// Log the outcome of one command.
    pub fn log_script(
        &mut self,
        command: &CommandLine,
        script: &GeneratedScript,
    ) -> std::io::Result<()> {
        let entry = AuditEntry::new(command, script);
        self.log(&entry)
    }
}
