//! JSONL audit logging for scout-block
//!
//! Records every decision to a JSONL file for later analysis.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::input::HookInput;
use crate::output::BlockDecision;

/// Log level for audit entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Allowed,
    Blocked,
    Warn,
    Disabled,
}

/// An audit log entry
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    /// Timestamp of the decision
    pub timestamp: DateTime<Utc>,

    /// Log level (ALLOWED, BLOCKED, WARN, DISABLED)
    pub level: LogLevel,

    /// Tool that was invoked
    pub tool: String,

    /// Ignore pattern that matched (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Normalized path that matched (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub broad_pattern: bool,

    /// Summary of the input
    pub input_summary: String,

    /// Reason for the decision
    pub reason: String,

    /// Session ID (if provided)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl AuditEntry {
    /// Create a new audit entry from input and decision
    pub fn new(input: &HookInput, decision: &BlockDecision, disabled: bool, warn_only: bool) -> Self {
        let level = if disabled {
            LogLevel::Disabled
        } else if !decision.blocked {
            LogLevel::Allowed
        } else if warn_only {
            LogLevel::Warn
        } else {
            LogLevel::Blocked
        };

        let reason = match level {
            LogLevel::Disabled => "SCOUT_BLOCK_DISABLED".to_string(),
            LogLevel::Allowed => "no excluded path".to_string(),
            LogLevel::Warn | LogLevel::Blocked => decision.reason().to_string(),
        };

        Self {
            timestamp: Utc::now(),
            level,
            tool: input.tool_name.clone(),
            pattern: decision.pattern.clone(),
            path: decision.path.clone(),
            broad_pattern: decision.is_broad_pattern,
            input_summary: input.summary(),
            reason,
            session_id: input.session_id.clone(),
        }
    }
}

/// Audit logger
#[derive(Default)]
pub struct AuditLogger {
    writer: Option<BufWriter<File>>,
}

impl AuditLogger {
    /// Create a new audit logger; `None` or an unopenable path disables it
    pub fn new(path: Option<&Path>) -> Self {
        let writer = path.and_then(|p| {
            // Ensure parent directory exists
            if let Some(parent) = p.parent() {
                let _ = std::fs::create_dir_all(parent);
            }

            OpenOptions::new()
                .create(true)
                .append(true)
                .open(p)
                .ok()
                .map(BufWriter::new)
        });

        Self { writer }
    }

    /// Log an audit entry
    pub fn log(&mut self, entry: &AuditEntry) -> Result<(), std::io::Error> {
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(entry)?;
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Log a decision
    pub fn log_decision(
        &mut self,
        input: &HookInput,
        decision: &BlockDecision,
        disabled: bool,
        warn_only: bool,
    ) -> Result<(), std::io::Error> {
        let entry = AuditEntry::new(input, decision, disabled, warn_only);
        self.log(&entry)
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }
}
