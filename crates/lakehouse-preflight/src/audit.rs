// crates/lakehouse-preflight/src/audit.rs
// ============================================================================
// Module: Preflight Audit Logging
// Description: Structured audit events for validation checks.
// Purpose: Emit JSON-line records of every check without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Each check outcome is recorded as one JSON line so runs can be diffed or
//! shipped to a log pipeline. Sinks are intentionally small: stderr, an
//! append-only file, or nothing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use lakehouse_config::AuditConfig;
use serde::Serialize;

use crate::report::CheckKind;
use crate::report::CheckOutcome;
use crate::report::CheckStatus;
use crate::report::Fact;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Audit event emitted per check outcome.
#[derive(Debug, Clone, Serialize)]
pub struct PreflightAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Check that ran.
    pub check: CheckKind,
    /// Check status.
    pub status: CheckStatus,
    /// Primary detail value.
    pub detail: String,
    /// Keyed facts.
    pub facts: Vec<Fact>,
}

impl PreflightAuditEvent {
    /// Builds an event from a check outcome, stamped with the current time.
    #[must_use]
    pub fn from_outcome(outcome: &CheckOutcome) -> Self {
        Self {
            event: "preflight_check",
            timestamp_ms: now_ms(),
            check: outcome.kind,
            status: outcome.status,
            detail: outcome.detail.clone(),
            facts: outcome.facts.clone(),
        }
    }
}

/// Milliseconds since the Unix epoch (zero if the clock is before it).
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|elapsed| elapsed.as_millis()).unwrap_or(0)
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for preflight events.
pub trait PreflightAuditSink: Send + Sync {
    /// Records a check event.
    fn record(&self, event: &PreflightAuditEvent);
}

/// Audit sink that writes JSON lines to stderr.
pub struct PreflightStderrAuditSink;

impl PreflightAuditSink for PreflightStderrAuditSink {
    fn record(&self, event: &PreflightAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct PreflightFileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl PreflightFileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl PreflightAuditSink for PreflightFileAuditSink {
    fn record(&self, event: &PreflightAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct PreflightNoopAuditSink;

impl PreflightAuditSink for PreflightNoopAuditSink {
    fn record(&self, _event: &PreflightAuditEvent) {}
}

/// Builds the sink selected by `[audit]` settings.
///
/// # Errors
///
/// Returns an error when the configured audit file cannot be opened.
pub fn audit_sink_from_config(config: &AuditConfig) -> io::Result<Box<dyn PreflightAuditSink>> {
    if !config.enabled {
        return Ok(Box::new(PreflightNoopAuditSink));
    }
    match &config.path {
        Some(path) => Ok(Box::new(PreflightFileAuditSink::new(path)?)),
        None => Ok(Box::new(PreflightStderrAuditSink)),
    }
}
