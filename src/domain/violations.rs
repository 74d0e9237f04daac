//! Core domain models for CSP violations and scan results
//!
//! Architecture: Rich Domain Models - the scan report is the aggregate root
//! - Violations are immutable records created by the engine and owned by the report
//! - Report order is scan order: file traversal order, then rule order, then match order
//! - Diagnostics capture files that were visited but could not be read

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A CSP violation detected in a scanned file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Stable identifier of the rule that matched
    pub rule_id: String,
    /// File the violation was found in
    pub file_path: PathBuf,
    /// Line number (1-indexed) containing the start of the match
    pub line: u32,
    /// Human-readable message, copied from the triggering rule
    pub message: String,
}

impl Violation {
    pub fn new(
        rule_id: impl Into<String>,
        file_path: PathBuf,
        line: u32,
        message: impl Into<String>,
    ) -> Self {
        Self { rule_id: rule_id.into(), file_path, line, message: message.into() }
    }

    /// Format violation for display as `path:line message`
    pub fn format_display(&self) -> String {
        format!("{}:{} {}", self.file_path.display(), self.line, self.message)
    }
}

/// A file that was visited during traversal but skipped because it could not
/// be read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanDiagnostic {
    pub file_path: PathBuf,
    pub message: String,
}

/// Summary statistics for a completed scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Number of candidate files visited (including skipped ones)
    pub files_scanned: usize,
    /// Total execution time in milliseconds
    pub execution_time_ms: u64,
    /// When the scan was performed
    pub scanned_at: DateTime<Utc>,
}

impl Default for ScanSummary {
    fn default() -> Self {
        Self { files_scanned: 0, execution_time_ms: 0, scanned_at: Utc::now() }
    }
}

/// Complete result of scanning one directory tree
///
/// Violations are kept strictly in insertion order; there is no sorting and no
/// deduplication. An empty violation list is the "clean project" case, not a
/// distinct state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// All violations, in scan order
    pub violations: Vec<Violation>,
    /// Files skipped as unreadable during the scan
    pub diagnostics: Vec<ScanDiagnostic>,
    /// Summary statistics
    pub summary: ScanSummary,
}

impl ScanReport {
    pub fn new() -> Self {
        Self { violations: Vec::new(), diagnostics: Vec::new(), summary: ScanSummary::default() }
    }

    /// Append a violation, preserving scan order
    pub fn add_violation(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Append all violations from one file, preserving scan order
    pub fn extend_violations(&mut self, violations: impl IntoIterator<Item = Violation>) {
        self.violations.extend(violations);
    }

    /// Record a file that was skipped as unreadable
    pub fn add_diagnostic(&mut self, file_path: PathBuf, message: impl Into<String>) {
        self.diagnostics.push(ScanDiagnostic { file_path, message: message.into() });
    }

    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    pub fn set_files_scanned(&mut self, count: usize) {
        self.summary.files_scanned = count;
    }

    pub fn set_execution_time(&mut self, duration_ms: u64) {
        self.summary.execution_time_ms = duration_ms;
    }
}

impl Default for ScanReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Error types that can occur during validation
#[derive(Debug, thiserror::Error)]
pub enum CspError {
    /// File or directory could not be read or accessed
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Rule pattern failed to compile
    #[error("Pattern error: {message}")]
    Pattern { message: String },

    /// Manifest file could not be interpreted
    #[error("Manifest error: {message}")]
    Manifest { message: String },

    /// Scanning failed for a specific file
    #[error("Scan error in {file}: {message}")]
    Scan { file: String, message: String },

    /// Report rendering failed
    #[error("Report error: {message}")]
    Report { message: String },
}

impl CspError {
    pub fn pattern(message: impl Into<String>) -> Self {
        Self::Pattern { message: message.into() }
    }

    pub fn manifest(message: impl Into<String>) -> Self {
        Self::Manifest { message: message.into() }
    }

    pub fn scan(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Scan { file: file.into(), message: message.into() }
    }

    pub fn report(message: impl Into<String>) -> Self {
        Self::Report { message: message.into() }
    }
}

/// Result type for CSP Guardian operations
pub type CspResult<T> = Result<T, CspError>;
