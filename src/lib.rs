//! CSP Guardian - Content-Security-Policy compliance scanning for packaged
//! web apps and extensions
//!
//! Architecture: Clean Architecture - the library interface is the
//! application layer
//! - A fixed rule catalog is compiled once and applied over a directory tree
//! - The engine takes text and paths in and hands structured violations out;
//!   editor/host integration lives strictly outside this crate
//! - Reports render to an exact plain-text contract a host viewer can
//!   navigate by

pub mod analyzer;
pub mod catalog;
pub mod domain;
pub mod manifest;
pub mod patterns;
pub mod report;
pub mod scanner;

// Re-export main types for convenient access
pub use domain::violations::{
    CspError, CspResult, ScanDiagnostic, ScanReport, ScanSummary, Violation,
};

pub use analyzer::{Analyzer, ScanOptions};

pub use catalog::{builtin_rules, RuleSpec, RESTRICTED_HOST_RESOURCES};

pub use manifest::{find_project_root, project_kind, ManifestKind};

pub use patterns::{line_number_at, RuleEngine, RuleMatch};

pub use report::{OutputFormat, ReportFormatter};

pub use scanner::FileScanner;

use std::path::Path;

/// Main validator providing high-level scan operations
///
/// A validator is a plain value: construct one per scan invocation and drop
/// it afterwards. There is no process-wide state.
pub struct CspValidator {
    analyzer: Analyzer,
    formatter: ReportFormatter,
}

impl CspValidator {
    /// Create a validator with the full builtin catalog.
    pub fn new() -> CspResult<Self> {
        Self::with_options(ScanOptions::default())
    }

    /// Create a validator with scan options (category gating, fail-fast).
    pub fn with_options(options: ScanOptions) -> CspResult<Self> {
        Ok(Self { analyzer: Analyzer::with_options(options)?, formatter: ReportFormatter::new() })
    }

    /// Validate raw contents attributed to `file_path`.
    pub fn validate_contents(&self, contents: &str, file_path: &Path) -> Vec<Violation> {
        self.analyzer.validate_contents(contents, file_path)
    }

    /// Validate a single file on disk.
    pub fn validate_file(&self, file_path: &Path) -> CspResult<Vec<Violation>> {
        self.analyzer.analyze_file(file_path)
    }

    /// Scan an entire project tree.
    pub fn validate_project(&self, root: &Path) -> CspResult<ScanReport> {
        self.analyzer.analyze_directory(root)
    }

    /// Render a report produced by [`validate_project`](Self::validate_project).
    pub fn format_report(
        &self,
        root: &Path,
        report: &ScanReport,
        format: OutputFormat,
    ) -> CspResult<String> {
        self.formatter.render(root, report, format)
    }

    /// Number of rules active under this validator's options.
    pub fn active_rule_count(&self) -> usize {
        self.analyzer.active_rule_count()
    }
}

/// Convenience function to scan a project tree with default settings.
pub fn validate_project<P: AsRef<Path>>(root: P) -> CspResult<ScanReport> {
    CspValidator::new()?.validate_project(root.as_ref())
}

/// Convenience function to scan a project tree and render the text report.
pub fn scan_and_render<P: AsRef<Path>>(root: P) -> CspResult<String> {
    let root = root.as_ref();
    let validator = CspValidator::new()?;
    let report = validator.validate_project(root)?;
    validator.format_report(root, &report, OutputFormat::Text)
}
