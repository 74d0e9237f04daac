//! Scan orchestration: rules over files over directory trees
//!
//! Architecture: Domain Services - the Analyzer coordinates the whole scan
//! - Compiles the (possibly gated) catalog once, then applies it per file
//! - Single-threaded, synchronous, blocking I/O throughout; an Analyzer holds
//!   no mutable state, so independent scans are freely re-entrant
//! - Unreadable files are skipped and recorded as diagnostics unless the
//!   caller asked to fail fast

use crate::catalog;
use crate::domain::violations::{CspResult, ScanReport, Violation};
use crate::patterns::RuleEngine;
use crate::scanner::FileScanner;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Options for customizing a scan
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Rule categories to leave out of the compiled rule set
    pub disabled_categories: Vec<String>,
    /// Abort the scan on the first unreadable file instead of skipping it
    pub fail_fast: bool,
}

/// Runs the rule catalog over files and directory trees
pub struct Analyzer {
    engine: RuleEngine,
    scanner: FileScanner,
    options: ScanOptions,
}

impl Analyzer {
    /// Analyzer with the full builtin catalog and default options.
    pub fn new() -> CspResult<Self> {
        Self::with_options(ScanOptions::default())
    }

    /// Analyzer with the builtin catalog, minus any disabled categories.
    pub fn with_options(options: ScanOptions) -> CspResult<Self> {
        let active = catalog::builtin_rules().iter().copied().filter(|rule| {
            rule.category
                .map_or(true, |c| !options.disabled_categories.iter().any(|d| d == c))
        });

        Ok(Self { engine: RuleEngine::new(active)?, scanner: FileScanner::new(), options })
    }

    /// Number of rules active for this analyzer.
    pub fn active_rule_count(&self) -> usize {
        self.engine.rules().len()
    }

    /// Validate one file's contents, attributing violations to `file_path`.
    ///
    /// Rules run in catalog order; every match of every rule becomes a
    /// violation. Overlapping matches from different rules are all kept - a
    /// line can legitimately collect several violations.
    pub fn validate_contents(&self, contents: &str, file_path: &Path) -> Vec<Violation> {
        self.engine
            .find_matches(contents)
            .into_iter()
            .map(|m| Violation::new(m.rule_id, file_path.to_path_buf(), m.line, m.message))
            .collect()
    }

    /// Read and validate a single file.
    ///
    /// Contents are decoded lossily: files with invalid UTF-8 are still
    /// scanned textually rather than rejected.
    pub fn analyze_file(&self, file_path: &Path) -> CspResult<Vec<Violation>> {
        let bytes = fs::read(file_path)?;
        let contents = String::from_utf8_lossy(&bytes);

        Ok(self.validate_contents(&contents, file_path))
    }

    /// Scan a whole directory tree and assemble the report.
    ///
    /// Violations arrive in traversal order, then rule order, then match
    /// order within a file. Files that cannot be read are skipped with a
    /// diagnostic (or abort the scan when `fail_fast` is set).
    pub fn analyze_directory(&self, root: &Path) -> CspResult<ScanReport> {
        let start_time = Instant::now();
        let mut report = ScanReport::new();

        let files = self.scanner.find_files(root);

        for file_path in &files {
            match self.analyze_file(file_path) {
                Ok(violations) => report.extend_violations(violations),
                Err(e) => {
                    if self.options.fail_fast {
                        return Err(e);
                    }
                    tracing::warn!("Skipping {}: {}", file_path.display(), e);
                    report.add_diagnostic(file_path.clone(), e.to_string());
                }
            }
        }

        report.set_files_scanned(files.len());
        report.set_execution_time(start_time.elapsed().as_millis() as u64);

        Ok(report)
    }
}
