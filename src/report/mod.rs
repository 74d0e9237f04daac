//! Report rendering for completed scans
//!
//! Architecture: Anti-Corruption Layer - formatters translate the domain
//! report into external representations
//! - The text format is a display contract: a host editor resolves each
//!   `relativePath:line` location line with the expression `([^:]+):(\d+)`,
//!   so the layout must not drift
//! - JSON exists for programmatic consumers and adds nothing semantically

use crate::domain::violations::{CspError, CspResult, ScanReport};
use std::io::Write;
use std::path::Path;

/// Supported output formats for scan reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// The plain-text report shown in the viewer
    Text,
    /// JSON for programmatic consumption
    Json,
}

impl OutputFormat {
    /// Parse format from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Get all available format names
    pub fn all_formats() -> &'static [&'static str] {
        &["text", "json"]
    }
}

/// Renders a scan report against the project root it was produced from
#[derive(Debug, Default)]
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Render `report` in the requested format.
    pub fn render(&self, root: &Path, report: &ScanReport, format: OutputFormat) -> CspResult<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text(root, report)),
            OutputFormat::Json => self.render_json(root, report),
        }
    }

    /// Write a rendered report to a writer.
    pub fn write_report<W: Write>(
        &self,
        root: &Path,
        report: &ScanReport,
        format: OutputFormat,
        mut writer: W,
    ) -> CspResult<()> {
        let rendered = self.render(root, report, format)?;
        writer.write_all(rendered.as_bytes())?;
        Ok(())
    }

    fn render_text(&self, root: &Path, report: &ScanReport) -> String {
        let mut output = String::new();

        output.push_str(&format!("Project {}\n\n", root.display()));

        if report.violations.is_empty() {
            output.push_str("No CSP violations found\n");
            return output;
        }

        let count = report.violation_count();
        output.push_str(&format!(
            "{} CSP violation{} found\n(double click on filenames to jump into violations)\n\n",
            count,
            if count == 1 { "" } else { "s" }
        ));

        for violation in &report.violations {
            // Root prefix plus one separator comes off; files outside the
            // root (never produced by a scan of it) stay as-is.
            let relative =
                violation.file_path.strip_prefix(root).unwrap_or(&violation.file_path);
            output.push_str(&format!(
                "{}:{}\nCSP rule: {}\n\n",
                relative.display(),
                violation.line,
                violation.message
            ));
        }

        output
    }

    fn render_json(&self, root: &Path, report: &ScanReport) -> CspResult<String> {
        let violations: Vec<serde_json::Value> = report
            .violations
            .iter()
            .map(|v| {
                serde_json::json!({
                    "rule_id": v.rule_id,
                    "file": v.file_path.display().to_string(),
                    "line": v.line,
                    "message": v.message,
                })
            })
            .collect();

        let diagnostics: Vec<serde_json::Value> = report
            .diagnostics
            .iter()
            .map(|d| {
                serde_json::json!({
                    "file": d.file_path.display().to_string(),
                    "message": d.message,
                })
            })
            .collect();

        let json_report = serde_json::json!({
            "project": root.display().to_string(),
            "violations": violations,
            "diagnostics": diagnostics,
            "summary": {
                "files_scanned": report.summary.files_scanned,
                "violation_count": report.violation_count(),
                "execution_time_ms": report.summary.execution_time_ms,
                "scanned_at": report.summary.scanned_at.to_rfc3339(),
            },
        });

        serde_json::to_string_pretty(&json_report)
            .map_err(|e| CspError::report(format!("JSON serialization failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::violations::Violation;
    use std::path::PathBuf;

    fn sample_report(root: &Path) -> ScanReport {
        let mut report = ScanReport::new();
        report.add_violation(Violation::new(
            "eval-new-function",
            root.join("index.js"),
            3,
            "Code creation from strings, e.g. eval / new Function not allowed",
        ));
        report.add_violation(Violation::new(
            "external-img-script",
            root.join("pages/popup.html"),
            7,
            "External resources are not allowed",
        ));
        report.set_files_scanned(2);
        report
    }

    #[test]
    fn test_text_format_is_exact() {
        let root = PathBuf::from("/work/app");
        let formatter = ReportFormatter::new();

        let output = formatter.render(&root, &sample_report(&root), OutputFormat::Text).unwrap();

        assert_eq!(
            output,
            "Project /work/app\n\n\
             2 CSP violations found\n\
             (double click on filenames to jump into violations)\n\n\
             index.js:3\n\
             CSP rule: Code creation from strings, e.g. eval / new Function not allowed\n\n\
             pages/popup.html:7\n\
             CSP rule: External resources are not allowed\n\n"
        );
    }

    #[test]
    fn test_singular_violation_count() {
        let root = PathBuf::from("/work/app");
        let mut report = ScanReport::new();
        report.add_violation(Violation::new(
            "inline-script",
            root.join("a.html"),
            1,
            "Inline scripts are not allowed",
        ));

        let output = ReportFormatter::new().render(&root, &report, OutputFormat::Text).unwrap();

        assert!(output.contains("1 CSP violation found\n"));
        assert!(!output.contains("violations found"));
    }

    #[test]
    fn test_empty_report_names_the_root() {
        let root = PathBuf::from("/work/app");
        let report = ScanReport::new();

        let output = ReportFormatter::new().render(&root, &report, OutputFormat::Text).unwrap();

        assert_eq!(output, "Project /work/app\n\nNo CSP violations found\n");
    }

    #[test]
    fn test_location_lines_parse_for_navigation() {
        let root = PathBuf::from("/work/app");
        let output =
            ReportFormatter::new().render(&root, &sample_report(&root), OutputFormat::Text).unwrap();

        // The navigation contract a host editor relies on.
        let location = regex::Regex::new(r"^([^:]+):(\d+)$").unwrap();
        let locations: Vec<_> = output.lines().filter(|l| location.is_match(l)).collect();

        assert_eq!(locations, vec!["index.js:3", "pages/popup.html:7"]);
    }

    #[test]
    fn test_json_format() {
        let root = PathBuf::from("/work/app");
        let output =
            ReportFormatter::new().render(&root, &sample_report(&root), OutputFormat::Json).unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["project"], "/work/app");
        assert_eq!(json["violations"].as_array().unwrap().len(), 2);
        assert_eq!(json["violations"][0]["rule_id"], "eval-new-function");
        assert_eq!(json["summary"]["files_scanned"], 2);
        assert_eq!(json["summary"]["violation_count"], 2);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("text"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("yaml"), None);
        assert_eq!(OutputFormat::all_formats(), &["text", "json"]);
    }
}
