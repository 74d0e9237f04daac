//! Pattern engine for detecting CSP violations in file contents
//!
//! Architectural Principle: Service Layer - the engine wraps compiled rules
//! - Rules compile eagerly at construction; a bad builtin pattern fails fast
//! - Matching is exhaustive: every non-overlapping occurrence is reported,
//!   never just the first
//! - Matching is purely textual and never fails on malformed HTML/JS

use crate::catalog::RuleSpec;
use crate::domain::violations::{CspError, CspResult};
use regex::{Regex, RegexBuilder};

/// A catalog rule compiled for matching
#[derive(Debug)]
pub struct CompiledRule {
    regex: Regex,
    id: &'static str,
    message: &'static str,
    category: Option<&'static str>,
}

impl CompiledRule {
    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    pub fn category(&self) -> Option<&'static str> {
        self.category
    }
}

/// One match of one rule against file contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub rule_id: &'static str,
    pub message: &'static str,
    pub category: Option<&'static str>,
    /// Byte offset where the match begins
    pub offset: usize,
    /// 1-based line containing the start of the match
    pub line: u32,
}

/// Holds the compiled rule set and runs it over file contents
#[derive(Debug)]
pub struct RuleEngine {
    rules: Vec<CompiledRule>,
}

impl RuleEngine {
    /// Compile the given rules, in order.
    ///
    /// All patterns compile case-insensitive and multi-line, matching how the
    /// catalog patterns are written. Compilation failure is a programming
    /// error in the catalog, surfaced here rather than at scan time.
    pub fn new(specs: impl IntoIterator<Item = RuleSpec>) -> CspResult<Self> {
        let mut rules = Vec::new();

        for spec in specs {
            let regex = RegexBuilder::new(spec.pattern)
                .case_insensitive(true)
                .multi_line(true)
                .build()
                .map_err(|e| {
                    CspError::pattern(format!("Invalid pattern in rule '{}': {}", spec.id, e))
                })?;

            rules.push(CompiledRule {
                regex,
                id: spec.id,
                message: spec.message,
                category: spec.category,
            });
        }

        Ok(Self { rules })
    }

    /// Compile the full builtin catalog.
    pub fn with_builtin() -> CspResult<Self> {
        Self::new(crate::catalog::builtin_rules().iter().copied())
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Find every match of every rule in `content`.
    ///
    /// Results are ordered by rule (catalog order), then by match offset
    /// within a rule. Overlaps between different rules are all reported;
    /// rules are evaluated independently.
    pub fn find_matches(&self, content: &str) -> Vec<RuleMatch> {
        let mut matches = Vec::new();

        for rule in &self.rules {
            for m in rule.regex.find_iter(content) {
                tracing::debug!(rule = rule.id, offset = m.start(), "pattern match");
                matches.push(RuleMatch {
                    rule_id: rule.id,
                    message: rule.message,
                    category: rule.category,
                    offset: m.start(),
                    line: line_number_at(content, m.start()),
                });
            }
        }

        matches
    }
}

/// Map a byte offset within `content` to its 1-based line number.
///
/// The line is 1 + the number of newline bytes strictly before the offset, so
/// offset 0 is line 1 and a match at the very end of a file without a
/// trailing newline maps to the last line.
pub fn line_number_at(content: &str, offset: usize) -> u32 {
    let end = offset.min(content.len());
    let newlines = content.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count();
    newlines as u32 + 1
}
