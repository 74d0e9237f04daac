//! The builtin CSP rule catalog
//!
//! Architecture: Rules as Data - the catalog is a declarative table, not code
//! - Each rule is an immutable (pattern, message, category) record
//! - Adding a rule means adding a table entry; the engine never changes
//! - Categories mark rules that project settings may gate off

/// Category tag for rules that only apply when remote hosts are restricted.
///
/// Packaged apps run under a policy that forbids loading resources from
/// arbitrary hosts; ordinary extensions can relax these rules, so they carry
/// this tag and can be disabled per scan.
pub const RESTRICTED_HOST_RESOURCES: &str = "restricted-host-resources";

/// One entry of the rule catalog
///
/// Patterns are compiled case-insensitive and multi-line by the engine.
/// A rule without a category is always active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSpec {
    /// Stable identifier, used in violations and CLI output
    pub id: &'static str,
    /// Regular expression the rule matches on
    pub pattern: &'static str,
    /// Message attached to every violation of this rule
    pub message: &'static str,
    /// Optional gating category; `None` means always active
    pub category: Option<&'static str>,
}

/// The fixed catalog, in evaluation order.
static CATALOG: [RuleSpec; 8] = [
    // img/script tags whose src points at an http[s] host
    RuleSpec {
        id: "external-img-script",
        pattern: r#"<(img|script).*?\ssrc\s?=\s?["']+http[^"']*["']?"#,
        message: "External resources are not allowed",
        category: Some(RESTRICTED_HOST_RESOURCES),
    },
    // link tags whose href points at an http[s] host
    RuleSpec {
        id: "external-link-href",
        pattern: r#"<link.+?href\s?=\s?["']+http[^"']*["']?"#,
        message: "External resources are not allowed",
        category: Some(RESTRICTED_HOST_RESOURCES),
    },
    // script elements with a non-whitespace body; (?s) lets the body span
    // lines, while the [^\s<] class rejects whitespace-only bodies
    RuleSpec {
        id: "inline-script",
        pattern: r#"(?s)<script[^>]*>[^<]+?[^\s<]+?.*?</script>"#,
        message: "Inline scripts are not allowed",
        category: None,
    },
    // eval / new Function
    RuleSpec {
        id: "eval-new-function",
        pattern: "eval|new Function",
        message: "Code creation from strings, e.g. eval / new Function not allowed",
        category: None,
    },
    // setTimeout called with a string literal as first argument
    RuleSpec {
        id: "settimeout-string",
        pattern: r#"setTimeout\s?\("[^"]*""#,
        message: "Code creation from strings, e.g. setTimeout(\"string\") is not allowed",
        category: None,
    },
    // inline on{event}= handlers
    RuleSpec {
        id: "inline-event-handler",
        pattern: r"<.*?\son.*?=",
        message: "Event handlers should be added from an external src file",
        category: None,
    },
    // absolute or protocol-relative url(...) references in CSS
    RuleSpec {
        id: "external-css-url",
        pattern: r#"url\("?(?:https?:)?//[^)]*\)"#,
        message: "External resources are not allowed",
        category: Some(RESTRICTED_HOST_RESOURCES),
    },
    // hrefs with a javascript: url
    RuleSpec {
        id: "javascript-href",
        pattern: "<.*?href.*?javascript:.*?>",
        message: "Inline JavaScript calls are not allowed",
        category: Some(RESTRICTED_HOST_RESOURCES),
    },
];

/// The builtin rule catalog, shared read-only across scans.
pub fn builtin_rules() -> &'static [RuleSpec] {
    &CATALOG
}
