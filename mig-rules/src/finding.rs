//! Findings emitted by upgrade rules.
//!
//! A finding records one match in a source file. Most carry a replacement
//! that an external runner (or [`crate::apply_replacements`]) applies later;
//! check-only rules emit findings without one.

use std::fmt;

use matmig_core::Span;
use serde::Serialize;

/// Severity level for a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Code that will not compile against the target version.
    Error,
    /// A change that was rewritten or needs manual attention.
    Warning,
    /// Informational message.
    Info,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A textual edit against the original, unmodified source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Replacement {
    /// Byte offset of the replaced text.
    pub position: usize,
    /// Byte length of the replaced text.
    pub length: usize,
    pub replacement_text: String,
}

impl Replacement {
    pub fn new(span: Span, text: impl Into<String>) -> Self {
        Self {
            position: span.start,
            length: span.len,
            replacement_text: text.into(),
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.position, self.length)
    }
}

/// One match reported by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Name of the rule that produced this finding.
    pub rule: &'static str,
    pub severity: Severity,
    #[serde(flatten)]
    pub span: Span,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<Replacement>,
}

impl Finding {
    /// A finding that replaces `span` with `text`.
    pub fn replace(
        rule: &'static str,
        span: Span,
        text: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule,
            severity: Severity::Warning,
            span,
            message: message.into(),
            fix: Some(Replacement::new(span, text)),
        }
    }

    /// A finding without an automatic fix.
    pub fn failure(rule: &'static str, span: Span, message: impl Into<String>) -> Self {
        Self {
            rule,
            severity: Severity::Error,
            span,
            message: message.into(),
            fix: None,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_fixable(&self) -> bool {
        self.fix.is_some()
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.severity, self.message, self.rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_finding() {
        let finding = Finding::replace(
            "class-names-identifier",
            Span::new(10, 13),
            "cdkPortalOutlet",
            "renamed",
        );
        assert!(finding.is_fixable());
        assert!(finding.severity.is_warning());
        let fix = finding.fix.unwrap();
        assert_eq!(fix.position, 10);
        assert_eq!(fix.length, 13);
        assert_eq!(fix.span(), Span::new(10, 13));
    }

    #[test]
    fn test_failure_finding() {
        let finding = Finding::failure("method-calls-check", Span::new(0, 3), "bad call");
        assert!(!finding.is_fixable());
        assert!(finding.severity.is_error());
        assert_eq!(
            finding.to_string(),
            "error: bad call [method-calls-check]"
        );
    }

    #[test]
    fn test_replacement_serializes_runner_contract() {
        let fix = Replacement::new(Span::new(4, 2), "xy");
        let json = serde_json::to_value(&fix).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"position": 4, "length": 2, "replacementText": "xy"})
        );
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Info.to_string(), "info");
    }
}
