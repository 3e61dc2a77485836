//! Update command report data structures.

use std::path::PathBuf;

use matmig_rules::{FileReport, Finding, RunReport};

use super::output::{Output, Report};

/// One finding positioned for display.
#[derive(Debug)]
pub struct FindingLine {
    /// `line:column`, both one-based.
    pub location: String,
    pub rule: &'static str,
    pub message: String,
    pub fixable: bool,
}

impl FindingLine {
    fn new(text: &str, finding: &Finding) -> Self {
        let start = finding.span.start.min(text.len());
        let before = &text.as_bytes()[..start];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let column = start - before.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1) + 1;
        Self {
            location: format!("{}:{}", line, column),
            rule: finding.rule,
            message: finding.message.clone(),
            fixable: finding.is_fixable(),
        }
    }
}

/// Findings for a single file.
#[derive(Debug)]
pub struct FileSummary {
    pub path: PathBuf,
    pub changed: bool,
    pub findings: Vec<FindingLine>,
}

impl From<&FileReport> for FileSummary {
    fn from(report: &FileReport) -> Self {
        Self {
            path: report.path.clone(),
            changed: report.is_changed(),
            findings: report
                .findings
                .iter()
                .map(|f| FindingLine::new(&report.original, f))
                .collect(),
        }
    }
}

/// Report data from an upgrade run.
#[derive(Debug)]
pub struct UpdateReport {
    /// Target version the rules ran for.
    pub target: String,
    /// Whether fixes were left unwritten.
    pub dry_run: bool,
    /// Files with at least one finding.
    pub files: Vec<FileSummary>,
    /// Files written to disk.
    pub written: Vec<PathBuf>,
    /// Per-file problems, rendered.
    pub warnings: Vec<String>,
}

impl UpdateReport {
    pub fn new(target: String, run: &RunReport) -> Self {
        Self {
            target,
            dry_run: true,
            files: run
                .files
                .iter()
                .filter(|f| !f.findings.is_empty())
                .map(FileSummary::from)
                .collect(),
            written: Vec::new(),
            warnings: run.warnings.iter().map(|w| w.to_string()).collect(),
        }
    }

    pub fn fixable_count(&self) -> usize {
        self.count(|f| f.fixable)
    }

    pub fn manual_count(&self) -> usize {
        self.count(|f| !f.fixable)
    }

    fn count(&self, pred: impl Fn(&FindingLine) -> bool) -> usize {
        self.files
            .iter()
            .flat_map(|f| &f.findings)
            .filter(|f| pred(f))
            .count()
    }
}

impl Report for UpdateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        if self.files.is_empty() {
            out.preformatted(&format!("Nothing to upgrade for version {}.", self.target));
            return;
        }

        for file in &self.files {
            out.section(&file.path.display().to_string());
            for finding in &file.findings {
                let marker = if finding.fixable { "fix" } else { "manual" };
                out.list_item(&format!(
                    "{} [{}] {}",
                    finding.location, marker, finding.rule
                ));
                out.detail(&finding.message);
            }
            out.newline();
        }

        out.key_value("Target", &self.target);
        out.key_value("Fixable", &self.fixable_count().to_string());
        out.key_value("Manual", &self.manual_count().to_string());

        if self.dry_run {
            let pending = self.files.iter().filter(|f| f.changed).count();
            if pending > 0 {
                out.newline();
                out.preformatted(&format!(
                    "{} file{} would change. Re-run with --write to apply.",
                    pending,
                    if pending == 1 { "" } else { "s" }
                ));
            }
        } else if !self.written.is_empty() {
            out.newline();
            out.section("Updated");
            for path in &self.written {
                out.changed_item(&path.display().to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use matmig_core::Span;

    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_finding_location() {
        let text = "import x;\nconst a = PortalHost;";
        let finding = Finding::failure("rule", Span::new(text.find("PortalHost").unwrap(), 10), "msg");
        let line = FindingLine::new(text, &finding);
        assert_eq!(line.location, "2:11");
        assert!(!line.fixable);
    }

    #[test]
    fn test_render_empty() {
        let report = UpdateReport {
            target: "6".to_string(),
            dry_run: true,
            files: Vec::new(),
            written: Vec::new(),
            warnings: vec!["failed to read 'a.ts'".to_string()],
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            vec![
                "warning: failed to read 'a.ts'".to_string(),
                "Nothing to upgrade for version 6.".to_string()
            ]
        );
    }

    #[test]
    fn test_render_dry_run_hint() {
        let report = UpdateReport {
            target: "6".to_string(),
            dry_run: true,
            files: vec![FileSummary {
                path: PathBuf::from("a.ts"),
                changed: true,
                findings: vec![FindingLine {
                    location: "1:1".to_string(),
                    rule: "class-names-identifier",
                    message: "Found deprecated identifier".to_string(),
                    fixable: true,
                }],
            }],
            written: Vec::new(),
            warnings: Vec::new(),
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert!(out.lines.contains(&"- 1:1 [fix] class-names-identifier".to_string()));
        assert!(out.lines.contains(&"Fixable: 1".to_string()));
        assert_eq!(
            out.lines.last().unwrap(),
            "1 file would change. Re-run with --write to apply."
        );
    }
}
