//! Renamed `@Output()` events.

use matmig_core::Span;
use matmig_data::{ActiveChanges, ChangeEntry, Surface};

use super::{
    Rule,
    common::{element_in_scope, rename, template_elements},
};
use crate::{
    Finding, SourceFile,
    syntax::{BindingKind, parse_binding},
};

fn message(entry: &ChangeEntry) -> String {
    format!(
        "Found deprecated @Output() \"{}\" which has been renamed to \"{}\"",
        entry.replace, entry.replace_with
    )
}

/// Event bindings on template elements: `(x)` and `on-x`.
pub struct OutputNamesTemplate;

impl Rule for OutputNamesTemplate {
    fn name(&self) -> &'static str {
        "output-names-template"
    }

    fn description(&self) -> &'static str {
        "Renames deprecated output bindings in templates"
    }

    fn directory(&self) -> &'static str {
        "output-names"
    }

    fn check(&self, file: &SourceFile, changes: &ActiveChanges, findings: &mut Vec<Finding>) {
        let index = &changes.output_names;
        if index.is_empty() {
            return;
        }

        for element in template_elements(file) {
            for attribute in &element.attributes {
                let binding = parse_binding(&attribute.name);
                if binding.kind != BindingKind::Event {
                    continue;
                }
                let Some(entry) = index.find_for(binding.name, Surface::Template) else {
                    continue;
                };
                if !element_in_scope(entry, element) {
                    continue;
                }
                let span = Span::new(attribute.name_span.start + binding.offset, binding.name.len());
                findings.push(rename(self.name(), span, entry, message));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::common::testing::run;

    #[test]
    fn test_event_bindings() {
        let src = r#"<mat-select (change)="a()" on-onOpen="b()"></mat-select><input (change)="c()">"#;
        let (findings, fixed) = run(&OutputNamesTemplate, "a.html", src);
        assert_eq!(findings.len(), 2);
        assert_eq!(
            fixed,
            r#"<mat-select (selectionChange)="a()" on-opened="b()"></mat-select><input (change)="c()">"#
        );
        assert_eq!(
            findings[0].message,
            "Found deprecated @Output() \"change\" which has been renamed to \"selectionChange\""
        );
    }

    #[test]
    fn test_dashed_outputs() {
        let src = r#"<mat-sidenav (align-changed)="x()" (close-start)="y()"></mat-sidenav>"#;
        let (_, fixed) = run(&OutputNamesTemplate, "a.html", src);
        assert_eq!(
            fixed,
            r#"<mat-sidenav (positionChanged)="x()" (closedStart)="y()"></mat-sidenav>"#
        );
    }

    #[test]
    fn test_input_bindings_ignored() {
        let src = r#"<mat-select [change]="x"></mat-select>"#;
        let (findings, _) = run(&OutputNamesTemplate, "a.html", src);
        assert!(findings.is_empty());
    }
}
