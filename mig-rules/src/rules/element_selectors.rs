//! Renamed element selectors (component tags).

use matmig_data::{ActiveChanges, ChangeEntry, Surface};

use super::{
    Rule,
    common::{rename, rename_in_strings, rename_in_stylesheets, template_elements},
};
use crate::{Finding, SourceFile, syntax::StyleTokenKind};

const DIRECTORY: &str = "element-selectors";

fn message(entry: &ChangeEntry) -> String {
    format!(
        "Found deprecated element selector \"{}\" which has been renamed to \"{}\"",
        entry.replace, entry.replace_with
    )
}

pub struct ElementSelectorsStringLiteral;

impl Rule for ElementSelectorsStringLiteral {
    fn name(&self) -> &'static str {
        "element-selectors-string-literal"
    }

    fn description(&self) -> &'static str {
        "Renames deprecated element selectors inside string literals"
    }

    fn directory(&self) -> &'static str {
        DIRECTORY
    }

    fn check(&self, file: &SourceFile, changes: &ActiveChanges, findings: &mut Vec<Finding>) {
        rename_in_strings(self.name(), file, &changes.element_selectors, message, findings);
    }
}

pub struct ElementSelectorsStylesheet;

impl Rule for ElementSelectorsStylesheet {
    fn name(&self) -> &'static str {
        "element-selectors-stylesheet"
    }

    fn description(&self) -> &'static str {
        "Renames deprecated element selectors in stylesheets"
    }

    fn directory(&self) -> &'static str {
        DIRECTORY
    }

    fn check(&self, file: &SourceFile, changes: &ActiveChanges, findings: &mut Vec<Finding>) {
        rename_in_stylesheets(
            self.name(),
            file,
            &changes.element_selectors,
            StyleTokenKind::Ident,
            message,
            findings,
        );
    }
}

/// Renames both the start and the end tag of matching elements.
pub struct ElementSelectorsTemplate;

impl Rule for ElementSelectorsTemplate {
    fn name(&self) -> &'static str {
        "element-selectors-template"
    }

    fn description(&self) -> &'static str {
        "Renames deprecated element tags in templates"
    }

    fn directory(&self) -> &'static str {
        DIRECTORY
    }

    fn check(&self, file: &SourceFile, changes: &ActiveChanges, findings: &mut Vec<Finding>) {
        let index = &changes.element_selectors;
        if index.is_empty() {
            return;
        }

        for element in template_elements(file) {
            let Some(entry) = index.find_for(&element.tag, Surface::Template) else {
                continue;
            };
            for span in &element.tag_spans {
                findings.push(rename(self.name(), *span, entry, message));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::common::testing::run;

    #[test]
    fn test_template_start_and_end_tags() {
        let src = "<mat-input-container><input matInput></mat-input-container>";
        let (findings, fixed) = run(&ElementSelectorsTemplate, "a.html", src);
        assert_eq!(findings.len(), 2);
        assert_eq!(fixed, "<mat-form-field><input matInput></mat-form-field>");
    }

    #[test]
    fn test_stylesheet_type_selector() {
        let src = "mat-input-container > input { color: red; }\n.mat-input-container {}";
        let (findings, fixed) = run(&ElementSelectorsStylesheet, "a.scss", src);
        // The class selector belongs to the CSS selector rule
        assert_eq!(findings.len(), 1);
        assert_eq!(
            fixed,
            "mat-form-field > input { color: red; }\n.mat-input-container {}"
        );
    }

    #[test]
    fn test_string_literal() {
        let src = "fixture.debugElement.query(By.css('mat-input-container'));";
        let (findings, fixed) = run(&ElementSelectorsStringLiteral, "a.spec.ts", src);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            fixed,
            "fixture.debugElement.query(By.css('mat-form-field'));"
        );
    }
}
