//! Renamed attribute selectors (`[cdkPortalHost]` and friends).

use matmig_core::Span;
use matmig_data::{ActiveChanges, ChangeEntry, Surface};

use super::{
    Rule,
    common::{element_in_scope, rename, rename_in_strings, rename_in_stylesheets, template_elements},
};
use crate::{
    Finding, SourceFile,
    syntax::{BindingKind, StyleTokenKind, parse_binding},
};

const DIRECTORY: &str = "attribute-selectors";

fn message(entry: &ChangeEntry) -> String {
    format!(
        "Found deprecated attribute selector \"[{}]\" which has been renamed to \"[{}]\"",
        entry.replace, entry.replace_with
    )
}

/// Attribute selectors in TypeScript string literals, e.g. `querySelector('[cdkPortalHost]')`.
pub struct AttributeSelectorsStringLiteral;

impl Rule for AttributeSelectorsStringLiteral {
    fn name(&self) -> &'static str {
        "attribute-selectors-string-literal"
    }

    fn description(&self) -> &'static str {
        "Renames deprecated attribute selectors inside string literals"
    }

    fn directory(&self) -> &'static str {
        DIRECTORY
    }

    fn check(&self, file: &SourceFile, changes: &ActiveChanges, findings: &mut Vec<Finding>) {
        rename_in_strings(
            self.name(),
            file,
            &changes.attribute_selectors,
            message,
            findings,
        );
    }
}

pub struct AttributeSelectorsStylesheet;

impl Rule for AttributeSelectorsStylesheet {
    fn name(&self) -> &'static str {
        "attribute-selectors-stylesheet"
    }

    fn description(&self) -> &'static str {
        "Renames deprecated attribute selectors in stylesheets"
    }

    fn directory(&self) -> &'static str {
        DIRECTORY
    }

    fn check(&self, file: &SourceFile, changes: &ActiveChanges, findings: &mut Vec<Finding>) {
        rename_in_stylesheets(
            self.name(),
            file,
            &changes.attribute_selectors,
            StyleTokenKind::AttributeName,
            message,
            findings,
        );
    }
}

pub struct AttributeSelectorsTemplate;

impl Rule for AttributeSelectorsTemplate {
    fn name(&self) -> &'static str {
        "attribute-selectors-template"
    }

    fn description(&self) -> &'static str {
        "Renames deprecated attribute selectors on template elements"
    }

    fn directory(&self) -> &'static str {
        DIRECTORY
    }

    fn check(&self, file: &SourceFile, changes: &ActiveChanges, findings: &mut Vec<Finding>) {
        let index = &changes.attribute_selectors;
        if index.is_empty() {
            return;
        }

        for element in template_elements(file) {
            for attribute in &element.attributes {
                let binding = parse_binding(&attribute.name);
                if matches!(binding.kind, BindingKind::Event | BindingKind::Reference) {
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
