//! Renamed `@Input()` properties.

use matmig_core::Span;
use matmig_data::{ActiveChanges, ChangeEntry, Surface};

use super::{
    Rule,
    common::{element_in_scope, rename, rename_in_stylesheets, template_elements},
};
use crate::{
    Finding, SourceFile,
    syntax::{StyleTokenKind, parse_binding},
};

const DIRECTORY: &str = "input-names";

fn message(entry: &ChangeEntry) -> String {
    format!(
        "Found deprecated @Input() \"{}\" which has been renamed to \"{}\"",
        entry.replace, entry.replace_with
    )
}

/// Inputs used as attribute selectors in stylesheets (`[floatPlaceholder]`).
pub struct InputNamesStylesheet;

impl Rule for InputNamesStylesheet {
    fn name(&self) -> &'static str {
        "input-names-stylesheet"
    }

    fn description(&self) -> &'static str {
        "Renames deprecated input names used as attribute selectors in stylesheets"
    }

    fn directory(&self) -> &'static str {
        DIRECTORY
    }

    fn check(&self, file: &SourceFile, changes: &ActiveChanges, findings: &mut Vec<Finding>) {
        rename_in_stylesheets(
            self.name(),
            file,
            &changes.input_names,
            StyleTokenKind::AttributeName,
            message,
            findings,
        );
    }
}

/// Input bindings on template elements: plain attributes, `[x]`, `bind-x`,
/// `[(x)]` and `bindon-x`.
pub struct InputNamesTemplate;

impl Rule for InputNamesTemplate {
    fn name(&self) -> &'static str {
        "input-names-template"
    }

    fn description(&self) -> &'static str {
        "Renames deprecated input bindings in templates"
    }

    fn directory(&self) -> &'static str {
        DIRECTORY
    }

    fn check(&self, file: &SourceFile, changes: &ActiveChanges, findings: &mut Vec<Finding>) {
        let index = &changes.input_names;
        if index.is_empty() {
            return;
        }

        for element in template_elements(file) {
            for attribute in &element.attributes {
                let binding = parse_binding(&attribute.name);
                if !binding.kind.is_input() {
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
