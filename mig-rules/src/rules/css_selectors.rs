//! Renamed CSS class selectors.

use matmig_core::{Span, find_token_matches, split_class_list};
use matmig_data::{ActiveChanges, ChangeEntry, Surface};

use super::{
    Rule,
    common::{element_in_scope, rename, rename_in_strings, rename_in_stylesheets, template_elements},
};
use crate::{
    Finding, SourceFile,
    syntax::{BindingKind, StyleTokenKind, TemplateAttribute, parse_binding},
};

const DIRECTORY: &str = "css-selectors";

fn message(entry: &ChangeEntry) -> String {
    format!(
        "Found deprecated CSS selector \".{}\" which has been renamed to \".{}\"",
        entry.replace, entry.replace_with
    )
}

pub struct CssSelectorsStringLiteral;

impl Rule for CssSelectorsStringLiteral {
    fn name(&self) -> &'static str {
        "css-selectors-string-literal"
    }

    fn description(&self) -> &'static str {
        "Renames deprecated CSS classes inside string literals"
    }

    fn directory(&self) -> &'static str {
        DIRECTORY
    }

    fn check(&self, file: &SourceFile, changes: &ActiveChanges, findings: &mut Vec<Finding>) {
        rename_in_strings(self.name(), file, &changes.css_selectors, message, findings);
    }
}

pub struct CssSelectorsStylesheet;

impl Rule for CssSelectorsStylesheet {
    fn name(&self) -> &'static str {
        "css-selectors-stylesheet"
    }

    fn description(&self) -> &'static str {
        "Renames deprecated CSS class selectors in stylesheets"
    }

    fn directory(&self) -> &'static str {
        DIRECTORY
    }

    fn check(&self, file: &SourceFile, changes: &ActiveChanges, findings: &mut Vec<Finding>) {
        rename_in_stylesheets(
            self.name(),
            file,
            &changes.css_selectors,
            StyleTokenKind::ClassName,
            message,
            findings,
        );
    }
}

/// CSS classes in templates: `class="..."`, `[class.name]` and class
/// expressions bound through `[ngClass]` or `[class]`.
pub struct CssSelectorsTemplate;

impl Rule for CssSelectorsTemplate {
    fn name(&self) -> &'static str {
        "css-selectors-template"
    }

    fn description(&self) -> &'static str {
        "Renames deprecated CSS classes used in templates"
    }

    fn directory(&self) -> &'static str {
        DIRECTORY
    }

    fn check(&self, file: &SourceFile, changes: &ActiveChanges, findings: &mut Vec<Finding>) {
        let index = &changes.css_selectors;
        if index.is_empty() {
            return;
        }

        for element in template_elements(file) {
            for attribute in &element.attributes {
                for (span, token) in class_tokens(attribute) {
                    let Some(entry) = index.find_for(token, Surface::Template) else {
                        continue;
                    };
                    if element_in_scope(entry, element) {
                        findings.push(rename(self.name(), span, entry, message));
                    }
                }

                // Class expressions can hold any token, so search them per entry
                if let Some((value, span)) = class_expression(attribute) {
                    for entry in index.entries_for(Surface::Template) {
                        if !element_in_scope(entry, element) {
                            continue;
                        }
                        for offset in find_token_matches(value, &entry.replace) {
                            let span = Span::new(span.start + offset, entry.replace.len());
                            findings.push(rename(self.name(), span, entry, message));
                        }
                    }
                }
            }
        }
    }
}

/// Class names written literally in `class="..."` or `[class.name]`.
fn class_tokens(attribute: &TemplateAttribute) -> Vec<(Span, &str)> {
    let binding = parse_binding(&attribute.name);

    match binding.kind {
        BindingKind::Plain if binding.name == "class" => {
            let (Some(value), Some(span)) = (&attribute.value, attribute.value_span) else {
                return Vec::new();
            };
            split_class_list(value)
                .into_iter()
                .map(|(offset, class)| (Span::new(span.start + offset, class.len()), class))
                .collect()
        }
        BindingKind::Property => match binding.name.strip_prefix("class.") {
            Some(class) if !class.is_empty() => {
                let start = attribute.name_span.start + binding.offset + "class.".len();
                vec![(Span::new(start, class.len()), class)]
            }
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn class_expression(attribute: &TemplateAttribute) -> Option<(&str, Span)> {
    let binding = parse_binding(&attribute.name);
    if binding.kind != BindingKind::Property || !matches!(binding.name, "ngClass" | "class") {
        return None;
    }
    Some((attribute.value.as_deref()?, attribute.value_span?))
}
