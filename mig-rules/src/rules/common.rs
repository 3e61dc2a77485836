//! Helpers shared by the rename rules of the string, stylesheet and template surfaces.

use matmig_core::{Span, find_token_matches};
use matmig_data::{ChangeEntry, RenameIndex, Surface};

use crate::{
    Finding, SourceFile,
    syntax::{StyleTokenKind, TemplateElement},
};

pub(crate) type Message = fn(&ChangeEntry) -> String;

pub(crate) fn rename(rule: &'static str, span: Span, entry: &ChangeEntry, message: Message) -> Finding {
    Finding::replace(rule, span, entry.replace_with.clone(), message(entry))
}

/// Rename whole tokens inside TypeScript string literals.
pub(crate) fn rename_in_strings(
    rule: &'static str,
    file: &SourceFile,
    index: &RenameIndex,
    message: Message,
    findings: &mut Vec<Finding>,
) {
    let entries: Vec<&ChangeEntry> = index.entries_for(Surface::Strings).collect();
    if entries.is_empty() {
        return;
    }

    for literal in file.string_literals() {
        let text = &file.text()[literal.range()];
        for entry in &entries {
            for offset in find_token_matches(text, &entry.replace) {
                let span = Span::new(literal.start + offset, entry.replace.len());
                findings.push(rename(rule, span, entry, message));
            }
        }
    }
}

/// Rename selector tokens of one kind in every stylesheet of the file.
pub(crate) fn rename_in_stylesheets(
    rule: &'static str,
    file: &SourceFile,
    index: &RenameIndex,
    kind: StyleTokenKind,
    message: Message,
    findings: &mut Vec<Finding>,
) {
    for sheet in file.stylesheets() {
        for token in sheet.selector_tokens(kind) {
            if let Some(entry) = index.find_for(&token.text, Surface::Stylesheet) {
                findings.push(rename(rule, token.span, entry, message));
            }
        }
    }
}

/// Check an entry's element and attribute scoping against a template element.
pub(crate) fn element_in_scope(entry: &ChangeEntry, element: &TemplateElement) -> bool {
    entry
        .whitelist
        .as_ref()
        .is_none_or(|w| w.matches_element(&element.tag, element.bound_names()))
}

pub(crate) fn template_elements(file: &SourceFile) -> impl Iterator<Item = &TemplateElement> {
    file.templates().iter().flat_map(|t| t.elements.iter())
}
