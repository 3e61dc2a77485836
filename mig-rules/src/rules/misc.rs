//! Rules that report removed library API without rewriting it.

use matmig_core::Span;
use matmig_data::{ActiveChanges, TemplateNoticeKind};

use super::{Rule, common::template_elements};
use crate::{
    Finding, SourceFile,
    classify::{
        is_export_specifier_node, is_import_specifier_node, is_library_export_declaration,
        is_library_import_declaration,
    },
    syntax::{BindingKind, is_field, node_span, node_text, parse_binding, preorder},
};

/// Reports imports and re-exports of symbols the library removed.
pub struct CheckImportMisc;

impl Rule for CheckImportMisc {
    fn name(&self) -> &'static str {
        "check-import-misc"
    }

    fn description(&self) -> &'static str {
        "Reports imports of removed library symbols"
    }

    fn directory(&self) -> &'static str {
        ""
    }

    fn check(&self, file: &SourceFile, changes: &ActiveChanges, findings: &mut Vec<Finding>) {
        let Some(tree) = file.typescript() else {
            return;
        };
        if changes.import_notices.is_empty() {
            return;
        }
        let source = file.text();
        let library = &changes.library;

        for node in preorder(tree.root_node()) {
            if node.kind() != "identifier" {
                continue;
            }
            let from_library = (is_import_specifier_node(node)
                && node.parent().is_some_and(|p| is_field(p, "name", node))
                && is_library_import_declaration(node, source, library))
                || (is_export_specifier_node(node)
                    && is_library_export_declaration(node, source, library));
            if !from_library {
                continue;
            }

            let name = node_text(node, source);
            if let Some(notice) = changes.import_notices.iter().find(|n| n.name == name) {
                findings.push(Finding::failure(
                    self.name(),
                    node_span(node),
                    notice.message.clone(),
                ));
            }
        }
    }
}

/// Reports removed elements, inputs and outputs in templates.
pub struct CheckTemplateMisc;

impl Rule for CheckTemplateMisc {
    fn name(&self) -> &'static str {
        "check-template-misc"
    }

    fn description(&self) -> &'static str {
        "Reports removed template elements, inputs and outputs"
    }

    fn directory(&self) -> &'static str {
        ""
    }

    fn check(&self, file: &SourceFile, changes: &ActiveChanges, findings: &mut Vec<Finding>) {
        let notices = &changes.template_notices;
        if notices.is_empty() {
            return;
        }

        for element in template_elements(file) {
            for notice in notices
                .iter()
                .filter(|n| n.kind == TemplateNoticeKind::Element)
                .filter(|n| n.name.eq_ignore_ascii_case(&element.tag))
            {
                if let Some(span) = element.tag_spans.first() {
                    findings.push(Finding::failure(self.name(), *span, notice.message.clone()));
                }
            }

            for attribute in &element.attributes {
                let binding = parse_binding(&attribute.name);
                let kind = match binding.kind {
                    BindingKind::Event => TemplateNoticeKind::Output,
                    k if k.is_input() => TemplateNoticeKind::Input,
                    _ => continue,
                };
                for notice in notices.iter().filter(|n| {
                    n.kind == kind && n.name == binding.name && n.matches_element(&element.tag)
                }) {
                    let span = Span::new(attribute.name_span.start + binding.offset, binding.name.len());
                    findings.push(Finding::failure(self.name(), span, notice.message.clone()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::common::testing::run;

    #[test]
    fn test_removed_imports() {
        let src = r#"import { SHOW_ANIMATION, MatTooltip } from '@angular/material';
import { HIDE_ANIMATION } from './animations';
export { HIDE_ANIMATION } from '@angular/material';
"#;
        let (findings, _) = run(&CheckImportMisc, "a.ts", src);
        assert_eq!(findings.len(), 2);
        assert_eq!(&src[findings[0].span.range()], "SHOW_ANIMATION");
        assert!(findings[1].message.contains("HIDE_ANIMATION"));
        assert!(findings.iter().all(|f| f.severity.is_error()));
    }

    #[test]
    fn test_template_notices() {
        let src = r#"<cdk-focus-trap></cdk-focus-trap>
<mat-list-option (selectionChange)="a()"></mat-list-option>
<mat-selection-list (selectionChange)="b()"></mat-selection-list>
<mat-button-toggle-group [selected]="s"></mat-button-toggle-group>"#;
        let (findings, fixed) = run(&CheckTemplateMisc, "a.html", src);
        assert_eq!(findings.len(), 3);
        assert_eq!(&src[findings[0].span.range()], "cdk-focus-trap");
        assert_eq!(&src[findings[1].span.range()], "selectionChange");
        assert_eq!(&src[findings[2].span.range()], "selected");
        assert_eq!(fixed, src);
    }
}
