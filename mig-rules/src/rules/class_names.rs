//! Renamed and removed library classes, interfaces and constants.

use matmig_data::{ActiveChanges, ChangeEntry};

use super::Rule;
use crate::{
    Finding, SourceFile, TrustScope,
    classify::is_import_specifier_node,
    syntax::{
        node_span, node_text, preorder,
        typescript::{self, in_module_declaration, qualifier},
    },
    walk::{IdentifierRule, walk_identifiers},
};

const DIRECTORY: &str = "class-names";

fn message(entry: &ChangeEntry) -> String {
    format!(
        "Found deprecated identifier \"{}\" which has been renamed to \"{}\"",
        entry.replace, entry.replace_with
    )
}

/// Renames identifiers imported from the library.
///
/// Only identifiers whose import (or namespace import) resolves to the
/// library are rewritten; a user declaration that shares the name is left
/// alone.
pub struct ClassNamesIdentifier;

impl Rule for ClassNamesIdentifier {
    fn name(&self) -> &'static str {
        "class-names-identifier"
    }

    fn description(&self) -> &'static str {
        "Renames deprecated class names imported from the library"
    }

    fn directory(&self) -> &'static str {
        DIRECTORY
    }

    fn check(&self, file: &SourceFile, changes: &ActiveChanges, findings: &mut Vec<Finding>) {
        let Some(tree) = file.typescript() else {
            return;
        };
        if changes.class_names.is_empty() {
            return;
        }

        let rule = IdentifierRule {
            name: self.name(),
            index: &changes.class_names,
            message,
        };
        let walk = walk_identifiers(tree, file.text(), &changes.library, &rule);
        findings.extend(walk.replacements);
    }
}

/// Reports library symbols that changed in ways that cannot be rewritten.
pub struct ClassNamesIdentifierMisc;

impl Rule for ClassNamesIdentifierMisc {
    fn name(&self) -> &'static str {
        "class-names-identifier-misc"
    }

    fn description(&self) -> &'static str {
        "Reports usages of library identifiers whose type or role changed"
    }

    fn directory(&self) -> &'static str {
        DIRECTORY
    }

    fn check(&self, file: &SourceFile, changes: &ActiveChanges, findings: &mut Vec<Finding>) {
        let Some(tree) = file.typescript() else {
            return;
        };
        if changes.identifier_notices.is_empty() {
            return;
        }
        let source = file.text();
        let mut trust = TrustScope::new();

        for node in preorder(tree.root_node()) {
            if !typescript::is_identifier_kind(node.kind()) {
                continue;
            }
            let text = node_text(node, source);

            let symbol = if trust.observe(node, source, &changes.library) {
                is_import_specifier_node(node).then_some(text)
            } else if in_module_declaration(node) {
                None
            } else if let Some(object) = qualifier(node) {
                (object.kind() == "identifier"
                    && trust.is_trusted_namespace(node_text(object, source)))
                .then_some(text)
            } else if node.kind() == "property_identifier" {
                None
            } else {
                trust.resolve(text)
            };

            let Some(symbol) = symbol else {
                continue;
            };
            if let Some(notice) = changes.identifier_notices.iter().find(|n| n.name == symbol) {
                findings.push(Finding::failure(
                    self.name(),
                    node_span(node),
                    notice.message.clone(),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::common::testing::{changes, run, run_at};

    #[test]
    fn test_renames_trusted_identifiers() {
        let src = r#"import { PortalHost, DomPortalHost } from '@angular/cdk/portal';
class Outlet extends DomPortalHost {}
let host: PortalHost;
"#;
        let (findings, fixed) = run(&ClassNamesIdentifier, "a.ts", src);
        assert_eq!(findings.len(), 4);
        assert_eq!(
            fixed,
            r#"import { PortalOutlet, DomPortalOutlet } from '@angular/cdk/portal';
class Outlet extends DomPortalOutlet {}
let host: PortalOutlet;
"#
        );
        assert_eq!(
            findings[0].message,
            "Found deprecated identifier \"PortalHost\" which has been renamed to \"PortalOutlet\""
        );
    }

    #[test]
    fn test_local_declaration_with_same_name() {
        let src = "class PortalHost {}\nconst p = new PortalHost();";
        let (findings, fixed) = run(&ClassNamesIdentifier, "a.ts", src);
        assert!(findings.is_empty());
        assert_eq!(fixed, src);
    }

    #[test]
    fn test_version_gated_entries() {
        let src = "import { MatVerticalStepper } from '@angular/material';";
        let (findings, fixed) = run(&ClassNamesIdentifier, "a.ts", src);
        assert!(findings.is_empty());
        assert_eq!(fixed, src);

        let (findings, fixed) = run_at(&ClassNamesIdentifier, "a.ts", src, &changes(7));
        assert_eq!(findings.len(), 1);
        assert_eq!(fixed, "import { MatStepper } from '@angular/material';");
    }

    #[test]
    fn test_identifier_notices() {
        let src = r#"import { MatDrawerToggleResult } from '@angular/material';
import * as mat from '@angular/material';
let a: MatDrawerToggleResult;
let b: mat.MatDrawerToggleResult;
"#;
        let (findings, fixed) = run(&ClassNamesIdentifierMisc, "a.ts", src);
        assert_eq!(findings.len(), 3);
        assert!(findings.iter().all(|f| f.severity.is_error() && f.fix.is_none()));
        assert!(findings[0].message.contains("string literal type"));
        assert_eq!(fixed, src);
    }

    #[test]
    fn test_identifier_notice_follows_alias() {
        let src = "import { MatDrawerToggleResult as Result } from '@angular/material';\nlet a: Result;";
        let (findings, _) = run(&ClassNamesIdentifierMisc, "a.ts", src);
        assert_eq!(findings.len(), 2);
        assert_eq!(&src[findings[1].span.range()], "Result");
    }

    #[test]
    fn test_identifier_notice_in_shorthand_property() {
        let src = "import { MatDrawerToggleResult } from '@angular/material';\nconst types = { MatDrawerToggleResult };";
        let (findings, _) = run(&ClassNamesIdentifierMisc, "a.ts", src);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[1].span.start, src.rfind("MatDrawerToggleResult").unwrap());
    }

    #[test]
    fn test_identifier_notice_untrusted() {
        let src = "type MatDrawerToggleResult = string;\nlet a: MatDrawerToggleResult;";
        let (findings, _) = run(&ClassNamesIdentifierMisc, "a.ts", src);
        assert!(findings.is_empty());
    }
}
