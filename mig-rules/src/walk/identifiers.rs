//! The trust-propagating identifier walker.

use matmig_core::Span;
use matmig_data::{ChangeEntry, LibraryScope, RenameIndex, Surface};
use tree_sitter::{Node, Tree};

use crate::{
    Finding, TrustScope,
    classify::{
        is_export_specifier_node, is_import_specifier_node, is_library_export_declaration,
        is_library_import_declaration, is_namespace_import_node,
    },
    syntax::{enclosing, is_field, node_span, node_text, preorder, typescript},
};

/// Result of walking one file: the trust established and the replacements found.
#[derive(Debug, Clone, Default)]
pub struct IdentifierWalk {
    pub trust: TrustScope,
    pub replacements: Vec<Finding>,
}

/// What the walker does with a matched identifier.
pub struct IdentifierRule<'a> {
    pub name: &'static str,
    pub index: &'a RenameIndex,
    pub message: fn(&ChangeEntry) -> String,
}

/// Walk every identifier of a file once, in document order.
///
/// For each identifier:
/// 1. names without an entry in `index` are never replaced;
/// 2. a library namespace import is trusted and replaced;
/// 3. a library re-export is replaced immediately;
/// 4. a library import specifier is trusted and replaced;
/// 5. a member access on a trusted namespace is replaced;
/// 6. a reference to a trusted, unaliased import is replaced;
/// 7. anything else is left alone.
///
/// Trust is recorded for library imports whether or not the imported name
/// is itself deprecated. References that precede the import are not
/// revisited.
pub fn walk_identifiers(
    tree: &Tree,
    source: &str,
    library: &LibraryScope,
    rule: &IdentifierRule<'_>,
) -> IdentifierWalk {
    let mut walk = IdentifierWalk::default();

    for node in preorder(tree.root_node()) {
        if !typescript::is_identifier_kind(node.kind()) {
            continue;
        }
        let name = node_text(node, source);
        let entry = rule.index.find_for(name, Surface::Code);

        if is_namespace_import_node(node) {
            if is_library_import_declaration(node, source, library) {
                walk.trust.trust_namespace(name);
                walk.emit(rule, node, entry);
            }
            continue;
        }

        if is_import_specifier_node(node) {
            if let Some(specifier) = node.parent()
                && is_field(specifier, "name", node)
                && is_library_import_declaration(node, source, library)
            {
                let local = specifier
                    .child_by_field_name("alias")
                    .map(|a| node_text(a, source))
                    .unwrap_or(name);
                walk.trust.trust_identifier(local, name);
                walk.emit(rule, node, entry);
            }
            continue;
        }

        if let Some(statement) = enclosing(node, "export_statement")
            && statement.child_by_field_name("source").is_some()
        {
            if is_export_specifier_node(node) && is_library_export_declaration(node, source, library)
            {
                walk.emit(rule, node, entry);
            }
            continue;
        }

        if enclosing(node, "import_statement").is_some() || is_export_alias(node) {
            continue;
        }

        if entry.is_none() {
            continue;
        }

        if let Some(object) = typescript::qualifier(node) {
            if object.kind() == "identifier"
                && walk.trust.is_trusted_namespace(node_text(object, source))
            {
                walk.emit(rule, node, entry);
            }
            continue;
        }

        if node.kind() != "property_identifier" && walk.trust.is_trusted_identifier(name) {
            walk.emit(rule, node, entry);
        }
    }

    walk
}

fn is_export_alias(node: Node<'_>) -> bool {
    node.parent()
        .is_some_and(|p| p.kind() == "export_specifier" && is_field(p, "alias", node))
}

impl IdentifierWalk {
    fn emit(&mut self, rule: &IdentifierRule<'_>, node: Node<'_>, entry: Option<&ChangeEntry>) {
        let Some(entry) = entry else {
            return;
        };
        let span: Span = node_span(node);
        self.replacements.push(Finding::replace(
            rule.name,
            span,
            entry.replace_with.clone(),
            (rule.message)(entry),
        ));
    }
}

#[cfg(test)]
mod tests {
    use matmig_data::Category;

    use super::*;
    use crate::apply_replacements;

    fn message(entry: &ChangeEntry) -> String {
        format!("{} -> {}", entry.replace, entry.replace_with)
    }

    fn run(src: &str) -> (IdentifierWalk, String) {
        let index = RenameIndex::from_pairs(
            Category::AttributeSelectors,
            [("cdkPortalHost", "cdkPortalOutlet"), ("PortalHost", "PortalOutlet")],
        );
        let library = LibraryScope::new(["@angular/material", "@angular/cdk/portal"]);
        let tree = typescript::parse(src).unwrap();
        let rule = IdentifierRule {
            name: "test-rule",
            index: &index,
            message,
        };
        let walk = walk_identifiers(&tree, src, &library, &rule);
        let fixed = apply_replacements(
            src,
            walk.replacements.iter().filter_map(|f| f.fix.as_ref()),
        )
        .unwrap();
        (walk, fixed)
    }

    #[test]
    fn test_offsets_span_the_identifier() {
        let src = "import { cdkPortalHost } from '@angular/material';\nconst x = cdkPortalHost;";
        let (walk, fixed) = run(src);

        let last = walk.replacements.last().unwrap();
        let fix = last.fix.as_ref().unwrap();
        assert_eq!(&src[fix.position..fix.position + fix.length], "cdkPortalHost");
        assert_eq!(fix.position, src.rfind("cdkPortalHost").unwrap());
        assert!(fixed.ends_with("const x = cdkPortalOutlet;"));
    }

    #[test]
    fn test_untrusted_identifier_untouched() {
        let src = "const cdkPortalHost = 1;\nfoo(cdkPortalHost);\nclass PortalHost {}";
        let (walk, fixed) = run(src);
        assert!(walk.replacements.is_empty());
        assert_eq!(fixed, src);
    }

    #[test]
    fn test_foreign_import_untouched() {
        let src = "import { PortalHost } from './portal';\nlet p: PortalHost;";
        let (walk, _) = run(src);
        assert!(walk.replacements.is_empty());
        assert_eq!(walk.trust.identifiers().count(), 0);
    }

    #[test]
    fn test_namespace_propagation() {
        let src = "import * as mat from '@angular/material';\nconst a = mat.cdkPortalHost;\nlet b: mat.PortalHost;";
        let (walk, fixed) = run(src);
        assert!(walk.trust.is_trusted_namespace("mat"));
        assert_eq!(walk.replacements.len(), 2);
        assert!(fixed.contains("mat.cdkPortalOutlet;"));
        assert!(fixed.contains("let b: mat.PortalOutlet;"));

        let without = "const a = mat.cdkPortalHost;";
        let (walk, _) = run(without);
        assert!(walk.replacements.is_empty());
    }

    #[test]
    fn test_export_specifier_immediate() {
        let src = "export { cdkPortalHost } from '@angular/material';";
        let (walk, fixed) = run(src);
        assert_eq!(walk.replacements.len(), 1);
        assert_eq!(fixed, "export { cdkPortalOutlet } from '@angular/material';");
    }

    #[test]
    fn test_foreign_export_untouched() {
        let src = "export { cdkPortalHost } from './local';";
        let (walk, _) = run(src);
        assert!(walk.replacements.is_empty());
    }

    #[test]
    fn test_local_reexport_of_trusted_import() {
        let src = "import { PortalHost } from '@angular/cdk/portal';\nexport { PortalHost as Host };";
        let (_, fixed) = run(src);
        assert_eq!(
            fixed,
            "import { PortalOutlet } from '@angular/cdk/portal';\nexport { PortalOutlet as Host };"
        );
    }

    #[test]
    fn test_aliased_import_renames_only_imported_name() {
        let src = "import { PortalHost as Host } from '@angular/cdk/portal';\nlet h: Host;";
        let (walk, fixed) = run(src);
        assert_eq!(walk.trust.resolve("Host"), Some("PortalHost"));
        assert_eq!(
            fixed,
            "import { PortalOutlet as Host } from '@angular/cdk/portal';\nlet h: Host;"
        );
    }

    #[test]
    fn test_alias_named_like_deprecated_token_untouched() {
        let src = "import { Other as PortalHost } from '@angular/cdk/portal';\nlet h: PortalHost;";
        let (walk, _) = run(src);
        assert!(walk.replacements.is_empty());
    }

    #[test]
    fn test_reference_before_import_not_revisited() {
        let src = "let early: PortalHost;\nimport { PortalHost } from '@angular/cdk/portal';\nlet late: PortalHost;";
        let (walk, fixed) = run(src);
        assert_eq!(walk.replacements.len(), 2);
        assert!(fixed.starts_with("let early: PortalHost;"));
        assert!(fixed.ends_with("let late: PortalOutlet;"));
    }

    #[test]
    fn test_object_keys_and_members_untouched() {
        let src = "import { PortalHost } from '@angular/cdk/portal';\nconst o = { PortalHost: 1 };\nfoo.PortalHost;\nclass A { PortalHost = 1; }\nPortalHost.create();";
        let (walk, fixed) = run(src);
        assert_eq!(walk.replacements.len(), 2);
        assert!(fixed.contains("{ PortalHost: 1 }"));
        assert!(fixed.contains("foo.PortalHost;"));
        assert!(fixed.contains("PortalOutlet.create();"));
    }

    #[test]
    fn test_shorthand_property_reference() {
        let src = "import { PortalHost } from '@angular/cdk/portal';\nexport const providers = { PortalHost };\nfoo({ PortalHost, other });";
        let (walk, fixed) = run(src);
        assert_eq!(walk.replacements.len(), 3);
        assert_eq!(
            fixed,
            "import { PortalOutlet } from '@angular/cdk/portal';\nexport const providers = { PortalOutlet };\nfoo({ PortalOutlet, other });"
        );

        let untrusted = "const PortalHost = 1;\nfoo({ PortalHost });";
        let (walk, _) = run(untrusted);
        assert!(walk.replacements.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let src = "import { PortalHost } from '@angular/cdk/portal';\nlet p: PortalHost = new PortalHost();";
        let (_, fixed) = run(src);
        let (walk, again) = run(&fixed);
        assert!(walk.replacements.is_empty());
        assert_eq!(again, fixed);
    }
}
