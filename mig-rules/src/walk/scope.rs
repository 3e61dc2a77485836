//! Typed-binding scope for property and method rules.

use std::collections::HashMap;

use matmig_data::LibraryScope;
use tree_sitter::{Node, Tree};

use crate::{
    TrustScope,
    syntax::{node_text, preorder},
};

/// Trust plus the names annotated with (or constructed from) a library class.
///
/// Bindings are tracked per file by name only; shadowing is not modelled.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    pub trust: TrustScope,
    bindings: HashMap<String, String>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update trust and bindings with a node visited in document order.
    pub fn observe(&mut self, node: Node<'_>, source: &str, library: &LibraryScope) {
        if self.trust.observe(node, source, library) {
            return;
        }

        let name_field = match node.kind() {
            "public_field_definition" | "variable_declarator" => "name",
            "required_parameter" | "optional_parameter" => "pattern",
            _ => return,
        };
        let Some(name) = node
            .child_by_field_name(name_field)
            .filter(|n| matches!(n.kind(), "identifier" | "property_identifier"))
        else {
            return;
        };

        let class = node
            .child_by_field_name("type")
            .and_then(|t| t.named_child(0))
            .and_then(|t| self.trust.resolve_class(t, source))
            .or_else(|| {
                node.child_by_field_name("value")
                    .filter(|v| v.kind() == "new_expression")
                    .and_then(|v| v.child_by_field_name("constructor"))
                    .and_then(|c| self.trust.resolve_class(c, source))
            })
            .map(str::to_string);

        // A later declaration of the name with another type ends the binding
        let name = node_text(name, source);
        match class {
            Some(class) => {
                self.bindings.insert(name.to_string(), class);
            }
            None => {
                self.bindings.remove(name);
            }
        }
    }

    /// The library class bound to a name.
    pub fn binding(&self, name: &str) -> Option<&str> {
        self.bindings.get(name).map(String::as_str)
    }

    /// The library class of an expression: `name`, `this.name` or `this.name!`.
    pub fn class_of(&self, expr: Node<'_>, source: &str) -> Option<&str> {
        match expr.kind() {
            "identifier" => self.binding(node_text(expr, source)),
            "member_expression" => {
                let object = expr.child_by_field_name("object")?;
                let property = expr.child_by_field_name("property")?;
                (object.kind() == "this")
                    .then(|| self.binding(node_text(property, source)))
                    .flatten()
            }
            "non_null_expression" | "parenthesized_expression" => {
                self.class_of(expr.named_child(0)?, source)
            }
            _ => None,
        }
    }
}

/// Visit every node in document order with the scope accumulated so far.
///
/// The scope has already observed the visited node when `visit` runs.
pub fn walk_scoped<'t>(
    tree: &'t Tree,
    source: &str,
    library: &LibraryScope,
    mut visit: impl FnMut(Node<'t>, &Scope),
) -> Scope {
    let mut scope = Scope::new();
    for node in preorder(tree.root_node()) {
        scope.observe(node, source, library);
        visit(node, &scope);
    }
    scope
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::typescript;

    #[test]
    fn test_bindings_from_annotations_and_constructors() {
        let src = r#"
import { MatSelect, MatDialogRef } from '@angular/material';
class Foo {
  select: MatSelect;
  other: Local;
  constructor(private dialogRef: MatDialogRef<Foo>, plain: MatSelect) {}
}
const made = new MatSelect();
"#;
        let tree = typescript::parse(src).unwrap();
        let library = LibraryScope::new(["@angular/material"]);
        let scope = walk_scoped(&tree, src, &library, |_, _| {});

        assert_eq!(scope.binding("select"), Some("MatSelect"));
        assert_eq!(scope.binding("dialogRef"), Some("MatDialogRef"));
        assert_eq!(scope.binding("plain"), Some("MatSelect"));
        assert_eq!(scope.binding("made"), Some("MatSelect"));
        assert_eq!(scope.binding("other"), None);
    }

    #[test]
    fn test_redeclaration_with_other_type_clears_binding() {
        let src = r#"
import { MatSelect } from '@angular/material';
class A { select: MatSelect; }
class B { select: MyWidget; }
function f(dialog: MatSelect, plain: MatSelect) {}
function g(dialog) {}
const plain = new MatSelect();
"#;
        let tree = typescript::parse(src).unwrap();
        let library = LibraryScope::new(["@angular/material"]);
        let scope = walk_scoped(&tree, src, &library, |_, _| {});

        assert_eq!(scope.binding("select"), None);
        assert_eq!(scope.binding("dialog"), None);
        assert_eq!(scope.binding("plain"), Some("MatSelect"));
    }

    #[test]
    fn test_class_of_expressions() {
        let src = r#"
import { MatSelect } from '@angular/material';
let select: MatSelect;
select.change;
this.select.change;
this.select!.change;
unknown.change;
"#;
        let tree = typescript::parse(src).unwrap();
        let library = LibraryScope::new(["@angular/material"]);
        let mut classes = Vec::new();
        walk_scoped(&tree, src, &library, |node, scope| {
            if node.kind() == "member_expression"
                && node
                    .child_by_field_name("property")
                    .is_some_and(|p| node_text(p, src) == "change")
            {
                let object = node.child_by_field_name("object").unwrap();
                classes.push(scope.class_of(object, src).map(str::to_string));
            }
        });

        assert_eq!(
            classes,
            vec![
                Some("MatSelect".to_string()),
                Some("MatSelect".to_string()),
                Some("MatSelect".to_string()),
                None
            ]
        );
    }
}
