//! Syntax layer: parsers for the three surfaces the rules operate on.
//!
//! TypeScript and HTML are parsed with tree-sitter grammars. Stylesheets are
//! tokenized by a small lexer since the rules only need selector tokens.

pub mod binding;
pub mod stylesheet;
pub mod template;
pub mod typescript;

use matmig_core::Span;
use tree_sitter::{Node, TreeCursor};

pub use binding::{Binding, BindingKind, parse_binding};
pub use stylesheet::{StyleContext, StyleToken, StyleTokenKind, Stylesheet};
pub use template::{Template, TemplateAttribute, TemplateElement};

/// Source text covered by a node.
pub fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}

pub fn node_span(node: Node<'_>) -> Span {
    Span::from(node.byte_range())
}

/// Check whether `child` is the node stored under `field` in `parent`.
pub fn is_field(parent: Node<'_>, field: &str, child: Node<'_>) -> bool {
    parent
        .child_by_field_name(field)
        .is_some_and(|c| c.id() == child.id())
}

/// Find the closest ancestor (excluding `node` itself) of the given kind.
pub fn enclosing<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut current = node.parent();
    while let Some(n) = current {
        if n.kind() == kind {
            return Some(n);
        }
        current = n.parent();
    }
    None
}

/// Iterate over a subtree in document order (pre-order, depth first).
pub fn preorder(root: Node<'_>) -> Preorder<'_> {
    Preorder {
        cursor: root.walk(),
        done: false,
    }
}

pub struct Preorder<'t> {
    cursor: TreeCursor<'t>,
    done: bool,
}

impl<'t> Iterator for Preorder<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Node<'t>> {
        if self.done {
            return None;
        }
        let node = self.cursor.node();

        if !self.cursor.goto_first_child() {
            loop {
                if self.cursor.goto_next_sibling() {
                    break;
                }
                if !self.cursor.goto_parent() {
                    self.done = true;
                    break;
                }
            }
        }

        Some(node)
    }
}
