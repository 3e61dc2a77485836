//! TypeScript parsing and the syntax queries shared by the code rules.

use matmig_core::{Span, strip_quotes};
use tree_sitter::{Node, Parser, Tree};

use super::{enclosing, is_field, node_text, preorder};

/// Parse TypeScript source. Returns `None` only if the parser cannot run.
///
/// Syntax errors do not fail the parse; tree-sitter recovers and the rules
/// only match complete identifier and literal nodes.
pub fn parse(source: &str) -> Option<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
        .ok()?;
    parser.parse(source, None)
}

/// Node kinds that name a binding or reference.
///
/// `{ Name }` in an object literal is both a key and a reference to `Name`.
pub fn is_identifier_kind(kind: &str) -> bool {
    matches!(
        kind,
        "identifier" | "type_identifier" | "property_identifier" | "shorthand_property_identifier"
    )
}

/// The value of a string literal, if it can be resolved statically.
///
/// Template strings with substitutions cannot.
pub fn string_value<'a>(node: Node<'_>, source: &'a str) -> Option<&'a str> {
    match node.kind() {
        "string" => strip_quotes(node_text(node, source)),
        "template_string" if !has_substitution(node) => strip_quotes(node_text(node, source)),
        _ => None,
    }
}

fn has_substitution(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .any(|c| c.kind() == "template_substitution")
}

/// Spans of literal text inside a string or template string, without quotes.
///
/// Template substitutions split the literal into several spans.
pub fn literal_spans(node: Node<'_>) -> Vec<Span> {
    let start = node.start_byte() + 1;
    let end = node.end_byte().saturating_sub(1);
    if end < start {
        return Vec::new();
    }

    if node.kind() != "template_string" {
        return vec![Span::from_range(start, end)];
    }

    let mut spans = Vec::new();
    let mut cursor_pos = start;
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "template_substitution" {
            if child.start_byte() > cursor_pos {
                spans.push(Span::from_range(cursor_pos, child.start_byte()));
            }
            cursor_pos = child.end_byte();
        }
    }
    if end > cursor_pos {
        spans.push(Span::from_range(cursor_pos, end));
    }
    spans
}

/// Check whether a string literal is a module specifier.
pub fn is_module_specifier(node: Node<'_>, source: &str) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    match parent.kind() {
        "import_statement" | "export_statement" | "import_require_clause" => true,
        "arguments" => parent
            .parent()
            .filter(|call| call.kind() == "call_expression")
            .and_then(|call| call.child_by_field_name("function"))
            .is_some_and(|f| matches!(node_text(f, source), "import" | "require")),
        _ => false,
    }
}

/// An inline resource declared in a `@Component` decorator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddedKind {
    Template,
    Style,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Embedded {
    pub kind: EmbeddedKind,
    /// Span of the whole literal, quotes included.
    pub literal: Span,
    /// Span of the literal's contents.
    pub content: Span,
}

/// Find `template:` and `styles:` literals of every `@Component({...})` decorator.
pub fn component_resources(tree: &Tree, source: &str) -> Vec<Embedded> {
    let mut resources = Vec::new();

    for node in preorder(tree.root_node()) {
        if node.kind() != "decorator" {
            continue;
        }
        let Some(call) = node.named_child(0).filter(|c| c.kind() == "call_expression") else {
            continue;
        };
        let is_component = call
            .child_by_field_name("function")
            .is_some_and(|f| node_text(f, source) == "Component");
        if !is_component {
            continue;
        }
        let Some(metadata) = call
            .child_by_field_name("arguments")
            .and_then(|a| a.named_child(0))
            .filter(|a| a.kind() == "object")
        else {
            continue;
        };

        let mut cursor = metadata.walk();
        for pair in metadata.named_children(&mut cursor) {
            if pair.kind() != "pair" {
                continue;
            }
            let (Some(key), Some(value)) = (
                pair.child_by_field_name("key"),
                pair.child_by_field_name("value"),
            ) else {
                continue;
            };
            let key = string_value(key, source).unwrap_or_else(|| node_text(key, source));

            match key {
                "template" => push_literal(&mut resources, EmbeddedKind::Template, value, source),
                "styles" if value.kind() == "array" => {
                    let mut inner = value.walk();
                    for element in value.named_children(&mut inner) {
                        push_literal(&mut resources, EmbeddedKind::Style, element, source);
                    }
                }
                "styles" => push_literal(&mut resources, EmbeddedKind::Style, value, source),
                _ => {}
            }
        }
    }

    resources
}

fn push_literal(resources: &mut Vec<Embedded>, kind: EmbeddedKind, node: Node<'_>, source: &str) {
    if string_value(node, source).is_none() {
        return;
    }
    let literal = Span::from(node.byte_range());
    resources.push(Embedded {
        kind,
        literal,
        content: Span::from_range(literal.start + 1, literal.end() - 1),
    });
}

/// The qualifier of a member-position identifier: `ns` in `ns.Name`.
///
/// Returns `None` when the identifier is not the accessed member.
pub fn qualifier<'t>(node: Node<'t>) -> Option<Node<'t>> {
    let parent = node.parent()?;
    match parent.kind() {
        "member_expression" if is_field(parent, "property", node) => {
            parent.child_by_field_name("object")
        }
        "nested_type_identifier" if is_field(parent, "name", node) => {
            parent.child_by_field_name("module")
        }
        "nested_identifier" if is_field(parent, "property", node) => {
            parent.child_by_field_name("object")
        }
        _ => None,
    }
}

/// Names of the classes a class declaration extends.
pub fn extends_clause<'t>(class: Node<'t>) -> Vec<Node<'t>> {
    heritage_clause(class, "extends_clause")
}

/// Types a class declaration implements.
pub fn implements_clause<'t>(class: Node<'t>) -> Vec<Node<'t>> {
    heritage_clause(class, "implements_clause")
}

fn heritage_clause<'t>(class: Node<'t>, kind: &str) -> Vec<Node<'t>> {
    let mut cursor = class.walk();
    let Some(heritage) = class
        .children(&mut cursor)
        .find(|c| c.kind() == "class_heritage")
    else {
        return Vec::new();
    };

    let mut cursor = heritage.walk();
    let Some(clause) = heritage.children(&mut cursor).find(|c| c.kind() == kind) else {
        return Vec::new();
    };

    let mut cursor = clause.walk();
    clause
        .named_children(&mut cursor)
        .filter(|c| c.kind() != "type_arguments" && c.kind() != "comment")
        .collect()
}

pub fn is_class_kind(kind: &str) -> bool {
    matches!(kind, "class_declaration" | "abstract_class_declaration" | "class")
}

/// The class declaration enclosing `node`, if any.
pub fn enclosing_class(node: Node<'_>) -> Option<Node<'_>> {
    let mut current = node.parent();
    while let Some(n) = current {
        if is_class_kind(n.kind()) {
            return Some(n);
        }
        current = n.parent();
    }
    None
}

/// Names of members a class body declares, including constructor parameter properties.
pub fn class_member_names<'a>(class: Node<'_>, source: &'a str) -> Vec<&'a str> {
    let mut names = Vec::new();
    let Some(body) = class.child_by_field_name("body") else {
        return names;
    };

    let mut cursor = body.walk();
    for member in body.named_children(&mut cursor) {
        let Some(name) = member.child_by_field_name("name") else {
            continue;
        };
        names.push(node_text(name, source));

        if member.kind() == "method_definition" && node_text(name, source) == "constructor" {
            names.extend(parameter_properties(member, source));
        }
    }
    names
}

fn parameter_properties<'a>(constructor: Node<'_>, source: &'a str) -> Vec<&'a str> {
    let Some(params) = constructor.child_by_field_name("parameters") else {
        return Vec::new();
    };
    let mut cursor = params.walk();
    params
        .named_children(&mut cursor)
        .filter(|p| is_parameter_property(*p))
        .filter_map(|p| p.child_by_field_name("pattern"))
        .map(|p| node_text(p, source))
        .collect()
}

/// Check whether a parameter declares a class property (`private foo: T`).
pub fn is_parameter_property(param: Node<'_>) -> bool {
    let mut cursor = param.walk();
    param
        .children(&mut cursor)
        .any(|c| matches!(c.kind(), "accessibility_modifier" | "override_modifier" | "readonly"))
}

/// Number of arguments passed in an `arguments` node.
pub fn argument_count(arguments: Node<'_>) -> usize {
    let mut cursor = arguments.walk();
    arguments
        .named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .count()
}

/// Check whether a node sits inside an import or export declaration.
pub fn in_module_declaration(node: Node<'_>) -> bool {
    enclosing(node, "import_statement").is_some()
        || enclosing(node, "export_statement")
            .is_some_and(|s| s.child_by_field_name("source").is_some())
}
