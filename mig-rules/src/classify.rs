//! Token classifiers.
//!
//! Pure predicates over TypeScript syntax nodes that decide whether an
//! identifier is an import or export binding and whether the declaration it
//! belongs to refers to the migrated library. A module specifier that is not
//! a plain string literal is never attributed to the library.

use matmig_core::strip_quotes;
use matmig_data::LibraryScope;
use tree_sitter::Node;

use crate::syntax::{enclosing, is_field, node_text};

/// The identifier bound by `import * as name from '...'`.
pub fn is_namespace_import_node(node: Node<'_>) -> bool {
    node.parent()
        .is_some_and(|p| p.kind() == "namespace_import")
}

/// The imported name or the alias of `import { name as alias } from '...'`.
pub fn is_import_specifier_node(node: Node<'_>) -> bool {
    node.parent().is_some_and(|p| p.kind() == "import_specifier")
}

/// The exported name (not the alias) of `export { name as alias }`.
pub fn is_export_specifier_node(node: Node<'_>) -> bool {
    node.parent()
        .is_some_and(|p| p.kind() == "export_specifier" && is_field(p, "name", node))
}

/// Check whether the import declaration containing `node` imports from the library.
pub fn is_library_import_declaration(node: Node<'_>, source: &str, library: &LibraryScope) -> bool {
    enclosing(node, "import_statement")
        .and_then(|stmt| module_specifier(stmt, source))
        .is_some_and(|specifier| library.contains(specifier))
}

/// Check whether the export declaration containing `node` re-exports from the library.
pub fn is_library_export_declaration(node: Node<'_>, source: &str, library: &LibraryScope) -> bool {
    enclosing(node, "export_statement")
        .and_then(|stmt| module_specifier(stmt, source))
        .is_some_and(|specifier| library.contains(specifier))
}

/// The module specifier of an import or export declaration.
///
/// `None` when the declaration has no `from` clause or the specifier is not
/// a plain string literal.
pub fn module_specifier<'a>(declaration: Node<'_>, source: &'a str) -> Option<&'a str> {
    let specifier = declaration.child_by_field_name("source")?;
    if specifier.kind() != "string" {
        return None;
    }
    let value = strip_quotes(node_text(specifier, source))?;
    if value.contains('\\') {
        return None;
    }
    Some(value)
}
