//! Per-file trust state.
//!
//! Trust is established only by import declarations that the classifiers
//! attribute to the migrated library, and only for nodes that come after
//! those declarations in document order.

use std::collections::{HashMap, HashSet};

use matmig_data::LibraryScope;
use tree_sitter::Node;

use crate::{
    classify::{is_import_specifier_node, is_library_import_declaration, is_namespace_import_node},
    syntax::{is_field, node_text, typescript::qualifier},
};

/// Identifiers and namespaces imported from the library in one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustScope {
    /// Local binding name to the name exported by the library.
    identifiers: HashMap<String, String>,
    namespaces: HashSet<String>,
}

impl TrustScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `import { imported as local }` from the library.
    pub fn trust_identifier(&mut self, local: impl Into<String>, imported: impl Into<String>) {
        self.identifiers.insert(local.into(), imported.into());
    }

    /// Record `import * as name` from the library.
    pub fn trust_namespace(&mut self, name: impl Into<String>) {
        self.namespaces.insert(name.into());
    }

    /// Check whether `name` is an unaliased library import.
    ///
    /// An aliased import binds a different local name; references to that
    /// alias never carry the deprecated token.
    pub fn is_trusted_identifier(&self, name: &str) -> bool {
        self.identifiers.get(name).is_some_and(|imported| imported == name)
    }

    pub fn is_trusted_namespace(&self, name: &str) -> bool {
        self.namespaces.contains(name)
    }

    /// The library export a local binding refers to, following aliases.
    pub fn resolve(&self, local: &str) -> Option<&str> {
        self.identifiers.get(local).map(String::as_str)
    }

    /// Resolve a type or expression naming a library class.
    ///
    /// Handles `Name`, `Alias`, `ns.Name` and generic instantiations
    /// such as `MatDialogRef<T>`.
    pub fn resolve_class<'a>(&'a self, node: Node<'_>, source: &'a str) -> Option<&'a str> {
        match node.kind() {
            "identifier" | "type_identifier" => self.resolve(node_text(node, source)),
            "generic_type" => node
                .child_by_field_name("name")
                .and_then(|name| self.resolve_class(name, source)),
            "nested_type_identifier" | "member_expression" | "nested_identifier" => {
                let name = node
                    .child_by_field_name("name")
                    .or_else(|| node.child_by_field_name("property"))?;
                let object = qualifier(name)?;
                (object.kind() == "identifier"
                    && self.is_trusted_namespace(node_text(object, source)))
                .then(|| node_text(name, source))
            }
            _ => None,
        }
    }

    /// Update the scope if `node` is an import binding from the library.
    ///
    /// Returns true when the node was such a binding.
    pub fn observe(&mut self, node: Node<'_>, source: &str, library: &LibraryScope) -> bool {
        if node.kind() != "identifier" {
            return false;
        }

        if is_namespace_import_node(node) && is_library_import_declaration(node, source, library) {
            self.trust_namespace(node_text(node, source));
            return true;
        }

        if is_import_specifier_node(node) && is_library_import_declaration(node, source, library) {
            let Some(specifier) = node.parent() else {
                return false;
            };
            if !is_field(specifier, "name", node) {
                return false;
            }
            let imported = node_text(node, source);
            let local = specifier
                .child_by_field_name("alias")
                .map(|a| node_text(a, source))
                .unwrap_or(imported);
            self.trust_identifier(local, imported);
            return true;
        }

        false
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.identifiers.keys().map(String::as_str)
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.iter().map(String::as_str)
    }
}
