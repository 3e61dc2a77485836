//! Renamed and removed properties of library classes.

use matmig_data::{ActiveChanges, ChangeEntry, Surface};
use tree_sitter::Node;

use super::{Rule, common::rename};
use crate::{
    Finding, SourceFile,
    syntax::{is_field, node_span, node_text, typescript},
    walk::{Scope, walk_scoped},
};

const DIRECTORY: &str = "property-names";

fn message(entry: &ChangeEntry) -> String {
    format!(
        "Found deprecated property \"{}\" which has been renamed to \"{}\"",
        entry.replace, entry.replace_with
    )
}

/// Renames property accesses on values typed with a library class.
///
/// The receiver must be a binding annotated with (or constructed from) a
/// class imported from the library; entries scoped to `classes` must also
/// name that class.
pub struct PropertyNamesAccess;

impl Rule for PropertyNamesAccess {
    fn name(&self) -> &'static str {
        "property-names-access"
    }

    fn description(&self) -> &'static str {
        "Renames deprecated properties accessed on library class instances"
    }

    fn directory(&self) -> &'static str {
        DIRECTORY
    }

    fn check(&self, file: &SourceFile, changes: &ActiveChanges, findings: &mut Vec<Finding>) {
        let Some(tree) = file.typescript() else {
            return;
        };
        let index = &changes.property_names;
        if index.is_empty() {
            return;
        }
        let source = file.text();

        walk_scoped(tree, source, &changes.library, |node, scope| {
            let Some((object, property)) = member_access(node) else {
                return;
            };
            let Some(entry) = index.find_for(node_text(property, source), Surface::Code) else {
                return;
            };
            let Some(class) = scope.class_of(object, source) else {
                return;
            };
            if entry.classes().is_empty() || entry.classes().iter().any(|c| c == class) {
                findings.push(rename(self.name(), node_span(property), entry, message));
            }
        });
    }
}

/// Reports removed properties, both on member accesses and as keys of
/// object literals typed with the owning class.
pub struct PropertyNamesMisc;

impl Rule for PropertyNamesMisc {
    fn name(&self) -> &'static str {
        "property-names-misc"
    }

    fn description(&self) -> &'static str {
        "Reports usages of removed properties of library classes"
    }

    fn directory(&self) -> &'static str {
        DIRECTORY
    }

    fn check(&self, file: &SourceFile, changes: &ActiveChanges, findings: &mut Vec<Finding>) {
        let Some(tree) = file.typescript() else {
            return;
        };
        if changes.property_notices.is_empty() {
            return;
        }
        let source = file.text();

        walk_scoped(tree, source, &changes.library, |node, scope| {
            let (class, property) = if let Some((object, property)) = member_access(node) {
                (scope.class_of(object, source), property)
            } else if node.kind() == "pair" {
                let (Some(key), Some(object)) = (node.child_by_field_name("key"), node.parent())
                else {
                    return;
                };
                (object_literal_class(object, source, scope), key)
            } else {
                return;
            };
            let Some(class) = class else {
                return;
            };

            let name = typescript::string_value(property, source)
                .unwrap_or_else(|| node_text(property, source));
            if let Some(notice) = changes
                .property_notices
                .iter()
                .find(|n| n.class_name == class && n.name == name)
            {
                findings.push(Finding::failure(
                    self.name(),
                    node_span(property),
                    notice.message.clone(),
                ));
            }
        });
    }
}

/// Split `object.property` into its parts.
fn member_access(node: Node<'_>) -> Option<(Node<'_>, Node<'_>)> {
    if node.kind() != "member_expression" {
        return None;
    }
    let property = node
        .child_by_field_name("property")
        .filter(|p| p.kind() == "property_identifier")?;
    Some((node.child_by_field_name("object")?, property))
}

/// The library class an object literal is declared as.
///
/// Covers `const c: Class = {...}`, `{...} as Class` and `{...} satisfies Class`.
fn object_literal_class<'s>(object: Node<'_>, source: &'s str, scope: &'s Scope) -> Option<&'s str> {
    if object.kind() != "object" {
        return None;
    }
    let parent = object.parent()?;
    let ty = match parent.kind() {
        "variable_declarator" if is_field(parent, "value", object) => {
            parent.child_by_field_name("type")?.named_child(0)?
        }
        "as_expression" | "satisfies_expression" => parent.named_child(1)?,
        _ => return None,
    };
    scope.trust.resolve_class(ty, source)
}
