//! Classes that extend or implement library classes.

use matmig_data::ActiveChanges;
use tree_sitter::Node;

use super::Rule;
use crate::{
    Finding, SourceFile,
    syntax::{
        node_span, node_text,
        typescript::{class_member_names, extends_clause, implements_clause, is_class_kind},
    },
    walk::walk_scoped,
};

const DIRECTORY: &str = "class-inheritance";

/// Reports subclasses of library classes whose public properties were renamed.
pub struct ClassInheritanceCheck;

impl Rule for ClassInheritanceCheck {
    fn name(&self) -> &'static str {
        "class-inheritance-check"
    }

    fn description(&self) -> &'static str {
        "Reports classes extending library classes with renamed properties"
    }

    fn directory(&self) -> &'static str {
        DIRECTORY
    }

    fn check(&self, file: &SourceFile, changes: &ActiveChanges, findings: &mut Vec<Finding>) {
        let Some(tree) = file.typescript() else {
            return;
        };
        if changes.property_names.is_empty() {
            return;
        }
        let source = file.text();

        walk_scoped(tree, source, &changes.library, |node, scope| {
            if !is_class_kind(node.kind()) {
                return;
            }
            for base in extends_clause(node) {
                let Some(base_class) = scope.trust.resolve_class(base, source) else {
                    continue;
                };
                for entry in changes
                    .property_names
                    .entries()
                    .iter()
                    .filter(|e| e.classes().iter().any(|c| c == base_class))
                {
                    findings.push(Finding::failure(
                        self.name(),
                        class_name_span(node),
                        format!(
                            "Found class \"{}\" which extends class \"{}\". Please note that the \
                             base class property \"{}\" has changed to \"{}\". You may need to \
                             update your class as well",
                            class_name(node, source),
                            base_class,
                            entry.replace,
                            entry.replace_with
                        ),
                    ));
                }
            }
        });
    }
}

/// Reports subclasses and implementers of library classes that are missing
/// a member the library now requires.
pub struct ClassInheritanceMisc;

impl Rule for ClassInheritanceMisc {
    fn name(&self) -> &'static str {
        "class-inheritance-misc"
    }

    fn description(&self) -> &'static str {
        "Reports classes missing members newly required by library base classes"
    }

    fn directory(&self) -> &'static str {
        DIRECTORY
    }

    fn check(&self, file: &SourceFile, changes: &ActiveChanges, findings: &mut Vec<Finding>) {
        let Some(tree) = file.typescript() else {
            return;
        };
        if changes.required_members.is_empty() {
            return;
        }
        let source = file.text();

        walk_scoped(tree, source, &changes.library, |node, scope| {
            if !is_class_kind(node.kind()) {
                return;
            }
            let bases: Vec<&str> = extends_clause(node)
                .into_iter()
                .chain(implements_clause(node))
                .filter_map(|base| scope.trust.resolve_class(base, source))
                .collect();
            if bases.is_empty() {
                return;
            }

            let members = class_member_names(node, source);
            for required in changes
                .required_members
                .iter()
                .filter(|r| bases.contains(&r.class_name.as_str()))
            {
                if !members.contains(&required.member.as_str()) {
                    findings.push(Finding::failure(
                        self.name(),
                        class_name_span(node),
                        format!(
                            "Found class \"{}\". {}",
                            class_name(node, source),
                            required.message
                        ),
                    ));
                }
            }
        });
    }
}

fn class_name<'a>(class: Node<'_>, source: &'a str) -> &'a str {
    class
        .child_by_field_name("name")
        .map(|n| node_text(n, source))
        .unwrap_or("<anonymous>")
}

fn class_name_span(class: Node<'_>) -> matmig_core::Span {
    node_span(class.child_by_field_name("name").unwrap_or(class))
}
