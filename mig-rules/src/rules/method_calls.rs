//! Calls to library methods and constructors whose signature changed.

use matmig_data::{ActiveChanges, MethodCallCheck, Tagged};
use tree_sitter::Node;

use super::Rule;
use crate::{
    Finding, SourceFile,
    syntax::{
        node_span, node_text,
        typescript::{argument_count, enclosing_class, extends_clause},
    },
    walk::{Scope, walk_scoped},
};

/// Reports `new C(..)`, `super(..)` and `x.method(..)` calls whose argument
/// count is no longer valid for the library class.
pub struct MethodCallsCheck;

impl Rule for MethodCallsCheck {
    fn name(&self) -> &'static str {
        "method-calls-check"
    }

    fn description(&self) -> &'static str {
        "Reports library constructor and method calls with an outdated signature"
    }

    fn directory(&self) -> &'static str {
        "method-calls"
    }

    fn check(&self, file: &SourceFile, changes: &ActiveChanges, findings: &mut Vec<Finding>) {
        let Some(tree) = file.typescript() else {
            return;
        };
        let checks = &changes.method_call_checks;
        if checks.is_empty() {
            return;
        }
        let source = file.text();

        walk_scoped(tree, source, &changes.library, |node, scope| {
            let Some(call) = classify_call(node, source, scope) else {
                return;
            };
            let count = node
                .child_by_field_name("arguments")
                .map(argument_count)
                .unwrap_or(0);

            for check in matching_checks(checks, &call) {
                let Some(reason) = check.message_for(count) else {
                    continue;
                };
                let message = if check.is_constructor() {
                    format!(
                        "Found \"{}\" constructed with an invalid signature. {}",
                        check.class_name, reason
                    )
                } else {
                    format!(
                        "Found call to \"{}.{}\" with an invalid signature. {}",
                        check.class_name, check.method, reason
                    )
                };
                findings.push(Finding::failure(self.name(), node_span(node), message));
            }
        });
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Call<'a> {
    Constructor { class: &'a str },
    Method { class: &'a str, method: &'a str },
}

fn classify_call<'a>(node: Node<'_>, source: &'a str, scope: &'a Scope) -> Option<Call<'a>> {
    match node.kind() {
        "new_expression" => {
            let constructor = node.child_by_field_name("constructor")?;
            let class = scope.trust.resolve_class(constructor, source)?;
            Some(Call::Constructor { class })
        }
        "call_expression" => {
            let function = node.child_by_field_name("function")?;
            match function.kind() {
                "super" => {
                    let base = extends_clause(enclosing_class(node)?).into_iter().next()?;
                    let class = scope.trust.resolve_class(base, source)?;
                    Some(Call::Constructor { class })
                }
                "member_expression" => {
                    let object = function.child_by_field_name("object")?;
                    let property = function.child_by_field_name("property")?;
                    let class = scope.class_of(object, source)?;
                    Some(Call::Method {
                        class,
                        method: node_text(property, source),
                    })
                }
                _ => None,
            }
        }
        _ => None,
    }
}

fn matching_checks<'c>(
    checks: &'c [Tagged<MethodCallCheck>],
    call: &Call<'_>,
) -> impl Iterator<Item = &'c MethodCallCheck> {
    checks.iter().map(|c| &c.item).filter(move |check| match *call {
        Call::Constructor { class } => check.is_constructor() && check.class_name == class,
        Call::Method { class, method } => {
            !check.is_constructor() && check.class_name == class && check.method == method
        }
    })
}
