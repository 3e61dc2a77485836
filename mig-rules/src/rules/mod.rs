//! The upgrade rules.
//!
//! Every rule is a stateless unit struct. Per-file state (trust, typed
//! bindings) lives in the walk a rule performs inside `check`, so the same
//! rule value can be shared by any number of files.

mod attribute_selectors;
mod class_inheritance;
mod class_names;
mod common;
mod css_selectors;
mod element_selectors;
mod input_names;
mod method_calls;
mod misc;
mod output_names;
mod property_names;

pub use attribute_selectors::{
    AttributeSelectorsStringLiteral, AttributeSelectorsStylesheet, AttributeSelectorsTemplate,
};
pub use class_inheritance::{ClassInheritanceCheck, ClassInheritanceMisc};
pub use class_names::{ClassNamesIdentifier, ClassNamesIdentifierMisc};
pub use css_selectors::{CssSelectorsStringLiteral, CssSelectorsStylesheet, CssSelectorsTemplate};
pub use element_selectors::{
    ElementSelectorsStringLiteral, ElementSelectorsStylesheet, ElementSelectorsTemplate,
};
pub use input_names::{InputNamesStylesheet, InputNamesTemplate};
pub use method_calls::MethodCallsCheck;
pub use misc::{CheckImportMisc, CheckTemplateMisc};
pub use output_names::OutputNamesTemplate;
pub use property_names::{PropertyNamesAccess, PropertyNamesMisc};

use matmig_data::ActiveChanges;

use crate::{Finding, SourceFile};

/// An upgrade rule that inspects one file and reports findings.
pub trait Rule: Send + Sync {
    /// The name of this rule, as used in the upgrade configuration.
    fn name(&self) -> &'static str;

    /// One-line summary shown by `matmig rules`.
    fn description(&self) -> &'static str;

    /// Directory (relative to the rules root) the rule is published under.
    fn directory(&self) -> &'static str;

    /// Check a file against the active changes and add any findings.
    fn check(&self, file: &SourceFile, changes: &ActiveChanges, findings: &mut Vec<Finding>);
}

/// Rule directories, relative to the rules root, in lookup order.
///
/// The empty entry is the root itself, which holds the miscellaneous rules.
pub const RULE_DIRECTORIES: [&str; 10] = [
    "",
    "attribute-selectors",
    "class-names",
    "class-inheritance",
    "input-names",
    "output-names",
    "css-selectors",
    "element-selectors",
    "property-names",
    "method-calls",
];

/// Every rule, in configuration order.
pub fn all() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(AttributeSelectorsStringLiteral),
        Box::new(AttributeSelectorsStylesheet),
        Box::new(AttributeSelectorsTemplate),
        Box::new(ClassNamesIdentifier),
        Box::new(ClassNamesIdentifierMisc),
        Box::new(CssSelectorsStringLiteral),
        Box::new(CssSelectorsStylesheet),
        Box::new(CssSelectorsTemplate),
        Box::new(ElementSelectorsStringLiteral),
        Box::new(ElementSelectorsStylesheet),
        Box::new(ElementSelectorsTemplate),
        Box::new(InputNamesStylesheet),
        Box::new(InputNamesTemplate),
        Box::new(OutputNamesTemplate),
        Box::new(PropertyNamesAccess),
        Box::new(PropertyNamesMisc),
        Box::new(MethodCallsCheck),
        Box::new(ClassInheritanceCheck),
        Box::new(ClassInheritanceMisc),
        Box::new(CheckImportMisc),
        Box::new(CheckTemplateMisc),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_rule_names_unique() {
        let rules = all();
        let names: HashSet<_> = rules.iter().map(|r| r.name()).collect();
        assert_eq!(names.len(), rules.len());
        assert_eq!(rules.len(), 21);
    }

    #[test]
    fn test_rule_directories_known() {
        for rule in all() {
            assert!(
                RULE_DIRECTORIES.contains(&rule.directory()),
                "{} has unknown directory {:?}",
                rule.name(),
                rule.directory()
            );
        }
    }
}
