use std::fmt;

use serde::Serialize;

/// A category of change data. Each category is stored in its own file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    ClassNames,
    AttributeSelectors,
    ElementSelectors,
    CssSelectors,
    InputNames,
    OutputNames,
    PropertyNames,
    MethodCallChecks,
    IdentifierNotices,
    ImportNotices,
    PropertyNotices,
    TemplateNotices,
    RequiredMembers,
}

impl Category {
    /// All categories in load order.
    pub const ALL: [Category; 13] = [
        Category::ClassNames,
        Category::AttributeSelectors,
        Category::ElementSelectors,
        Category::CssSelectors,
        Category::InputNames,
        Category::OutputNames,
        Category::PropertyNames,
        Category::MethodCallChecks,
        Category::IdentifierNotices,
        Category::ImportNotices,
        Category::PropertyNotices,
        Category::TemplateNotices,
        Category::RequiredMembers,
    ];

    /// File stem used for this category (`class-names.toml`, `class-names.json`).
    pub fn file_stem(&self) -> &'static str {
        match self {
            Category::ClassNames => "class-names",
            Category::AttributeSelectors => "attribute-selectors",
            Category::ElementSelectors => "element-selectors",
            Category::CssSelectors => "css-selectors",
            Category::InputNames => "input-names",
            Category::OutputNames => "output-names",
            Category::PropertyNames => "property-names",
            Category::MethodCallChecks => "method-call-checks",
            Category::IdentifierNotices => "identifier-notices",
            Category::ImportNotices => "import-notices",
            Category::PropertyNotices => "property-notices",
            Category::TemplateNotices => "template-notices",
            Category::RequiredMembers => "required-members",
        }
    }

    /// Whether entries in this category are `replace`/`replaceWith` renames.
    pub fn is_rename(&self) -> bool {
        matches!(
            self,
            Category::ClassNames
                | Category::AttributeSelectors
                | Category::ElementSelectors
                | Category::CssSelectors
                | Category::InputNames
                | Category::OutputNames
                | Category::PropertyNames
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}
