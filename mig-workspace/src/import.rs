//! TypeScript import statements inserted into project files.

use matmig_rules::{
    classify::module_specifier,
    syntax::{node_text, preorder, typescript},
};
use tree_sitter::Node;

/// Builder for a TypeScript import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    from: String,
    named: Vec<String>,
}

impl Import {
    /// A side-effect import (`import 'module';`).
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            named: Vec::new(),
        }
    }

    /// Import a named export.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named.push(name.into());
        self
    }

    pub fn module(&self) -> &str {
        &self.from
    }

    /// Render the statement, including the trailing newline.
    pub fn build(&self) -> String {
        if self.named.is_empty() {
            format!("import '{}';\n", self.from)
        } else {
            format!("import {{ {} }} from '{}';\n", self.named.join(", "), self.from)
        }
    }

    /// Check whether `source` already contains this import.
    ///
    /// Every `import` statement of the parsed file is considered, wherever it
    /// sits on its line. A named import counts as present when every name is
    /// imported from the module.
    pub fn is_present_in(&self, source: &str) -> bool {
        let source = source.strip_prefix(BOM).unwrap_or(source);
        let Some(tree) = typescript::parse(source) else {
            return source.contains(self.build().trim_end());
        };
        let statements: Vec<Node<'_>> = preorder(tree.root_node())
            .filter(|n| n.kind() == "import_statement")
            .filter(|n| module_specifier(*n, source) == Some(self.from.as_str()))
            .collect();

        if self.named.is_empty() {
            return statements.iter().any(|s| import_clause(*s).is_none());
        }
        self.named.iter().all(|name| {
            statements
                .iter()
                .any(|s| imported_names(*s, source).contains(&name.as_str()))
        })
    }
}

/// Byte order mark some editors write at the start of a file.
pub(crate) const BOM: char = '\u{feff}';

fn import_clause(statement: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = statement.walk();
    statement
        .named_children(&mut cursor)
        .find(|c| c.kind() == "import_clause")
}

/// Names bound by `import { a, b as c }`, by their exported name.
fn imported_names<'a>(statement: Node<'_>, source: &'a str) -> Vec<&'a str> {
    let Some(clause) = import_clause(statement) else {
        return Vec::new();
    };
    preorder(clause)
        .filter(|n| n.kind() == "import_specifier")
        .filter_map(|n| n.child_by_field_name("name"))
        .map(|n| node_text(n, source))
        .collect()
}
