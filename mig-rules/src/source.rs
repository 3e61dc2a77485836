//! A source file parsed once and shared by every rule.

use std::path::{Path, PathBuf};

use matmig_core::Span;
use tracing::debug;
use tree_sitter::Tree;

use crate::{
    MigrationWarning,
    syntax::{
        Stylesheet, Template, preorder,
        typescript::{self, EmbeddedKind},
    },
};

/// The kind of file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    TypeScript,
    Template,
    Stylesheet,
}

impl FileKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "ts" => Some(FileKind::TypeScript),
            "html" => Some(FileKind::Template),
            "css" | "scss" => Some(FileKind::Stylesheet),
            _ => None,
        }
    }
}

/// A parsed file: the TypeScript tree (if any) plus every template and
/// stylesheet it contains, with spans relative to the start of the file.
pub struct SourceFile {
    path: PathBuf,
    text: String,
    kind: FileKind,
    typescript: Option<Tree>,
    templates: Vec<Template>,
    stylesheets: Vec<Stylesheet>,
    string_literals: Vec<Span>,
}

impl SourceFile {
    /// Parse a file, choosing the surfaces from its extension.
    pub fn parse(path: impl Into<PathBuf>, text: impl Into<String>) -> Result<Self, MigrationWarning> {
        let path = path.into();
        let text = text.into();
        let kind = FileKind::from_path(&path)
            .ok_or_else(|| MigrationWarning::Unsupported { path: path.clone() })?;

        let mut file = Self {
            path,
            text,
            kind,
            typescript: None,
            templates: Vec::new(),
            stylesheets: Vec::new(),
            string_literals: Vec::new(),
        };

        match kind {
            FileKind::TypeScript => file.parse_typescript()?,
            FileKind::Template => {
                let template = Template::parse(&file.text, 0).ok_or_else(|| {
                    MigrationWarning::Parse {
                        path: file.path.clone(),
                        language: "HTML",
                    }
                })?;
                file.add_template(template);
            }
            FileKind::Stylesheet => {
                file.stylesheets.push(Stylesheet::lex(&file.text, 0));
            }
        }

        Ok(file)
    }

    fn parse_typescript(&mut self) -> Result<(), MigrationWarning> {
        let tree = typescript::parse(&self.text).ok_or_else(|| MigrationWarning::Parse {
            path: self.path.clone(),
            language: "TypeScript",
        })?;
        if tree.root_node().has_error() {
            debug!(path = %self.path.display(), "TypeScript source contains syntax errors");
        }

        let resources = typescript::component_resources(&tree, &self.text);
        for resource in &resources {
            let content = &self.text[resource.content.range()];
            match resource.kind {
                EmbeddedKind::Template => match Template::parse(content, resource.content.start) {
                    Some(template) => self.add_template(template),
                    None => debug!(path = %self.path.display(), "skipping unparsable inline template"),
                },
                EmbeddedKind::Style => self
                    .stylesheets
                    .push(Stylesheet::lex(content, resource.content.start)),
            }
        }

        for node in preorder(tree.root_node()) {
            if !matches!(node.kind(), "string" | "template_string") {
                continue;
            }
            if typescript::is_module_specifier(node, &self.text) {
                continue;
            }
            let start = node.start_byte();
            if resources.iter().any(|r| r.literal.start == start) {
                continue;
            }
            self.string_literals.extend(typescript::literal_spans(node));
        }

        self.typescript = Some(tree);
        Ok(())
    }

    fn add_template(&mut self, template: Template) {
        for style in &template.styles {
            self.stylesheets
                .push(Stylesheet::lex(&self.text[style.range()], style.start));
        }
        self.templates.push(template);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    /// The TypeScript syntax tree, for `.ts` files.
    pub fn typescript(&self) -> Option<&Tree> {
        self.typescript.as_ref()
    }

    /// External and inline templates.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// External stylesheets, inline `styles` and template `<style>` elements.
    pub fn stylesheets(&self) -> &[Stylesheet] {
        &self.stylesheets
    }

    /// Contents of TypeScript string literals, excluding module specifiers
    /// and inline component resources.
    pub fn string_literals(&self) -> &[Span] {
        &self.string_literals
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .field("templates", &self.templates.len())
            .field("stylesheets", &self.stylesheets.len())
            .finish()
    }
}
