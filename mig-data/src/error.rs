use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::Category;

/// Result type for change-data operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Every change table keeps the text it was parsed from so that integrity
/// errors found later, at resolution time, can still point at the entry.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a parse error from a JSON error.
    pub fn json_error(&self, source: serde_json::Error) -> Box<Error> {
        let span = line_column_offset(&self.src, source.line(), source.column())
            .map(|offset| SourceSpan::from((offset, 0)));
        Box::new(Error::Json {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error with an optional span.
    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    /// Create a duplicate-token error.
    pub fn duplicate_error(
        &self,
        category: Category,
        token: impl Into<String>,
        first_pr: impl Into<String>,
        second_pr: impl Into<String>,
    ) -> Box<Error> {
        let token = token.into();
        let spans = crate::validate::find_replace_spans(&self.src, &token);
        Box::new(Error::DuplicateReplace {
            src: self.named_source(),
            first_span: spans.first().copied(),
            second_span: spans.get(1).copied(),
            category,
            token,
            first_pr: first_pr.into(),
            second_pr: second_pr.into(),
        })
    }

    /// Create a chained-rename error.
    pub fn chain_error(
        &self,
        category: Category,
        from: impl Into<String>,
        via: impl Into<String>,
        to: impl Into<String>,
    ) -> Box<Error> {
        let via = via.into();
        let span = crate::validate::find_replace_spans(&self.src, &via)
            .first()
            .copied();
        Box::new(Error::ChainedRename {
            src: self.named_source(),
            span,
            category,
            from: from.into(),
            via,
            to: to.into(),
        })
    }
}

/// Convert a 1-based line/column pair into a byte offset.
fn line_column_offset(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let mut offset = 0;
    for (idx, text) in src.split_inclusive('\n').enumerate() {
        if idx + 1 == line {
            return Some(offset + column.saturating_sub(1).min(text.len()));
        }
        offset += text.len();
    }
    None
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("check that the change-data directory exists and is readable"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse change data")]
    #[diagnostic(code(matmig::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse change data")]
    #[diagnostic(code(matmig::json_error))]
    Json {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate {category} entry for '{token}'")]
    #[diagnostic(
        code(matmig::duplicate_replace),
        help(
            "'{token}' is renamed by both {first_pr} and {second_pr}; keep a single entry or give them disjoint version ranges"
        )
    )]
    DuplicateReplace {
        #[source_code]
        src: NamedSource<String>,
        #[label("first declared here")]
        first_span: Option<SourceSpan>,
        #[label("declared again here")]
        second_span: Option<SourceSpan>,
        category: Category,
        token: String,
        first_pr: String,
        second_pr: String,
    },

    #[error("chained {category} rename '{from}' -> '{via}' -> '{to}'")]
    #[diagnostic(
        code(matmig::chained_rename),
        help("rename '{from}' directly to '{to}' so that a single pass produces the final name")
    )]
    ChainedRename {
        #[source_code]
        src: NamedSource<String>,
        #[label("'{via}' is renamed again here")]
        span: Option<SourceSpan>,
        category: Category,
        from: String,
        via: String,
        to: String,
    },

    #[error("{message}")]
    #[diagnostic(code(matmig::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}
