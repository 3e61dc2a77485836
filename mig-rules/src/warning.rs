use std::path::PathBuf;

use matmig_core::Span;
use thiserror::Error;

/// A per-file problem that is reported but never aborts a run.
#[derive(Debug, Error)]
pub enum MigrationWarning {
    #[error("failed to read '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{}': {message}", path.display())]
    Write { path: PathBuf, message: String },

    #[error("could not parse '{}' as {language}", path.display())]
    Parse {
        path: PathBuf,
        language: &'static str,
    },

    #[error("'{}' is not a TypeScript, HTML or stylesheet file", path.display())]
    Unsupported { path: PathBuf },

    #[error(
        "conflicting replacements in '{}' at {}..{} and {}..{}; file left unchanged",
        path.display(),
        first.start,
        first.end(),
        second.start,
        second.end()
    )]
    Conflict {
        path: PathBuf,
        first: Span,
        second: Span,
    },

    #[error("replacement at {}..{} is outside '{}'", span.start, span.end(), path.display())]
    OutOfBounds { path: PathBuf, span: Span },
}

impl MigrationWarning {
    /// The file the warning refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            MigrationWarning::Read { path, .. }
            | MigrationWarning::Write { path, .. }
            | MigrationWarning::Parse { path, .. }
            | MigrationWarning::Unsupported { path }
            | MigrationWarning::Conflict { path, .. }
            | MigrationWarning::OutOfBounds { path, .. } => path,
        }
    }
}
