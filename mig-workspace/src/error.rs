use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("failed to read workspace configuration '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse workspace configuration '{}'", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("project '{name}' is not defined in the workspace")]
    UnknownProject { name: String },

    #[error("project '{name}' has no main file configured for its build target")]
    NoMainFile { name: String },

    #[error(
        "could not read the project main file ({}); please manually import {module} in your main TypeScript file",
        path.display()
    )]
    MainFileUnreadable {
        path: PathBuf,
        module: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write the project main file ({}): {message}", path.display())]
    MainFileWrite { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, WorkspaceError>;
