//! Angular workspace access for matmig.
//!
//! Reads project layout from `angular.json` and patches project files with
//! imports the migrated library expects, such as HammerJS in the main file.

mod angular;
mod error;
mod import;
mod patch;

pub use angular::{AngularWorkspace, WORKSPACE_FILE};
pub use error::{Result, WorkspaceError};
pub use import::Import;
pub use patch::{
    HAMMERJS, PatchOutcome, add_hammerjs_to_main_file, add_import_to_file, add_import_to_main_file,
};
