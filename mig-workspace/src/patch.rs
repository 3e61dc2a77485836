//! Inserting imports into project files.

use std::path::{Path, PathBuf};

use matmig_core::File;
use tracing::{info, warn};

use crate::{AngularWorkspace, Import, Result, WorkspaceError, import::BOM};

/// Module imported for gesture support before Angular Material 7.
pub const HAMMERJS: &str = "hammerjs";

/// What happened when patching a file with an import.
#[derive(Debug)]
pub enum PatchOutcome {
    /// The import was added at the top of the file.
    Inserted { path: PathBuf },
    /// The file already imports the module.
    AlreadyPresent { path: PathBuf },
    /// The file could not be patched; the user has to add the import by hand.
    Skipped(WorkspaceError),
}

impl PatchOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted { .. })
    }
}

/// Insert `import` at the start of the file at `path` unless it is already present.
pub fn add_import_to_file(path: impl AsRef<Path>, import: &Import) -> PatchOutcome {
    let path = path.as_ref();
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(source) => {
            let err = WorkspaceError::MainFileUnreadable {
                path: path.to_path_buf(),
                module: import.module().to_string(),
                source,
            };
            warn!("{err}");
            return PatchOutcome::Skipped(err);
        }
    };

    if import.is_present_in(&content) {
        info!(
            "{} is already imported in the project main file ({})",
            import.module(),
            path.display()
        );
        return PatchOutcome::AlreadyPresent {
            path: path.to_path_buf(),
        };
    }

    // The statement goes after a byte order mark, never before it
    let body = content.strip_prefix(BOM).unwrap_or(&content);
    let bom = &content[..content.len() - body.len()];
    let patched = format!("{bom}{}{body}", import.build());
    if let Err(e) = File::new(path, patched).write() {
        let err = WorkspaceError::MainFileWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        };
        warn!("{err}");
        return PatchOutcome::Skipped(err);
    }

    info!("added {} import to {}", import.module(), path.display());
    PatchOutcome::Inserted {
        path: path.to_path_buf(),
    }
}

/// Insert `import` into the main file of `project`.
///
/// Fails only when the project or its main file cannot be resolved from the
/// workspace configuration; file level problems are reported as
/// [`PatchOutcome::Skipped`].
pub fn add_import_to_main_file(
    workspace: &AngularWorkspace,
    project: &str,
    import: &Import,
) -> Result<PatchOutcome> {
    let main = workspace.project_main_file(project)?;
    Ok(add_import_to_file(main, import))
}

/// Import HammerJS in the main file of `project`.
pub fn add_hammerjs_to_main_file(workspace: &AngularWorkspace, project: &str) -> Result<PatchOutcome> {
    add_import_to_main_file(workspace, project, &Import::new(HAMMERJS))
}
