use std::path::PathBuf;

use clap::Args;
use eyre::{Result, eyre};
use matmig_workspace::{AngularWorkspace, add_hammerjs_to_main_file};

use crate::reports::{Report, TerminalOutput};

#[derive(Args)]
pub struct AddHammerjsCommand {
    /// Workspace root containing angular.json
    #[arg(short, long, default_value = ".")]
    pub workspace: PathBuf,

    /// Project to patch (defaults to the workspace default project)
    #[arg(short, long)]
    pub project: Option<String>,
}

impl AddHammerjsCommand {
    pub fn run(&self) -> Result<()> {
        let workspace = AngularWorkspace::open(&self.workspace)?;
        let project = match self.project.as_deref() {
            Some(project) => project,
            None => workspace.default_project().ok_or_else(|| {
                eyre!(
                    "Workspace has several projects and no default; pass --project (one of: {})",
                    workspace.project_names().collect::<Vec<_>>().join(", ")
                )
            })?,
        };

        let outcome = add_hammerjs_to_main_file(&workspace, project)?;
        outcome.render(&mut TerminalOutput::new());
        Ok(())
    }
}
