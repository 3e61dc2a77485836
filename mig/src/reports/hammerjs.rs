//! Add-hammerjs command report.

use matmig_workspace::PatchOutcome;

use super::output::{Output, Report};

impl Report for PatchOutcome {
    fn render(&self, out: &mut dyn Output) {
        match self {
            PatchOutcome::Inserted { path } => {
                out.changed_item(&format!("{} (added HammerJS import)", path.display()));
            }
            PatchOutcome::AlreadyPresent { path } => {
                out.preformatted(&format!(
                    "HammerJS is already imported in the project main file ({}).",
                    path.display()
                ));
            }
            PatchOutcome::Skipped(err) => out.warning(&err.to_string()),
        }
    }
}
