//! Check-data command report data structures.

use matmig_core::Version;

use super::output::{Output, Report};

/// Active rename count at one version boundary.
#[derive(Debug)]
pub struct BoundaryInfo {
    pub version: Version,
    pub renames: usize,
}

/// Report data from validating change data.
#[derive(Debug)]
pub struct CheckDataReport {
    /// Where the data came from.
    pub source: String,
    pub boundaries: Vec<BoundaryInfo>,
    /// Rendered diagnostics.
    pub errors: Vec<String>,
}

impl CheckDataReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckDataReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.preformatted(error);
        }

        if !self.is_valid() {
            out.warning(&format!(
                "{} problem{} found in {}",
                self.errors.len(),
                if self.errors.len() == 1 { "" } else { "s" },
                self.source
            ));
            return;
        }

        out.preformatted(&format!("✓ {} is valid", self.source));
        out.newline();
        out.section("Version boundaries");
        for boundary in &self.boundaries {
            out.list_item(&format!("{} ({} renames)", boundary.version, boundary.renames));
        }
    }
}
