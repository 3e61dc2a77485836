use std::path::PathBuf;

use clap::Args;
use dialoguer::{Confirm, theme::ColorfulTheme};
use eyre::{Context, Result};

use super::load_change_data;
use crate::{
    ops::{self, update::RuleSelection},
    reports::{Report, TerminalOutput, UpdateReport},
};

#[derive(Args)]
pub struct UpdateCommand {
    /// File or directory to upgrade
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Target Angular Material version
    #[arg(short, long, default_value = "6", conflicts_with = "config")]
    pub target: String,

    /// Upgrade configuration selecting the rules to run
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory of change tables replacing the built-in data
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Write fixes to disk (default is a dry run)
    #[arg(short, long)]
    pub write: bool,

    /// Do not ask for confirmation before writing
    #[arg(short, long)]
    pub yes: bool,
}

impl UpdateCommand {
    pub fn run(&self) -> Result<()> {
        let data = load_change_data(self.data_dir.as_deref());
        let selection = match &self.config {
            Some(path) => RuleSelection::Config(path),
            None => RuleSelection::All {
                target: &self.target,
            },
        };
        let upgrader = ops::build_upgrader(&data, selection)?;
        let mut run = ops::plan(&upgrader, &self.path)?;

        let mut report = UpdateReport::new(upgrader.changes().target.to_string(), &run);
        let pending = run.changed_files().count();

        if self.write && pending > 0 && (self.yes || Self::confirm(pending)?) {
            report.written = run.write_changes();
            report.dry_run = false;
            // Write failures are appended to the run's warnings
            report.warnings = run.warnings.iter().map(|w| w.to_string()).collect();
        }

        report.render(&mut TerminalOutput::new());
        Ok(())
    }

    fn confirm(pending: usize) -> Result<bool> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Write fixes to {} file{}?",
                pending,
                if pending == 1 { "" } else { "s" }
            ))
            .default(true)
            .interact()
            .wrap_err("Failed to get confirmation")
    }
}
