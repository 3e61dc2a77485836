use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::load_change_data;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckDataCommand {
    /// Directory of change tables (defaults to the built-in data)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

impl CheckDataCommand {
    pub fn run(&self) -> Result<()> {
        let data = load_change_data(self.data_dir.as_deref());
        let source = match &self.data_dir {
            Some(dir) => dir.display().to_string(),
            None => "built-in change data".to_string(),
        };

        let report = ops::check_data(&data, &source);
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
