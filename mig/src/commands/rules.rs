use clap::Args;
use eyre::Result;

use crate::reports::{Report, RuleInfo, RulesReport, TerminalOutput};

#[derive(Args)]
pub struct RulesCommand {}

impl RulesCommand {
    pub fn run(&self) -> Result<()> {
        let rules = matmig_rules::rules::all()
            .iter()
            .map(|rule| RuleInfo {
                name: rule.name(),
                directory: rule.directory(),
                description: rule.description(),
            })
            .collect();

        RulesReport { rules }.render(&mut TerminalOutput::new());
        Ok(())
    }
}
