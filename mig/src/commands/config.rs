use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use matmig_core::{File, WriteResult};
use matmig_rules::create_upgrade_config;

#[derive(Args)]
pub struct ConfigCommand {
    /// Target Angular Material version recorded for every rule
    #[arg(short, long, default_value = "6")]
    pub target: String,

    /// Directory the rule directories are resolved against
    #[arg(long, default_value = ".")]
    pub rules_root: PathBuf,

    /// Write the configuration to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ConfigCommand {
    pub fn run(&self) -> Result<()> {
        let config = create_upgrade_config(&self.target, &self.rules_root);
        let json = config.to_json_pretty()?;

        match &self.output {
            Some(path) => {
                let result = File::new(path, format!("{json}\n"))
                    .write()
                    .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
                if result == WriteResult::Unchanged {
                    println!("{} is up to date", path.display());
                } else {
                    println!("Wrote {}", path.display());
                }
            }
            None => println!("{json}"),
        }
        Ok(())
    }
}
