mod add_hammerjs;
mod check_data;
mod completions;
mod config;
mod rules;
mod update;

use std::path::Path;

use add_hammerjs::AddHammerjsCommand;
use check_data::CheckDataCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use config::ConfigCommand;
use eyre::Result;
use matmig_data::ChangeData;
use rules::RulesCommand;
use update::UpdateCommand;

/// Extension trait for exiting on change-data errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for matmig_data::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Load change data from `dir`, or the built-in tables.
pub(crate) fn load_change_data(dir: Option<&Path>) -> ChangeData {
    match dir {
        Some(dir) => ChangeData::from_dir(dir).unwrap_or_exit(),
        None => ChangeData::builtin().unwrap_or_exit(),
    }
}

#[derive(Parser)]
#[command(name = "matmig")]
#[command(version)]
#[command(about = "Upgrade Angular Material consumer code between major versions")]
pub(crate) struct Cli {
    /// Enable debug logging (overrides MATMIG_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Update(cmd) => cmd.run(),
            Commands::Config(cmd) => cmd.run(),
            Commands::Rules(cmd) => cmd.run(),
            Commands::CheckData(cmd) => cmd.run(),
            Commands::AddHammerjs(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Upgrade the files below a path to a target version
    Update(UpdateCommand),

    /// Print the upgrade configuration for a target version
    Config(ConfigCommand),

    /// List the upgrade rules
    Rules(RulesCommand),

    /// Validate change data at every version boundary
    CheckData(CheckDataCommand),

    /// Import HammerJS in a project's main file
    #[command(name = "add-hammerjs")]
    AddHammerjs(AddHammerjsCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
