//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod check_data;
mod hammerjs;
mod output;
mod rules;
mod update;

pub use check_data::{BoundaryInfo, CheckDataReport};
pub use output::{Report, TerminalOutput};
pub use rules::{RuleInfo, RulesReport};
pub use update::UpdateReport;
