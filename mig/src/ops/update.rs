//! Update operation - running the upgrade rules.

use std::path::Path;

use eyre::{Context, Result, eyre};
use matmig_core::Version;
use matmig_data::ChangeData;
use matmig_rules::{RunReport, UpgradeConfig, Upgrader};
use tracing::debug;

/// Where the rule selection comes from.
pub enum RuleSelection<'a> {
    /// Every rule, for the given target version.
    All { target: &'a str },
    /// An upgrade configuration file.
    Config(&'a Path),
}

/// Build the upgrader for a rule selection.
pub fn build_upgrader(data: &ChangeData, selection: RuleSelection<'_>) -> Result<Upgrader> {
    match selection {
        RuleSelection::All { target } => {
            let version: Version = target
                .parse()
                .map_err(|e: String| eyre!(e))
                .wrap_err("Invalid target version")?;
            let changes = data
                .resolve(&version)
                .wrap_err_with(|| format!("Change data is invalid for version {}", version))?;
            Ok(Upgrader::new(changes))
        }
        RuleSelection::Config(path) => {
            let content = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
            let config = UpgradeConfig::from_json_str(&content)?;
            Upgrader::from_config(&config, data)
        }
    }
}

/// Run the upgrader over `path` without writing anything.
pub fn plan(upgrader: &Upgrader, path: &Path) -> Result<RunReport> {
    if !path.exists() {
        return Err(eyre!("{} does not exist", path.display()));
    }
    debug!(
        path = %path.display(),
        rules = upgrader.rules().count(),
        target = %upgrader.changes().target,
        "planning upgrade"
    );
    Ok(upgrader.run_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_target() {
        let data = ChangeData::builtin().unwrap();
        let err = build_upgrader(&data, RuleSelection::All { target: "six" })
            .err()
            .unwrap();
        assert!(err.to_string().contains("Invalid target version"));
    }

    #[test]
    fn test_missing_path() {
        let data = ChangeData::builtin().unwrap();
        let upgrader = build_upgrader(&data, RuleSelection::All { target: "6" }).unwrap();
        assert!(plan(&upgrader, Path::new("/definitely/not/here")).is_err());
    }
}
