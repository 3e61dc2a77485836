//! The upgrade configuration handed to a fix runner.

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::rules::{self, RULE_DIRECTORIES};

/// `[enabled, targetVersion]` for one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSetting(pub bool, pub String);

impl RuleSetting {
    pub fn enabled(&self) -> bool {
        self.0
    }

    pub fn target(&self) -> &str {
        &self.1
    }
}

/// `{rulesDirectory: [...], rules: {name: [true, target]}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeConfig {
    pub rules_directory: Vec<PathBuf>,
    pub rules: IndexMap<String, RuleSetting>,
}

impl UpgradeConfig {
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).wrap_err("failed to parse upgrade configuration")
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).wrap_err("failed to serialize upgrade configuration")
    }

    /// Names of the enabled rules, in configuration order.
    pub fn enabled_rules(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .filter(|(_, setting)| setting.enabled())
            .map(|(name, _)| name.as_str())
    }
}

/// Build the configuration enabling every rule for `target`.
///
/// The result depends only on the arguments: rule directories are joined
/// onto `rules_root` and the target string is recorded as given.
pub fn create_upgrade_config(target: &str, rules_root: impl AsRef<Path>) -> UpgradeConfig {
    let root = rules_root.as_ref();
    let rules_directory = RULE_DIRECTORIES
        .iter()
        .map(|dir| if dir.is_empty() { root.to_path_buf() } else { root.join(dir) })
        .collect();
    let rules = rules::all()
        .iter()
        .map(|rule| (rule.name().to_string(), RuleSetting(true, target.to_string())))
        .collect();

    UpgradeConfig {
        rules_directory,
        rules,
    }
}
