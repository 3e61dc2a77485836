//! Running the rules over files and applying their fixes.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use eyre::{Result, WrapErr, bail, eyre};
use matmig_core::{File, Version, WriteResult};
use matmig_data::{ActiveChanges, ChangeData};
use tracing::{debug, info, warn};

use crate::{
    Finding, FixError, MigrationWarning, SourceFile, UpgradeConfig, apply_replacements,
    rules::{self, Rule},
};

/// Directories never descended into.
const SKIPPED_DIRS: [&str; 3] = ["node_modules", ".git", "dist"];

/// Runs a set of rules against files, one file at a time.
pub struct Upgrader {
    rules: Vec<Box<dyn Rule>>,
    changes: ActiveChanges,
}

impl Upgrader {
    /// An upgrader running every rule.
    pub fn new(changes: ActiveChanges) -> Self {
        Self {
            rules: rules::all(),
            changes,
        }
    }

    /// Build an upgrader from a configuration, resolving `data` for its target.
    ///
    /// Fails on unknown rule names, unparsable or conflicting targets, and
    /// change tables that do not validate for the target.
    pub fn from_config(config: &UpgradeConfig, data: &ChangeData) -> Result<Self> {
        let mut known: Vec<Option<Box<dyn Rule>>> = rules::all().into_iter().map(Some).collect();
        let mut selected = Vec::new();
        let mut targets = HashSet::new();

        for (name, setting) in &config.rules {
            let Some(slot) = known
                .iter_mut()
                .find(|r| r.as_ref().is_some_and(|r| r.name() == name))
            else {
                bail!("unknown rule '{}' in upgrade configuration", name);
            };
            if !setting.enabled() {
                continue;
            }
            let target: Version = setting
                .target()
                .parse()
                .map_err(|e: String| eyre!(e))
                .wrap_err_with(|| format!("invalid target version for rule '{}'", name))?;
            targets.insert(target);
            selected.extend(slot.take());
        }

        if targets.len() > 1 {
            bail!("upgrade configuration mixes target versions; every rule must target the same version");
        }
        let target = targets.into_iter().next().unwrap_or_default();
        let changes = data
            .resolve(&target)
            .wrap_err_with(|| format!("change data is invalid for target version {}", target))?;

        debug!(rules = selected.len(), %target, "configured upgrader");
        Ok(Self {
            rules: selected,
            changes,
        })
    }

    pub fn changes(&self) -> &ActiveChanges {
        &self.changes
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Run every rule over a parsed file.
    pub fn check_source(&self, file: &SourceFile) -> Vec<Finding> {
        let mut findings = Vec::new();
        for rule in &self.rules {
            let before = findings.len();
            rule.check(file, &self.changes, &mut findings);
            if findings.len() > before {
                debug!(
                    rule = rule.name(),
                    path = %file.path().display(),
                    count = findings.len() - before,
                    "rule reported findings"
                );
            }
        }
        findings
    }

    /// Check one file's text and compute its fixed content.
    pub fn upgrade_source(
        &self,
        path: impl Into<PathBuf>,
        text: impl Into<String>,
    ) -> Result<FileReport, MigrationWarning> {
        let file = SourceFile::parse(path, text)?;
        let findings = self.check_source(&file);
        let fixed = apply_replacements(file.text(), findings.iter().filter_map(|f| f.fix.as_ref()))
            .map_err(|err| match err {
                FixError::Overlap { first, second } => MigrationWarning::Conflict {
                    path: file.path().to_path_buf(),
                    first,
                    second,
                },
                FixError::OutOfBounds { span } => MigrationWarning::OutOfBounds {
                    path: file.path().to_path_buf(),
                    span,
                },
            })?;

        Ok(FileReport {
            path: file.path().to_path_buf(),
            original: file.text().to_string(),
            fixed,
            findings,
        })
    }

    /// Upgrade a single file or every supported file below a directory.
    ///
    /// Files are processed one at a time; a file that cannot be read, parsed
    /// or fixed becomes a warning and the run continues.
    pub fn run_path(&self, root: &Path) -> RunReport {
        let mut report = RunReport::default();

        for path in collect_files(root, &mut report.warnings) {
            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(source) => {
                    report.push_warning(MigrationWarning::Read { path, source });
                    continue;
                }
            };
            match self.upgrade_source(&path, text) {
                Ok(file) => report.files.push(file),
                Err(warning) => report.push_warning(warning),
            }
        }

        info!(
            files = report.files.len(),
            changed = report.changed_files().count(),
            warnings = report.warnings.len(),
            "upgrade run finished"
        );
        report
    }
}

fn collect_files(root: &Path, warnings: &mut Vec<MigrationWarning>) -> Vec<PathBuf> {
    if root.is_file() {
        return vec![root.to_path_buf()];
    }

    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(source) => {
                warnings.push(MigrationWarning::Read { path: dir, source });
                continue;
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let skipped = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| SKIPPED_DIRS.contains(&n));
            if path.is_dir() {
                if skipped {
                    debug!(path = %path.display(), "skipping directory");
                } else {
                    pending.push(path);
                }
            } else if crate::FileKind::from_path(&path).is_some() {
                files.push(path);
            }
        }
    }

    files.sort();
    files
}

/// Findings and fixed content for one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub original: String,
    pub fixed: String,
    pub findings: Vec<Finding>,
}

impl FileReport {
    pub fn is_changed(&self) -> bool {
        self.original != self.fixed
    }

    pub fn fixable(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_fixable())
    }

    /// Findings that need a manual change.
    pub fn failures(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| !f.is_fixable())
    }
}

/// The outcome of a run over one or more files.
#[derive(Debug, Default)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    pub warnings: Vec<MigrationWarning>,
}

impl RunReport {
    fn push_warning(&mut self, warning: MigrationWarning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn changed_files(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.is_changed())
    }

    pub fn finding_count(&self) -> usize {
        self.files.iter().map(|f| f.findings.len()).sum()
    }

    /// Write every changed file, returning the paths written.
    ///
    /// Write failures are recorded as warnings and do not stop other files.
    pub fn write_changes(&mut self) -> Vec<PathBuf> {
        let mut written = Vec::new();
        let mut failures = Vec::new();

        for report in self.files.iter().filter(|f| f.is_changed()) {
            match File::new(&report.path, report.fixed.as_str()).write() {
                Ok(WriteResult::Written) => {
                    debug!(path = %report.path.display(), "wrote fixes");
                    written.push(report.path.clone());
                }
                Ok(WriteResult::Unchanged) => {}
                Err(err) => failures.push(MigrationWarning::Write {
                    path: report.path.clone(),
                    message: err.to_string(),
                }),
            }
        }

        for warning in failures {
            self.push_warning(warning);
        }
        written
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::create_upgrade_config;

    fn upgrader() -> Upgrader {
        let data = ChangeData::builtin().unwrap();
        Upgrader::new(data.resolve(&Version::new(6, 0, 0)).unwrap())
    }

    #[test]
    fn test_from_config() {
        let data = ChangeData::builtin().unwrap();
        let config = create_upgrade_config("6", "/rules");
        let upgrader = Upgrader::from_config(&config, &data).unwrap();
        assert_eq!(upgrader.rules().count(), 21);
        assert_eq!(upgrader.changes().target, Version::new(6, 0, 0));
    }

    #[test]
    fn test_from_config_disabled_rules() {
        let data = ChangeData::builtin().unwrap();
        let mut config = create_upgrade_config("6", "/rules");
        config.rules["class-names-identifier"].0 = false;
        let upgrader = Upgrader::from_config(&config, &data).unwrap();
        assert_eq!(upgrader.rules().count(), 20);
        assert!(upgrader.rules().all(|r| r.name() != "class-names-identifier"));
    }

    #[test]
    fn test_from_config_unknown_rule() {
        let data = ChangeData::builtin().unwrap();
        let mut config = create_upgrade_config("6", "/rules");
        config
            .rules
            .insert("no-such-rule".to_string(), crate::RuleSetting(true, "6".to_string()));
        let err = Upgrader::from_config(&config, &data).err().unwrap();
        assert!(err.to_string().contains("no-such-rule"));
    }

    #[test]
    fn test_from_config_bad_target() {
        let data = ChangeData::builtin().unwrap();
        let config = create_upgrade_config("six", "/rules");
        assert!(Upgrader::from_config(&config, &data).is_err());
    }

    #[test]
    fn test_upgrade_source_combines_rules() {
        let src = r#"import { PortalHost } from '@angular/cdk/portal';
@Component({
  template: '<mat-input-container></mat-input-container>',
})
class A {
  host: PortalHost;
  selector = '.mat-input-container';
}
"#;
        let report = upgrader().upgrade_source("a.ts", src).unwrap();
        assert!(report.is_changed());
        assert!(report.fixed.contains("import { PortalOutlet }"));
        assert!(report.fixed.contains("'<mat-form-field></mat-form-field>'"));
        assert!(report.fixed.contains("'.mat-form-field'"));
        assert!(report.fixed.contains("host: PortalOutlet;"));
    }

    #[test]
    fn test_run_path_skips_and_isolates() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(temp.path().join("node_modules/lib")).unwrap();
        fs::write(src.join("a.html"), "<mat-input-container></mat-input-container>").unwrap();
        fs::write(src.join("b.css"), ".mat-input-flex {}").unwrap();
        fs::write(src.join("README.md"), "mat-input-container").unwrap();
        fs::write(
            temp.path().join("node_modules/lib/c.html"),
            "<mat-input-container></mat-input-container>",
        )
        .unwrap();

        let mut report = upgrader().run_path(temp.path());
        assert_eq!(report.files.len(), 2);
        assert!(report.warnings.is_empty());
        assert_eq!(report.changed_files().count(), 2);

        let written = report.write_changes();
        assert_eq!(written.len(), 2);
        assert_eq!(
            fs::read_to_string(src.join("a.html")).unwrap(),
            "<mat-form-field></mat-form-field>"
        );
        assert_eq!(
            fs::read_to_string(temp.path().join("node_modules/lib/c.html")).unwrap(),
            "<mat-input-container></mat-input-container>"
        );

        // A second run finds nothing left to do
        let report = upgrader().run_path(temp.path());
        assert_eq!(report.changed_files().count(), 0);
    }

    #[test]
    fn test_single_file_path() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("x.scss");
        fs::write(&file, "[cdkPortalHost] {}").unwrap();
        let report = upgrader().run_path(&file);
        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].fixed, "[cdkPortalOutlet] {}");
    }
}
