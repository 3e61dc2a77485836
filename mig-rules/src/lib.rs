//! Upgrade rules for Angular Material consumer code.
//!
//! Files are parsed once into a [`SourceFile`] and handed to each [`Rule`].
//! Rules never mutate source: they emit [`Finding`]s whose replacements are
//! positioned against the original text and applied in one batch per file
//! by [`apply_replacements`].
//!
//! TypeScript identifiers are only rewritten when trust in them has been
//! established by an import or re-export from the migrated library, in
//! document order, see [`walk_identifiers`].

pub mod classify;
mod config;
mod finding;
mod fix;
pub mod rules;
mod runner;
mod source;
pub mod syntax;
mod trust;
pub mod walk;
mod warning;

pub use config::{RuleSetting, UpgradeConfig, create_upgrade_config};
pub use finding::{Finding, Replacement, Severity};
pub use fix::{FixError, apply_replacements};
pub use rules::{RULE_DIRECTORIES, Rule};
pub use runner::{FileReport, RunReport, Upgrader};
pub use source::{FileKind, SourceFile};
pub use trust::TrustScope;
pub use walk::{IdentifierRule, IdentifierWalk, Scope, walk_identifiers, walk_scoped};
pub use warning::MigrationWarning;
