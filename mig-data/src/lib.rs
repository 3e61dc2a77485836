//! Versioned change data for the matmig upgrade rules.
//!
//! Each category lives in its own file as an ordered list of groups, one per
//! upstream pull request. [`ChangeData::resolve`] selects the groups active
//! for a target version and builds token indexes, rejecting tables where the
//! same token is renamed twice or a rename feeds into another one.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod active;
mod category;
mod change;
mod checks;
mod data;
mod error;
mod library;
mod surface;
mod table;
mod validate;

pub use active::{ActiveChanges, RenameIndex, Tagged};
pub use category::Category;
pub use change::{Change, ChangeEntry, Whitelist};
pub use checks::{
    ArgCountMessage, MethodCallCheck, Notice, PropertyNotice, RequiredMember, TemplateNotice,
    TemplateNoticeKind,
};
pub use data::ChangeData;
pub use error::{Error, Result, SourceContext};
pub use library::LibraryScope;
pub use surface::Surface;
pub use table::{ChangeGroup, ChangeTable};
