//! Traversals over TypeScript syntax trees.

mod identifiers;
mod scope;

pub use identifiers::{IdentifierRule, IdentifierWalk, walk_identifiers};
pub use scope::{Scope, walk_scoped};
