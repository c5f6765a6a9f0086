//! Platform-specific helpers.
//! This module hides where each well-known directory lives on the current OS
//! behind a uniform lookup so the rest of the codebase can remain platform-agnostic.

mod lookup;
pub mod temp;

pub use lookup::{DirectoryLookup, LogicalDirectory, Roots, APP_NAMESPACE};
