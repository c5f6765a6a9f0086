//! Logical directories and the lookup service that maps them to roots.
//!
//! Roots are looked up fresh on every call. Nothing here caches a path, so a
//! root that moves (or a sandbox that is swapped) is picked up immediately.

use clap::ValueEnum;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Sub-folder appended to the per-user private roots (application support,
/// caches, staging) so removals never reach shared OS directories.
pub const APP_NAMESPACE: &str = "app_files";

/// Well-known base locations. Not literal paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum LogicalDirectory {
    /// Private per-user application data
    #[value(name = "app-support")]
    AppSupport,
    /// User-visible documents
    Documents,
    /// Disposable cached data
    Caches,
    /// Scratch area for staging files before they are published
    #[value(name = "temp-staging")]
    TempStaging,
}

impl LogicalDirectory {
    pub const ALL: [LogicalDirectory; 4] = [
        LogicalDirectory::AppSupport,
        LogicalDirectory::Documents,
        LogicalDirectory::Caches,
        LogicalDirectory::TempStaging,
    ];

    /// Stable slug used by the CLI, sandbox layout and log fields.
    pub fn slug(self) -> &'static str {
        match self {
            LogicalDirectory::AppSupport => "app-support",
            LogicalDirectory::Documents => "documents",
            LogicalDirectory::Caches => "caches",
            LogicalDirectory::TempStaging => "temp-staging",
        }
    }

    /// Parse common names (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "app-support" | "appsupport" | "application-support" | "support" => {
                Some(LogicalDirectory::AppSupport)
            }
            "documents" | "docs" => Some(LogicalDirectory::Documents),
            "caches" | "cache" => Some(LogicalDirectory::Caches),
            "temp-staging" | "staging" | "temp" => Some(LogicalDirectory::TempStaging),
            _ => None,
        }
    }
}

impl fmt::Display for LogicalDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for LogicalDirectory {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown logical directory: '{s}'"))
    }
}

/// Directory-lookup service: zero or one root per logical directory.
pub trait DirectoryLookup {
    fn lookup(&self, directory: LogicalDirectory) -> Option<PathBuf>;
}

impl<T: DirectoryLookup + ?Sized> DirectoryLookup for &T {
    fn lookup(&self, directory: LogicalDirectory) -> Option<PathBuf> {
        (**self).lookup(directory)
    }
}

/// Concrete lookups shipped with the crate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Roots {
    /// Ask the OS on every call.
    #[default]
    System,
    /// Every logical directory lives at `<root>/<slug>`.
    Sandbox(PathBuf),
}

impl Roots {
    /// Sandbox rooted at `root`. An existing root is canonicalized so logged
    /// paths match what the OS reports.
    pub fn sandbox(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let root = dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
        Roots::Sandbox(root)
    }
}

impl DirectoryLookup for Roots {
    fn lookup(&self, directory: LogicalDirectory) -> Option<PathBuf> {
        match self {
            Roots::Sandbox(root) => Some(root.join(directory.slug())),
            Roots::System => system_root(directory),
        }
    }
}

fn system_root(directory: LogicalDirectory) -> Option<PathBuf> {
    match directory {
        LogicalDirectory::AppSupport => dirs::data_dir().map(|d| d.join(APP_NAMESPACE)),
        LogicalDirectory::Documents => dirs::document_dir(),
        LogicalDirectory::Caches => dirs::cache_dir().map(|d| d.join(APP_NAMESPACE)),
        LogicalDirectory::TempStaging => Some(std::env::temp_dir().join(APP_NAMESPACE)),
    }
}
