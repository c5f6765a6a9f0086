//! The concrete handle callers hold.
//! Composes a directory lookup and a filesystem handle; the resolver,
//! directory store, atomic writer and staging operations are implemented on
//! it in their own modules.

use crate::config::Config;
use crate::platform::{DirectoryLookup, Roots};

use super::vfs::{FileSystem, OsFileSystem};

#[derive(Debug, Clone)]
pub struct AppFiles<L = Roots, F = OsFileSystem> {
    pub(super) lookup: L,
    pub(super) fs: F,
    pub(super) durable: bool,
}

impl<L: DirectoryLookup, F: FileSystem> AppFiles<L, F> {
    /// Build from explicit collaborators. Durable writes (fsync) are on.
    pub fn new(lookup: L, fs: F) -> Self {
        Self { lookup, fs, durable: true }
    }

    /// Toggle fsync of temp files and parent directories.
    pub fn with_durability(mut self, durable: bool) -> Self {
        self.durable = durable;
        self
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    pub fn is_durable(&self) -> bool {
        self.durable
    }
}

impl AppFiles {
    /// OS directories, real filesystem.
    pub fn system() -> Self {
        Self::new(Roots::System, OsFileSystem)
    }

    /// Every logical directory under `root`, real filesystem.
    pub fn sandboxed(root: impl AsRef<std::path::Path>) -> Self {
        Self::new(Roots::sandbox(root), OsFileSystem)
    }

    /// Honors the configured sandbox root and durability.
    pub fn from_config(cfg: &Config) -> Self {
        let roots = match &cfg.root {
            Some(root) => Roots::sandbox(root),
            None => Roots::System,
        };
        Self::new(roots, OsFileSystem).with_durability(cfg.durable)
    }
}

impl Default for AppFiles {
    fn default() -> Self {
        Self::system()
    }
}
