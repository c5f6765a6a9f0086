//! Directory existence, creation and removal under logical roots.
//!
//! Creation is idempotent and builds the full chain. Removal is deliberately
//! shallow: it targets only the first segment of the subpath (or the root
//! itself when the subpath is empty) and removes that whole subtree.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::platform::{DirectoryLookup, LogicalDirectory};

use super::files::AppFiles;
use super::helpers::io_error_with_help;
use super::resolve::{PathResolver, RelativePath};
use super::vfs::FileSystem;

/// Outcome of a best-effort removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    Removed(PathBuf),
    /// Nothing there; treated as success.
    Missing(PathBuf),
}

pub trait DirectoryStore {
    /// An entry exists at `path` and it is a directory.
    fn directory_exists(&self, path: &Path) -> bool;

    /// Any entry exists at `path`.
    fn file_exists(&self, path: &Path) -> bool;

    /// Create `root/<subpath>` with intermediates; Ok if it already exists.
    fn try_create_directory(&self, directory: LogicalDirectory, subpath: &RelativePath) -> Result<PathBuf>;

    /// Remove `root/<first segment>` recursively.
    fn try_remove_directory(&self, directory: LogicalDirectory, subpath: &RelativePath) -> Result<Removal>;
}

impl<L: DirectoryLookup, F: FileSystem> DirectoryStore for AppFiles<L, F> {
    fn directory_exists(&self, path: &Path) -> bool {
        self.fs.is_dir(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.fs.exists(path)
    }

    fn try_create_directory(&self, directory: LogicalDirectory, subpath: &RelativePath) -> Result<PathBuf> {
        let path = self.resolve(directory, subpath, None)?;
        if self.fs.is_dir(&path) {
            debug!(path = %path.display(), "Directory already present");
            return Ok(path);
        }
        self.fs
            .create_dir_all(&path)
            .map_err(io_error_with_help("create directory", &path))?;
        info!(directory = %directory, path = %path.display(), "Created directory");
        Ok(path)
    }

    fn try_remove_directory(&self, directory: LogicalDirectory, subpath: &RelativePath) -> Result<Removal> {
        let target = self.resolve(directory, &subpath.top_level(), None)?;
        if !self.fs.exists(&target) {
            debug!(path = %target.display(), "Nothing to remove");
            return Ok(Removal::Missing(target));
        }
        if self.fs.is_dir(&target) {
            self.fs
                .remove_dir_all(&target)
                .map_err(io_error_with_help("remove directory", &target))?;
        } else {
            self.fs
                .remove_file(&target)
                .map_err(io_error_with_help("remove file", &target))?;
        }
        info!(directory = %directory, path = %target.display(), "Removed directory tree");
        Ok(Removal::Removed(target))
    }
}

impl<L: DirectoryLookup, F: FileSystem> AppFiles<L, F> {
    /// Boolean surface: true if the directory exists afterwards.
    pub fn create_directory(&self, directory: LogicalDirectory, subpath: &str) -> bool {
        match self.try_create_directory(directory, &subpath.into()) {
            Ok(_) => true,
            Err(e) => {
                warn!(code = e.code(), directory = %directory, subpath, error = %e, "Create directory failed");
                false
            }
        }
    }

    /// Void surface: failures are logged, a missing target is a no-op.
    pub fn remove_directory(&self, directory: LogicalDirectory, subpath: &str) {
        if let Err(e) = self.try_remove_directory(directory, &subpath.into()) {
            warn!(code = e.code(), directory = %directory, subpath, error = %e, "Remove directory failed");
        }
    }

    /// Create the root of each directory; true iff all of them exist afterwards.
    pub fn prepare_directories(&self, directories: &[LogicalDirectory]) -> bool {
        directories
            .iter()
            .fold(true, |ok, dir| self.create_directory(*dir, "") && ok)
    }
}
