//! Single item removal under a logical directory.

use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::platform::{DirectoryLookup, LogicalDirectory};

use super::directory::Removal;
use super::files::AppFiles;
use super::helpers::io_error_with_help;
use super::resolve::{PathResolver, RelativePath};
use super::vfs::FileSystem;

impl<L: DirectoryLookup, F: FileSystem> AppFiles<L, F> {
    pub(super) fn resolve_item(&self, name: &str, subpath: &RelativePath, directory: LogicalDirectory) -> Result<PathBuf> {
        self.resolve(directory, subpath, Some(name))
    }

    /// Remove `root/<subpath>/<name>`; a directory there is removed with its contents.
    pub fn try_remove_item(&self, name: &str, subpath: &RelativePath, directory: LogicalDirectory) -> Result<Removal> {
        let path = self.resolve_item(name, subpath, directory)?;
        if !self.fs.exists(&path) {
            debug!(path = %path.display(), "Nothing to remove");
            return Ok(Removal::Missing(path));
        }
        if self.fs.is_dir(&path) {
            self.fs.remove_dir_all(&path).map_err(io_error_with_help("remove directory", &path))?;
        } else {
            self.fs.remove_file(&path).map_err(io_error_with_help("remove file", &path))?;
        }
        info!(directory = %directory, path = %path.display(), "Removed item");
        Ok(Removal::Removed(path))
    }

    pub fn remove_item(&self, name: &str, subpath: &str, directory: LogicalDirectory) {
        if let Err(e) = self.try_remove_item(name, &subpath.into(), directory) {
            warn!(code = e.code(), directory = %directory, name, subpath, error = %e, "Remove item failed");
        }
    }
}
