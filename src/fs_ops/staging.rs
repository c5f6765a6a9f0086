//! One-shot staging area.
//!
//! A freshly named scratch directory under the staging root, owned by a guard.
//! Dropping the guard removes the directory and whatever was staged in it,
//! whether the operation published or bailed out early.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::errors::Result;
use crate::platform::temp::staging_dir_name;

use super::helpers::io_error_with_help;
use super::vfs::FileSystem;

pub(super) struct StagingArea<'a, F: FileSystem> {
    fs: &'a F,
    dir: PathBuf,
}

impl<'a, F: FileSystem> StagingArea<'a, F> {
    /// Create a new, never-before-used directory under `staging_root`.
    pub(super) fn allocate(fs: &'a F, staging_root: &Path) -> Result<Self> {
        let dir = staging_dir_name(staging_root);
        fs.create_dir_all(&dir)
            .map_err(io_error_with_help("create staging directory", &dir))?;
        debug!(path = %dir.display(), "Allocated staging area");
        Ok(Self { fs, dir })
    }

    /// Write `bytes` to `<area>/<name>` and return the staged path.
    pub(super) fn stage(&self, name: &str, bytes: &[u8], durable: bool) -> Result<PathBuf> {
        let path = self.dir.join(name);
        self.fs
            .write_new(&path, bytes, durable)
            .map_err(io_error_with_help("stage file", &path))?;
        debug!(path = %path.display(), bytes = bytes.len(), "Staged content");
        Ok(path)
    }

    pub(super) fn path(&self) -> &Path {
        &self.dir
    }
}

impl<F: FileSystem> Drop for StagingArea<'_, F> {
    fn drop(&mut self) {
        if let Err(e) = self.fs.remove_dir_all(&self.dir) {
            warn!(path = %self.dir.display(), error = %e, "Failed to discard staging area");
        } else {
            debug!(path = %self.dir.display(), "Discarded staging area");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_ops::OsFileSystem;
    use tempfile::tempdir;

    #[test]
    fn area_is_removed_on_drop() {
        let td = tempdir().unwrap();
        let fs = OsFileSystem;
        let staged_dir;
        {
            let area = StagingArea::allocate(&fs, td.path()).unwrap();
            let staged = area.stage("f.txt", b"hi", false).unwrap();
            assert_eq!(std::fs::read(&staged).unwrap(), b"hi");
            staged_dir = area.path().to_path_buf();
        }
        assert!(!staged_dir.exists());
        assert_eq!(std::fs::read_dir(td.path()).unwrap().count(), 0);
    }

    #[test]
    fn areas_are_never_shared() {
        let td = tempdir().unwrap();
        let fs = OsFileSystem;
        let a = StagingArea::allocate(&fs, td.path()).unwrap();
        let b = StagingArea::allocate(&fs, td.path()).unwrap();
        assert_ne!(a.path(), b.path());
    }
}
