//! Atomic file writer.
//! - Ensures the parent directory exists.
//! - Writes to a unique hidden temp sibling (same directory, same volume).
//! - Publishes with a single rename, so readers see the old content or the new
//!   content and never a partial file.
//! - Removes the temp file on every failure path.
//! - When durable, fsyncs the temp file and (best-effort) the parent directory.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::errors::{FsError, Result};
use crate::platform::temp::tmp_sibling_name;
use crate::platform::{DirectoryLookup, LogicalDirectory};

use super::files::AppFiles;
use super::helpers::io_error_with_help;
use super::resolve::{PathResolver, RelativePath};
use super::vfs::FileSystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Fail with `AlreadyExists` if anything is at the destination.
    CreateNew,
    /// Atomically replace whatever is at the destination.
    Replace,
}

pub trait AtomicFileWriter {
    fn write_atomic(&self, bytes: &[u8], destination: &Path, mode: WriteMode) -> Result<()>;

    /// Create, don't clobber. False if the destination exists or the write failed.
    fn create_file(&self, bytes: &[u8], destination: &Path) -> bool;

    /// Always replace; used to publish staged content.
    fn force_write(&self, bytes: &[u8], destination: &Path) -> Result<()>;
}

impl<L: DirectoryLookup, F: FileSystem> AtomicFileWriter for AppFiles<L, F> {
    fn write_atomic(&self, bytes: &[u8], destination: &Path, mode: WriteMode) -> Result<()> {
        let parent = destination
            .parent()
            .ok_or_else(|| FsError::InvalidComponent(destination.display().to_string()))?;

        if !self.fs.is_dir(parent) {
            self.fs
                .create_dir_all(parent)
                .map_err(|source| FsError::ParentUnavailable {
                    path: parent.to_path_buf(),
                    source,
                })?;
            debug!(path = %parent.display(), "Created parent directory");
        }

        if mode == WriteMode::CreateNew && self.fs.exists(destination) {
            return Err(FsError::AlreadyExists(destination.to_path_buf()));
        }

        let tmp = tmp_sibling_name(destination);
        if let Err(e) = self.fs.write_new(&tmp, bytes, self.durable) {
            let _ = self.fs.remove_file(&tmp);
            return Err(io_error_with_help("write temporary file", &tmp)(e));
        }

        if let Err(e) = self.fs.rename(&tmp, destination) {
            let _ = self.fs.remove_file(&tmp);
            return Err(io_error_with_help("publish temporary file", destination)(e));
        }

        if self.durable {
            // A failed directory fsync doesn't undo a completed rename.
            if let Err(e) = self.fs.sync_dir(parent) {
                debug!(path = %parent.display(), error = %e, "fsync of parent directory failed");
            }
        }

        debug!(path = %destination.display(), bytes = bytes.len(), ?mode, "Published file atomically");
        Ok(())
    }

    fn create_file(&self, bytes: &[u8], destination: &Path) -> bool {
        match self.write_atomic(bytes, destination, WriteMode::CreateNew) {
            Ok(()) => true,
            Err(e) => {
                warn!(code = e.code(), path = %destination.display(), error = %e, "Create file failed");
                false
            }
        }
    }

    fn force_write(&self, bytes: &[u8], destination: &Path) -> Result<()> {
        self.write_atomic(bytes, destination, WriteMode::Replace)
    }
}

impl<L: DirectoryLookup, F: FileSystem> AppFiles<L, F> {
    /// No-overwrite write of `content` to `root/<subpath>/<filename>`.
    pub fn try_write_bytes_to_file(
        &self,
        content: &[u8],
        directory: LogicalDirectory,
        filename: &str,
        subpath: &RelativePath,
    ) -> Result<PathBuf> {
        let destination = self.resolve(directory, subpath, Some(filename))?;
        self.write_atomic(content, &destination, WriteMode::CreateNew)?;
        info!(directory = %directory, path = %destination.display(), "Created file");
        Ok(destination)
    }

    pub fn try_write_string_to_file(
        &self,
        content: &str,
        directory: LogicalDirectory,
        filename: &str,
        subpath: &RelativePath,
    ) -> Result<PathBuf> {
        self.try_write_bytes_to_file(content.as_bytes(), directory, filename, subpath)
    }

    /// Boolean surface; false when the file already exists or the write failed.
    pub fn write_bytes_to_file(&self, content: &[u8], directory: LogicalDirectory, filename: &str, subpath: &str) -> bool {
        match self.try_write_bytes_to_file(content, directory, filename, &subpath.into()) {
            Ok(_) => true,
            Err(e) => {
                warn!(code = e.code(), directory = %directory, filename, subpath, error = %e, "Write file failed");
                false
            }
        }
    }

    pub fn write_string_to_file(&self, content: &str, directory: LogicalDirectory, filename: &str, subpath: &str) -> bool {
        self.write_bytes_to_file(content.as_bytes(), directory, filename, subpath)
    }

    /// Atomically create or replace `root/<subpath>/<filename>`.
    pub fn try_replace_file(
        &self,
        content: &[u8],
        directory: LogicalDirectory,
        filename: &str,
        subpath: &RelativePath,
    ) -> Result<PathBuf> {
        let destination = self.resolve(directory, subpath, Some(filename))?;
        self.force_write(content, &destination)?;
        info!(directory = %directory, path = %destination.display(), "Replaced file");
        Ok(destination)
    }

    pub fn replace_file(&self, content: &[u8], directory: LogicalDirectory, filename: &str, subpath: &str) -> bool {
        match self.try_replace_file(content, directory, filename, &subpath.into()) {
            Ok(_) => true,
            Err(e) => {
                warn!(code = e.code(), directory = %directory, filename, subpath, error = %e, "Replace file failed");
                false
            }
        }
    }

    pub fn replace_string_file(&self, content: &str, directory: LogicalDirectory, filename: &str, subpath: &str) -> bool {
        self.replace_file(content.as_bytes(), directory, filename, subpath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::temp::is_temp_name;
    use std::fs;
    use tempfile::tempdir;

    fn no_temp_files(dir: &Path) -> bool {
        fs::read_dir(dir)
            .unwrap()
            .flatten()
            .all(|e| !is_temp_name(&e.file_name().to_string_lossy()))
    }

    #[test]
    fn create_file_never_overwrites() {
        let td = tempdir().unwrap();
        let files = AppFiles::sandboxed(td.path());
        assert!(files.write_string_to_file("first", LogicalDirectory::AppSupport, "t.txt", "a/b"));
        assert!(!files.write_string_to_file("second", LogicalDirectory::AppSupport, "t.txt", "a/b"));

        let p = files.resolve(LogicalDirectory::AppSupport, &"a/b".into(), Some("t.txt")).unwrap();
        assert_eq!(fs::read_to_string(&p).unwrap(), "first");
        assert!(no_temp_files(p.parent().unwrap()));

        let err = files
            .try_write_string_to_file("third", LogicalDirectory::AppSupport, "t.txt", &"a/b".into())
            .unwrap_err();
        assert!(matches!(err, FsError::AlreadyExists(_)));
    }

    #[test]
    fn force_write_replaces_content() {
        let td = tempdir().unwrap();
        let files = AppFiles::sandboxed(td.path()).with_durability(false);
        let dest = td.path().join("deep/er/f.bin");
        files.force_write(b"old", &dest).unwrap();
        files.force_write(b"new", &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"new");
        assert!(no_temp_files(dest.parent().unwrap()));
    }

    #[test]
    fn replace_file_writes_at_root() {
        let td = tempdir().unwrap();
        let files = AppFiles::sandboxed(td.path());
        assert!(files.replace_string_file("v1", LogicalDirectory::Documents, "data.txt", ""));
        assert!(files.replace_string_file("v2", LogicalDirectory::Documents, "data.txt", ""));
        let p = td.path().join("documents").join("data.txt");
        assert_eq!(fs::read_to_string(p).unwrap(), "v2");
    }

    #[test]
    fn parent_that_is_a_file_is_parent_unavailable() {
        let td = tempdir().unwrap();
        let files = AppFiles::sandboxed(td.path());
        fs::write(td.path().join("blocker"), "x").unwrap();
        let err = files
            .write_atomic(b"data", &td.path().join("blocker/inner/f.txt"), WriteMode::CreateNew)
            .unwrap_err();
        assert!(matches!(err, FsError::ParentUnavailable { .. }));
    }

    #[test]
    fn empty_content_is_written() {
        let td = tempdir().unwrap();
        let files = AppFiles::sandboxed(td.path());
        let p = files
            .try_write_bytes_to_file(&[], LogicalDirectory::Caches, "empty", &RelativePath::default())
            .unwrap();
        assert_eq!(fs::metadata(p).unwrap().len(), 0);
    }
}
