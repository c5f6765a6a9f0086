//! Staged copy between logical directories.
//! - Reads the source fully into memory (missing source is a silent no-op)
//! - Stages the bytes in a fresh scratch area under the staging root
//! - Ensures the destination directory exists
//! - Reads the staged copy back and publishes it with an atomic replace
//!
//! The staging root may sit on another volume than the destination, so the
//! final step is a write + rename next to the destination rather than a rename
//! out of the staging area. The source read is not protected against concurrent
//! writers.

use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::errors::{FsError, Result};
use crate::platform::{DirectoryLookup, LogicalDirectory};

use super::atomic::{AtomicFileWriter, WriteMode};
use super::directory::DirectoryStore;
use super::files::AppFiles;
use super::helpers::io_error_with_help;
use super::resolve::{PathResolver, RelativePath};
use super::staging::StagingArea;
use super::vfs::FileSystem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Published at this path.
    Copied(PathBuf),
    /// Nothing at the source; nothing was done.
    SourceMissing(PathBuf),
}

impl CopyOutcome {
    pub fn is_copied(&self) -> bool {
        matches!(self, CopyOutcome::Copied(_))
    }
}

impl<L: DirectoryLookup, F: FileSystem> AppFiles<L, F> {
    pub fn try_copy_file_atomically(
        &self,
        name: &str,
        source_subpath: &RelativePath,
        dest_subpath: &RelativePath,
        source_dir: LogicalDirectory,
        dest_dir: LogicalDirectory,
    ) -> Result<CopyOutcome> {
        let source = self.resolve(source_dir, source_subpath, Some(name))?;
        if !self.fs.target_exists(&source) {
            debug!(path = %source.display(), "Source missing; skipping copy");
            return Ok(CopyOutcome::SourceMissing(source));
        }
        let destination = self.resolve(dest_dir, dest_subpath, Some(name))?;

        let data = self.fs.read(&source).map_err(io_error_with_help("read source", &source))?;

        let staging_root = self.root(LogicalDirectory::TempStaging)?;
        let area = StagingArea::allocate(&self.fs, &staging_root)?;
        let staged = area.stage(name, &data, self.durable)?;
        drop(data);
        debug!(staging = %area.path().display(), "Source staged");

        self.try_create_directory(dest_dir, dest_subpath)?;

        let staged_bytes = self.fs.read(&staged).map_err(io_error_with_help("read staged file", &staged))?;
        self.force_write(&staged_bytes, &destination)?;
        drop(area);

        info!(src = %source.display(), dest = %destination.display(), "Copied file atomically");
        Ok(CopyOutcome::Copied(destination))
    }

    /// Void surface: failures are logged, a missing source is a no-op.
    pub fn copy_file_atomically(
        &self,
        name: &str,
        source_subpath: &str,
        dest_subpath: &str,
        source_dir: LogicalDirectory,
        dest_dir: LogicalDirectory,
    ) {
        if let Err(e) = self.try_copy_file_atomically(name, &source_subpath.into(), &dest_subpath.into(), source_dir, dest_dir) {
            warn!(code = e.code(), name, source_subpath, dest_subpath, error = %e, "Atomic copy failed");
        }
    }

    /// Copy under a new name within one logical directory; refuses to overwrite.
    pub fn try_copy_file(
        &self,
        origin_name: &str,
        origin_subpath: &RelativePath,
        dest_name: &str,
        dest_subpath: &RelativePath,
        directory: LogicalDirectory,
    ) -> Result<PathBuf> {
        let source = self.resolve(directory, origin_subpath, Some(origin_name))?;
        if !self.fs.target_exists(&source) {
            return Err(FsError::NotFound(source));
        }
        let destination = self.resolve(directory, dest_subpath, Some(dest_name))?;
        let data = self.fs.read(&source).map_err(io_error_with_help("read source", &source))?;
        self.write_atomic(&data, &destination, WriteMode::CreateNew)?;
        info!(src = %source.display(), dest = %destination.display(), "Copied file");
        Ok(destination)
    }

    pub fn copy_file(
        &self,
        origin_name: &str,
        origin_subpath: &str,
        dest_name: &str,
        dest_subpath: &str,
        directory: LogicalDirectory,
    ) -> bool {
        match self.try_copy_file(origin_name, &origin_subpath.into(), dest_name, &dest_subpath.into(), directory) {
            Ok(_) => true,
            Err(e) => {
                warn!(code = e.code(), origin_name, dest_name, error = %e, "Copy failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn sandbox() -> (assert_fs::TempDir, AppFiles) {
        let td = assert_fs::TempDir::new().unwrap();
        let files = AppFiles::sandboxed(td.path());
        (td, files)
    }

    #[test]
    fn copies_across_logical_directories() {
        let (td, files) = sandbox();
        td.child("documents/in/report.txt").write_str("payload").unwrap();

        let out = files
            .try_copy_file_atomically("report.txt", &"in".into(), &"out/x".into(), LogicalDirectory::Documents, LogicalDirectory::AppSupport)
            .unwrap();
        assert!(out.is_copied());
        td.child("app-support/out/x/report.txt").assert("payload");
        td.child("documents/in/report.txt").assert("payload");
    }

    #[test]
    fn staging_root_is_left_empty() {
        let (td, files) = sandbox();
        td.child("caches/f").write_str("1").unwrap();
        files.copy_file_atomically("f", "", "dup", LogicalDirectory::Caches, LogicalDirectory::Caches);
        td.child("caches/dup/f").assert("1");
        let staging = td.child("temp-staging");
        assert_eq!(std::fs::read_dir(staging.path()).unwrap().count(), 0);
    }

    #[test]
    fn missing_source_is_noop() {
        let (td, files) = sandbox();
        let out = files
            .try_copy_file_atomically("ghost.txt", &"a".into(), &"b".into(), LogicalDirectory::AppSupport, LogicalDirectory::AppSupport)
            .unwrap();
        assert!(matches!(out, CopyOutcome::SourceMissing(_)));
        assert!(!td.child("app-support/b").path().exists());
        assert!(!td.child("temp-staging").path().exists());
    }

    #[test]
    fn missing_source_wins_over_unavailable_destination() {
        struct DocumentsOnly(PathBuf);
        impl DirectoryLookup for DocumentsOnly {
            fn lookup(&self, dir: LogicalDirectory) -> Option<PathBuf> {
                (dir == LogicalDirectory::Documents).then(|| self.0.join("documents"))
            }
        }
        let td = assert_fs::TempDir::new().unwrap();
        let files = AppFiles::new(DocumentsOnly(td.path().to_path_buf()), crate::fs_ops::OsFileSystem);
        let out = files
            .try_copy_file_atomically("f.txt", &"".into(), &"".into(), LogicalDirectory::Documents, LogicalDirectory::Caches)
            .unwrap();
        assert!(matches!(out, CopyOutcome::SourceMissing(_)));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_link_source_is_missing() {
        let (td, files) = sandbox();
        td.child("documents").create_dir_all().unwrap();
        std::os::unix::fs::symlink(td.path().join("nowhere"), td.child("documents/f.txt").path()).unwrap();

        let out = files
            .try_copy_file_atomically("f.txt", &"".into(), &"out".into(), LogicalDirectory::Documents, LogicalDirectory::Caches)
            .unwrap();
        assert!(matches!(out, CopyOutcome::SourceMissing(_)));
        assert!(!td.child("caches/out").path().exists());

        let moved = files
            .try_move_file_atomically("f.txt", &"".into(), &"out".into(), LogicalDirectory::Documents, LogicalDirectory::Caches)
            .unwrap();
        assert!(!moved.is_copied());

        let err = files
            .try_copy_file("f.txt", &"".into(), "g.txt", &"".into(), LogicalDirectory::Documents)
            .unwrap_err();
        assert!(matches!(err, FsError::NotFound(_)));
    }

    #[test]
    fn copy_overwrites_existing_destination() {
        let (td, files) = sandbox();
        td.child("documents/src/f.txt").write_str("new").unwrap();
        td.child("documents/dst/f.txt").write_str("old").unwrap();
        files.copy_file_atomically("f.txt", "src", "dst", LogicalDirectory::Documents, LogicalDirectory::Documents);
        td.child("documents/dst/f.txt").assert("new");
    }

    #[test]
    fn plain_copy_refuses_to_clobber() {
        let (td, files) = sandbox();
        td.child("app-support/a/b/test.txt").write_str("TestText").unwrap();
        assert!(files.copy_file("test.txt", "a/b", "testCopy.txt", "a", LogicalDirectory::AppSupport));
        td.child("app-support/a/testCopy.txt").assert("TestText");
        assert!(!files.copy_file("test.txt", "a/b", "testCopy.txt", "a", LogicalDirectory::AppSupport));

        let err = files
            .try_copy_file("nope", &"".into(), "x", &"".into(), LogicalDirectory::AppSupport)
            .unwrap_err();
        assert!(matches!(err, FsError::NotFound(_)));
    }
}
