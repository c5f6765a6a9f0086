//! Staged move: atomic copy, then removal of the source.
//!
//! Not transactional. If the process dies between publishing the copy and
//! removing the source, both files remain.

use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::platform::{DirectoryLookup, LogicalDirectory};

use super::copy::CopyOutcome;
use super::files::AppFiles;
use super::resolve::RelativePath;
use super::vfs::FileSystem;

impl<L: DirectoryLookup, F: FileSystem> AppFiles<L, F> {
    pub fn try_move_file_atomically(
        &self,
        name: &str,
        source_subpath: &RelativePath,
        dest_subpath: &RelativePath,
        source_dir: LogicalDirectory,
        dest_dir: LogicalDirectory,
    ) -> Result<CopyOutcome> {
        let outcome = self.try_copy_file_atomically(name, source_subpath, dest_subpath, source_dir, dest_dir)?;
        let CopyOutcome::Copied(destination) = &outcome else {
            debug!(name, "Source missing; nothing to move");
            return Ok(outcome);
        };

        let source = self.resolve_item(name, source_subpath, source_dir)?;
        if &source == destination {
            debug!(path = %source.display(), "Source and destination coincide; keeping file");
            return Ok(outcome);
        }

        self.try_remove_item(name, source_subpath, source_dir)?;
        info!(src = %source.display(), dest = %destination.display(), "Moved file atomically");
        Ok(outcome)
    }

    /// Void surface: failures are logged, a missing source is a no-op.
    pub fn move_file_atomically(
        &self,
        name: &str,
        source_subpath: &str,
        dest_subpath: &str,
        source_dir: LogicalDirectory,
        dest_dir: LogicalDirectory,
    ) {
        if let Err(e) = self.try_move_file_atomically(name, &source_subpath.into(), &dest_subpath.into(), source_dir, dest_dir) {
            warn!(code = e.code(), name, source_subpath, dest_subpath, error = %e, "Atomic move failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn moves_test_text_up_one_level() {
        let td = assert_fs::TempDir::new().unwrap();
        let files = AppFiles::sandboxed(td.path());
        assert!(files.write_string_to_file("TestText", LogicalDirectory::AppSupport, "test.txt", "a/b"));

        files.move_file_atomically("test.txt", "a/b", "a", LogicalDirectory::AppSupport, LogicalDirectory::AppSupport);

        td.child("app-support/a/test.txt").assert("TestText");
        assert!(!td.child("app-support/a/b/test.txt").path().exists());
    }

    #[test]
    fn moving_onto_itself_keeps_the_file() {
        let td = assert_fs::TempDir::new().unwrap();
        let files = AppFiles::sandboxed(td.path());
        td.child("documents/same.txt").write_str("keep").unwrap();
        let out = files
            .try_move_file_atomically("same.txt", &"".into(), &"".into(), LogicalDirectory::Documents, LogicalDirectory::Documents)
            .unwrap();
        assert!(out.is_copied());
        td.child("documents/same.txt").assert("keep");
    }

    #[test]
    fn missing_source_moves_nothing() {
        let td = assert_fs::TempDir::new().unwrap();
        let files = AppFiles::sandboxed(td.path());
        let out = files
            .try_move_file_atomically("none.txt", &"a".into(), &"b".into(), LogicalDirectory::Caches, LogicalDirectory::Documents)
            .unwrap();
        assert!(!out.is_copied());
        assert!(!td.child("documents").path().exists());
    }
}
