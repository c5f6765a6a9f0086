//! Core library for `app_files`.
//!
//! Directory resolution, existence checks, directory creation/removal and
//! atomic file write/copy/move scoped to well-known per-platform directories.
//! Writes go through a temp sibling plus a single rename; copies and moves
//! stage through a one-shot scratch area before publishing.
//!
//! ```no_run
//! use app_files::prelude::*;
//!
//! let files = AppFiles::system();
//! files.create_directory(LogicalDirectory::AppSupport, "a/b");
//! files.write_string_to_file("TestText", LogicalDirectory::AppSupport, "test.txt", "a/b");
//! files.move_file_atomically("test.txt", "a/b", "a", LogicalDirectory::AppSupport, LogicalDirectory::AppSupport);
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;

pub use config::{default_config_path, default_log_path, path_has_symlink_ancestor, Config, LogLevel};
pub use errors::FsError;
pub use fs_ops::{
    AppFiles, AtomicFileWriter, CopyOutcome, DirectoryStore, FileSystem, OsFileSystem, PathResolver,
    RelativePath, Removal, WriteMode,
};
pub use platform::{DirectoryLookup, LogicalDirectory, Roots};

/// Convenient glob import for callers.
pub mod prelude {
    pub use crate::errors::{FsError as Error, Result as FsResult};
    pub use crate::{
        AppFiles, AtomicFileWriter, Config, CopyOutcome, DirectoryLookup, DirectoryStore, FileSystem,
        LogLevel, LogicalDirectory, OsFileSystem, PathResolver, RelativePath, Removal, Roots, WriteMode,
    };
}
