//! Filesystem operations: modularized.

mod atomic;
mod copy;
mod directory;
mod file_move;
mod files;
mod helpers;
mod remove;
mod resolve;
mod staging;
mod util;
mod vfs;

pub use atomic::{AtomicFileWriter, WriteMode};
pub use copy::CopyOutcome;
pub use directory::{DirectoryStore, Removal};
pub use files::AppFiles;
pub use helpers::io_error_with_help;
pub use resolve::{PathResolver, RelativePath};
pub use vfs::{FileSystem, OsFileSystem};
