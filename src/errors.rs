//! Typed error definitions for app_files.
//! Every `try_*` operation returns one of these; the boolean/void surface
//! collapses them into a logged outcome.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::platform::LogicalDirectory;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("Logical directory '{0}' has no root on this platform")]
    DirectoryUnavailable(LogicalDirectory),

    #[error("Invalid path component '{0}'")]
    InvalidComponent(String),

    #[error("File already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("Not found: {0}")]
    NotFound(PathBuf),

    #[error("Parent directory unavailable for {path}: {source}")]
    ParentUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{message}")]
    Io {
        message: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Stable short code used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            FsError::DirectoryUnavailable(_) => "directory_unavailable",
            FsError::InvalidComponent(_) => "invalid_component",
            FsError::AlreadyExists(_) => "already_exists",
            FsError::NotFound(_) => "not_found",
            FsError::ParentUnavailable { .. } => "parent_unavailable",
            FsError::Io { .. } => "io_failure",
        }
    }

    /// Path the error refers to, when there is one.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            FsError::AlreadyExists(p) | FsError::NotFound(p) => Some(p),
            FsError::ParentUnavailable { path, .. } | FsError::Io { path, .. } => Some(path),
            FsError::DirectoryUnavailable(_) | FsError::InvalidComponent(_) => None,
        }
    }
}

pub type Result<T, E = FsError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct_per_variant() {
        let errs = [
            FsError::DirectoryUnavailable(LogicalDirectory::Documents),
            FsError::InvalidComponent("..".into()),
            FsError::AlreadyExists(PathBuf::from("/x")),
            FsError::NotFound(PathBuf::from("/x")),
            FsError::ParentUnavailable {
                path: PathBuf::from("/x"),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            },
        ];
        let mut codes: Vec<_> = errs.iter().map(FsError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errs.len());
    }

    #[test]
    fn display_names_the_directory() {
        let e = FsError::DirectoryUnavailable(LogicalDirectory::AppSupport);
        assert!(e.to_string().contains("app-support"));
        assert!(e.path().is_none());
    }
}
