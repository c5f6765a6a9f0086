//! Path resolution.
//! Maps (logical directory, relative path, filename) to an absolute path.
//! Pure apart from the root lookup; nothing is created or checked on disk.

use std::fmt;
use std::path::PathBuf;
use tracing::debug;

use crate::errors::{FsError, Result};
use crate::platform::{DirectoryLookup, LogicalDirectory};

use super::files::AppFiles;
use super::vfs::FileSystem;

/// Subdirectory chain under a logical directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RelativePath {
    segments: Vec<String>,
}

impl RelativePath {
    /// Split on `/`, dropping empty segments: `""` has none, `"a//b/"` is `[a, b]`.
    pub fn parse(s: &str) -> Self {
        Self::from_segments(s.split('/'))
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = segments
            .into_iter()
            .map(|s| s.as_ref().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn first(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Only the top-level segment (empty stays empty).
    pub fn top_level(&self) -> RelativePath {
        Self::from_segments(self.first())
    }
}

impl From<&str> for RelativePath {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<&String> for RelativePath {
    fn from(s: &String) -> Self {
        Self::parse(s)
    }
}

impl<S: AsRef<str>> FromIterator<S> for RelativePath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_segments(iter)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// Reject anything that is not a single plain component.
fn check_component(s: &str) -> Result<()> {
    let bad = s.is_empty() || s == "." || s == ".." || s.contains('/') || s.contains('\\');
    if bad {
        return Err(FsError::InvalidComponent(s.to_owned()));
    }
    Ok(())
}

pub trait PathResolver {
    /// Platform root for `directory`, looked up fresh.
    fn root(&self, directory: LogicalDirectory) -> Result<PathBuf>;

    /// `root/<segments...>/<filename?>`.
    fn resolve(&self, directory: LogicalDirectory, subpath: &RelativePath, filename: Option<&str>) -> Result<PathBuf>;
}

impl<L: DirectoryLookup, F: FileSystem> PathResolver for AppFiles<L, F> {
    fn root(&self, directory: LogicalDirectory) -> Result<PathBuf> {
        self.lookup
            .lookup(directory)
            .ok_or(FsError::DirectoryUnavailable(directory))
    }

    fn resolve(&self, directory: LogicalDirectory, subpath: &RelativePath, filename: Option<&str>) -> Result<PathBuf> {
        let mut path = self.root(directory)?;
        for segment in subpath.segments() {
            check_component(segment)?;
            path.push(segment);
        }
        if let Some(name) = filename {
            check_component(name)?;
            path.push(name);
        }
        debug!(directory = %directory, subpath = %subpath, path = %path.display(), "Resolved path");
        Ok(path)
    }
}
