//! I/O error helpers.
//!
//! Turns a raw io::Error into an `FsError::Io` whose message names the
//! operation and path and carries a platform-aware hint.
//!
//! Usage:
//!   fs.create_dir_all(dir).map_err(io_error_with_help("create directory", dir))?;

use std::io;
use std::path::Path;

use crate::errors::FsError;

/// Format a human-friendly message with op/path plus platform-aware hints.
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" (permission denied; check ownership and write permissions)");
                }
                libc::EXDEV => {
                    msg.push_str(" (cross-filesystem; atomic rename not possible)");
                }
                libc::ENOENT => {
                    msg.push_str(" (path not found; verify it exists)");
                }
                libc::EEXIST => {
                    msg.push_str(" (already exists; remove the target or pick another name)");
                }
                libc::ENOTDIR => {
                    msg.push_str(" (a path component is a file, not a directory)");
                }
                libc::ENOSPC => {
                    msg.push_str(" (insufficient space on device)");
                }
                libc::EROFS => {
                    msg.push_str(" (read-only filesystem; cannot write here)");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str(" (filename or path too long; shorten path segments)");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str(" (access denied; check permissions)"),
                17 => msg.push_str(" (not same device; cross-filesystem move)"),
                32 => msg.push_str(" (sharing violation; file is in use)"),
                2 | 3 => msg.push_str(" (path not found; verify it exists)"),
                80 | 183 => msg.push_str(" (already exists; pick a unique name)"),
                112 => msg.push_str(" (insufficient disk space)"),
                19 => msg.push_str(" (write protected / read-only media)"),
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str(" (permission denied; check ownership and write permissions)");
            }
            io::ErrorKind::NotFound => {
                msg.push_str(" (path not found; verify it exists)");
            }
            io::ErrorKind::AlreadyExists => {
                msg.push_str(" (already exists; remove the target or pick another name)");
            }
            _ => {}
        }
    }

    msg
}

/// Returns a closure suitable for `.map_err(...)` that converts io::Error -> FsError.
pub fn io_error_with_help<'a>(op: &'a str, path: &'a Path) -> impl FnOnce(io::Error) -> FsError + 'a {
    move |e: io::Error| FsError::Io {
        message: build_message(op, path, &e),
        path: path.to_path_buf(),
        source: e,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notfound_fallback_hint_includes_path() {
        let p = Path::new("/nonexistent/path/for/test");
        let err = io_error_with_help("open", p)(io::Error::from(io::ErrorKind::NotFound));
        let msg = err.to_string();
        assert!(msg.contains("open"));
        assert!(msg.contains(p.to_string_lossy().as_ref()));
        assert!(msg.contains("path not found"));
        assert_eq!(err.code(), "io_failure");
    }

    #[cfg(unix)]
    #[test]
    fn enospc_hint_present() {
        let err = io_error_with_help("write", Path::new("/tmp"))(io::Error::from_raw_os_error(libc::ENOSPC));
        let msg = err.to_string();
        assert!(msg.contains("insufficient space"), "msg was: {}", msg);
        assert!(msg.contains("os code"), "should include os code in message");
    }

    #[cfg(unix)]
    #[test]
    fn enotdir_hint_present() {
        let err = io_error_with_help("create directory", Path::new("/tmp/f/x"))(io::Error::from_raw_os_error(libc::ENOTDIR));
        assert!(err.to_string().contains("is a file"));
    }

    #[test]
    fn source_is_preserved() {
        use std::error::Error as _;
        let err = io_error_with_help("read", Path::new("x"))(io::Error::from(io::ErrorKind::PermissionDenied));
        let src = err.source().and_then(|s| s.downcast_ref::<io::Error>()).unwrap();
        assert_eq!(src.kind(), io::ErrorKind::PermissionDenied);
    }
}
