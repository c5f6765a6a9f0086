use app_files::prelude::*;
use std::cell::Cell;
use std::path::PathBuf;

#[test]
fn resolution_is_deterministic_for_every_directory() {
    let files = AppFiles::sandboxed("/definitely/not/there");
    for dir in LogicalDirectory::ALL {
        let a = files.resolve(dir, &"x/y".into(), Some("f.txt")).unwrap();
        let b = files.resolve(dir, &"x/y".into(), Some("f.txt")).unwrap();
        assert_eq!(a, b);
        assert!(a.ends_with(format!("{}/x/y/f.txt", dir.slug())));
    }
}

#[test]
fn string_and_segment_forms_agree() {
    let files = AppFiles::sandboxed("/sb");
    let dir = LogicalDirectory::AppSupport;
    let split: RelativePath = ["a", "b"].into_iter().collect();
    assert_eq!(
        files.resolve(dir, &"a/b".into(), None).unwrap(),
        files.resolve(dir, &split, None).unwrap()
    );
    assert_eq!(
        files.resolve(dir, &"".into(), Some("n")).unwrap(),
        files.resolve(dir, &RelativePath::default(), Some("n")).unwrap()
    );
}

/// Counts lookups and returns a root that changes between calls.
struct MovingRoot {
    calls: Cell<u32>,
}

impl DirectoryLookup for MovingRoot {
    fn lookup(&self, _dir: LogicalDirectory) -> Option<PathBuf> {
        let n = self.calls.get() + 1;
        self.calls.set(n);
        Some(PathBuf::from(format!("/root{n}")))
    }
}

#[test]
fn roots_are_never_cached() {
    let lookup = MovingRoot { calls: Cell::new(0) };
    let files = AppFiles::new(&lookup, OsFileSystem);
    let first = files.resolve(LogicalDirectory::Documents, &"".into(), None).unwrap();
    let second = files.resolve(LogicalDirectory::Documents, &"".into(), None).unwrap();
    assert_eq!(first, PathBuf::from("/root1"));
    assert_eq!(second, PathBuf::from("/root2"));
    assert_eq!(lookup.calls.get(), 2);
}

#[test]
fn unavailable_root_surfaces_as_false() {
    struct Nothing;
    impl DirectoryLookup for Nothing {
        fn lookup(&self, _dir: LogicalDirectory) -> Option<PathBuf> {
            None
        }
    }
    let files = AppFiles::new(Nothing, OsFileSystem);
    assert!(!files.create_directory(LogicalDirectory::AppSupport, "a"));
    assert!(!files.write_string_to_file("x", LogicalDirectory::AppSupport, "f", ""));
    let err = files.try_create_directory(LogicalDirectory::Caches, &"a".into()).unwrap_err();
    assert_eq!(err.code(), "directory_unavailable");
    // void surfaces swallow it
    files.remove_directory(LogicalDirectory::AppSupport, "a");
    files.copy_file_atomically("f", "", "", LogicalDirectory::AppSupport, LogicalDirectory::Documents);
}
