#![cfg(unix)]
use app_files::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use tempfile::tempdir;

fn running_as_root() -> bool {
    // Root can write into 0555 directories, which defeats these tests' premise.
    unsafe { libc::geteuid() == 0 }
}

#[test]
fn staging_is_cleaned_when_destination_is_readonly() {
    if running_as_root() {
        eprintln!("skipping: running as root");
        return;
    }

    let td = tempdir().unwrap();
    let files = AppFiles::sandboxed(td.path());
    assert!(files.write_string_to_file("hello", LogicalDirectory::Documents, "f.txt", ""));

    let dest_dir = td.path().join("app-support").join("locked");
    fs::create_dir_all(&dest_dir).unwrap();
    fs::set_permissions(&dest_dir, fs::Permissions::from_mode(0o555)).unwrap();

    let res = files.try_copy_file_atomically(
        "f.txt",
        &"".into(),
        &"locked".into(),
        LogicalDirectory::Documents,
        LogicalDirectory::AppSupport,
    );
    let err = res.unwrap_err();
    assert_eq!(err.code(), "io_failure");
    assert!(err.to_string().contains("permission denied"), "msg was: {err}");

    assert_eq!(fs::read_dir(&dest_dir).unwrap().count(), 0);
    assert_eq!(fs::read_dir(td.path().join("temp-staging")).unwrap().count(), 0);

    fs::set_permissions(&dest_dir, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn create_directory_under_readonly_parent_is_false() {
    if running_as_root() {
        eprintln!("skipping: running as root");
        return;
    }

    let td = tempdir().unwrap();
    let files = AppFiles::sandboxed(td.path());
    assert!(files.create_directory(LogicalDirectory::Caches, ""));
    let root = td.path().join("caches");
    fs::set_permissions(&root, fs::Permissions::from_mode(0o555)).unwrap();

    assert!(!files.create_directory(LogicalDirectory::Caches, "x/y"));
    assert!(!root.join("x").exists());

    fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();
}
