use app_files::prelude::*;
use tempfile::tempdir;

// Generic over the component traits, the way an embedding app would hold it.
fn stash<S>(store: &S, dir: LogicalDirectory) -> FsResult<std::path::PathBuf>
where
    S: PathResolver + DirectoryStore + AtomicFileWriter,
{
    let path = store.try_create_directory(dir, &"inbox".into())?;
    store.write_atomic(b"hello", &path.join("note.txt"), WriteMode::CreateNew)?;
    Ok(path.join("note.txt"))
}

#[test]
fn prelude_covers_common_usage() {
    let td = tempdir().unwrap();
    let files = AppFiles::from_config(&Config::sandboxed(td.path()));

    let note = stash(&files, LogicalDirectory::Documents).unwrap();
    assert!(files.file_exists(&note));

    let err = stash(&files, LogicalDirectory::Documents).unwrap_err();
    assert!(matches!(err, Error::AlreadyExists(_)));

    assert!(matches!(
        files.try_remove_item("note.txt", &"inbox".into(), LogicalDirectory::Documents),
        Ok(Removal::Removed(_))
    ));
}
