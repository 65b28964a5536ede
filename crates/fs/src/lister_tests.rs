use super::*;

use std::{
    fs::{create_dir, write},
    time::{Duration, UNIX_EPOCH},
};

fn names(entries: &[RawEntry]) -> Vec<&str> {
    let mut names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    names.sort();
    names
}

#[test]
fn to_datetime_handles_none_and_various_times() {
    assert_eq!(to_datetime(None), None);
    assert_eq!(
        to_datetime(Some(UNIX_EPOCH + Duration::from_secs(42))).map(|d| d.timestamp()),
        Some(42)
    );
}

#[test]
fn list_dir_classifies_files_and_directories() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    // root/
    //   a.pdf
    //   notes.txt
    //   sub/
    //     deep.pdf
    write(root.join("a.pdf"), b"%PDF").expect("write a.pdf");
    write(root.join("notes.txt"), b"n").expect("write notes.txt");
    create_dir(root.join("sub")).expect("create sub");
    write(root.join("sub").join("deep.pdf"), b"%PDF").expect("write deep.pdf");

    let entries = list_dir(root).expect("list_dir");
    assert_eq!(names(&entries), vec!["a.pdf", "notes.txt", "sub"]);

    let sub = entries.iter().find(|e| e.name == "sub").expect("sub entry");
    assert_eq!(sub.kind, EntryKind::Dir);
    assert_eq!(sub.full_path, root.join("sub"));
    assert!(!sub.is_symlink);

    let pdf = entries.iter().find(|e| e.name == "a.pdf").expect("pdf entry");
    assert_eq!(pdf.kind, EntryKind::File);
    assert!(pdf.last_modified.is_some());
}

#[test]
fn list_dir_reports_hidden_entries_unfiltered() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    write(tmp.path().join(".hidden.pdf"), b"x").expect("write hidden");

    let entries = list_dir(tmp.path()).expect("list_dir");
    assert_eq!(entries.len(), 1);
    assert!(entries[0].is_hidden());
}

#[test]
fn list_dir_empty_directory_is_ok() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    assert!(list_dir(tmp.path()).expect("list_dir").is_empty());
}

#[test]
fn list_dir_missing_path_is_not_found() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let missing = tmp.path().join("nope");

    match list_dir(&missing) {
        Err(FsError::NotFound(p)) => assert_eq!(p, missing),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn list_dir_on_file_is_not_a_directory() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let file = tmp.path().join("doc.pdf");
    write(&file, b"x").expect("write file");

    assert!(matches!(list_dir(&file), Err(FsError::NotADirectory(_))));
}

#[cfg(unix)]
#[test]
fn list_dir_follows_symlinks_for_kind_and_drops_dangling() {
    use std::os::unix::fs::symlink;

    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    create_dir(root.join("real")).expect("create real");
    symlink(root.join("real"), root.join("alias")).expect("symlink dir");
    symlink(root.join("gone"), root.join("dangling")).expect("symlink dangling");

    let entries = list_dir(root).expect("list_dir");
    assert_eq!(names(&entries), vec!["alias", "real"]);

    let alias = entries.iter().find(|e| e.name == "alias").expect("alias");
    assert!(alias.is_dir());
    assert!(alias.is_symlink);
}
