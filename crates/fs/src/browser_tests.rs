use super::*;

use std::{
    fs::{create_dir, write},
    sync::Arc,
};

use crate::{
    excludes::ExcludeRules,
    permission::{AccessTier, PermissionGate, PermissionSubsystem},
};

struct Denied;

impl PermissionSubsystem for Denied {
    fn has_broad_access(&self) -> bool {
        false
    }
    fn request_broad_access(&self, _intent: &str) {}
    fn has_scoped_access(&self) -> bool {
        false
    }
    fn request_scoped_access(&self) -> bool {
        false
    }
}

fn names(listing: &[DirectoryEntry]) -> Vec<&str> {
    listing.iter().map(|e| e.display_name.as_str()).collect()
}

fn entry(location: &str) -> DirectoryEntry {
    DirectoryEntry {
        location: location.to_owned(),
        display_name: location.rsplit('/').next().unwrap_or(location).to_owned(),
        is_folder: false,
        last_modified: None,
    }
}

#[test]
fn browse_lists_folders_then_pdfs_alphabetically() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path().join("root");
    create_dir(&root).expect("create root");

    // root/
    //   B/  A/  doc.pdf  Image.png
    create_dir(root.join("B")).expect("create B");
    create_dir(root.join("A")).expect("create A");
    write(root.join("doc.pdf"), b"%PDF").expect("write doc.pdf");
    write(root.join("Image.png"), b"png").expect("write Image.png");

    let ctx = ScanContext::for_storage_root(tmp.path().to_path_buf());
    let listing = browse(&ctx, &root).expect("browse");

    assert_eq!(names(listing.entries()), vec!["A", "B", "doc.pdf"]);
    assert_eq!(names(listing.folders()), vec!["A", "B"]);
    assert_eq!(names(listing.files()), vec!["doc.pdf"]);
    assert!(listing.folders().iter().all(|e| e.is_folder));
    assert!(listing.files().iter().all(|e| !e.is_folder));
    assert_eq!(
        listing.files()[0].location,
        root.join("doc.pdf").to_string_lossy()
    );
}

#[test]
fn browse_sorts_each_group_with_name_collation() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    for d in ["zeta", "Alpha", "beta"] {
        create_dir(root.join(d)).expect("create dir");
    }
    for f in ["b.PDF", "A.pdf", "a.pdf", "C.pdf"] {
        write(root.join(f), b"%PDF").expect("write pdf");
    }

    let ctx = ScanContext::for_storage_root(root.to_path_buf());
    let listing = browse(&ctx, root).expect("browse");

    assert_eq!(
        names(listing.entries()),
        vec!["Alpha", "beta", "zeta", "a.pdf", "A.pdf", "b.PDF", "C.pdf"]
    );
}

#[test]
fn browse_never_returns_hidden_entries() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    create_dir(root.join(".cache")).expect("create .cache");
    write(root.join(".secret.pdf"), b"x").expect("write hidden pdf");
    write(root.join("shown.pdf"), b"x").expect("write pdf");

    let ctx = ScanContext::for_storage_root(root.to_path_buf());
    let listing = browse(&ctx, root).expect("browse");

    assert_eq!(names(listing.entries()), vec!["shown.pdf"]);
    assert!(listing.entries().iter().all(|e| !e.display_name.starts_with('.')));
}

#[test]
fn browse_hides_reserved_names_only_at_storage_root() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    create_dir(root.join("Android")).expect("create Android");
    create_dir(root.join("Download")).expect("create Download");
    create_dir(root.join("Download").join("Android")).expect("create nested Android");

    let ctx = ScanContext::for_storage_root(root.to_path_buf());

    let top = browse(&ctx, root).expect("browse root");
    assert_eq!(names(top.entries()), vec!["Download"]);

    let nested = browse(&ctx, &root.join("Download")).expect("browse Download");
    assert_eq!(names(nested.entries()), vec!["Android"]);
}

#[test]
fn browse_empty_directory_is_valid() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    write(tmp.path().join("notes.txt"), b"x").expect("write txt");

    let ctx = ScanContext::for_storage_root(tmp.path().to_path_buf());
    let listing = browse(&ctx, tmp.path()).expect("browse");
    assert!(listing.is_empty());
    assert_eq!(listing.len(), 0);
}

#[test]
fn browse_denied_gate_is_permission_error() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let ctx = ScanContext::new(
        PermissionGate::new(AccessTier::Broad, Arc::new(Denied)),
        ExcludeRules::new(tmp.path().to_path_buf()),
    );

    let err = browse(&ctx, tmp.path()).expect_err("should be denied");
    assert!(err.is_permission(), "{err:?}");
}

#[test]
fn browse_missing_directory_is_surfaced() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let ctx = ScanContext::for_storage_root(tmp.path().to_path_buf());

    let err = browse(&ctx, &tmp.path().join("gone")).expect_err("missing dir");
    assert!(matches!(err, FsError::NotFound(_)), "{err:?}");
}

#[test]
fn group_by_parent_groups_and_orders_parents() {
    let entries = vec![
        entry("/s/zeta/one.pdf"),
        entry("/s/alpha/two.pdf"),
        entry("/s/zeta/three.pdf"),
    ];

    let groups = group_by_parent(&entries);
    let parents: Vec<_> = groups.iter().map(|(p, _)| p.as_str()).collect();
    assert_eq!(parents, vec!["/s/alpha", "/s/zeta"]);
    assert_eq!(names(&groups[1].1), vec!["one.pdf", "three.pdf"]);
}
