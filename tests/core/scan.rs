use std::ffi::OsString;
use std::fs;
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use svc::core::error::SvcError;
use svc::core::scan::list_entries;
use tempfile::tempdir;

#[test]
fn entries_are_sorted_by_raw_bytes() {
    let tmp = tempdir().expect("tempdir");
    for name in ["zeta", "Alpha", "beta", "_under", "10-first", "2-second"] {
        fs::create_dir(tmp.path().join(name)).expect("mkdir");
    }

    let names = list_entries(tmp.path()).expect("list");
    assert_eq!(
        names.as_slice(),
        &["10-first", "2-second", "Alpha", "_under", "beta", "zeta"].map(OsString::from)
    );
}

#[test]
fn hidden_entries_are_never_listed() {
    let tmp = tempdir().expect("tempdir");
    fs::create_dir(tmp.path().join(".git")).expect("mkdir");
    fs::write(tmp.path().join(".x"), b"").expect("write");
    fs::create_dir(tmp.path().join("sshd")).expect("mkdir");
    fs::write(tmp.path().join("notes"), b"files count too").expect("write");

    let names = list_entries(tmp.path()).expect("list");
    assert_eq!(names.as_slice(), &["notes", "sshd"].map(OsString::from));
    assert!(names.iter().all(|n| n.as_bytes()[0] != b'.'));
}

#[test]
fn empty_directory_yields_empty_sequence() {
    let tmp = tempdir().expect("tempdir");
    let names = list_entries(tmp.path()).expect("list");
    assert!(names.is_empty());
}

#[test]
fn listing_is_reproducible() {
    let tmp = tempdir().expect("tempdir");
    for i in (0..30).rev() {
        fs::create_dir(tmp.path().join(format!("svc{i:02}"))).expect("mkdir");
    }
    let first = list_entries(tmp.path()).expect("list");
    let second = list_entries(tmp.path()).expect("list");
    assert_eq!(first, second);
    assert_eq!(first.len(), 30);
    assert_eq!(first[0], "svc00");
}

#[test]
fn missing_path_is_an_io_error() {
    let tmp = tempdir().expect("tempdir");
    let err = list_entries(&tmp.path().join("absent")).unwrap_err();
    assert!(matches!(err, SvcError::Io { .. }));
    assert!(err.chain().contains("absent"));
}

#[test]
fn non_utf8_names_keep_their_raw_bytes() {
    let tmp = tempdir().expect("tempdir");
    let raw = OsString::from_vec(b"caf\xe9".to_vec());
    fs::create_dir(tmp.path().join(&raw)).expect("mkdir");
    fs::create_dir(tmp.path().join("cafe")).expect("mkdir");

    let names = list_entries(tmp.path()).expect("list");
    assert_eq!(names.as_slice(), &[OsString::from("cafe"), raw]);
}
