#![cfg(test)]

use std::ffi::CString;
use std::fs;
use std::os::unix::fs::symlink;
use std::path::Path;

use tempfile::TempDir;

use crate::fs::{Directory, EntryType, File, PATH_MAX, set_current_dir};

fn fixture() -> TempDir {
    let dir = TempDir::new().expect("failed to create temporary directory");
    fs::write(dir.path().join("file.txt"), b"contents").expect("failed to create file");
    fs::create_dir(dir.path().join("sub")).expect("failed to create subdirectory");
    dir
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temporary path should be UTF-8")
}

fn listing(dir_path: &str, accepted: EntryType) -> Vec<(String, EntryType)> {
    let mut entries: Vec<(String, EntryType)> = Directory::open(dir_path, accepted)
        .expect("failed to open directory")
        .map(|entry| (entry.name, entry.entry_type))
        .collect();
    entries.sort();
    entries
}

#[test]
fn test_open_missing_dir() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("no-such-dir");
    assert!(
        Directory::open(path_str(&missing), EntryType::ALL).is_err(),
        "Opening a nonexistent directory should fail."
    );
}

#[test]
fn test_open_rejects_bad_paths() {
    assert!(
        Directory::open(&"a".repeat(PATH_MAX), EntryType::ALL).is_err(),
        "An over-long path should be rejected before the syscall."
    );
    assert!(
        Directory::open("/tmp/\0sneaky", EntryType::ALL).is_err(),
        "A path containing a nul byte should be rejected."
    );
}

#[test]
fn test_listing_all() {
    let dir = fixture();
    let entries = listing(path_str(dir.path()), EntryType::ALL);
    assert_eq!(
        entries,
        vec![
            ("file.txt".to_owned(), EntryType::REGULAR_FILE),
            ("sub".to_owned(), EntryType::DIRECTORY),
        ],
        "All entries should be yielded with their kinds, without dot entries."
    );
}

#[test]
fn test_listing_filtered() {
    let dir = fixture();
    assert_eq!(
        listing(path_str(dir.path()), EntryType::DIRECTORY),
        vec![("sub".to_owned(), EntryType::DIRECTORY)],
        "Only entries intersecting the filter should be yielded."
    );
    assert_eq!(
        listing(path_str(dir.path()), EntryType::SOCKET),
        vec![],
        "A filter matching nothing should yield nothing."
    );
}

#[test]
fn test_empty_filter_defaults_to_all() {
    let dir = fixture();
    assert_eq!(
        listing(path_str(dir.path()), EntryType::UNKNOWN),
        listing(path_str(dir.path()), EntryType::ALL),
        "An empty filter should behave like ALL."
    );
}

#[test]
fn test_no_dot_entries() {
    let dir = TempDir::new().unwrap();
    assert_eq!(
        listing(path_str(dir.path()), EntryType::ALL),
        vec![],
        "An empty directory should yield nothing, . and .. included."
    );
}

#[test]
fn test_symlink_type() {
    let dir = fixture();
    symlink("file.txt", dir.path().join("link")).expect("failed to create symlink");

    assert_eq!(
        listing(path_str(dir.path()), EntryType::SYMLINK),
        vec![("link".to_owned(), EntryType::SYMLINK)],
        "A symlink should be classified as its own kind, not its target's."
    );
}

#[test]
fn test_fifo_type() {
    let dir = fixture();
    let fifo = CString::new(path_str(&dir.path().join("pipe"))).unwrap();
    // SAFETY: fifo is nul-terminated for the lifetime of the call.
    assert_eq!(
        unsafe { libc::mkfifo(fifo.as_ptr(), 0o644) },
        0,
        "mkfifo should succeed in a fresh temporary directory."
    );

    assert_eq!(
        listing(path_str(dir.path()), EntryType::FIFO),
        vec![("pipe".to_owned(), EntryType::FIFO)],
    );
}

#[test]
fn test_close() {
    let dir = fixture();
    let stream = Directory::open(path_str(dir.path()), EntryType::ALL).unwrap();
    stream.close().expect("closing an open stream should succeed");
}

#[test]
fn test_file_open_close() {
    let dir = fixture();
    let file = File::open(path_str(&dir.path().join("file.txt"))).expect("failed to open file");
    file.close().expect("closing an open file should succeed");

    let missing = File::open(path_str(&dir.path().join("no-such-file")));
    assert!(
        missing.is_err_and(|e| e.is_missing_component()),
        "Opening a missing file should report the missing component."
    );
    assert!(
        File::open(&"a".repeat(PATH_MAX)).is_err_and(|e| e.is_path_length()),
        "An over-long path should be rejected before the syscall."
    );
}

#[test]
fn test_set_current_dir() {
    let dir = TempDir::new().unwrap();
    let previous = std::env::current_dir().unwrap();

    set_current_dir(path_str(dir.path())).expect("failed to change directory");
    assert_eq!(
        std::env::current_dir().unwrap().canonicalize().unwrap(),
        dir.path().canonicalize().unwrap(),
        "The working directory should be the one requested."
    );

    set_current_dir(path_str(&previous)).unwrap();

    let missing = dir.path().join("no-such-dir");
    assert!(
        set_current_dir(path_str(&missing)).is_err_and(|e| e.is_missing_component()),
        "Changing into a missing directory should fail."
    );
}
