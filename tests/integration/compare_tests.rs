use dupecheck::duplicates::{Comparison, ContentComparator, MIN_CHUNK_SIZE};
use dupecheck::scanner::FileDescriptor;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_identity_holds_for_every_chunk_size() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blob.bin");
    let content: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
    fs::write(&path, &content).unwrap();
    let file = FileDescriptor::from_path(&path).unwrap();
    let copy = dir.path().join("copy.bin");
    fs::write(&copy, &content).unwrap();
    let copy = FileDescriptor::from_path(&copy).unwrap();

    for chunk in [MIN_CHUNK_SIZE, 13, 4096, 5000, 1 << 20] {
        let comparator = ContentComparator::new(chunk);
        assert!(comparator.equal(&file, &file));
        assert!(comparator.equal(&file, &copy), "chunk size {}", chunk);
    }
}

#[test]
fn test_first_and_last_byte_differences() {
    let dir = tempdir().unwrap();
    let base = vec![0x55u8; 3 * 1024];
    let mut first = base.clone();
    first[0] = 0;
    let mut last = base.clone();
    *last.last_mut().unwrap() = 0;

    let write = |name: &str, content: &[u8]| {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        FileDescriptor::from_path(&path).unwrap()
    };
    let base = write("base.bin", &base);
    let first = write("first.bin", &first);
    let last = write("last.bin", &last);

    let comparator = ContentComparator::new(1024);
    assert_eq!(comparator.compare(&base, &first), Comparison::Different);
    assert_eq!(comparator.compare(&base, &last), Comparison::Different);
    assert_eq!(comparator.compare(&last, &base), Comparison::Different);
}

#[test]
fn test_length_precheck_without_files() {
    let a = FileDescriptor::new(PathBuf::from("/nowhere/a.dat"), 1);
    let b = FileDescriptor::new(PathBuf::from("/nowhere/b.dat"), 2);

    let comparator = ContentComparator::default();
    assert!(!comparator.equal(&a, &b));
    assert!(!comparator.equal(&b, &a));
    assert_eq!(comparator.compare(&a, &b), Comparison::Different);
}

#[test]
fn test_compare_paths_on_directory() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("f.txt");
    fs::write(&file, "x").unwrap();

    assert_eq!(
        ContentComparator::default().compare_paths(dir.path(), &file),
        Comparison::Unreadable
    );
}
