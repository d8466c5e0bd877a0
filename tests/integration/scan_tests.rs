use dupecheck::duplicates::{DuplicateFinder, FinderConfig, FinderError};
use dupecheck::report::NO_DUPLICATES_MESSAGE;
use dupecheck::scanner::WalkerConfig;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_file(root: &Path, relative: &str, content: &[u8]) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    File::create(&path).unwrap().write_all(content).unwrap();
    path
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();

    let report = dupecheck::scan(dir.path());

    assert!(!report.has_duplicates());
    assert_eq!(report.summary().total_files, 0);
    assert_eq!(report.render_text().trim_end(), NO_DUPLICATES_MESSAGE);
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "a/notes.txt", b"content a");
    write_file(dir.path(), "b/notes.txt", b"content b");
    write_file(dir.path(), "c/notes.txt", b"content c");

    let report = dupecheck::scan(dir.path());

    assert!(report.groups().is_empty());
    assert_eq!(report.summary().total_files, 3);
    assert_eq!(report.summary().comparisons, 3);
    assert_eq!(report.render_text(), "No duplicates located.\n");
}

#[test]
fn test_scan_end_to_end_layout() {
    let dir = tempdir().unwrap();
    let ax = write_file(dir.path(), "a/x.txt", b"hi");
    let bx = write_file(dir.path(), "b/x.txt", b"hi");
    let cy = write_file(dir.path(), "c/y.txt", b"bye");

    let report = dupecheck::scan(dir.path());

    assert_eq!(report.groups().len(), 1);
    let mut paths = report.groups()[0].paths();
    paths.sort();
    assert_eq!(paths, vec![ax.clone(), bx.clone()]);

    let text = report.render_text();
    assert!(text.starts_with("DUPLICATES:\n\n"));
    assert!(text.contains(&ax.display().to_string()));
    assert!(text.contains(&bx.display().to_string()));
    assert!(!text.contains(&cy.display().to_string()));
}

#[test]
fn test_scan_same_directory_pair_ignoring_names() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "a.txt", b"duplicate");
    write_file(dir.path(), "b.txt", b"duplicate");
    write_file(dir.path(), "c.txt", b"unique!!!");

    assert!(!dupecheck::scan(dir.path()).has_duplicates());

    let finder = DuplicateFinder::new(FinderConfig::default().with_match_names(false));
    let report = finder.scan(dir.path());

    assert_eq!(report.groups().len(), 1);
    assert_eq!(report.groups()[0].len(), 2);
    assert_eq!(report.summary().duplicate_files, 1);
    assert_eq!(report.summary().reclaimable_space, 9);
}

#[test]
fn test_scan_names_separate_renamed_copies_by_default() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "one/photo.jpg", b"pixels");
    write_file(dir.path(), "two/photo.jpg", b"pixels");
    write_file(dir.path(), "two/renamed.jpg", b"pixels");

    let report = dupecheck::scan(dir.path());

    assert_eq!(report.groups().len(), 1);
    assert_eq!(report.groups()[0].len(), 2);
    assert!(report.groups()[0]
        .files()
        .iter()
        .all(|f| f.name == "photo"));

    let finder = DuplicateFinder::new(FinderConfig::default().with_match_names(false));
    let any_name_report = finder.scan(dir.path());
    assert_eq!(any_name_report.groups()[0].len(), 3);
}

#[test]
fn test_scan_extension_must_match_by_default() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "notes.txt", b"same bytes");
    write_file(dir.path(), "notes.md", b"same bytes");

    assert!(!dupecheck::scan(dir.path()).has_duplicates());

    let finder = DuplicateFinder::new(FinderConfig::default().with_match_extensions(false));
    assert!(finder.scan(dir.path()).has_duplicates());
}

#[test]
fn test_scan_zero_length_files() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "a/empty.log", b"");
    write_file(dir.path(), "b/empty.log", b"");
    write_file(dir.path(), "b/other.log", b"");

    let report = dupecheck::scan(dir.path());

    assert_eq!(report.groups().len(), 1);
    assert_eq!(report.groups()[0].len(), 2);
    assert_eq!(report.groups()[0].size(), 0);
    assert_eq!(report.summary().reclaimable_space, 0);
}

#[test]
fn test_scan_nested_directories() {
    let dir = tempdir().unwrap();
    let mut relative = String::new();
    for depth in 0..10 {
        relative.push_str(&format!("level{}/", depth));
        write_file(dir.path(), &format!("{}same.dat", relative), b"deep copy");
    }

    let report = dupecheck::scan(dir.path());

    assert_eq!(report.groups().len(), 1);
    assert_eq!(report.groups()[0].len(), 10);
}

#[test]
fn test_scan_multiple_groups_are_disjoint() {
    let dir = tempdir().unwrap();
    for i in 0..3 {
        write_file(dir.path(), &format!("red{}/paint.txt", i), b"red content");
        write_file(dir.path(), &format!("blue{}/paint.txt", i), b"blue content");
    }
    write_file(dir.path(), "green/paint.txt", b"green content");

    let report = dupecheck::scan(dir.path());

    assert_eq!(report.groups().len(), 2);
    let total: usize = report.groups().iter().map(|g| g.len()).sum();
    assert_eq!(total, 6);
    assert_eq!(report.summary().duplicate_files, 4);
}

#[test]
fn test_scan_with_size_filters() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "a/small.bin", b"tiny");
    write_file(dir.path(), "b/small.bin", b"tiny");
    write_file(dir.path(), "a/big.bin", &[7u8; 4096]);
    write_file(dir.path(), "b/big.bin", &[7u8; 4096]);

    let walker_config = WalkerConfig {
        min_size: Some(100),
        ..Default::default()
    };
    let finder = DuplicateFinder::new(FinderConfig::default().with_walker_config(walker_config));
    let report = finder.scan(dir.path());

    assert_eq!(report.summary().total_files, 2);
    assert_eq!(report.groups().len(), 1);
    assert_eq!(report.groups()[0].size(), 4096);
}

#[test]
fn test_scan_skip_hidden() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "visible.txt", b"copy");
    write_file(dir.path(), ".hidden/visible.txt", b"copy");

    let walker_config = WalkerConfig {
        skip_hidden: true,
        ..Default::default()
    };
    let finder = DuplicateFinder::new(FinderConfig::default().with_walker_config(walker_config));

    assert!(!finder.scan(dir.path()).has_duplicates());
    assert!(dupecheck::scan(dir.path()).has_duplicates());
}

#[test]
fn test_scan_small_chunk_size() {
    let dir = tempdir().unwrap();
    let mut content = vec![1u8; 1000];
    write_file(dir.path(), "a/data.bin", &content);
    write_file(dir.path(), "b/data.bin", &content);
    content[999] = 2;
    write_file(dir.path(), "c/data.bin", &content);

    let finder = DuplicateFinder::new(FinderConfig::default().with_chunk_size(16));
    let report = finder.scan(dir.path());

    assert_eq!(report.groups().len(), 1);
    assert_eq!(report.groups()[0].len(), 2);
}

#[test]
fn test_scan_huge_chunk_size_is_capped() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "a/x.txt", b"hi");
    write_file(dir.path(), "b/x.txt", b"hi");

    let finder = DuplicateFinder::new(FinderConfig::default().with_chunk_size(usize::MAX));
    let report = finder.scan(dir.path());

    assert_eq!(report.groups().len(), 1);
    assert_eq!(report.groups()[0].len(), 2);
}

#[test]
fn test_scan_checked_rejects_invalid_roots() {
    let dir = tempdir().unwrap();
    let file = write_file(dir.path(), "file.txt", b"x");
    let finder = DuplicateFinder::with_defaults();

    assert!(matches!(
        finder.scan_checked(&dir.path().join("missing")),
        Err(FinderError::PathNotFound(_))
    ));
    assert!(matches!(
        finder.scan_checked(&file),
        Err(FinderError::NotADirectory(_))
    ));
    assert!(finder.scan_checked(dir.path()).is_ok());
}
