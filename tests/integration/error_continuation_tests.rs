use dupecheck::duplicates::{DuplicateFinder, FinderConfig};
use dupecheck::progress::ProgressCallback;
use dupecheck::scanner::{FileDescriptor, WalkerConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tempfile::tempdir;

/// Deletes whichever of two sibling directories is still pending once the
/// other one reports its first file.
struct RemoveSibling {
    first: PathBuf,
    second: PathBuf,
    fired: AtomicBool,
}

impl ProgressCallback for RemoveSibling {
    fn on_phase_start(&self, _phase: &str, _total: usize) {}

    fn on_progress(&self, _current: usize, path: &str) {
        let current = Path::new(path);
        let victim = if current == self.first {
            &self.second
        } else if current == self.second {
            &self.first
        } else {
            return;
        };
        if !self.fired.swap(true, Ordering::SeqCst) {
            fs::remove_dir_all(victim).unwrap();
        }
    }

    fn on_phase_end(&self, _phase: &str) {}
}

fn same_pair(root: &Path) -> (PathBuf, PathBuf) {
    fs::create_dir_all(root.join("one")).unwrap();
    fs::create_dir_all(root.join("two")).unwrap();
    let a = root.join("one/same.txt");
    let b = root.join("two/same.txt");
    fs::write(&a, "same").unwrap();
    fs::write(&b, "same").unwrap();
    (a, b)
}

#[test]
fn test_find_duplicates_continues_past_missing_files() {
    let dir = tempdir().unwrap();
    let (a, b) = same_pair(dir.path());

    let files = vec![
        FileDescriptor::new(PathBuf::from("nonexistent_1/same.txt"), 4),
        FileDescriptor::new(a.clone(), 4),
        FileDescriptor::new(PathBuf::from("nonexistent_2/same.txt"), 4),
        FileDescriptor::new(b.clone(), 4),
    ];

    let (groups, stats) = DuplicateFinder::with_defaults().find_duplicates(files);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].paths(), vec![a, b]);
    assert!(stats.unreadable >= 3);
}

#[test]
fn test_file_removed_between_walk_and_compare() {
    let dir = tempdir().unwrap();
    let (a, b) = same_pair(dir.path());
    let files = vec![
        FileDescriptor::from_path(&a).unwrap(),
        FileDescriptor::from_path(&b).unwrap(),
    ];
    fs::remove_file(&b).unwrap();

    let (groups, stats) = DuplicateFinder::with_defaults().find_duplicates(files);

    assert!(groups.is_empty());
    assert_eq!(stats.unreadable, 1);
}

#[test]
fn test_file_grown_between_walk_and_compare() {
    let dir = tempdir().unwrap();
    let (a, b) = same_pair(dir.path());
    let files = vec![
        FileDescriptor::from_path(&a).unwrap(),
        FileDescriptor::from_path(&b).unwrap(),
    ];
    fs::write(&b, "same plus more").unwrap();

    let (groups, stats) = DuplicateFinder::with_defaults().find_duplicates(files);

    assert!(groups.is_empty());
    assert_eq!(stats.different, 1);
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdirectory_does_not_abort_scan() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("hidden.txt"), "secret").unwrap();
    fs::create_dir(dir.path().join("open")).unwrap();
    fs::write(dir.path().join("open/x.txt"), "hi").unwrap();
    fs::write(dir.path().join("x.txt"), "hi").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let denied = fs::read_dir(&locked).is_err();
    let report = dupecheck::scan(dir.path());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(report.groups().len(), 1);
    assert_eq!(report.groups()[0].len(), 2);
    if denied {
        assert_eq!(report.summary().directories_skipped, 1);
        assert!(report.summary().is_partial());
    }
}

#[test]
fn test_directory_removed_during_scan_is_skipped() {
    let dir = tempdir().unwrap();
    let root = std::path::absolute(dir.path()).unwrap();
    let first = root.join("first");
    let second = root.join("second");
    fs::create_dir(&first).unwrap();
    fs::create_dir(&second).unwrap();
    fs::write(first.join("same.txt"), "same").unwrap();
    fs::write(second.join("same.txt"), "same").unwrap();
    fs::write(root.join("same.txt"), "same").unwrap();

    let callback = Arc::new(RemoveSibling {
        first,
        second,
        fired: AtomicBool::new(false),
    });
    let finder =
        DuplicateFinder::new(FinderConfig::default().with_progress_callback(callback.clone()));
    let report = finder.scan(&root);

    assert!(callback.fired.load(Ordering::SeqCst));
    assert_eq!(report.summary().directories_skipped, 1);
    assert!(report.summary().is_partial());
    assert_eq!(report.summary().total_files, 2);
    assert_eq!(report.groups().len(), 1);
    assert_eq!(report.groups()[0].len(), 2);
    assert!(report.groups()[0].paths().contains(&root.join("same.txt")));
}

#[test]
fn test_scan_of_a_file_root_is_partial_not_fatal() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("lonely.txt");
    fs::write(&file, "alone").unwrap();

    let report = dupecheck::scan(&file);

    assert!(!report.has_duplicates());
    assert_eq!(report.summary().directories_skipped, 1);
}

#[cfg(unix)]
#[test]
fn test_broken_symlink_is_ignored() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("a.txt"), "hi").unwrap();
    fs::write(dir.path().join("sub/a.txt"), "hi").unwrap();
    std::os::unix::fs::symlink(dir.path().join("gone.txt"), dir.path().join("c.txt")).unwrap();

    let walker_config = WalkerConfig {
        follow_symlinks: true,
        ..Default::default()
    };
    let finder = DuplicateFinder::new(FinderConfig::default().with_walker_config(walker_config));
    let report = finder.scan(dir.path());

    assert_eq!(report.groups().len(), 1);
    assert_eq!(report.groups()[0].len(), 2);
    assert_eq!(report.summary().files_skipped, 1);
}
