use clap::Parser;
use dupecheck::cli::Cli;
use dupecheck::error::ExitCode;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn run(args: &[&str]) -> anyhow::Result<ExitCode> {
    let _guard = crate::env_lock();
    let mut argv = vec!["dupecheck"];
    argv.extend_from_slice(args);
    dupecheck::run_app(Cli::try_parse_from(argv).unwrap())
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_scan_command_reports_duplicates_as_json() {
    let dir = tempdir().unwrap();
    let tree = dir.path().join("tree");
    fs::create_dir_all(tree.join("a")).unwrap();
    fs::create_dir_all(tree.join("b")).unwrap();
    fs::write(tree.join("a/x.txt"), "hi").unwrap();
    fs::write(tree.join("b/x.txt"), "hi").unwrap();
    let out = dir.path().join("report.json");

    let code = run(&[
        "-q",
        "scan",
        path_str(&tree),
        "--output",
        "json",
        "--output-file",
        path_str(&out),
        "--config",
        path_str(&dir.path().join("absent.toml")),
    ])
    .unwrap();

    assert_eq!(code, ExitCode::Success);
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["duplicates"].as_array().unwrap().len(), 1);
    assert_eq!(value["duplicates"][0]["size"], 2);
    assert_eq!(value["summary"]["total_files"], 2);
}

#[test]
fn test_scan_command_without_duplicates() {
    let dir = tempdir().unwrap();
    let tree = dir.path().join("tree");
    fs::create_dir(&tree).unwrap();
    fs::write(tree.join("a.txt"), "one").unwrap();
    fs::write(tree.join("b.txt"), "two!").unwrap();
    let out = dir.path().join("report.txt");

    let code = run(&[
        "-q",
        "scan",
        path_str(&tree),
        "--output-file",
        path_str(&out),
        "--config",
        path_str(&dir.path().join("absent.toml")),
    ])
    .unwrap();

    assert_eq!(code, ExitCode::NoDuplicates);
    assert_eq!(fs::read_to_string(&out).unwrap(), "No duplicates located.\n");
}

#[test]
fn test_scan_command_reads_config_file() {
    let dir = tempdir().unwrap();
    let tree = dir.path().join("tree");
    fs::create_dir(&tree).unwrap();
    fs::write(tree.join("x.txt"), "copy").unwrap();
    fs::write(tree.join("y.txt"), "copy").unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "match_names = false\noutput = \"csv\"\n").unwrap();
    let out = dir.path().join("report.csv");

    let code = run(&[
        "-q",
        "scan",
        path_str(&tree),
        "--output-file",
        path_str(&out),
        "--config",
        path_str(&config),
    ])
    .unwrap();

    assert_eq!(code, ExitCode::Success);
    let content = fs::read_to_string(&out).unwrap();
    assert_eq!(content.lines().next(), Some("group_id,path,size"));
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn test_scan_command_any_name_flag() {
    let dir = tempdir().unwrap();
    let tree = dir.path().join("tree");
    fs::create_dir(&tree).unwrap();
    fs::write(tree.join("photo.jpg"), "pixels").unwrap();
    fs::write(tree.join("renamed.jpg"), "pixels").unwrap();
    let absent = dir.path().join("absent.toml");
    let out = dir.path().join("report.txt");

    let by_name = run(&[
        "-q",
        "scan",
        path_str(&tree),
        "--output-file",
        path_str(&out),
        "--config",
        path_str(&absent),
    ])
    .unwrap();
    assert_eq!(by_name, ExitCode::NoDuplicates);

    let any_name = run(&[
        "-q",
        "scan",
        path_str(&tree),
        "--any-name",
        "--output-file",
        path_str(&out),
        "--config",
        path_str(&absent),
    ])
    .unwrap();
    assert_eq!(any_name, ExitCode::Success);
    assert!(fs::read_to_string(&out).unwrap().contains("renamed.jpg"));
}

#[test]
fn test_scan_command_invalid_root() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");

    let err = run(&["-q", "scan", path_str(&missing)]).unwrap_err();

    assert_eq!(ExitCode::from_error(&err), ExitCode::InvalidPath);
    assert!(err.to_string().contains("missing"));
}

#[test]
fn test_compare_command_exit_codes() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("b.bin");
    let c = dir.path().join("c.bin");
    fs::write(&a, "same").unwrap();
    fs::write(&b, "same").unwrap();
    fs::write(&c, "diff").unwrap();

    assert_eq!(
        run(&["-q", "compare", path_str(&a), path_str(&b)]).unwrap(),
        ExitCode::Success
    );
    assert_eq!(
        run(&["-q", "compare", path_str(&a), path_str(&c)]).unwrap(),
        ExitCode::NoDuplicates
    );
    assert_eq!(
        run(&["-q", "compare", path_str(&a), path_str(&dir.path().join("nope"))]).unwrap(),
        ExitCode::NoDuplicates
    );
}

#[test]
fn test_init_config_command() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("conf").join("config.toml");

    assert_eq!(
        run(&["-q", "init-config", path_str(&target)]).unwrap(),
        ExitCode::Success
    );
    let content = fs::read_to_string(&target).unwrap();
    assert!(content.contains("match_extensions = true"));
    assert!(content.contains("chunk_size = 65536"));

    assert!(run(&["-q", "init-config", path_str(&target)]).is_err());
    assert_eq!(
        run(&["-q", "init-config", path_str(&target), "--force"]).unwrap(),
        ExitCode::Success
    );
}
