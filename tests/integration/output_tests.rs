use dupecheck::duplicates::DuplicateFinder;
use dupecheck::output::{write_report, write_report_to, OutputFormat};
use std::fs;
use tempfile::tempdir;

fn scan_fixture() -> (tempfile::TempDir, dupecheck::report::Report) {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("a")).unwrap();
    fs::create_dir_all(dir.path().join("b")).unwrap();
    fs::write(dir.path().join("a/x.txt"), "hi").unwrap();
    fs::write(dir.path().join("b/x.txt"), "hi").unwrap();
    fs::write(dir.path().join("a/y.txt"), "bye").unwrap();
    let report = DuplicateFinder::with_defaults().scan(dir.path());
    (dir, report)
}

#[test]
fn test_text_output_matches_render() {
    let (_dir, report) = scan_fixture();
    let mut buffer = Vec::new();

    write_report_to(&report, OutputFormat::Text, &mut buffer).unwrap();

    assert_eq!(String::from_utf8(buffer).unwrap(), report.render_text());
}

#[test]
fn test_json_output_document() {
    let (dir, report) = scan_fixture();
    let mut buffer = Vec::new();

    write_report_to(&report, OutputFormat::Json, &mut buffer).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

    assert_eq!(value["root"], &*dir.path().to_string_lossy());
    assert!(value["generated_at"].is_string());
    let files = value["duplicates"][0]["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f.as_str().unwrap().ends_with("x.txt")));
    assert_eq!(value["summary"]["duplicate_groups"], 1);
    assert_eq!(value["summary"]["total_files"], 3);
}

#[test]
fn test_csv_output_to_file() {
    let (dir, report) = scan_fixture();
    let out = dir.path().join("report.csv");

    write_report(&report, OutputFormat::Csv, Some(&out)).unwrap();

    let mut reader = csv::Reader::from_path(&out).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| &r[0] == "1" && &r[2] == "2"));
}
