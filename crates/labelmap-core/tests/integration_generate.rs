//! Integration test: generate a label map from a fixture directory.
//!
//! Builds a directory of mixed files, runs the full pipeline, and checks the
//! written map and the printed announcement/checksum lines.

use labelmap_core::checksum::{digest_path, ShaBits};
use labelmap_core::generate::{generate, GenerateOptions};
use labelmap_core::label_map::LabelMap;
use labelmap_core::scan::EntryOrder;
use std::fs::{self, File};
use std::path::Path;
use tempfile::tempdir;

fn fixture(dir: &Path, names: &[&str]) {
    for name in names {
        File::create(dir.join(name)).unwrap();
    }
}

fn options(src: &Path, out: &Path) -> GenerateOptions {
    GenerateOptions {
        source_dir: src.to_path_buf(),
        output_path: out.to_path_buf(),
        extension: ".png".to_string(),
        order: EntryOrder::Sorted,
        bits: ShaBits::Sha256,
        checksum_tool: None,
    }
}

#[tokio::test]
async fn generate_writes_stems_and_prints_checksum() {
    let src = tempdir().unwrap();
    let work = tempdir().unwrap();
    fixture(
        src.path(),
        &["pear.png", "apple.png", "readme.md", "photo.jpeg", "kiwi.png"],
    );
    let out_path = work.path().join("models").join("labels.txt");

    let mut stdout = Vec::new();
    let report = generate(&options(src.path(), &out_path), &mut stdout)
        .await
        .expect("generate");

    assert_eq!(fs::read_to_string(&out_path).unwrap(), "apple\nkiwi\npear\n");
    assert_eq!(report.labels, 3);
    assert_eq!(report.skipped, 0);

    let digest = digest_path(&out_path, ShaBits::Sha256).unwrap();
    assert_eq!(report.digest.as_deref(), Some(digest.as_str()));

    let printed = String::from_utf8(stdout).unwrap();
    let lines: Vec<&str> = printed.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], format!("{} 256", out_path.display()));
    assert_eq!(lines[1], format!("{}  {}", digest, out_path.display()));
}

#[tokio::test]
async fn generate_twice_is_identical() {
    let src = tempdir().unwrap();
    let work = tempdir().unwrap();
    fixture(src.path(), &["b.png", "a.png", "c.png", "skip.txt"]);
    let out_path = work.path().join("labels.txt");
    let opts = options(src.path(), &out_path);

    let first = generate(&opts, &mut Vec::new()).await.unwrap();
    let first_bytes = fs::read(&out_path).unwrap();
    let second = generate(&opts, &mut Vec::new()).await.unwrap();
    let second_bytes = fs::read(&out_path).unwrap();

    assert_eq!(first_bytes, second_bytes);
    assert_eq!(first.digest, second.digest);
}

#[tokio::test]
async fn no_matches_yields_empty_file() {
    let src = tempdir().unwrap();
    let work = tempdir().unwrap();
    fixture(src.path(), &["a.jpg", "b.gif"]);
    let out_path = work.path().join("labels.txt");
    fs::write(&out_path, "stale\n").unwrap();

    let report = generate(&options(src.path(), &out_path), &mut Vec::new())
        .await
        .unwrap();

    assert_eq!(report.labels, 0);
    assert_eq!(fs::metadata(&out_path).unwrap().len(), 0);
    assert_eq!(
        report.digest.as_deref(),
        Some("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
    );
}

#[tokio::test]
async fn missing_checksum_tool_falls_back_to_builtin() {
    let src = tempdir().unwrap();
    let work = tempdir().unwrap();
    fixture(src.path(), &["one.png"]);
    let out_path = work.path().join("labels.txt");
    let mut opts = options(src.path(), &out_path);
    opts.checksum_tool = Some("labelmap-no-such-checksum-tool".to_string());

    let mut stdout = Vec::new();
    let report = generate(&opts, &mut stdout).await.unwrap();

    assert!(report.digest.is_some());
    assert_eq!(String::from_utf8(stdout).unwrap().lines().count(), 2);
    assert_eq!(LabelMap::read_from(&out_path).unwrap().labels(), ["one"]);
}

#[tokio::test]
async fn missing_source_dir_fails_without_output() {
    let work = tempdir().unwrap();
    let out_path = work.path().join("labels.txt");
    let opts = options(&work.path().join("absent"), &out_path);

    let mut stdout = Vec::new();
    assert!(generate(&opts, &mut stdout).await.is_err());
    assert!(!out_path.exists());
    assert!(stdout.is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn checksum_tool_replaces_builtin_digest() {
    let src = tempdir().unwrap();
    let work = tempdir().unwrap();
    fixture(src.path(), &["one.png"]);
    let out_path = work.path().join("labels.txt");
    let mut opts = options(src.path(), &out_path);
    // `true` ignores its arguments and exits 0.
    opts.checksum_tool = Some("true".to_string());

    let mut stdout = Vec::new();
    let report = generate(&opts, &mut stdout).await.unwrap();

    assert!(report.digest.is_none());
    assert_eq!(report.labels, 1);
    let printed = String::from_utf8(stdout).unwrap();
    assert_eq!(printed, format!("{} 256\n", out_path.display()));
}

#[cfg(unix)]
#[tokio::test]
async fn failing_checksum_tool_is_not_retried_in_process() {
    let src = tempdir().unwrap();
    let work = tempdir().unwrap();
    fixture(src.path(), &["one.png"]);
    let out_path = work.path().join("labels.txt");
    let mut opts = options(src.path(), &out_path);
    opts.checksum_tool = Some("false".to_string());

    let mut stdout = Vec::new();
    let report = generate(&opts, &mut stdout).await.unwrap();

    assert!(report.digest.is_none());
    assert_eq!(String::from_utf8(stdout).unwrap().lines().count(), 1);
    assert_eq!(fs::read_to_string(&out_path).unwrap(), "one\n");
}
