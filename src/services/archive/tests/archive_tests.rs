use super::*;
use crate::test_utils::{create_test_zip, init_test_logger, truncate_file};
use crate::types::errors::ExtractionError;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

#[test]
fn test_pattern_matching() {
    let pattern = ArchivePattern::new("spoje*.zip").unwrap();
    assert!(pattern.matches("spoje.zip"));
    assert!(pattern.matches("spoje1.zip"));
    assert!(pattern.matches("spoje_vlaky.zip"));
    assert!(!pattern.matches("spoje1.zip.part"));
    assert!(!pattern.matches("xspoje1.zip"));
    assert!(!pattern.matches("spoje1_zip"));
    assert!(!pattern.matches("Spoje1.zip"));
}

#[test]
fn test_pattern_question_mark_and_literals() {
    let pattern = ArchivePattern::new("data-?.tar(1)").unwrap();
    assert!(pattern.matches("data-a.tar(1)"));
    assert!(!pattern.matches("data-ab.tar(1)"));
    assert!(!pattern.matches("data-a.tar1"));
}

#[test]
fn test_discover_sorted_files_only() {
    let dir = TempDir::new().unwrap();
    for name in ["spoje_vlaky.zip", "spoje_autobusy.zip", "other.zip", "spoje.txt"] {
        fs::write(dir.path().join(name), b"x").unwrap();
    }
    fs::create_dir(dir.path().join("spoje_dir.zip")).unwrap();

    let found = discover_archives(dir.path(), "spoje*.zip").unwrap();
    let names: Vec<_> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();

    assert_eq!(names, vec!["spoje_autobusy.zip", "spoje_vlaky.zip"]);
}

#[test]
fn test_discover_missing_dir_fails() {
    let dir = TempDir::new().unwrap();
    let err = discover_archives(&dir.path().join("nope"), "spoje*.zip").unwrap_err();
    assert!(matches!(err, ExtractionError::Scan { .. }));
}

#[test]
fn test_extract_nested_entries() {
    init_test_logger();
    let dir = TempDir::new().unwrap();
    let zip_path = create_test_zip(
        dir.path(),
        "spoje1.zip",
        &[
            ("routes/", b""),
            ("routes/a.txt", b"X"),
            ("stops/sub/b.xml", b"<stop/>"),
        ],
    );

    let count = extract_archive(&zip_path, dir.path()).unwrap();

    assert_eq!(count, 2);
    assert_eq!(fs::read(dir.path().join("routes/a.txt")).unwrap(), b"X");
    assert_eq!(
        fs::read(dir.path().join("stops/sub/b.xml")).unwrap(),
        b"<stop/>"
    );
    // Extraction alone never removes the archive
    assert!(zip_path.exists());
}

#[test]
fn test_extract_overwrites_existing_files() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("routes")).unwrap();
    fs::write(dir.path().join("routes/a.txt"), b"stale and longer").unwrap();
    let zip_path = create_test_zip(dir.path(), "spoje1.zip", &[("routes/a.txt", b"fresh")]);

    extract_archive(&zip_path, dir.path()).unwrap();

    assert_eq!(fs::read(dir.path().join("routes/a.txt")).unwrap(), b"fresh");
}

#[test]
fn test_extract_truncated_archive_fails() {
    let dir = TempDir::new().unwrap();
    let zip_path = create_test_zip(dir.path(), "spoje1.zip", &[("routes/a.txt", b"X")]);
    truncate_file(&zip_path);

    let err = extract_archive(&zip_path, dir.path()).unwrap_err();

    assert!(matches!(err, ExtractionError::Corrupt { .. }), "{err:?}");
    assert!(zip_path.exists());
}

#[test]
fn test_extract_missing_archive_fails() {
    let dir = TempDir::new().unwrap();
    let err = extract_archive(&dir.path().join("spoje1.zip"), dir.path()).unwrap_err();
    assert!(matches!(err, ExtractionError::Open { .. }));
}

#[test]
fn test_extract_rejects_escaping_entry() {
    let dir = TempDir::new().unwrap();
    let work = dir.path().join("work");
    fs::create_dir(&work).unwrap();

    let zip_path = work.join("spoje1.zip");
    let mut writer = zip::ZipWriter::new(fs::File::create(&zip_path).unwrap());
    let options =
        zip::write::SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    writer.start_file("../escaped.txt", options).unwrap();
    writer.write_all(b"nope").unwrap();
    writer.finish().unwrap();

    let err = extract_archive(&zip_path, &work).unwrap_err();

    match err {
        ExtractionError::UnsafeEntry { entry, .. } => assert_eq!(entry, "../escaped.txt"),
        other => panic!("Expected UnsafeEntry, got {other:?}"),
    }
    assert!(!dir.path().join("escaped.txt").exists());
}
