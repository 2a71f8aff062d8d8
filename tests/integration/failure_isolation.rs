use super::support::{create_documents, run, store_with};
use bifgen::bif::BifFile;
use bifgen::config::OutputConfig;
use tempfile::TempDir;

#[test]
fn unwritable_folder_does_not_abort_the_scan() {
    let temp = TempDir::new().unwrap();
    create_documents(temp.path(), &["a/inv/D1.pdf", "b/inv/D2.pdf"]);
    // A directory occupying the target name makes the write fail for folder a.
    std::fs::create_dir_all(temp.path().join("a/inv/index.bif")).unwrap();

    let output = OutputConfig {
        aggregate_file_name: Some("index.bif".to_string()),
        ..Default::default()
    };
    let summary = run(temp.path(), output, store_with(vec![]));

    assert_eq!(summary.folders_scanned, 2);
    assert_eq!(summary.folders_written, 1);
    assert_eq!(summary.failures.len(), 1);
    assert!(summary.failures[0].folder.ends_with("a/inv"));
    assert!(!summary.is_success());

    let b = BifFile::read(&temp.path().join("b/inv/index.bif")).unwrap();
    assert_eq!(b.count(), 1);
}
