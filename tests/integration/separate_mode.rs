use super::support::{bif_files, create_documents, record, run, run_scan, store_with};
use bifgen::bif::BifFile;
use bifgen::config::{OutputConfig, ScanConfig, SeparateMetadata};
use bifgen::types::Field;
use tempfile::TempDir;

fn separate(policy: SeparateMetadata) -> OutputConfig {
    OutputConfig {
        create_separate_bif: true,
        separate_metadata: policy,
        delete_images: true,
        ..Default::default()
    }
}

#[test]
fn every_document_gets_its_own_single_block_file() {
    let temp = TempDir::new().unwrap();
    create_documents(temp.path(), &["acct/2024/inv/D1.pdf", "acct/2024/inv/D2.pdf"]);
    let summary = run(
        temp.path(),
        separate(SeparateMetadata::PerDocument),
        store_with(vec![record("D1"), record("D2")]),
    );
    assert_eq!(summary.files_written.len(), 2);

    let folder = temp.path().join("acct/2024/inv");
    let files = bif_files(&folder);
    assert_eq!(files.len(), 2);
    for (file, key) in files.iter().zip(["D1", "D2"]) {
        assert_eq!(file.file_stem().unwrap(), key);
        let bif = BifFile::read(file).unwrap();
        assert_eq!(bif.count(), 1);
        let block = &bif.blocks()[0];
        assert_eq!(block.ordinal, 1);
        assert_eq!(block.value(Field::DocumentNumber), Some(key));
        assert!(block.flags.delete_images);
    }
}

#[test]
fn folder_anchor_policy_reuses_first_document_record() {
    let temp = TempDir::new().unwrap();
    create_documents(temp.path(), &["inv/D1.pdf", "inv/D2.pdf"]);
    run(
        temp.path(),
        separate(SeparateMetadata::FolderAnchor),
        store_with(vec![record("D1"), record("D2")]),
    );

    let d2 = BifFile::read(&temp.path().join("inv/D2.bif")).unwrap();
    assert_eq!(d2.blocks()[0].value(Field::DocumentNumber), Some("D1"));
    assert!(d2.blocks()[0].path.ends_with("D2.pdf"));
}

#[test]
fn separate_mode_tolerates_missing_metadata() {
    let temp = TempDir::new().unwrap();
    create_documents(temp.path(), &["inv/D1.pdf", "inv/D2.pdf"]);
    let summary = run(
        temp.path(),
        separate(SeparateMetadata::PerDocument),
        store_with(vec![record("D2")]),
    );
    assert_eq!(summary.unresolved, 1);

    let d1 = BifFile::read(&temp.path().join("inv/D1.bif")).unwrap();
    assert!(d1.blocks()[0].values.iter().all(|(_, v)| v.is_empty()));
    let d2 = BifFile::read(&temp.path().join("inv/D2.bif")).unwrap();
    assert_eq!(d2.blocks()[0].value(Field::DocumentNumber), Some("D2"));
}

#[test]
fn documents_sharing_a_stem_keep_separate_files() {
    let temp = TempDir::new().unwrap();
    create_documents(
        temp.path(),
        &["acct/2024/inv/D1.pdf", "acct/2024/inv/D1.tif", "acct/2024/inv/D2.pdf"],
    );
    let scan = ScanConfig {
        parent_folder: temp.path().to_path_buf(),
        extensions: vec!["pdf".to_string(), "tif".to_string()],
        ..Default::default()
    };
    let summary = run_scan(
        &scan,
        separate(SeparateMetadata::PerDocument),
        store_with(vec![record("D1"), record("D2")]),
    );
    assert!(summary.is_success());
    assert_eq!(summary.documents, 3);

    let folder = temp.path().join("acct/2024/inv");
    let files = bif_files(&folder);
    assert_eq!(files.len(), 3);
    assert_eq!(summary.files_written.len(), 3);

    let pdf = BifFile::read(&folder.join("D1.pdf.bif")).unwrap();
    assert!(pdf.blocks()[0].path.ends_with("D1.pdf"));
    let tif = BifFile::read(&folder.join("D1.tif.bif")).unwrap();
    assert!(tif.blocks()[0].path.ends_with("D1.tif"));
    assert_eq!(tif.blocks()[0].value(Field::DocumentNumber), Some("D1"));
    assert!(folder.join("D2.bif").is_file());
}
