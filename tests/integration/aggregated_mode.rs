use super::support::{bif_files, create_documents, record, run, store_with};
use bifgen::bif::BifFile;
use bifgen::config::OutputConfig;
use bifgen::types::Field;
use tempfile::TempDir;

#[test]
fn one_file_per_folder_with_final_count() {
    let temp = TempDir::new().unwrap();
    create_documents(
        temp.path(),
        &["A/2023/01/inv/D1.pdf", "A/2023/01/inv/D2.pdf", "A/2023/01/inv/D3.pdf"],
    );
    let summary = run(
        temp.path(),
        OutputConfig::default(),
        store_with(vec![record("D1"), record("D3")]),
    );
    assert_eq!(summary.documents, 3);
    assert_eq!(summary.unresolved, 1);

    let files = bif_files(&temp.path().join("A/2023/01/inv"));
    assert_eq!(files.len(), 1);
    let bif = BifFile::read(&files[0]).unwrap();
    assert_eq!(bif.count(), 3);

    let ordinals: Vec<usize> = bif.blocks().iter().map(|b| b.ordinal).collect();
    assert_eq!(ordinals, vec![1, 2, 3]);

    // The unresolved sibling is blank but does not stop D3.
    let d2 = &bif.blocks()[1];
    assert!(d2.path.ends_with("D2.pdf"));
    assert!(d2.values.iter().all(|(_, v)| v.is_empty()));
    assert_eq!(bif.blocks()[2].value(Field::VendorName), Some("Vendor D3"));
}

#[test]
fn nested_location_uses_forward_slashes() {
    let temp = TempDir::new().unwrap();
    create_documents(temp.path(), &["sub/leaf/X.pdf"]);
    run(temp.path(), OutputConfig::default(), store_with(vec![]));

    let files = bif_files(&temp.path().join("sub").join("leaf"));
    let bif = BifFile::read(&files[0]).unwrap();
    assert_eq!(bif.blocks()[0].location, "sub/leaf");
    assert_eq!(bif.blocks()[0].document_type, "leaf");
}

#[test]
fn append_flag_with_named_file_accumulates_across_runs() {
    let temp = TempDir::new().unwrap();
    create_documents(temp.path(), &["box/inv/D1.pdf"]);
    let output = OutputConfig {
        append: true,
        aggregate_file_name: Some("batch.bif".to_string()),
        ..Default::default()
    };

    run(temp.path(), output.clone(), store_with(vec![record("D1")]));
    create_documents(temp.path(), &["box/inv/D2.pdf"]);
    run(temp.path(), output, store_with(vec![record("D1")]));

    let bif = BifFile::read(&temp.path().join("box/inv/batch.bif")).unwrap();
    // First run wrote D1; second run appended D1 and D2.
    assert_eq!(bif.count(), 3);
    assert!(bif.blocks().iter().all(|b| b.flags.append));
    assert!(bif.blocks()[2].path.ends_with("D2.pdf"));
}

#[test]
fn folders_without_documents_get_no_bif() {
    let temp = TempDir::new().unwrap();
    create_documents(temp.path(), &["with/D1.pdf"]);
    std::fs::create_dir_all(temp.path().join("without/deeper")).unwrap();
    std::fs::write(temp.path().join("without/notes.txt"), b"x").unwrap();

    let summary = run(temp.path(), OutputConfig::default(), store_with(vec![]));
    assert_eq!(summary.folders_scanned, 1);
    assert!(bif_files(&temp.path().join("without")).is_empty());
    assert!(bif_files(&temp.path().join("without/deeper")).is_empty());
}
