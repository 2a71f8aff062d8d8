use bifgen::config::{OutputConfig, ScanConfig};
use bifgen::store::{InMemoryMetadataStore, MetadataRecord};
use bifgen::types::FieldValue;
use bifgen::{BifEngine, MetadataResolver, RunSummary};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Create empty documents at the given paths under `root`.
pub fn create_documents(root: &Path, relative: &[&str]) {
    for rel in relative {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"%PDF-1.4").unwrap();
    }
}

pub fn record(key: &str) -> MetadataRecord {
    MetadataRecord {
        document_number: FieldValue::text(key),
        vendor_name: FieldValue::text(format!("Vendor {}", key)),
        ..Default::default()
    }
}

pub fn store_with(records: Vec<MetadataRecord>) -> Arc<InMemoryMetadataStore> {
    Arc::new(InMemoryMetadataStore::with_records(
        records.into_iter().map(|r| (r.key().unwrap(), r)),
    ))
}

pub fn run(root: &Path, output: OutputConfig, store: Arc<InMemoryMetadataStore>) -> RunSummary {
    let scan = ScanConfig {
        parent_folder: root.to_path_buf(),
        ..Default::default()
    };
    run_scan(&scan, output, store)
}

pub fn run_scan(
    scan: &ScanConfig,
    output: OutputConfig,
    store: Arc<InMemoryMetadataStore>,
) -> RunSummary {
    BifEngine::new(scan, output, MetadataResolver::new(store))
        .unwrap()
        .run()
        .unwrap()
}

/// All `.bif` files directly inside `dir`, sorted.
pub fn bif_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().map(|e| e == "bif").unwrap_or(false))
        .collect();
    files.sort();
    files
}
