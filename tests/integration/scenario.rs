use super::support::{bif_files, run, store_with};
use bifgen::config::OutputConfig;
use bifgen::store::MetadataRecord;
use bifgen::types::FieldValue;
use chrono::NaiveDate;
use std::fs;
use tempfile::TempDir;

#[test]
fn invoice_folder_produces_expected_bif() {
    let temp = TempDir::new().unwrap();
    let root = dunce::canonicalize(temp.path()).unwrap().join("scan");
    let folder = root.join("AcctA").join("2023").join("01").join("invoices");
    fs::create_dir_all(&folder).unwrap();
    fs::write(folder.join("DOC100.pdf"), b"%PDF").unwrap();

    let store = store_with(vec![MetadataRecord {
        document_number: FieldValue::text("DOC100"),
        amount: FieldValue::Number(500.0),
        invoice_date: FieldValue::DateTime(
            NaiveDate::from_ymd_opt(2023, 1, 15)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        ),
        ..Default::default()
    }]);

    let summary = run(&root, OutputConfig::default(), store);
    assert_eq!(summary.documents, 1);

    let files = bif_files(&folder);
    assert_eq!(files.len(), 1);
    let content = fs::read_to_string(&files[0]).unwrap();

    let expected = format!(
        "[Documents File]\n\
[documents]\n\
count=1\n\
document1=invoices\t\"{}\"\n\
doc1.fields=Document Number|Invoice No|Invoice Date|Vendor Name|Vendor Code|Assignment|Transaction Date|Amount\n\
doc1.field1=DOC100\n\
doc1.field2=\n\
doc1.field3=01/15/2023\n\
doc1.field4=\n\
doc1.field5=\n\
doc1.field6=\n\
doc1.field7=\n\
doc1.field8=500\n\
doc1.location=AcctA/2023/01/invoices\n\
doc1.create_location=False\n\
doc1.append=False\n\
doc1.delete_images=False\n",
        folder.join("DOC100.pdf").display()
    );
    assert_eq!(content, expected);
}
