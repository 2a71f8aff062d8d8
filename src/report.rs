//! Human-readable output for run summaries, lookups, and parsed BIF files.

use crate::bif::format::format_value;
use crate::bif::BifFile;
use crate::engine::RunSummary;
use crate::store::MetadataRecord;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::path::Path;

/// Format a section heading with bold/underline. Plain when NO_COLOR is set.
pub fn format_section_heading(title: &str) -> String {
    if std::env::var_os("NO_COLOR").is_some() {
        return title.to_string();
    }
    format!("{}", title.bold().underline())
}

pub fn format_run_summary_text(summary: &RunSummary) -> String {
    let heading = if summary.dry_run {
        "BIF Generation (dry run)"
    } else {
        "BIF Generation"
    };
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading(heading)));
    out.push_str(&format!("  Root: {}\n", summary.root.display()));
    out.push_str(&format!("  Leaf folders: {}\n", summary.folders_scanned));
    out.push_str(&format!("  Folders written: {}\n", summary.folders_written));
    out.push_str(&format!("  Documents: {}\n", summary.documents));
    out.push_str(&format!("  Without metadata: {}\n", summary.unresolved));
    out.push_str(&format!("  Duration: {} ms\n", summary.duration_ms));

    if !summary.files_written.is_empty() {
        let title = if summary.dry_run {
            "Files that would be written"
        } else {
            "Files written"
        };
        out.push_str(&format!("\n{}\n\n", format_section_heading(title)));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Path"]);
        for path in &summary.files_written {
            table.add_row(vec![relative_display(path, &summary.root)]);
        }
        out.push_str(&format!("{}\n", table));
    }

    if !summary.failures.is_empty() {
        out.push_str(&format!("\n{}\n\n", format_section_heading("Failures")));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Folder", "Error"]);
        for failure in &summary.failures {
            table.add_row(vec![
                relative_display(&failure.folder, &summary.root),
                failure.error.clone(),
            ]);
        }
        out.push_str(&format!("{}\n", table));
    }
    out
}

/// Rendered field values for one key, as they would appear in a BIF.
pub fn format_lookup_text(key: &str, record: Option<&MetadataRecord>) -> String {
    let mut out = format!("{}\n\n", format_section_heading(&format!("Record {}", key)));
    let Some(record) = record else {
        out.push_str("No metadata found; all fields would be empty.\n");
        return out;
    };
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Field", "Value"]);
    for (field, value) in record.entries() {
        table.add_row(vec![field.label().to_string(), format_value(field, value)]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

pub fn format_bif_text(path: &Path, file: &BifFile) -> String {
    let mut out = format!("{}\n\n", format_section_heading(&path.display().to_string()));
    out.push_str(&format!("  Documents: {}\n\n", file.count()));
    if file.is_empty() {
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["#", "Type", "Path", "Location", "Fields set"]);
    for block in file.blocks() {
        let set = block.values.iter().filter(|(_, v)| !v.is_empty()).count();
        table.add_row(vec![
            block.ordinal.to_string(),
            block.document_type.clone(),
            block.path.clone(),
            block.location.clone(),
            format!("{}/{}", set, block.values.len()),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

fn relative_display(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
