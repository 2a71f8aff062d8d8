//! Value formatting rules for BIF field lines.

use crate::types::{Field, FieldValue};
use std::path::{Component, Path};

/// Render one metadata value for the given field.
///
/// Date fields render `MM/DD/YYYY` or nothing. Numbers are truncated toward
/// zero. Absent values render empty.
pub fn format_value(field: Field, value: &FieldValue) -> String {
    if field.is_date() {
        return value
            .as_date()
            .map(|d| d.format("%m/%d/%Y").to_string())
            .unwrap_or_default();
    }
    match value {
        FieldValue::Absent => String::new(),
        FieldValue::Number(n) => format_amount(*n),
        FieldValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        FieldValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        // A value must stay on its own line.
        FieldValue::Text(s) => s.replace(['\r', '\n'], " "),
    }
}

/// Integer part of `n`, without a decimal point. No rounding.
pub fn format_amount(n: f64) -> String {
    (n.trunc() as i64).to_string()
}

pub fn format_flag(flag: bool) -> &'static str {
    if flag {
        "True"
    } else {
        "False"
    }
}

pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim() {
        "True" | "true" => Some(true),
        "False" | "false" => Some(false),
        _ => None,
    }
}

/// Path of `folder` relative to `root`, always `/`-separated.
///
/// The root itself renders as `.`. Folders outside the root keep their full
/// path, separators normalized.
pub fn relative_location(folder: &Path, root: &Path) -> String {
    match folder.strip_prefix(root) {
        Ok(rel) => {
            let parts: Vec<String> = rel
                .components()
                .filter_map(|c| match c {
                    Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect();
            if parts.is_empty() {
                ".".to_string()
            } else {
                parts.join("/")
            }
        }
        Err(_) => folder.to_string_lossy().replace('\\', "/"),
    }
}
