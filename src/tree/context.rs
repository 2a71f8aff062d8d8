//! Folder context derivation from trailing path segments.

use crate::types::FolderContext;
use std::path::{Component, Path};

/// Derive the context of a leaf folder from its path.
///
/// The basename is both `sub_category` and `month`; the two segments above it
/// are `year` and `account_folder`. Shallow paths leave the upper fields empty.
pub fn derive_context(folder: &Path) -> FolderContext {
    let segments: Vec<String> = folder
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let from_end = |n: usize| -> Option<String> {
        segments
            .len()
            .checked_sub(n + 1)
            .and_then(|i| segments.get(i))
            .cloned()
    };

    let basename = from_end(0);
    FolderContext {
        account_folder: from_end(2),
        year: from_end(1),
        month: basename.clone(),
        sub_category: basename,
    }
}
