//! Directory walker that yields leaf folders in sorted order.

use crate::error::BifError;
use crate::tree::context::derive_context;
use crate::types::FolderContext;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Walker configuration
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Recognized document extensions, without the leading dot.
    pub extensions: Vec<String>,
    pub follow_symlinks: bool,
    pub max_depth: Option<usize>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["pdf".to_string()],
            follow_symlinks: false,
            max_depth: None,
        }
    }
}

impl WalkerConfig {
    /// Case-insensitive extension match.
    pub fn is_document(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                self.extensions
                    .iter()
                    .any(|known| known.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

/// A directory that directly contains at least one document.
#[derive(Debug, Clone)]
pub struct LeafFolder {
    pub path: PathBuf,
    pub context: FolderContext,
    /// Documents in listing order; never empty.
    pub documents: Vec<PathBuf>,
}

impl LeafFolder {
    /// The first document found in the folder.
    pub fn anchor(&self) -> Option<&Path> {
        self.documents.first().map(PathBuf::as_path)
    }
}

/// Scans a root directory for leaf folders.
pub struct FolderScanner {
    root: PathBuf,
    config: WalkerConfig,
}

impl FolderScanner {
    /// Create a scanner rooted at `root`, resolved to an absolute path.
    pub fn new(root: &Path) -> Result<Self, BifError> {
        let root = dunce::canonicalize(root).map_err(|e| BifError::InvalidRoot {
            path: root.to_path_buf(),
            reason: e.to_string(),
        })?;
        if !root.is_dir() {
            return Err(BifError::InvalidRoot {
                path: root,
                reason: "not a directory".to_string(),
            });
        }
        Ok(Self {
            root,
            config: WalkerConfig::default(),
        })
    }

    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Visit every directory under the root once and collect the leaf folders.
    ///
    /// Directories that cannot be read are logged and skipped.
    pub fn scan(&self) -> Result<Vec<LeafFolder>, BifError> {
        let mut walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();
        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut leaves = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Skipping unreadable path during scan: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }

            let dir = entry.path();
            let documents = match self.list_documents(dir) {
                Ok(docs) => docs,
                Err(e) => {
                    warn!("Failed to list directory {}: {}", dir.display(), e);
                    continue;
                }
            };
            if documents.is_empty() {
                continue;
            }

            debug!(
                folder = %dir.display(),
                documents = documents.len(),
                "Found leaf folder"
            );
            leaves.push(LeafFolder {
                path: dir.to_path_buf(),
                context: derive_context(dir),
                documents,
            });
        }
        Ok(leaves)
    }

    /// List the documents directly inside `dir`, sorted by file name.
    pub fn list_documents(&self, dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        let mut documents = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && self.config.is_document(&path) {
                documents.push(path);
            }
        }
        documents.sort();
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"%PDF").unwrap();
    }

    #[test]
    fn test_is_document_case_insensitive() {
        let config = WalkerConfig::default();
        assert!(config.is_document(Path::new("a/DOC1.pdf")));
        assert!(config.is_document(Path::new("a/DOC1.PDF")));
        assert!(!config.is_document(Path::new("a/DOC1.bif")));
        assert!(!config.is_document(Path::new("a/pdf")));
    }

    #[test]
    fn test_scan_finds_only_folders_with_documents() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("AcctA/2023/01/invoices/DOC2.pdf"));
        touch(&root.join("AcctA/2023/01/invoices/DOC1.pdf"));
        touch(&root.join("AcctA/2023/01/receipts/notes.txt"));
        fs::create_dir_all(root.join("AcctB/empty")).unwrap();

        let scanner = FolderScanner::new(root).unwrap();
        let leaves = scanner.scan().unwrap();

        assert_eq!(leaves.len(), 1);
        let leaf = &leaves[0];
        assert!(leaf.path.ends_with("AcctA/2023/01/invoices"));
        assert_eq!(leaf.context.sub_category.as_deref(), Some("invoices"));
        assert_eq!(leaf.context.year.as_deref(), Some("01"));
        assert_eq!(leaf.context.account_folder.as_deref(), Some("2023"));
        assert!(leaf.anchor().unwrap().ends_with("DOC1.pdf"));
        assert_eq!(leaf.documents.len(), 2);
        assert!(leaf.documents.iter().all(|d| d.is_absolute()));
    }

    #[test]
    fn test_root_with_documents_is_a_leaf() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("top.pdf"));
        touch(&temp.path().join("sub/inner.pdf"));

        let leaves = FolderScanner::new(temp.path()).unwrap().scan().unwrap();
        assert_eq!(leaves.len(), 2);
    }

    #[test]
    fn test_custom_extensions() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("scans/page.tiff"));
        touch(&temp.path().join("scans/page.pdf"));

        let scanner = FolderScanner::new(temp.path())
            .unwrap()
            .with_walker_config(WalkerConfig {
                extensions: vec![".tiff".to_string()],
                ..Default::default()
            });
        let leaves = scanner.scan().unwrap();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].documents.len(), 1);
        assert!(leaves[0].documents[0].ends_with("page.tiff"));
    }

    #[test]
    fn test_max_depth_limits_scan() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("a/shallow.pdf"));
        touch(&temp.path().join("a/b/c/deep.pdf"));

        let scanner = FolderScanner::new(temp.path())
            .unwrap()
            .with_walker_config(WalkerConfig {
                max_depth: Some(1),
                ..Default::default()
            });
        let leaves = scanner.scan().unwrap();
        assert_eq!(leaves.len(), 1);
        assert!(leaves[0].path.ends_with("a"));
    }

    #[test]
    fn test_missing_root_is_rejected() {
        let temp = TempDir::new().unwrap();
        let result = FolderScanner::new(&temp.path().join("nope"));
        assert!(matches!(result, Err(BifError::InvalidRoot { .. })));
    }
}
