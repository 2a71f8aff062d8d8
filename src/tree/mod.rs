//! Folder tree scanning
//!
//! Walks the scan root, finds leaf folders that directly hold documents, and
//! derives each folder's context from its position in the tree.

pub mod context;
pub mod walker;

pub use context::derive_context;
pub use walker::{FolderScanner, LeafFolder, WalkerConfig};
