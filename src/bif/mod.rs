//! BIF Format
//!
//! The line-oriented sidecar index format read by downstream imaging tools:
//!
//! ```text
//! [Documents File]
//! [documents]
//! count=<N>
//! document<n>=<type>\t"<absolute path>"
//! doc<n>.fields=<Field1>|<Field2>|...
//! doc<n>.field<k>=<value>
//! doc<n>.location=<relative/path>
//! doc<n>.create_location=<True|False>
//! doc<n>.append=<True|False>
//! doc<n>.delete_images=<True|False>
//! ```

pub mod block;
pub mod file;
pub mod format;

pub use block::{BifBuilder, DocumentBlock};
pub use file::BifFile;

/// File extension of generated index files.
pub const BIF_EXTENSION: &str = "bif";
