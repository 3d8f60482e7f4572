//! Error types for mapping operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from mapping operations.
///
/// Automatic mapping never fails; these cover manual edits and alias table
/// loading.
#[derive(Debug, Error)]
pub enum MappingError {
    /// Column not found in the header row.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// Failed to read an alias table file.
    #[error("failed to read alias table {path}: {source}")]
    AliasRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Alias table JSON is malformed or names an unknown field.
    #[error("invalid alias table: {0}")]
    AliasParse(#[from] serde_json::Error),
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;
