//! Error types for CSV ingestion and row projection.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a CSV file or projecting its rows.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file {path} is too large: {size} bytes (limit {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File starts with a byte order mark of an unsupported encoding.
    #[error("unsupported encoding {encoding} in {path}; save the file as UTF-8")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// Malformed CSV content.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// CSV file has a header row but no data rows.
    #[error("CSV file has no data rows: {path}")]
    NoDataRows { path: PathBuf },

    /// Failed to write readings as CSV.
    #[error("failed to write CSV: {message}")]
    CsvWrite { message: String },

    // === Projection Errors ===
    /// Too many data rows to project.
    #[error("too many data rows: {rows} (maximum {max})")]
    TooManyRows { rows: usize, max: usize },

    /// Every data row lacked a required value.
    #[error("no valid data rows found after processing ({skipped} skipped)")]
    NoValidRows { skipped: usize },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
