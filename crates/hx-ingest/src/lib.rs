//! Heat exchanger data ingestion.
//!
//! Reads sensor CSV files and projects their rows into
//! [`HeatExchangerReading`](hx_model::HeatExchangerReading) values through a
//! header mapping.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use hx_ingest::{ProjectionOptions, project_rows, read_csv_table};
//!
//! let table = read_csv_table(Path::new("readings.csv"))?;
//! let mappings = hx_map::auto_map_columns(&table.headers);
//! let projection = project_rows(&table, &mappings, &ProjectionOptions::default())?;
//! ```

mod csv;
mod error;
mod projection;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading and Writing ===
pub use self::csv::{
    CsvTable, MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_csv_headers,
    read_csv_table, validate_encoding, write_readings_csv,
};

// === Projection ===
pub use projection::{MAX_DATA_ROWS, Projection, ProjectionOptions, project_rows};
