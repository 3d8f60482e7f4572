//! CSV reading and writing utilities.

mod reader;
mod writer;

pub use reader::{
    CsvTable, MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_csv_headers,
    read_csv_table, validate_encoding,
};
pub use writer::write_readings_csv;
