//! CSV file reading with a single header row.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// Maximum file size for CSV loading (50 MB).
pub const MAX_CSV_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Header row plus data rows of a CSV file, as trimmed text.
///
/// Rows may be shorter or longer than the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

fn open_error(path: &Path, err: std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        if buffer == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    // UTF-8 BOM is acceptable (stripped from the first header)
    Ok(())
}

fn open_reader(path: &Path) -> Result<csv::Reader<File>> {
    check_file_size(path)?;
    validate_encoding(path)?;

    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| parse_error(path, &e))
}

fn parse_error(path: &Path, err: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

fn to_row(record: &StringRecord) -> Vec<String> {
    record.iter().map(ToString::to_string).collect()
}

/// Reads the next non-blank record, or `None` at end of input.
fn next_record(
    records: &mut csv::StringRecordsIter<'_, File>,
    path: &Path,
) -> Result<Option<StringRecord>> {
    for record in records {
        let record = record.map_err(|e| parse_error(path, &e))?;
        if !is_blank(&record) {
            return Ok(Some(record));
        }
    }
    Ok(None)
}

fn header_row(record: &StringRecord) -> Vec<String> {
    let mut headers = to_row(record);
    if let Some(first) = headers.first_mut() {
        *first = first.trim_start_matches('\u{feff}').trim().to_string();
    }
    headers
}

/// Reads only the header row of a CSV file.
pub fn read_csv_headers(path: &Path) -> Result<Vec<String>> {
    let mut reader = open_reader(path)?;
    let mut records = reader.records();
    let record = next_record(&mut records, path)?.ok_or_else(|| IngestError::EmptyCsv {
        path: path.to_path_buf(),
    })?;
    Ok(header_row(&record))
}

/// Reads a CSV file into a header row and its data rows.
///
/// The first non-blank line is the header row. Blank lines are skipped and
/// every cell is trimmed.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let mut reader = open_reader(path)?;
    let mut records = reader.records();

    let record = next_record(&mut records, path)?.ok_or_else(|| IngestError::EmptyCsv {
        path: path.to_path_buf(),
    })?;
    let headers = header_row(&record);

    let mut rows = Vec::new();
    while let Some(record) = next_record(&mut records, path)? {
        rows.push(to_row(&record));
    }

    if rows.is_empty() {
        return Err(IngestError::NoDataRows {
            path: path.to_path_buf(),
        });
    }

    let ragged = rows.iter().filter(|r| r.len() != headers.len()).count();
    if ragged > 0 {
        warn!(
            path = %path.display(),
            rows = ragged,
            "rows with a different column count than the header"
        );
    }
    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "CSV loaded"
    );

    Ok(CsvTable { headers, rows })
}
