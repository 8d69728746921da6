//! Question file reading.
//!
//! Question files are read headerless: row 0 is the question header and is
//! returned as data like every other row. Rows may differ in width.

use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{Position, ReaderBuilder, Trim};
use mcq_model::{QuestionTable, Row};

use crate::error::{IngestError, Result};

/// Maximum file size for question loading (1 MiB).
///
/// A single question is a few hundred bytes; anything near this limit is
/// almost certainly the wrong file.
pub const MAX_QUESTION_FILE_SIZE: u64 = 1024 * 1024;

/// Source label used in errors for tables read from a stream.
pub const STREAM_SOURCE: &str = "<stdin>";

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_QUESTION_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| file_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Reject byte-order marks of encodings other than UTF-8.
pub fn validate_encoding(bytes: &[u8], path: &Path) -> Result<()> {
    let encoding = match bytes {
        [0xFF, 0xFE, ..] => Some("UTF-16 LE"),
        [0xFE, 0xFF, ..] => Some("UTF-16 BE"),
        _ => None,
    };
    match encoding {
        Some(encoding) => Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding,
        }),
        None => Ok(()),
    }
}

/// Load a question file into a [`QuestionTable`].
pub fn load_question(path: &Path) -> Result<QuestionTable> {
    check_file_size(path)?;
    let bytes = std::fs::read(path).map_err(|e| file_error(path, e))?;
    let table = parse_question(&bytes, path)?;
    tracing::debug!(path = %path.display(), rows = table.len(), "loaded question file");
    Ok(table)
}

/// Read a question table from any reader (e.g. stdin).
pub fn read_question<R: Read>(mut reader: R) -> Result<QuestionTable> {
    let path = PathBuf::from(STREAM_SOURCE);
    let mut bytes = Vec::new();
    reader
        .by_ref()
        .take(MAX_QUESTION_FILE_SIZE + 1)
        .read_to_end(&mut bytes)
        .map_err(|source| IngestError::FileRead {
            path: path.clone(),
            source,
        })?;
    if bytes.len() as u64 > MAX_QUESTION_FILE_SIZE {
        return Err(IngestError::StreamTooLarge {
            path,
            max_size: MAX_QUESTION_FILE_SIZE,
        });
    }
    let table = parse_question(&bytes, &path)?;
    tracing::debug!(rows = table.len(), "read question from stream");
    Ok(table)
}

/// Parse comma-separated question text.
///
/// Fields are trimmed, a leading UTF-8 BOM is dropped, and rows whose
/// fields are all empty are skipped. Each row keeps the line it starts on.
pub fn parse_question(bytes: &[u8], path: &Path) -> Result<QuestionTable> {
    validate_encoding(bytes, path)?;
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut row: Row = record.iter().collect();
        if row.significant_len() == 0 {
            continue;
        }
        if let Some(position) = record.position() {
            row = row.with_line(record_line(bytes, position));
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    Ok(QuestionTable::new(rows))
}

/// One-based line on which a record starts.
///
/// The reader records a position before skipping empty lines, so line
/// terminators between that position and the record's first byte are
/// counted here.
fn record_line(bytes: &[u8], position: &Position) -> usize {
    let start = usize::try_from(position.byte())
        .unwrap_or(bytes.len())
        .min(bytes.len());
    let skipped = bytes[start..]
        .iter()
        .take_while(|byte| matches!(byte, b'\r' | b'\n'))
        .filter(|byte| **byte == b'\n')
        .count();
    usize::try_from(position.line())
        .unwrap_or(usize::MAX)
        .saturating_add(skipped)
}

fn file_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}
