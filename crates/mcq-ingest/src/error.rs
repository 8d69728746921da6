//! Error types for question file ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a question file.
///
/// Any of these aborts the load; no partial table is returned.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Question file not found.
    #[error("question file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file too large: {path} ({size} bytes, max {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Stream input exceeds the size limit; its full size is unknown.
    #[error("input too large: {path} (more than {max_size} bytes)")]
    StreamTooLarge { path: PathBuf, max_size: u64 },

    /// File uses an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path} (expected UTF-8)")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// Input is not valid delimited text.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Input has no non-blank rows.
    #[error("question file is empty: {path}")]
    EmptyCsv { path: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
