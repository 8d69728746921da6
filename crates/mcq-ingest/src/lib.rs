//! Question file ingestion.
//!
//! Loads a comma-separated question file into a [`QuestionTable`]. No type
//! coercion happens here; numeric interpretation is left to the rules.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use mcq_ingest::load_question;
//!
//! let table = load_question(Path::new("questions/capital.csv"))?;
//! assert_eq!(table.question_type().text(), "MC");
//! ```
//!
//! [`QuestionTable`]: mcq_model::QuestionTable

mod error;
mod loader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Question Loading ===
pub use loader::{
    MAX_QUESTION_FILE_SIZE, STREAM_SOURCE, check_file_size, check_file_size_with_limit,
    load_question, parse_question, read_question, validate_encoding,
};
