//! Question file loading.

mod reader;

pub use reader::{
    MAX_QUESTION_FILE_SIZE, STREAM_SOURCE, check_file_size, check_file_size_with_limit,
    load_question, parse_question, read_question, validate_encoding,
};
