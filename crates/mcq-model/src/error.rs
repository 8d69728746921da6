use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or checking [`RuleSettings`](crate::RuleSettings).
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {source}")]
    Toml {
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid question text pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid setting {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, SettingsError>;
