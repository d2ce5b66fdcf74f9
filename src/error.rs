//! Error types for the alumni directory.

use std::path::PathBuf;

use thiserror::Error;

/// Why a set of batch fields could not be turned into a label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeRejected {
    #[error("programme is required")]
    MissingProgramme,

    #[error("programme contains control characters")]
    ControlCharacter,

    #[error("start year is required")]
    MissingStartYear,

    #[error("'{0}' is not a year")]
    InvalidYear(String),

    #[error("year {year} is outside {min}..={max}")]
    YearOutOfRange { year: u16, min: u16, max: u16 },

    #[error("end year {end} is before start year {start}")]
    EndBeforeStart { start: u16, end: u16 },
}

/// Errors raised by the directory library.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Encode(#[from] EncodeRejected),

    #[error("invalid year filter '{0}'")]
    InvalidYear(String),

    #[error("cannot access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
