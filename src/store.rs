//! JSON-file record store.
//!
//! The hosted document store is out of reach for the command-line tools,
//! so they read and write a plain JSON array of records instead.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::DirectoryError;
use crate::record::Record;

/// Read a JSON array from `path`. A missing file is an empty list.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DirectoryError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(DirectoryError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&text).map_err(|source| DirectoryError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `items` to `path` as pretty-printed JSON, creating parent directories.
pub fn save_json<T: Serialize>(path: &Path, items: &[T]) -> Result<(), DirectoryError> {
    let io_err = |source| DirectoryError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut text = serde_json::to_string_pretty(items).map_err(|source| DirectoryError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    text.push('\n');
    fs::write(path, text).map_err(io_err)
}

pub fn load_records(path: &Path) -> Result<Vec<Record>, DirectoryError> {
    load_json(path)
}

pub fn save_records(path: &Path, records: &[Record]) -> Result<(), DirectoryError> {
    save_json(path, records)
}
