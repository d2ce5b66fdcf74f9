//! Moderation errors.

use alumni_directory::{DirectoryError, EncodeRejected};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModerationError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("batch rejected: {0}")]
    Rejected(#[from] EncodeRejected),

    #[error("name is required")]
    MissingName,

    #[error("photo is {size} bytes, the limit is {limit}")]
    PhotoTooLarge { size: u64, limit: u64 },

    #[error("no request with id '{0}'")]
    UnknownRequest(String),

    #[error("no record with id '{0}'")]
    UnknownRecord(String),

    #[error("request '{0}' was already decided")]
    NotPending(String),
}
