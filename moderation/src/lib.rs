//! Request moderation for alumni-directory.
//!
//! Visitors submit join and update requests; an admin approves or rejects
//! them, and may add, edit or delete entries directly. Batch labels are
//! always produced by the directory's codec, never typed in by hand.

pub mod admin;
pub mod error;
pub mod queue;
pub mod request;

pub use admin::{RecordForm, add_record, delete_record, edit_batch, edit_record};
pub use error::ModerationError;
pub use queue::ModerationQueue;
pub use request::{JoinForm, Photo, Request, RequestKind, RequestStatus, UpdateForm};
