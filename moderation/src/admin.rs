//! Direct admin edits of the record list.
//!
//! These bypass the request queue: the admin adds, edits or deletes entries
//! in place. Every add or edit stamps `last_updated`. Saving the list is left
//! to the caller.

use alumni_directory::{BatchForm, DirectoryConfig, Record, YearRange};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::ModerationError;
use crate::request::JoinForm;

/// The admin add/edit form. It has the same fields as the join form.
pub type RecordForm = JoinForm;

fn find_mut<'a>(records: &'a mut [Record], id: &str) -> Result<&'a mut Record, ModerationError> {
    records
        .iter_mut()
        .find(|r| r.id.as_deref() == Some(id))
        .ok_or_else(|| ModerationError::UnknownRecord(id.to_string()))
}

/// Validate `form` and append it as a new record with a fresh id.
pub fn add_record(
    records: &mut Vec<Record>,
    form: RecordForm,
    config: &DirectoryConfig,
    years: &YearRange,
    now: DateTime<Utc>,
) -> Result<Record, ModerationError> {
    let record = Record {
        id: Some(uuid::Uuid::new_v4().to_string()),
        last_updated: Some(now),
        ..form.into_record(config, years)?
    };
    info!(id = ?record.id, name = %record.name, batch = %record.batch, "record added");
    records.push(record.clone());
    Ok(record)
}

/// Replace every form field of the record with `id`.
///
/// The id and any keys the record type does not know are kept. The stored
/// photo is kept when the form has none. On error nothing changes.
pub fn edit_record(
    records: &mut [Record],
    id: &str,
    form: RecordForm,
    config: &DirectoryConfig,
    years: &YearRange,
    now: DateTime<Utc>,
) -> Result<Record, ModerationError> {
    let mut fresh = form.into_record(config, years)?;
    let slot = find_mut(records, id)?;

    let photo = fresh.photo.take().or_else(|| slot.photo.take());
    let extra = std::mem::take(&mut slot.extra);
    *slot = Record {
        id: Some(id.to_string()),
        photo,
        extra,
        last_updated: Some(now),
        ..fresh
    };
    info!(id, name = %slot.name, batch = %slot.batch, "record edited");
    Ok(slot.clone())
}

/// Remove the record with `id`.
pub fn delete_record(records: &mut Vec<Record>, id: &str) -> Result<Record, ModerationError> {
    let index = records
        .iter()
        .position(|r| r.id.as_deref() == Some(id))
        .ok_or_else(|| ModerationError::UnknownRecord(id.to_string()))?;
    let removed = records.remove(index);
    info!(id, name = %removed.name, "record deleted");
    Ok(removed)
}

/// Re-encode the batch of the record with `id` from fresh form fields.
pub fn edit_batch(
    records: &mut [Record],
    id: &str,
    form: &BatchForm,
    years: &YearRange,
) -> Result<String, ModerationError> {
    let batch = form.encode(years)?;
    let record = find_mut(records, id)?;
    info!(id, from = %record.batch, to = %batch, "batch edited");
    record.batch = batch.clone();
    Ok(batch)
}
