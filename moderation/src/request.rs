//! Join and update requests.
//!
//! Public visitors never write to the directory directly. A join form or an
//! update form becomes a pending [`Request`], which an admin later approves
//! or rejects.

use alumni_directory::{BatchForm, DirectoryConfig, Record, YearRange};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModerationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestKind {
    /// A new entry.
    Join,
    /// Replaces the profile fields of an existing entry.
    Update {
        #[serde(rename = "originalId")]
        original_id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// A submission waiting for, or past, an admin decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: String,
    pub kind: RequestKind,
    pub record: Record,
    pub submitted_at: DateTime<Utc>,
    pub status: RequestStatus,
}

impl Request {
    fn pending(kind: RequestKind, record: Record, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            record,
            submitted_at: now,
            status: RequestStatus::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

/// An uploaded photo: where it is hosted and how large the upload was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub url: String,
    pub size: u64,
}

fn check_photo(photo: &Photo, config: &DirectoryConfig) -> Result<(), ModerationError> {
    if photo.size > config.max_photo_bytes {
        return Err(ModerationError::PhotoTooLarge {
            size: photo.size,
            limit: config.max_photo_bytes,
        });
    }
    Ok(())
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == s.len() {
        Some(s)
    } else {
        Some(trimmed.to_string())
    }
}

/// Fields of the public join form, also used by the admin add/edit form.
/// Empty strings mean "left blank".
#[derive(Debug, Clone, Default)]
pub struct JoinForm {
    pub name: String,
    pub programme: String,
    pub start_year: String,
    pub end_year: String,
    pub supervisor: String,
    pub position: String,
    pub institute: String,
    pub email: String,
    pub research_interests: String,
    pub website: String,
    pub additional_info: String,
    pub photo: Option<Photo>,
}

impl JoinForm {
    /// Validate the form and turn it into a pending join request.
    pub fn into_request(
        self,
        config: &DirectoryConfig,
        years: &YearRange,
        now: DateTime<Utc>,
    ) -> Result<Request, ModerationError> {
        let record = self.into_record(config, years)?;
        Ok(Request::pending(RequestKind::Join, record, now))
    }

    /// Validate the form and build the record it describes, without an id.
    pub fn into_record(
        self,
        config: &DirectoryConfig,
        years: &YearRange,
    ) -> Result<Record, ModerationError> {
        let name = non_empty(self.name).ok_or(ModerationError::MissingName)?;
        let batch =
            BatchForm::from_inputs(&self.programme, &self.start_year, &self.end_year)?
                .encode(years)?;
        if let Some(photo) = &self.photo {
            check_photo(photo, config)?;
        }

        Ok(Record {
            name,
            batch,
            supervisor: non_empty(self.supervisor),
            institute: non_empty(self.institute),
            position: non_empty(self.position),
            research_interests: non_empty(self.research_interests),
            email: non_empty(self.email),
            website: non_empty(self.website),
            photo: self.photo.map(|p| p.url),
            additional_info: non_empty(self.additional_info),
            ..Record::default()
        })
    }
}

/// Fields an alumnus may change about their own entry.
///
/// Name, batch and supervisor stay as stored.
#[derive(Debug, Clone, Default)]
pub struct UpdateForm {
    pub position: String,
    pub institute: String,
    pub email: String,
    pub research_interests: String,
    pub website: String,
    pub additional_info: String,
    /// A new photo; the stored one is kept when absent.
    pub photo: Option<Photo>,
}

impl UpdateForm {
    /// Turn the form into a pending update of `original`.
    pub fn into_request(
        self,
        original: &Record,
        config: &DirectoryConfig,
        now: DateTime<Utc>,
    ) -> Result<Request, ModerationError> {
        let original_id = original
            .id
            .clone()
            .ok_or_else(|| ModerationError::UnknownRecord(original.name.clone()))?;
        if let Some(photo) = &self.photo {
            check_photo(photo, config)?;
        }

        let record = Record {
            position: non_empty(self.position),
            institute: non_empty(self.institute),
            email: non_empty(self.email),
            research_interests: non_empty(self.research_interests),
            website: non_empty(self.website),
            additional_info: non_empty(self.additional_info),
            photo: self.photo.map(|p| p.url).or_else(|| original.photo.clone()),
            ..original.clone()
        };
        Ok(Request::pending(
            RequestKind::Update { original_id },
            record,
            now,
        ))
    }
}
