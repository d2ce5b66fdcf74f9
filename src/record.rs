//! Alumni records.
//!
//! Field names on the wire follow the document store (`researchInterests`,
//! `additionalInfo`, ...). Optional profile fields may be missing or empty.
//! Keys this type does not know, such as `submittedAt` copied over from an
//! approved request, are kept in [`Record::extra`] and written back on save.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One alumni/student entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub batch: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_interests: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
    /// Set by admin saves, RFC 3339 on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    pub fn new(name: impl Into<String>, batch: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            batch: batch.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_supervisor(mut self, supervisor: impl Into<String>) -> Self {
        self.supervisor = Some(supervisor.into());
        self
    }

    pub fn with_institute(mut self, institute: impl Into<String>) -> Self {
        self.institute = Some(institute.into());
        self
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn with_research_interests(mut self, interests: impl Into<String>) -> Self {
        self.research_interests = Some(interests.into());
        self
    }

    pub fn supervisor(&self) -> &str {
        self.supervisor.as_deref().unwrap_or("")
    }

    /// Lowercased institute, position, research interests and batch,
    /// space-joined. Free-text queries are matched against this.
    pub fn profile_text(&self) -> String {
        [
            self.institute.as_deref().unwrap_or(""),
            self.position.as_deref().unwrap_or(""),
            self.research_interests.as_deref().unwrap_or(""),
            self.batch.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }
}
