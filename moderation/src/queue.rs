//! Moderation queue.
//!
//! The queue is a list of [`Request`]s persisted as a JSON array next to the
//! record file. Approving a request writes into the caller's record list;
//! saving either file is left to the caller.
//!
//! An approved join is stored under the request's own id, so approving the
//! same request twice never stores two records.

use std::path::Path;

use alumni_directory::Record;
use alumni_directory::store::{load_json, save_json};
use tracing::{info, warn};

use crate::error::ModerationError;
use crate::request::{Request, RequestKind, RequestStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModerationQueue {
    requests: Vec<Request>,
}

impl ModerationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the queue from `path`. A missing file is an empty queue.
    pub fn load(path: &Path) -> Result<Self, ModerationError> {
        Ok(Self {
            requests: load_json(path)?,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ModerationError> {
        save_json(path, &self.requests)?;
        Ok(())
    }

    pub fn submit(&mut self, request: Request) -> &Request {
        info!(id = %request.id, name = %request.record.name, "request submitted");
        self.requests.push(request);
        &self.requests[self.requests.len() - 1]
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// Pending requests, oldest submission first.
    pub fn pending(&self) -> Vec<&Request> {
        let mut pending: Vec<&Request> = self.requests.iter().filter(|r| r.is_pending()).collect();
        pending.sort_by_key(|r| r.submitted_at);
        pending
    }

    fn pending_mut(&mut self, id: &str) -> Result<&mut Request, ModerationError> {
        let request = self
            .requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ModerationError::UnknownRequest(id.to_string()))?;
        if !request.is_pending() {
            return Err(ModerationError::NotPending(id.to_string()));
        }
        Ok(request)
    }

    /// Apply a pending request to `records` and mark it approved.
    ///
    /// A join appends a new record whose id is the request id, unless a
    /// record with that id is already stored. An update replaces the record
    /// it names.
    pub fn approve(&mut self, id: &str, records: &mut Vec<Record>) -> Result<Record, ModerationError> {
        let request = self.pending_mut(id)?;

        let stored = match &request.kind {
            RequestKind::Join => {
                let existing = records
                    .iter()
                    .find(|r| r.id.as_deref() == Some(request.id.as_str()));
                match existing {
                    Some(record) => {
                        warn!(id, "join request already stored");
                        record.clone()
                    }
                    None => {
                        let record = Record {
                            id: Some(request.id.clone()),
                            ..request.record.clone()
                        };
                        records.push(record.clone());
                        record
                    }
                }
            }
            RequestKind::Update { original_id } => {
                let slot = records
                    .iter_mut()
                    .find(|r| r.id.as_deref() == Some(original_id.as_str()))
                    .ok_or_else(|| ModerationError::UnknownRecord(original_id.clone()))?;
                *slot = Record {
                    id: Some(original_id.clone()),
                    ..request.record.clone()
                };
                slot.clone()
            }
        };

        request.status = RequestStatus::Approved;
        info!(id, name = %stored.name, batch = %stored.batch, "request approved");
        Ok(stored)
    }

    pub fn reject(&mut self, id: &str) -> Result<(), ModerationError> {
        let request = self.pending_mut(id)?;
        request.status = RequestStatus::Rejected;
        info!(id, "request rejected");
        Ok(())
    }
}
