//! Record filtering.
//!
//! A [`FilterQuery`] is turned into a chain of [`RecordPredicate`]s, one per
//! active filter. Each record's batch is decoded once and the decoded view
//! is handed to every predicate; a record survives only if all of them
//! accept it. Input order is preserved.
//!
//! Records whose batch label cannot be decoded have no programme and no
//! years, so programme and year filters drop them while free-text search
//! still sees them. A blank programme filter is no filter at all.

use tracing::{debug, warn};

use crate::batch::{BatchFields, decode};
use crate::error::DirectoryError;
use crate::fuzzy::is_fuzzy_match;
use crate::record::Record;

/// A record together with its decoded batch.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub record: &'a Record,
    pub batch: Option<BatchFields>,
}

impl<'a> Candidate<'a> {
    pub fn new(record: &'a Record) -> Self {
        Self {
            record,
            batch: decode(&record.batch).ok(),
        }
    }

    pub fn programme(&self) -> Option<&str> {
        self.batch.as_ref().map(|b| b.programme.as_str())
    }

    pub fn start_year(&self) -> Option<u16> {
        self.batch.as_ref().map(|b| b.start_year)
    }

    pub fn end_year(&self) -> Option<u16> {
        self.batch.as_ref().and_then(|b| b.end_year)
    }
}

/// One filter condition over a decoded record.
pub trait RecordPredicate {
    fn matches(&self, candidate: &Candidate<'_>) -> bool;

    /// The display name of this predicate.
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Exact, case-sensitive programme equality.
pub struct ProgrammeFilter {
    programme: String,
}

impl RecordPredicate for ProgrammeFilter {
    fn matches(&self, candidate: &Candidate<'_>) -> bool {
        candidate.programme() == Some(self.programme.as_str())
    }

    fn name(&self) -> &str {
        "PROGRAMME"
    }
}

pub struct StartYearFilter {
    year: u16,
}

impl RecordPredicate for StartYearFilter {
    fn matches(&self, candidate: &Candidate<'_>) -> bool {
        candidate.start_year() == Some(self.year)
    }

    fn name(&self) -> &str {
        "START"
    }
}

pub struct EndYearFilter {
    year: u16,
}

impl RecordPredicate for EndYearFilter {
    fn matches(&self, candidate: &Candidate<'_>) -> bool {
        candidate.end_year() == Some(self.year)
    }

    fn name(&self) -> &str {
        "END"
    }
}

/// Free text: a fuzzy match on name or supervisor, or a plain substring of
/// the record's profile text.
pub struct TextFilter {
    query: String,
    lowered: String,
}

impl TextFilter {
    fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            lowered: query.to_lowercase(),
        }
    }
}

impl RecordPredicate for TextFilter {
    fn matches(&self, candidate: &Candidate<'_>) -> bool {
        let record = candidate.record;
        is_fuzzy_match(&record.name, &self.query)
            || is_fuzzy_match(record.supervisor(), &self.query)
            || record.profile_text().contains(&self.lowered)
    }

    fn name(&self) -> &str {
        "TEXT"
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Filters chosen by the caller for one `apply` call. `None` means no
/// constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    pub programme: Option<String>,
    pub start_year: Option<u16>,
    pub end_year: Option<u16>,
    pub text: Option<String>,
}

impl FilterQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn programme(mut self, programme: impl Into<String>) -> Self {
        self.programme = Some(programme.into());
        self
    }

    pub fn start_year(mut self, year: u16) -> Self {
        self.start_year = Some(year);
        self
    }

    pub fn end_year(mut self, year: u16) -> Self {
        self.end_year = Some(year);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Build a query from raw UI values, where `""` means "any".
    pub fn from_inputs(
        programme: &str,
        start: &str,
        end: &str,
        text: &str,
    ) -> Result<Self, DirectoryError> {
        let non_empty = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        let year = |s: &str| -> Result<Option<u16>, DirectoryError> {
            match non_empty(s) {
                Some(y) => y.parse().map(Some).map_err(|_| DirectoryError::InvalidYear(y)),
                None => Ok(None),
            }
        };

        Ok(Self {
            programme: non_empty(programme),
            start_year: year(start)?,
            end_year: year(end)?,
            text: non_empty(text),
        })
    }

    /// Programme filter, unless it is blank.
    fn active_programme(&self) -> Option<&str> {
        self.programme.as_deref().filter(|p| !p.trim().is_empty())
    }

    /// Free-text query, if it has any content.
    fn active_text(&self) -> Option<&str> {
        self.text.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// The predicates for every active filter, structured filters first.
    pub fn predicates(&self) -> Vec<Box<dyn RecordPredicate>> {
        let mut predicates: Vec<Box<dyn RecordPredicate>> = Vec::new();
        if let Some(programme) = self.active_programme() {
            predicates.push(Box::new(ProgrammeFilter {
                programme: programme.to_string(),
            }));
        }
        if let Some(year) = self.start_year {
            predicates.push(Box::new(StartYearFilter { year }));
        }
        if let Some(year) = self.end_year {
            predicates.push(Box::new(EndYearFilter { year }));
        }
        if let Some(text) = self.active_text() {
            predicates.push(Box::new(TextFilter::new(text)));
        }
        predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Apply
// ---------------------------------------------------------------------------

/// Per-call statistics from [`apply_traced`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTrace {
    /// Names of the active predicates, in evaluation order.
    pub predicate_names: Vec<String>,
    /// `rejected[i]` counts records first rejected by predicate `i`.
    pub rejected: Vec<usize>,
    /// Records whose batch label could not be decoded.
    pub unparseable: usize,
    pub input_count: usize,
    pub output_count: usize,
}

/// Keep the records that satisfy every active filter in `query`.
pub fn apply<'a>(records: &'a [Record], query: &FilterQuery) -> Vec<&'a Record> {
    apply_traced(records, query).0
}

/// Like [`apply`], also reporting which predicate rejected how many records.
pub fn apply_traced<'a>(
    records: &'a [Record],
    query: &FilterQuery,
) -> (Vec<&'a Record>, FilterTrace) {
    let predicates = query.predicates();
    let mut rejected = vec![0; predicates.len()];
    let mut unparseable = 0;
    let mut output = Vec::new();

    for record in records {
        let candidate = Candidate::new(record);
        if candidate.batch.is_none() {
            unparseable += 1;
        }
        match predicates.iter().position(|p| !p.matches(&candidate)) {
            Some(i) => rejected[i] += 1,
            None => output.push(record),
        }
    }

    if unparseable > 0 {
        warn!(unparseable, "records with unparseable batch labels");
    }

    let trace = FilterTrace {
        predicate_names: predicates.iter().map(|p| p.name().to_string()).collect(),
        rejected,
        unparseable,
        input_count: records.len(),
        output_count: output.len(),
    };
    debug!(
        input = trace.input_count,
        output = trace.output_count,
        predicates = ?trace.predicate_names,
        rejected = ?trace.rejected,
        "filtered records"
    );

    (output, trace)
}
