//! # alumni-directory
//!
//! Batch label codec and record filtering for an alumni directory.
//!
//! Every record carries a free-text batch label such as
//! `"Int. MSc. 2017-22"`. It is the only structured key the directory has:
//! forms build it from a programme and a start/end year, and the listing
//! decodes it again to filter by programme and year.
//!
//! ## Overview
//!
//! - **Batch codec**: [`decode`] splits a label into [`BatchFields`],
//!   [`encode`] writes the canonical label back
//! - **Record filter**: [`apply`] keeps the records matching a
//!   [`FilterQuery`] of programme, years and fuzzy free text
//! - **Directory views**: sorting, grouping by batch, prefix lookup and a
//!   snapshot cache
//!
//! ## Example
//!
//! ```
//! use alumni_directory::{FilterQuery, Record, apply, decode};
//!
//! let fields = decode("Int. MSc. 2017-22").unwrap();
//! assert_eq!(fields.programme, "Int. MSc.");
//! assert_eq!(fields.end_year, Some(2022));
//!
//! let records = vec![
//!     Record::new("Kamal Lochan Patra", "Int. MSc. 2017-22"),
//!     Record::new("Priya Nayak", "PhD 2017"),
//!     Record::new("Sneha Das", "Int. MSc. 2019"),
//! ];
//!
//! let query = FilterQuery::new().start_year(2017).text("K L");
//! let result = apply(&records, &query);
//!
//! assert_eq!(result.len(), 1);
//! assert_eq!(result[0].name, "Kamal Lochan Patra");
//! ```

pub mod batch;
pub mod config;
pub mod directory;
pub mod error;
pub mod filter;
pub mod fuzzy;
pub mod record;
pub mod store;

pub use batch::{BatchFields, BatchForm, ParseFailure, decode, encode};
pub use config::{DirectoryConfig, YearRange};
pub use directory::{
    BatchGroup, DirectoryCache, batch_anchor, find_by_batch_prefix, group_by_batch,
    sort_by_batch_desc, sorted_by_batch_desc,
};
pub use error::{DirectoryError, EncodeRejected};
pub use filter::{FilterQuery, FilterTrace, RecordPredicate, apply, apply_traced};
pub use fuzzy::is_fuzzy_match;
pub use record::Record;
pub use store::{load_records, save_records};
