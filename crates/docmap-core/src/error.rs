//! Error types for the assembly engine.
//!
//! Only record-shape problems are errors. Field-level anomalies
//! (unclassifiable tags, mismatching evaluation URIs, absent optional
//! fields) are handled in-line by omission and never surface here.

use thiserror::Error;

/// Hard failures that abort processing of a single manuscript record.
///
/// All variants map to a 5xx response at the service boundary; no
/// partial Docmap is ever emitted for a rejected record.
#[derive(Debug, Error)]
pub enum DocmapError {
    /// The record carries no manuscript versions at all.
    #[error("manuscript record has no versions")]
    NoVersions,

    /// A required field is missing or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// `publisher_json` was neither a JSON object nor a string holding
    /// one.
    #[error("publisher payload is not a JSON object")]
    InvalidPublisher,

    /// `elife_doi_version_str` must be a decimal integer so the
    /// version-of-record DOI can increment it.
    #[error("elife_doi_version_str is not a decimal integer: {0:?}")]
    InvalidVersionString(String),

    /// A version-of-record appeared as the first version of the
    /// manuscript; it always follows at least one reviewed preprint.
    #[error("version-of-record cannot be the first version of a manuscript")]
    VorAtFirstPosition,

    /// An evaluation was tagged as both an author response and an
    /// assessment summary.
    #[error("evaluation carries both AuthorResponse and Summary tags")]
    ConflictingTags,

    #[error("failed to serialize docmap: {0}")]
    Serialize(#[from] serde_json::Error),
}
