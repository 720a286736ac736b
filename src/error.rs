//! Load Error Types
//!
//! Failures surfaced while loading quest sources. None of these abort a
//! load: record errors skip one record, source errors end one source, and
//! both land in the [`crate::report::LoadReport`] handed back to the caller.

use thiserror::Error;

/// A whole source could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The source could not be read at all (missing file, permissions, IO).
    #[error("failed to read quest source {path}: {reason}")]
    Unreadable { path: String, reason: String },

    /// The source was read but is not a JSON array of records.
    #[error("malformed quest source {path}: {reason}")]
    Malformed { path: String, reason: String },
}

/// A single record inside an otherwise readable source was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The record did not decode into the expected shape.
    #[error("malformed quest record: {0}")]
    Malformed(String),

    /// The record carries no completion requirements.
    #[error("quest has no requirements")]
    MissingRequirements,

    /// A requirement entry used a type code outside the known range.
    #[error("invalid requirement type code {code}")]
    InvalidRequestType { code: i32 },
}
