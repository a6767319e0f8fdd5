//! Per-record normalization: field parsers, heuristics and the record normalizer.

/// Country-aware county string cleanup.
pub mod county;
/// UTC instant reconstruction from split date/time fields.
pub mod datetime;
/// Conditional field copying with `_intl` fallback.
pub mod fields;
/// MHz to kHz frequency normalization.
pub mod frequency;
/// Raw record to [`crate::qso::ContactRecord`] transform.
pub mod normalizer;
/// Confirmation channel detection and aggregation.
pub mod qsl;
/// Contest and award reference extraction.
pub mod refs;

use thiserror::Error;

/// Reasons a single record cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// Not an 8-digit `YYYYMMDD` calendar date.
    #[error("invalid date {value:?} in {tag}")]
    InvalidDate {
        /// Source tag.
        tag: String,
        /// Value as written.
        value: String,
    },
    /// Not a 2-, 4- or 6-digit `HH[MM[SS]]` time of day.
    #[error("invalid time {value:?} in {tag}")]
    InvalidTime {
        /// Source tag.
        tag: String,
        /// Value as written.
        value: String,
    },
    /// Not a `YYYY-MM-DD HH:MM:SS` or `YYYYMMDD` timestamp.
    #[error("invalid timestamp {value:?} in {tag}")]
    InvalidTimestamp {
        /// Source tag.
        tag: String,
        /// Value as written.
        value: String,
    },
    /// Not a decimal integer.
    #[error("invalid integer {value:?} in {tag}")]
    InvalidInteger {
        /// Source tag.
        tag: String,
        /// Value as written.
        value: String,
    },
}

/// Result alias for per-field transforms.
pub type NormalizeResult<T> = Result<T, NormalizeError>;
