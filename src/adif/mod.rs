//! ADIF input: raw records, tokenizer and pre-tokenizing repairs.

/// Ordered tag/value record type.
pub mod record;
/// Idempotent text repairs for known producer bugs.
pub mod repair;
/// ADI text tokenizer.
pub mod tokenizer;

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use self::record::RawRecord;

static EOH_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<eoh>").expect("valid eoh pattern"));

/// Fatal tokenizer failures. Offsets are byte positions in the input text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdifError {
    /// A `<` with no closing `>`.
    #[error("unterminated tag at byte {offset}")]
    UnterminatedTag {
        /// Position of the opening `<`.
        offset: usize,
    },
    /// A field specifier whose length is not a number.
    #[error("invalid length {value:?} for field {tag} at byte {offset}")]
    InvalidLength {
        /// Field name.
        tag: String,
        /// Length text as written.
        value: String,
        /// Position of the opening `<`.
        offset: usize,
    },
    /// A field whose declared length runs past the end of input.
    #[error("field {tag} at byte {offset} runs past end of input")]
    Truncated {
        /// Field name.
        tag: String,
        /// Position of the opening `<`.
        offset: usize,
    },
}

/// Tokenized ADIF file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdifDocument {
    /// Header fields, empty when the file has no header.
    pub header: RawRecord,
    /// Records in file order.
    pub records: Vec<RawRecord>,
}

/// Splits `text` at the header terminator.
///
/// Returns the header slice (without `<eoh>`) and the byte offset where
/// records begin. Text that opens with `<` has no header.
pub(crate) fn split_header(text: &str) -> (Option<&str>, usize) {
    if text.trim_start().starts_with('<') {
        return (None, 0);
    }
    match EOH_MARKER.find(text) {
        Some(m) => (Some(&text[..m.start()]), m.end()),
        None => (None, 0),
    }
}
