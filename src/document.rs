//! Versioned QSON batch envelope.

use serde::{Deserialize, Serialize};

use crate::{adif::record::RawRecord, qso::ContactRecord, types::RecordSeq};

/// Version number for serialized [`QsonDocument`] payloads.
pub const QSON_FORMAT_VERSION: u16 = 1;

/// Source tag written into every document produced from ADIF input.
pub const ADIF_SOURCE: &str = "adif";

/// A source record that could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedRecord {
    /// Position in the source file.
    pub sequence: RecordSeq,
    /// Reason the record was rejected.
    pub error: String,
    /// Record as tokenized.
    pub raw: RawRecord,
}

/// Result of converting one ADIF file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QsonDocument {
    /// Payload format version.
    pub format_version: u16,
    /// Input format name.
    pub source: String,
    /// Header fields as tokenized.
    pub raw_headers: RawRecord,
    /// Normalized contacts, sorted by start time then sequence.
    pub qsos: Vec<ContactRecord>,
    /// Records rejected during normalization, in source order.
    pub errors: Vec<FailedRecord>,
}

impl QsonDocument {
    /// Constructs a document stamped with [`QSON_FORMAT_VERSION`].
    pub fn new(raw_headers: RawRecord, qsos: Vec<ContactRecord>, errors: Vec<FailedRecord>) -> Self {
        Self {
            format_version: QSON_FORMAT_VERSION,
            source: ADIF_SOURCE.to_string(),
            raw_headers,
            qsos,
            errors,
        }
    }

    /// Serializes the document as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
