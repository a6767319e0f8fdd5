//! Shared primitive aliases and the normalized frequency value.

use serde::{Deserialize, Serialize};

/// 1-based position of a record in its source file.
pub type RecordSeq = u64;
/// Milliseconds since the Unix epoch.
pub type EpochMillis = i64;

/// Normalized operating frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Frequency {
    /// Frequency in kHz, rounded to two decimals.
    Khz(f64),
    /// Non-numeric value carried through as written.
    Label(String),
}

impl Frequency {
    /// Returns the kHz value when the frequency is numeric.
    pub fn khz(&self) -> Option<f64> {
        match self {
            Self::Khz(v) => Some(*v),
            Self::Label(_) => None,
        }
    }
}
