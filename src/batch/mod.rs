//! Whole-file conversion: repair, tokenize, normalize, sort.

/// Orchestrator and its configuration.
pub mod convert;
/// Header-derived confirmation policy.
pub mod policy;

use thiserror::Error;

use crate::adif::AdifError;

/// Failures that abort a whole conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The input could not be tokenized.
    #[error("ADIF tokenizer error: {0}")]
    Adif(#[from] AdifError),
}
