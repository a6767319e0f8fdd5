//! Batch entry point: [`Converter`] runs repair, tokenizing and per-record
//! normalization over one ADIF file and returns a sorted [`QsonDocument`].
//!
//! Per-record failures land in [`QsonDocument::errors`]; only tokenizer
//! failures abort the file.

use std::cmp::Ordering;

use log::{info, warn};

use crate::{
    adif::{AdifDocument, repair::repair, tokenizer::tokenize},
    band::BandClassifier,
    core::normalizer::{RecordOutcome, normalize_outcome},
    document::{FailedRecord, QsonDocument},
    qso::ContactRecord,
    types::RecordSeq,
};

use super::{ConvertError, policy::ConfirmationPolicy};

/// Conversion settings.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Run header repairs before tokenizing.
    pub repair_input: bool,
    /// Use this policy instead of deriving one from the header.
    pub confirmation_policy: Option<ConfirmationPolicy>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            repair_input: true,
            confirmation_policy: None,
        }
    }
}

/// Converts ADIF input into [`QsonDocument`]s.
pub struct Converter<'a> {
    config: ConvertConfig,
    classifier: &'a dyn BandClassifier,
}

impl<'a> Converter<'a> {
    /// Creates a converter that resolves bands through `classifier`.
    pub fn new(config: ConvertConfig, classifier: &'a dyn BandClassifier) -> Self {
        Self { config, classifier }
    }

    /// Repairs (if enabled), tokenizes and normalizes ADI text.
    pub fn convert(&self, text: &str) -> Result<QsonDocument, ConvertError> {
        let doc = if self.config.repair_input {
            tokenize(&repair(text))?
        } else {
            tokenize(text)?
        };
        Ok(self.convert_document(doc))
    }

    /// Normalizes an already-tokenized file.
    ///
    /// Sequence numbers follow source order. Failed records are collected,
    /// never fatal.
    pub fn convert_document(&self, doc: AdifDocument) -> QsonDocument {
        let AdifDocument { header, records } = doc;
        let policy = self
            .config
            .confirmation_policy
            .unwrap_or_else(|| ConfirmationPolicy::from_header(&header));

        let total = records.len();
        let mut qsos = Vec::with_capacity(total);
        let mut errors = Vec::new();

        for (idx, raw) in records.into_iter().enumerate() {
            let sequence = idx as RecordSeq + 1;
            match normalize_outcome(raw, sequence, policy, self.classifier) {
                RecordOutcome::Normalized(qso) => qsos.push(qso),
                RecordOutcome::Failed { sequence, raw, message } => {
                    warn!("record {sequence} rejected: {message}");
                    errors.push(FailedRecord {
                        sequence,
                        error: message,
                        raw,
                    });
                }
            }
        }

        qsos.sort_by(by_start_then_sequence);
        info!("converted {} of {} records ({} rejected)", qsos.len(), total, errors.len());

        QsonDocument::new(header, qsos, errors)
    }
}

/// Orders by start instant, undated records last, ties by sequence.
fn by_start_then_sequence(a: &ContactRecord, b: &ContactRecord) -> Ordering {
    match (a.start_at_millis, b.start_at_millis) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then(a.sequence.cmp(&b.sequence))
}

/// Converts ADI text with the default configuration.
pub fn convert_adif(text: &str, classifier: &dyn BandClassifier) -> Result<QsonDocument, ConvertError> {
    Converter::new(ConvertConfig::default(), classifier).convert(text)
}
