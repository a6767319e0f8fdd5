//! ADIF contact logs to canonical QSON contact records.
//!
//! Logs exported by LoTW, QRZ, Club Log, contest loggers and desktop
//! logging programs all speak ADIF, each with its own conventions. This
//! crate turns one file's records into a single deterministic shape:
//! reconstructed UTC spans, kHz frequencies, cleaned-up counties, merged
//! confirmation channels and directional award references.
//!
//! # Examples
//!
//! Whole-file conversion with the built-in band plan:
//! ```
//! use qsonadif::{band::AdifBandPlan, batch::convert::convert_adif, types::Frequency};
//!
//! let adi = "Exported by LoTW <PROGRAMID:4>LoTW <EOH>\n\
//!     <CALL:6>WD4CVK <BAND:3>20M <FREQ:7>14.0759 <MODE:3>FT8 \
//!     <QSO_DATE:8>20210705 <TIME_ON:6>133400 <EOR>\n";
//!
//! let qson = convert_adif(adi, &AdifBandPlan).expect("tokenize");
//! let qso = &qson.qsos[0];
//! assert_eq!(qso.sequence, 1);
//! assert_eq!(qso.freq, Some(Frequency::Khz(14075.9)));
//! assert_eq!(qso.band.as_deref(), Some("20m"));
//! assert_eq!(
//!     qso.start_at.map(|t| t.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)),
//!     Some("2021-07-05T13:34:00Z".to_string()),
//! );
//! ```
//!
//! Normalizing pre-tokenized records with a custom band lookup:
//! ```
//! use qsonadif::{
//!     adif::{AdifDocument, record::RawRecord},
//!     batch::convert::{ConvertConfig, Converter},
//! };
//!
//! let lookup = |khz: f64| (khz < 8_000.0).then(|| "low".to_string());
//! let doc = AdifDocument {
//!     header: RawRecord::new(),
//!     records: vec![[("call", "K1ABC"), ("freq", "7.074")].into_iter().collect()],
//! };
//! let qson = Converter::new(ConvertConfig::default(), &lookup).convert_document(doc);
//! assert_eq!(qson.qsos[0].band.as_deref(), Some("low"));
//! ```
#![deny(missing_docs)]

/// ADIF raw records, tokenizer and input repairs.
pub mod adif;
/// Frequency to band classification.
pub mod band;
/// Whole-file conversion and the confirmation policy.
pub mod batch;
/// Per-record normalization components.
pub mod core;
/// Versioned output envelope.
pub mod document;
/// Canonical contact record types.
pub mod qso;
/// Shared primitive types.
pub mod types;
