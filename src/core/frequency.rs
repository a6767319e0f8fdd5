//! MHz to kHz frequency normalization and band resolution.

use crate::{band::BandClassifier, types::Frequency};

fn is_decimal(s: &str) -> bool {
    let mut digits = 0usize;
    let mut dots = 0usize;
    for b in s.bytes() {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

/// Rounds to two decimals, nudged by `f64::EPSILON` so values like
/// `14075.899999999998` land on `14075.9`.
pub fn round_khz(khz: f64) -> f64 {
    ((khz + f64::EPSILON) * 100.0).round() / 100.0
}

/// Normalizes an ADIF frequency.
///
/// Decimal input is MHz and becomes kHz; anything else is kept as a label.
pub fn parse_frequency(value: &str) -> Frequency {
    let v = value.trim();
    if is_decimal(v) {
        if let Ok(mhz) = v.parse::<f64>() {
            return Frequency::Khz(round_khz(mhz * 1000.0));
        }
    }
    Frequency::Label(value.to_string())
}

/// Picks the band from an explicit tag value, else from `classifier`.
pub fn resolve_band(
    explicit: Option<&str>,
    freq: Option<&Frequency>,
    classifier: &dyn BandClassifier,
) -> Option<String> {
    match explicit {
        Some(b) => Some(b.trim().to_lowercase()),
        None => freq.and_then(Frequency::khz).and_then(|khz| classifier.band_for_khz(khz)),
    }
}
