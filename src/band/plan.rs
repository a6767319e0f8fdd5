//! Built-in band table from the ADIF band enumeration.

use super::BandClassifier;

/// Band edges in kHz, inclusive, from the ADIF 3.1 band enumeration.
const ADIF_BANDS: &[(&str, f64, f64)] = &[
    ("2190m", 135.7, 137.8),
    ("630m", 472.0, 479.0),
    ("560m", 501.0, 504.0),
    ("160m", 1_800.0, 2_000.0),
    ("80m", 3_500.0, 4_000.0),
    ("60m", 5_060.0, 5_450.0),
    ("40m", 7_000.0, 7_300.0),
    ("30m", 10_100.0, 10_150.0),
    ("20m", 14_000.0, 14_350.0),
    ("17m", 18_068.0, 18_168.0),
    ("15m", 21_000.0, 21_450.0),
    ("12m", 24_890.0, 24_990.0),
    ("10m", 28_000.0, 29_700.0),
    ("8m", 40_000.0, 45_000.0),
    ("6m", 50_000.0, 54_000.0),
    ("5m", 54_000.001, 69_900.0),
    ("4m", 70_000.0, 71_000.0),
    ("2m", 144_000.0, 148_000.0),
    ("1.25m", 222_000.0, 225_000.0),
    ("70cm", 420_000.0, 450_000.0),
    ("33cm", 902_000.0, 928_000.0),
    ("23cm", 1_240_000.0, 1_300_000.0),
    ("13cm", 2_300_000.0, 2_450_000.0),
    ("9cm", 3_300_000.0, 3_500_000.0),
    ("6cm", 5_650_000.0, 5_925_000.0),
    ("3cm", 10_000_000.0, 10_500_000.0),
    ("1.25cm", 24_000_000.0, 24_250_000.0),
    ("6mm", 47_000_000.0, 47_200_000.0),
    ("4mm", 75_500_000.0, 81_000_000.0),
    ("2.5mm", 119_980_000.0, 123_000_000.0),
    ("2mm", 134_000_000.0, 149_000_000.0),
    ("1mm", 241_000_000.0, 250_000_000.0),
];

/// Static ADIF band plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdifBandPlan;

impl BandClassifier for AdifBandPlan {
    fn band_for_khz(&self, khz: f64) -> Option<String> {
        ADIF_BANDS
            .iter()
            .find(|(_, lo, hi)| (*lo..=*hi).contains(&khz))
            .map(|(label, _, _)| (*label).to_string())
    }
}
