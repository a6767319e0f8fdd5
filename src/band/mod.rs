//! Frequency to band classification.

/// ADIF band enumeration.
pub mod plan;

pub use plan::AdifBandPlan;

/// Resolves a band label for a frequency.
pub trait BandClassifier: Send + Sync {
    /// Returns the band containing `khz`, if any.
    fn band_for_khz(&self, khz: f64) -> Option<String>;
}

impl<F> BandClassifier for F
where
    F: Fn(f64) -> Option<String> + Send + Sync,
{
    fn band_for_khz(&self, khz: f64) -> Option<String> {
        self(khz)
    }
}
