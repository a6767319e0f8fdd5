//! Secondary-subdivision cleanup.
//!
//! Producers write counties as `"NY,Sullivan"`, `"NY, SULLIVAN"` and so on,
//! with no indication of which country's subdivision list they belong to.
//! The result is always `PREFIX/STATE/COUNTY`-shaped, or the value with its
//! own leading code for countries that already carry one.

use std::sync::LazyLock;

use regex::Regex;

static US_COUNTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(united states|hawaii|alaska)").expect("valid US pattern"));

static SELF_PREFIXED_COUNTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(puerto rico)").expect("valid country pattern"));

static FIRST_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*").expect("valid comma pattern"));

/// Prefix used when the country is unknown or unrecognized.
pub const UNKNOWN_PREFIX: &str = "??";

/// Rewrites `county` into `PREFIX/VALUE` form using `country` as a hint.
pub fn cleanup_county(country: Option<&str>, county: &str) -> String {
    let county = FIRST_COMMA.replace(county.trim(), "/");
    match country {
        Some(c) if US_COUNTRY.is_match(c) => format!("US/{county}"),
        Some(c) if SELF_PREFIXED_COUNTRY.is_match(c) => county.into_owned(),
        _ => format!("{UNKNOWN_PREFIX}/{county}"),
    }
}
