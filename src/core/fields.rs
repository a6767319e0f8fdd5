//! Optional-value transfer from a [`RawRecord`] into typed destination slots.
//!
//! Lookups go through [`RawRecord::get`], so a missing base tag falls back
//! to its `_intl` variant and empty values count as absent.

use crate::adif::record::RawRecord;

use super::{NormalizeError, NormalizeResult};

/// Copies the value of the first present tag in `tags` into `dest`.
///
/// Leaves `dest` untouched when none of the tags is present.
pub fn copy(raw: &RawRecord, tags: &[&str], dest: &mut Option<String>) {
    if let Some(v) = raw.first_of(tags) {
        *dest = Some(v.to_string());
    }
}

/// Like [`copy`], passing the value through `f` first.
pub fn copy_with<T>(
    raw: &RawRecord,
    tags: &[&str],
    dest: &mut Option<T>,
    f: impl FnOnce(&str, &str) -> NormalizeResult<T>,
) -> NormalizeResult<()> {
    if let Some((tag, v)) = tags.iter().find_map(|t| raw.get(t).map(|v| (*t, v))) {
        *dest = Some(f(tag, v)?);
    }
    Ok(())
}

/// Parses a decimal integer field.
pub fn parse_int(tag: &str, value: &str) -> NormalizeResult<i32> {
    value.trim().parse().map_err(|_| NormalizeError::InvalidInteger {
        tag: tag.to_string(),
        value: value.to_string(),
    })
}
