//! Text-level fixes for known producer bugs, applied before tokenizing.
//!
//! Both rewrites touch only the header section, so the cost is bounded by
//! header size regardless of how many records follow. Running [`repair`]
//! on its own output changes nothing.

use std::borrow::Cow;
use std::sync::LazyLock;

use log::debug;
use regex::{Captures, Regex};

use super::split_header;

static BREAKS_BEFORE_EOH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\s*<br\s*/?>)+\s*(?P<eoh><eoh>)\z").expect("valid break pattern")
});

static MISLENGTHED_HEADER_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(?P<name>adif_ver|programid|programversion|created_timestamp):(?P<len>\d+)(?P<kind>:[a-z])?>(?P<value>[^<]*)")
        .expect("valid header tag pattern")
});

fn strip_breaks_before_eoh(header: &str) -> Cow<'_, str> {
    BREAKS_BEFORE_EOH.replace(header, "\n$eoh")
}

fn byte_offset(value: &str, chars: usize) -> Option<usize> {
    value
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(value.len()))
        .nth(chars)
}

/// True when the first `declared` characters of `value` form whole tokens:
/// no trailing whitespace inside the span, and whitespace or the end of the
/// free text right after it.
fn declared_length_fits(value: &str, declared: Option<usize>) -> bool {
    let Some(end) = declared.and_then(|n| byte_offset(value, n)) else {
        return false;
    };
    let (span, rest) = value.split_at(end);
    !span.ends_with(char::is_whitespace) && rest.chars().next().is_none_or(char::is_whitespace)
}

/// Extends a short length to the end of the token it cuts, or shrinks an
/// overlong one to the trimmed free text.
fn corrected_length(value: &str, declared: Option<usize>) -> usize {
    let end = match declared.and_then(|n| byte_offset(value, n)) {
        Some(start) => value[start..]
            .find(char::is_whitespace)
            .map_or(value.len(), |i| start + i),
        None => value.len(),
    };
    value[..end].trim_end().chars().count()
}

fn fix_declared_lengths(header: &str) -> Cow<'_, str> {
    MISLENGTHED_HEADER_TAG.replace_all(header, |caps: &Captures| {
        let value = &caps["value"];
        let declared = caps["len"].parse::<usize>().ok();
        if declared_length_fits(value, declared) {
            return caps[0].to_string();
        }
        let actual = corrected_length(value, declared);
        debug!(
            "repairing header tag {}: declared length {} -> {}",
            &caps["name"], &caps["len"], actual
        );
        let kind = caps.name("kind").map_or("", |m| m.as_str());
        format!("<{}:{}{}>{}", &caps["name"], actual, kind, value)
    })
}

/// Applies all header repairs to `text`.
pub fn repair(text: &str) -> Cow<'_, str> {
    let (Some(_), end) = split_header(text) else {
        return Cow::Borrowed(text);
    };
    let header = &text[..end];
    let stripped = strip_breaks_before_eoh(header);
    let fixed = fix_declared_lengths(&stripped);
    if fixed == header {
        return Cow::Borrowed(text);
    }
    debug!("repaired ADIF header ({} -> {} bytes)", header.len(), fixed.len());
    let mut out = String::with_capacity(fixed.len() + text.len() - end);
    out.push_str(&fixed);
    out.push_str(&text[end..]);
    Cow::Owned(out)
}
