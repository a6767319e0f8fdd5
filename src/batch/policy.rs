//! Batch-wide confirmation policy derived from the file header.

use log::debug;

use crate::adif::record::RawRecord;

/// Channel name used for the generic received flag by default.
pub const DEFAULT_GENERIC_CHANNEL: &str = "card";

/// Header `programid` values with a known meaning for `qsl_rcvd`.
///
/// A `None` channel means the program sets the flag for its own
/// confirmations, which another rule already records.
const KNOWN_PROGRAMS: &[(&str, Option<&str>)] = &[
    ("lotw", None),
    ("qrzlogbook", Some("card")),
    ("club log", Some("qsl")),
    ("clublog", Some("qsl")),
];

/// How to treat a bare `qsl_rcvd` flag that names no channel.
///
/// Computed once per batch and passed by value to every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    generic_channel: Option<&'static str>,
}

impl ConfirmationPolicy {
    /// Ignores the generic flag.
    pub const DISABLED: Self = Self { generic_channel: None };

    /// Records the generic flag under `name`.
    pub const fn channel(name: &'static str) -> Self {
        Self {
            generic_channel: Some(name),
        }
    }

    /// Channel the generic flag maps to, if honored.
    pub fn generic_channel(&self) -> Option<&'static str> {
        self.generic_channel
    }

    /// Derives the policy from the header's `programid`.
    pub fn from_header(header: &RawRecord) -> Self {
        let program = header.get("programid").map(|p| p.trim().to_lowercase());
        let policy = program
            .as_deref()
            .and_then(|p| KNOWN_PROGRAMS.iter().find(|(name, _)| *name == p))
            .map_or(Self::default(), |(_, channel)| Self {
                generic_channel: *channel,
            });
        debug!("confirmation policy for program {program:?}: {policy:?}");
        policy
    }
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self::channel(DEFAULT_GENERIC_CHANNEL)
    }
}
