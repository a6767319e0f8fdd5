//! Contest and award-program reference extraction.
//!
//! Award programs that log both sides of an activation (POTA, SOTA, ...)
//! produce one entry per side: the plain type for the contacted station and
//! `<type>Activation` for ours.

use crate::{
    adif::record::RawRecord,
    qso::{Reference, StationInfo},
};

/// Suffix appended to the type of our own activation references.
pub const ACTIVATION_SUFFIX: &str = "Activation";

/// Paired theirs/ours tags for a fixed award program.
struct ProgramTags {
    kind: &'static str,
    their_ref: &'static str,
    our_ref: &'static str,
    their_island: Option<&'static str>,
    our_island: Option<&'static str>,
    multi: bool,
}

const PROGRAMS: &[ProgramTags] = &[
    ProgramTags {
        kind: "iota",
        their_ref: "iota",
        our_ref: "my_iota",
        their_island: Some("iota_island_id"),
        our_island: Some("my_iota_island_id"),
        multi: false,
    },
    ProgramTags {
        kind: "sota",
        their_ref: "sota_ref",
        our_ref: "my_sota_ref",
        their_island: None,
        our_island: None,
        multi: false,
    },
    ProgramTags {
        kind: "pota",
        their_ref: "pota_ref",
        our_ref: "my_pota_ref",
        their_island: None,
        our_island: None,
        multi: true,
    },
    ProgramTags {
        kind: "wwff",
        their_ref: "wwff_ref",
        our_ref: "my_wwff_ref",
        their_island: None,
        our_island: None,
        multi: false,
    },
];

fn activation_kind(kind: &str) -> String {
    format!("{kind}{ACTIVATION_SUFFIX}")
}

fn split_refs(value: &str, multi: bool) -> Vec<String> {
    if !multi {
        return vec![value.trim().to_string()];
    }
    value
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

fn push_side(
    refs: &mut Vec<Reference>,
    kind: String,
    value: &str,
    multi: bool,
    ours: bool,
    island: Option<&str>,
    name: Option<&str>,
) {
    for reference in split_refs(value, multi) {
        refs.push(Reference {
            kind: kind.clone(),
            reference,
            our: ours,
            their: !ours,
            name: name.map(str::to_string),
            island: island.map(str::to_string),
        });
    }
}

fn append_exchange(sent: &mut Option<String>, serial: Option<&str>) {
    let Some(serial) = serial else {
        return;
    };
    *sent = Some(match sent.take() {
        Some(report) => format!("{report} {serial}"),
        None => serial.to_string(),
    });
}

/// Extracts contest and award references from `raw`.
///
/// Contest serial exchanges are appended to the sent reports in `our` and
/// `their`.
pub fn extract_refs(raw: &RawRecord, our: &mut StationInfo, their: &mut StationInfo) -> Vec<Reference> {
    let mut refs = Vec::new();

    if let Some(contest) = raw.get("contest_id") {
        refs.push(Reference {
            kind: "contest".to_string(),
            reference: contest.trim().to_string(),
            our: false,
            their: false,
            name: None,
            island: None,
        });
        append_exchange(&mut their.sent_signal_report, raw.first_of(&["srx", "srx_string"]));
        append_exchange(&mut our.sent_signal_report, raw.first_of(&["stx", "stx_string"]));
    }

    for program in PROGRAMS {
        if let Some(v) = raw.get(program.their_ref) {
            let island = program.their_island.and_then(|t| raw.get(t));
            push_side(&mut refs, program.kind.to_string(), v, program.multi, false, island, None);
        }
        if let Some(v) = raw.get(program.our_ref) {
            let island = program.our_island.and_then(|t| raw.get(t));
            push_side(&mut refs, activation_kind(program.kind), v, program.multi, true, island, None);
        }
    }

    // Special-interest groups name their own program in `sig`.
    if let (Some(sig), Some(info)) = (raw.get("sig"), raw.get("sig_info")) {
        let name = sig.trim();
        push_side(&mut refs, name.to_lowercase(), info, false, false, None, Some(name));
    }
    if let (Some(sig), Some(info)) = (raw.get("my_sig"), raw.get("my_sig_info")) {
        let name = sig.trim();
        push_side(&mut refs, activation_kind(&name.to_lowercase()), info, false, true, None, Some(name));
    }

    refs
}
