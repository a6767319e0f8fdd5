//! Raw ADIF record to canonical [`ContactRecord`].

use crate::{
    adif::record::RawRecord,
    band::BandClassifier,
    batch::policy::ConfirmationPolicy,
    qso::{ContactRecord, StationInfo},
    types::RecordSeq,
};

use super::{
    NormalizeResult,
    county::cleanup_county,
    datetime::reconstruct_span,
    fields::{copy, copy_with, parse_int},
    frequency::{parse_frequency, resolve_band},
    qsl::merge_confirmations,
    refs::extract_refs,
};

/// Outcome of normalizing one record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// The record normalized cleanly.
    Normalized(ContactRecord),
    /// The record was rejected.
    Failed {
        /// Position in the source file.
        sequence: RecordSeq,
        /// Record as tokenized.
        raw: RawRecord,
        /// Reason for rejection.
        message: String,
    },
}

/// Tags for one side of the contact. Each slot lists aliases, first wins.
struct StationTags {
    call: &'static [&'static str],
    operator: &'static [&'static str],
    owner: &'static [&'static str],
    name: &'static [&'static str],
    continent: &'static [&'static str],
    country: &'static [&'static str],
    qth: &'static [&'static str],
    city: &'static [&'static str],
    state: &'static [&'static str],
    region: &'static [&'static str],
    sent: &'static [&'static str],
    county: &'static [&'static str],
    cq_zone: &'static [&'static str],
    itu_zone: &'static [&'static str],
    dxcc: &'static [&'static str],
    email: &'static [&'static str],
    grid: &'static [&'static str],
    lat: &'static [&'static str],
    lon: &'static [&'static str],
    prefix: &'static [&'static str],
    power: &'static [&'static str],
}

const THEIR_TAGS: StationTags = StationTags {
    call: &["call"],
    operator: &["contacted_op"],
    owner: &["eq_call"],
    name: &["name"],
    continent: &["cont"],
    country: &["country"],
    qth: &["qth"],
    city: &["city"],
    state: &["state"],
    region: &["region"],
    sent: &["rst_rcvd"],
    county: &["cnty"],
    cq_zone: &["cqz", "cq_zone"],
    itu_zone: &["ituz", "itu_zone"],
    dxcc: &["dxcc"],
    email: &["email"],
    grid: &["gridsquare"],
    lat: &["lat"],
    lon: &["lon"],
    prefix: &["pfx"],
    power: &["rx_pwr"],
};

const OUR_TAGS: StationTags = StationTags {
    call: &["station_callsign"],
    operator: &["operator"],
    owner: &["owner_callsign"],
    name: &["my_name"],
    continent: &["my_cont"],
    country: &["my_country"],
    qth: &["my_qth"],
    city: &["my_city"],
    state: &["my_state"],
    region: &["my_region"],
    sent: &["rst_sent", "my_rst_sent"],
    county: &["my_cnty"],
    cq_zone: &["my_cq_zone", "my_cqz"],
    itu_zone: &["my_itu_zone", "my_ituz"],
    dxcc: &["my_dxcc"],
    email: &["my_email"],
    grid: &["my_gridsquare"],
    lat: &["my_lat"],
    lon: &["my_lon"],
    prefix: &["my_pfx"],
    power: &["tx_pwr"],
};

fn station(raw: &RawRecord, tags: &StationTags) -> NormalizeResult<StationInfo> {
    let mut info = StationInfo::default();

    copy(raw, tags.call, &mut info.call);
    copy(raw, tags.operator, &mut info.operator);
    copy(raw, tags.owner, &mut info.owner);
    copy(raw, tags.name, &mut info.name);
    copy(raw, tags.continent, &mut info.continent);
    copy(raw, tags.country, &mut info.country);
    copy(raw, tags.country, &mut info.entity_name);
    copy(raw, tags.qth, &mut info.qth);
    copy(raw, tags.city, &mut info.city);
    copy(raw, tags.state, &mut info.state);
    copy(raw, tags.region, &mut info.region_code);
    copy(raw, tags.sent, &mut info.sent_signal_report);

    let country = info.country.clone();
    copy_with(raw, tags.county, &mut info.county, |_, v| {
        Ok(cleanup_county(country.as_deref(), v))
    })?;

    copy_with(raw, tags.cq_zone, &mut info.cq_zone, parse_int)?;
    copy_with(raw, tags.itu_zone, &mut info.itu_zone, parse_int)?;
    copy_with(raw, tags.dxcc, &mut info.dxcc_code, parse_int)?;

    copy(raw, tags.email, &mut info.email);
    copy(raw, tags.grid, &mut info.grid);
    copy(raw, tags.lat, &mut info.lat);
    copy(raw, tags.lon, &mut info.lon);
    copy(raw, tags.prefix, &mut info.entity_prefix);
    copy(raw, tags.power, &mut info.power);

    Ok(info)
}

/// Normalizes one record. Pure: depends only on its arguments.
pub fn normalize_record(
    raw: &RawRecord,
    sequence: RecordSeq,
    policy: ConfirmationPolicy,
    classifier: &dyn BandClassifier,
) -> NormalizeResult<ContactRecord> {
    let mut our = station(raw, &OUR_TAGS)?;
    let mut their = station(raw, &THEIR_TAGS)?;

    let freq = raw.get("freq").map(parse_frequency);
    let band = resolve_band(raw.get("band"), freq.as_ref(), classifier);

    if let Some(rx) = raw.get("freq_rx") {
        let rx = parse_frequency(rx);
        their.band = resolve_band(raw.get("band_rx"), Some(&rx), classifier);
        their.freq = Some(rx);
    }

    let span = reconstruct_span(raw)?;
    let qsl = merge_confirmations(raw, policy)?;
    let refs = extract_refs(raw, &mut our, &mut their);

    Ok(ContactRecord {
        sequence,
        our,
        their,
        freq,
        band,
        mode: raw.get("mode").map(str::to_string),
        start_at: span.map(|s| s.start),
        start_at_millis: span.map(|s| s.start.timestamp_millis()),
        end_at: span.map(|s| s.end),
        end_at_millis: span.map(|s| s.end.timestamp_millis()),
        qsl,
        refs,
    })
}

/// Normalizes one record, folding any failure into [`RecordOutcome::Failed`].
pub fn normalize_outcome(
    raw: RawRecord,
    sequence: RecordSeq,
    policy: ConfirmationPolicy,
    classifier: &dyn BandClassifier,
) -> RecordOutcome {
    match normalize_record(&raw, sequence, policy, classifier) {
        Ok(qso) => RecordOutcome::Normalized(qso),
        Err(err) => RecordOutcome::Failed {
            sequence,
            raw,
            message: err.to_string(),
        },
    }
}
