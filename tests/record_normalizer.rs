use chrono::{DateTime, SecondsFormat, Utc};

use qsonadif::{
    adif::record::RawRecord,
    band::AdifBandPlan,
    batch::policy::ConfirmationPolicy,
    core::{
        NormalizeError,
        county::cleanup_county,
        datetime::{parse_time, parse_timestamp, reconstruct_span},
        fields::{copy, copy_with, parse_int},
        frequency::{parse_frequency, resolve_band},
        normalizer::{RecordOutcome, normalize_outcome, normalize_record},
        qsl::merge_confirmations,
        refs::extract_refs,
    },
    qso::StationInfo,
    types::Frequency,
};

fn rec(fields: &[(&str, &str)]) -> RawRecord {
    fields.iter().copied().collect()
}

fn iso(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn header(program: &str) -> RawRecord {
    rec(&[("programid", program)])
}

#[test]
fn copy_prefers_base_tag_and_falls_back_to_intl() {
    let mut name = None;
    copy(&rec(&[("name_intl", "Jürgen")]), &["name"], &mut name);
    assert_eq!(name.as_deref(), Some("Jürgen"));

    let mut name = None;
    copy(&rec(&[("name", "Juergen"), ("name_intl", "Jürgen")]), &["name"], &mut name);
    assert_eq!(name.as_deref(), Some("Juergen"));
}

#[test]
fn copy_leaves_destination_alone_when_absent_or_empty() {
    let mut qth = Some("kept".to_string());
    copy(&rec(&[("qth", "")]), &["qth"], &mut qth);
    assert_eq!(qth.as_deref(), Some("kept"));
}

#[test]
fn copy_with_uses_first_alias_and_surfaces_parse_errors() {
    let mut zone = None;
    copy_with(&rec(&[("cq_zone", "14"), ("cqz", "05")]), &["cqz", "cq_zone"], &mut zone, parse_int).unwrap();
    assert_eq!(zone, Some(5));

    let mut zone = None;
    let err = copy_with(&rec(&[("cqz", "five")]), &["cqz"], &mut zone, parse_int).unwrap_err();
    assert_eq!(
        err,
        NormalizeError::InvalidInteger {
            tag: "cqz".to_string(),
            value: "five".to_string()
        }
    );
    assert_eq!(zone, None);
}

#[test]
fn frequency_rounding_is_exact() {
    assert_eq!(parse_frequency("14.0759"), Frequency::Khz(14075.9));
    assert_eq!(parse_frequency("7.07582"), Frequency::Khz(7075.82));
    assert_eq!(parse_frequency("14"), Frequency::Khz(14000.0));
    assert_eq!(parse_frequency("1.8"), Frequency::Khz(1800.0));
}

#[test]
fn non_numeric_frequency_passes_through() {
    assert_eq!(parse_frequency("14.074 MHz"), Frequency::Label("14.074 MHz".to_string()));
    assert_eq!(parse_frequency("1.2.3"), Frequency::Label("1.2.3".to_string()));
    assert_eq!(resolve_band(None, Some(&parse_frequency("HF")), &AdifBandPlan), None);
}

#[test]
fn explicit_band_wins_over_classifier() {
    let freq = parse_frequency("14.074");
    assert_eq!(resolve_band(Some("20M"), Some(&freq), &AdifBandPlan).as_deref(), Some("20m"));
    assert_eq!(resolve_band(None, Some(&freq), &AdifBandPlan).as_deref(), Some("20m"));
    assert_eq!(resolve_band(None, Some(&parse_frequency("144.174")), &AdifBandPlan).as_deref(), Some("2m"));
    assert_eq!(resolve_band(None, Some(&parse_frequency("9.5")), &AdifBandPlan), None);
}

#[test]
fn county_prefix_depends_on_country() {
    assert_eq!(cleanup_county(Some("United States"), "NY, Sullivan"), "US/NY/Sullivan");
    assert_eq!(cleanup_county(Some("ALASKA"), "AK,Juneau"), "US/AK/Juneau");
    assert_eq!(cleanup_county(Some("Hawaii"), "HI,Maui"), "US/HI/Maui");
    assert_eq!(cleanup_county(Some("Puerto Rico"), "PR,Ponce"), "PR/Ponce");
    assert_eq!(cleanup_county(Some("Germany"), "DOK,A01"), "??/DOK/A01");
    assert_eq!(cleanup_county(None, "NY,Sullivan"), "??/NY/Sullivan");
}

#[test]
fn start_time_defaults_and_mirroring() {
    let span = reconstruct_span(&rec(&[("qso_date", "20210705"), ("time_on", "133400")]))
        .unwrap()
        .unwrap();
    assert_eq!(iso(span.start), "2021-07-05T13:34:00Z");
    assert_eq!(span.end, span.start);

    let span = reconstruct_span(&rec(&[("qso_date", "20210705"), ("time_on", "1334")]))
        .unwrap()
        .unwrap();
    assert_eq!(iso(span.start), "2021-07-05T13:34:00Z");

    let span = reconstruct_span(&rec(&[("qso_date", "20210705")])).unwrap().unwrap();
    assert_eq!(iso(span.start), "2021-07-05T00:00:00Z");
}

#[test]
fn end_only_record_defaults_to_end_of_day_and_mirrors() {
    let span = reconstruct_span(&rec(&[("qso_date_off", "20210705")])).unwrap().unwrap();
    assert_eq!(iso(span.end), "2021-07-05T23:59:59Z");
    assert_eq!(span.start, span.end);
}

#[test]
fn end_time_before_start_rolls_over_without_explicit_end_date() {
    let span = reconstruct_span(&rec(&[
        ("qso_date", "20211231"),
        ("time_on", "2355"),
        ("time_off", "0005"),
    ]))
    .unwrap()
    .unwrap();
    assert_eq!(iso(span.start), "2021-12-31T23:55:00Z");
    assert_eq!(iso(span.end), "2022-01-01T00:05:00Z");
}

#[test]
fn explicit_end_date_suppresses_rollover() {
    let span = reconstruct_span(&rec(&[
        ("qso_date", "20211231"),
        ("time_on", "2355"),
        ("qso_date_off", "20211231"),
        ("time_off", "0005"),
    ]))
    .unwrap()
    .unwrap();
    assert_eq!(iso(span.end), "2021-12-31T00:05:00Z");

    let span = reconstruct_span(&rec(&[
        ("qso_date", "20211231"),
        ("time_on", "2355"),
        ("qso_date_off", "20220101"),
        ("time_off", "0005"),
    ]))
    .unwrap()
    .unwrap();
    assert_eq!(iso(span.end), "2022-01-01T00:05:00Z");
}

#[test]
fn no_date_means_no_span() {
    assert_eq!(reconstruct_span(&rec(&[("time_on", "1200")])).unwrap(), None);
}

#[test]
fn malformed_dates_and_times_are_errors() {
    assert!(matches!(
        reconstruct_span(&rec(&[("qso_date", "2021-07-05")])),
        Err(NormalizeError::InvalidDate { .. })
    ));
    assert!(matches!(
        reconstruct_span(&rec(&[("qso_date", "20210230")])),
        Err(NormalizeError::InvalidDate { .. })
    ));
    assert!(matches!(parse_time("time_on", "2460"), Err(NormalizeError::InvalidTime { .. })));
    assert!(matches!(parse_time("time_on", "123"), Err(NormalizeError::InvalidTime { .. })));
    assert!(matches!(
        parse_timestamp("app_lotw_rxqsl", "yesterday"),
        Err(NormalizeError::InvalidTimestamp { .. })
    ));
}

#[test]
fn timestamps_accept_lotw_and_adif_forms() {
    assert_eq!(iso(parse_timestamp("t", "2021-07-06 12:59:09").unwrap()), "2021-07-06T12:59:09Z");
    assert_eq!(iso(parse_timestamp("t", "20210706").unwrap()), "2021-07-06T23:59:59Z");
    assert_eq!(iso(parse_timestamp("t", "2021-07-06").unwrap()), "2021-07-06T23:59:59Z");
}

#[test]
fn no_channel_means_no_qsl() {
    let raw = rec(&[("call", "K1ABC"), ("qsl_rcvd", "N"), ("eqsl_qsl_rcvd", "R")]);
    assert_eq!(merge_confirmations(&raw, ConfirmationPolicy::default()).unwrap(), None);
}

#[test]
fn lotw_program_disables_generic_flag() {
    let raw = rec(&[("qsl_rcvd", "Y"), ("qslrdate", "20210706")]);

    let lotw = ConfirmationPolicy::from_header(&header("LoTW"));
    assert_eq!(lotw, ConfirmationPolicy::DISABLED);
    assert_eq!(merge_confirmations(&raw, lotw).unwrap(), None);

    for program in ["QRZLogbook", "Log4OM", "N1MM Logger+"] {
        let policy = ConfirmationPolicy::from_header(&header(program));
        let qsl = merge_confirmations(&raw, policy).unwrap().unwrap();
        assert!(qsl.received);
        assert_eq!(qsl.sources[0].via, "card");
        assert_eq!(qsl.sources[0].received_on.map(iso).as_deref(), Some("2021-07-06T23:59:59Z"));
    }

    let clublog = ConfirmationPolicy::from_header(&header("Club Log"));
    assert_eq!(clublog.generic_channel(), Some("qsl"));
    assert_eq!(ConfirmationPolicy::from_header(&RawRecord::new()), ConfirmationPolicy::default());
}

#[test]
fn lotw_program_still_records_explicit_card() {
    let raw = rec(&[("qsl_rcvd", "Y"), ("qsl_rcvd_via", "D")]);
    let qsl = merge_confirmations(&raw, ConfirmationPolicy::DISABLED).unwrap().unwrap();
    assert_eq!(qsl.sources.len(), 1);
    assert_eq!(qsl.sources[0].via, "card");
    assert_eq!(qsl.received_on, None);
}

#[test]
fn first_alias_for_a_service_wins() {
    let raw = rec(&[
        ("app_lotw_rxqsl", "2021-07-06 12:59:09"),
        ("lotw_qsl_rcvd", "Y"),
        ("lotw_qslrdate", "20210601"),
    ]);
    let qsl = merge_confirmations(&raw, ConfirmationPolicy::default()).unwrap().unwrap();
    assert_eq!(qsl.sources.len(), 1);
    assert_eq!(qsl.sources[0].received_on.map(iso).as_deref(), Some("2021-07-06T12:59:09Z"));
}

#[test]
fn shadowed_alias_is_not_parsed() {
    let raw = rec(&[("app_lotw_rxqsl", "2021-07-06 12:59:09"), ("lotw_qslrdate", "garbage")]);
    assert!(merge_confirmations(&raw, ConfirmationPolicy::default()).is_ok());
}

#[test]
fn eqsl_via_generic_flag_is_eqsl() {
    let raw = rec(&[("qsl_rcvd", "Y"), ("qsl_rcvd_via", "E"), ("qslrdate", "20200101")]);
    let qsl = merge_confirmations(&raw, ConfirmationPolicy::default()).unwrap().unwrap();
    assert_eq!(qsl.sources.len(), 1);
    assert_eq!(qsl.sources[0].via, "eqsl");
}

#[test]
fn unclaimed_received_via_falls_to_generic_channel() {
    for via in ["G", "g", "X"] {
        let raw = rec(&[("qsl_rcvd", "Y"), ("qsl_rcvd_via", via), ("qslrdate", "20210101")]);
        let qsl = merge_confirmations(&raw, ConfirmationPolicy::default()).unwrap().unwrap();
        assert_eq!(qsl.sources.len(), 1, "via {via}");
        assert_eq!(qsl.sources[0].via, "card");
        assert_eq!(qsl.sources[0].received_on.map(iso).as_deref(), Some("2021-01-01T23:59:59Z"));

        let clublog = ConfirmationPolicy::from_header(&header("Club Log"));
        let qsl = merge_confirmations(&raw, clublog).unwrap().unwrap();
        assert_eq!(qsl.sources[0].via, "qsl");
    }

    let card = rec(&[("qsl_rcvd", "Y"), ("qsl_rcvd_via", "B")]);
    let clublog = ConfirmationPolicy::from_header(&header("Club Log"));
    let qsl = merge_confirmations(&card, clublog).unwrap().unwrap();
    assert_eq!(qsl.sources.len(), 1, "claimed via does not also fire the generic channel");
    assert_eq!(qsl.sources[0].via, "card");
}

#[test]
fn aggregate_receipt_is_earliest_channel() {
    let raw = rec(&[
        ("app_qrzlog_qsldate", "20210601"),
        ("eqsl_qsl_rcvd", "Y"),
        ("eqsl_qslrdate", "20210501"),
        ("lotw_qsl_rcvd", "Y"),
    ]);
    let qsl = merge_confirmations(&raw, ConfirmationPolicy::default()).unwrap().unwrap();
    assert_eq!(qsl.sources.len(), 3);
    assert_eq!(qsl.received_on.map(iso).as_deref(), Some("2021-05-01T23:59:59Z"));
    assert_eq!(qsl.received_on_millis, qsl.received_on.map(|t| t.timestamp_millis()));
    assert_eq!(qsl.channel("lotw").and_then(|c| c.received_on), None);
}

#[test]
fn bad_confirmation_date_fails_the_record() {
    let raw = rec(&[("qso_date", "20210101"), ("qsl_rcvd", "Y"), ("qslrdate", "2021")]);
    let outcome = normalize_outcome(raw, 4, ConfirmationPolicy::default(), &AdifBandPlan);
    match outcome {
        RecordOutcome::Failed { sequence, raw, message } => {
            assert_eq!(sequence, 4);
            assert_eq!(raw.get("qslrdate"), Some("2021"));
            assert!(message.contains("qslrdate"), "{message}");
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn contest_reference_and_exchange() {
    let raw = rec(&[
        ("contest_id", "ARRL-DX-CW"),
        ("rst_sent", "599"),
        ("rst_rcvd", "579"),
        ("stx", "12"),
        ("srx", "340"),
    ]);
    let mut our = StationInfo {
        sent_signal_report: Some("599".to_string()),
        ..StationInfo::default()
    };
    let mut their = StationInfo {
        sent_signal_report: Some("579".to_string()),
        ..StationInfo::default()
    };
    let refs = extract_refs(&raw, &mut our, &mut their);

    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].kind, "contest");
    assert_eq!(refs[0].reference, "ARRL-DX-CW");
    assert_eq!(our.sent_signal_report.as_deref(), Some("599 12"));
    assert_eq!(their.sent_signal_report.as_deref(), Some("579 340"));
}

#[test]
fn serials_without_contest_are_ignored() {
    let raw = rec(&[("srx", "340")]);
    let mut our = StationInfo::default();
    let mut their = StationInfo::default();
    assert!(extract_refs(&raw, &mut our, &mut their).is_empty());
    assert_eq!(their.sent_signal_report, None);
}

#[test]
fn activation_programs_emit_both_sides() {
    let raw = rec(&[
        ("sota_ref", "W2/GC-001"),
        ("my_sota_ref", "W2/CM-003"),
        ("pota_ref", "K-1234, K-5678"),
        ("my_pota_ref", "K-0001"),
        ("iota", "NA-026"),
        ("iota_island_id", "12345"),
    ]);
    let mut our = StationInfo::default();
    let mut their = StationInfo::default();
    let refs = extract_refs(&raw, &mut our, &mut their);

    let summary: Vec<(&str, &str, bool, bool)> = refs
        .iter()
        .map(|r| (r.kind.as_str(), r.reference.as_str(), r.our, r.their))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("iota", "NA-026", false, true),
            ("sota", "W2/GC-001", false, true),
            ("sotaActivation", "W2/CM-003", true, false),
            ("pota", "K-1234", false, true),
            ("pota", "K-5678", false, true),
            ("potaActivation", "K-0001", true, false),
        ]
    );
    assert_eq!(refs[0].island.as_deref(), Some("12345"));
}

#[test]
fn sig_type_comes_from_its_own_value() {
    let raw = rec(&[
        ("sig", "WWFF"),
        ("sig_info", "KFF-1234"),
        ("my_sig", "GMA"),
        ("my_sig_info", "DM/NW-001"),
    ]);
    let mut our = StationInfo::default();
    let mut their = StationInfo::default();
    let refs = extract_refs(&raw, &mut our, &mut their);

    assert_eq!(refs.len(), 2);
    assert_eq!(refs[0].kind, "wwff");
    assert_eq!(refs[0].reference, "KFF-1234");
    assert_eq!(refs[0].name.as_deref(), Some("WWFF"));
    assert!(refs[0].their);
    assert_eq!(refs[1].kind, "gmaActivation");
    assert_eq!(refs[1].reference, "DM/NW-001");
    assert!(refs[1].our);
}

#[test]
fn full_record_normalizes() {
    let raw = rec(&[
        ("call", "WD4CVK"),
        ("station_callsign", "KI2D"),
        ("owner_callsign", "KI2D"),
        ("qso_date", "20210705"),
        ("time_on", "133400"),
        ("freq", "14.0759"),
        ("mode", "FT8"),
        ("country", "United States"),
        ("cnty", "GA,Union"),
        ("dxcc", "291"),
        ("ituz", "08"),
        ("region", "NONE"),
        ("contest_id", "ARRL-DX-CW"),
    ]);
    let qso = normalize_record(&raw, 6, ConfirmationPolicy::default(), &AdifBandPlan).unwrap();

    assert_eq!(qso.sequence, 6);
    assert_eq!(qso.start_at.map(iso).as_deref(), Some("2021-07-05T13:34:00Z"));
    assert_eq!(qso.end_at_millis, qso.start_at_millis);
    assert_eq!(qso.freq, Some(Frequency::Khz(14075.9)));
    assert_eq!(qso.band.as_deref(), Some("20m"));
    assert_eq!(qso.our.owner.as_deref(), Some("KI2D"));
    assert_eq!(qso.their.county.as_deref(), Some("US/GA/Union"));
    assert_eq!(qso.their.dxcc_code, Some(291));
    assert_eq!(qso.their.itu_zone, Some(8));
    assert_eq!(qso.their.region_code.as_deref(), Some("NONE"));
    assert_eq!(qso.refs_of("contest").count(), 1);
    assert!(qso.qsl.is_none());
}

#[test]
fn bad_integer_field_fails_the_record() {
    let raw = rec(&[("call", "K1ABC"), ("dxcc", "USA")]);
    let err = normalize_record(&raw, 1, ConfirmationPolicy::default(), &AdifBandPlan).unwrap_err();
    assert_eq!(err.to_string(), "invalid integer \"USA\" in dxcc");
}
