//! Confirmation (QSL) detection across services and producer conventions.
//!
//! Rules run in a fixed order. Several rules can describe the same service
//! (LoTW dates arrive either as `app_lotw_*` or as `lotw_qsl*`); the first
//! one to fire wins and later aliases for that service are not inspected.

use chrono::{DateTime, Utc};

use crate::{
    adif::record::RawRecord,
    batch::policy::ConfirmationPolicy,
    qso::{Qsl, QslChannel},
};

use super::{NormalizeResult, datetime::parse_timestamp};

type Detect = fn(&RawRecord, &'static str) -> NormalizeResult<Option<QslChannel>>;

struct ChannelRule {
    /// Service name, or `None` for the policy-named generic channel.
    service: Option<&'static str>,
    detect: Detect,
}

const CHANNEL_RULES: &[ChannelRule] = &[
    ChannelRule { service: Some("qrz"), detect: qrz_logbook },
    ChannelRule { service: Some("lotw"), detect: lotw_app_fields },
    ChannelRule { service: Some("lotw"), detect: lotw_fields },
    ChannelRule { service: Some("eqsl"), detect: eqsl_fields },
    ChannelRule { service: Some("card"), detect: card_via },
    ChannelRule { service: Some("eqsl"), detect: eqsl_via },
    ChannelRule { service: None, detect: generic_flag },
];

const CARD_VIA: &[&str] = &["b", "d", "m"];
const EQSL_VIA: &str = "e";

fn stamp(raw: &RawRecord, tag: &str) -> NormalizeResult<Option<DateTime<Utc>>> {
    raw.get(tag).map(|v| parse_timestamp(tag, v)).transpose()
}

fn channel(
    via: &str,
    raw: &RawRecord,
    received_tag: &str,
    sent_tag: &str,
) -> NormalizeResult<QslChannel> {
    Ok(QslChannel {
        via: via.to_string(),
        received: true,
        received_on: stamp(raw, received_tag)?,
        sent_on: stamp(raw, sent_tag)?,
        id: None,
    })
}

fn qrz_logbook(raw: &RawRecord, via: &'static str) -> NormalizeResult<Option<QslChannel>> {
    let confirmed = raw.get("app_qrzlog_status").is_some_and(|s| s.eq_ignore_ascii_case("c"));
    if raw.get("app_qrzlog_qsldate").is_none() && !confirmed {
        return Ok(None);
    }
    let mut ch = channel(via, raw, "app_qrzlog_qsldate", "app_qrzlog_sentdate")?;
    ch.id = raw.get("app_qrzlog_logid").map(str::to_string);
    Ok(Some(ch))
}

fn lotw_app_fields(raw: &RawRecord, via: &'static str) -> NormalizeResult<Option<QslChannel>> {
    if raw.get("app_lotw_rxqsl").is_none() {
        return Ok(None);
    }
    channel(via, raw, "app_lotw_rxqsl", "app_lotw_rxqso").map(Some)
}

fn lotw_fields(raw: &RawRecord, via: &'static str) -> NormalizeResult<Option<QslChannel>> {
    if raw.get("lotw_qslrdate").is_none() && !raw.is_yes("lotw_qsl_rcvd") {
        return Ok(None);
    }
    channel(via, raw, "lotw_qslrdate", "lotw_qslsdate").map(Some)
}

fn eqsl_fields(raw: &RawRecord, via: &'static str) -> NormalizeResult<Option<QslChannel>> {
    if !raw.is_yes("eqsl_qsl_rcvd") {
        return Ok(None);
    }
    channel(via, raw, "eqsl_qslrdate", "eqsl_qslsdate").map(Some)
}

fn received_via(raw: &RawRecord) -> Option<String> {
    raw.get("qsl_rcvd_via").map(|v| v.trim().to_ascii_lowercase())
}

fn card_via(raw: &RawRecord, via: &'static str) -> NormalizeResult<Option<QslChannel>> {
    if !raw.is_yes("qsl_rcvd") || !received_via(raw).is_some_and(|v| CARD_VIA.contains(&v.as_str())) {
        return Ok(None);
    }
    channel(via, raw, "qslrdate", "qslsdate").map(Some)
}

fn eqsl_via(raw: &RawRecord, via: &'static str) -> NormalizeResult<Option<QslChannel>> {
    if !raw.is_yes("qsl_rcvd") || received_via(raw).as_deref() != Some(EQSL_VIA) {
        return Ok(None);
    }
    channel(via, raw, "qslrdate", "qslsdate").map(Some)
}

/// Bare flag, or a `qsl_rcvd_via` value (`G`, producer-specific codes) no
/// earlier rule claims.
fn generic_flag(raw: &RawRecord, via: &'static str) -> NormalizeResult<Option<QslChannel>> {
    let claimed = received_via(raw).is_some_and(|v| v == EQSL_VIA || CARD_VIA.contains(&v.as_str()));
    if !raw.is_yes("qsl_rcvd") || claimed {
        return Ok(None);
    }
    channel(via, raw, "qslrdate", "qslsdate").map(Some)
}

/// Collects every confirmation channel present in `raw`.
///
/// Returns `None` when no channel fired. The aggregate `received_on` is the
/// earliest receipt among channels that carry one.
pub fn merge_confirmations(raw: &RawRecord, policy: ConfirmationPolicy) -> NormalizeResult<Option<Qsl>> {
    let mut sources: Vec<QslChannel> = Vec::new();

    for rule in CHANNEL_RULES {
        let Some(via) = rule.service.or(policy.generic_channel()) else {
            continue;
        };
        if sources.iter().any(|s| s.via == via) {
            continue;
        }
        if let Some(ch) = (rule.detect)(raw, via)? {
            sources.push(ch);
        }
    }

    if sources.is_empty() {
        return Ok(None);
    }

    let received_on = sources.iter().filter_map(|s| s.received_on).min();
    Ok(Some(Qsl {
        received: true,
        received_on,
        received_on_millis: received_on.map(|t| t.timestamp_millis()),
        sources,
    }))
}
