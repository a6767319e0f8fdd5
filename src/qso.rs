//! Canonical QSON contact record and its sub-records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{EpochMillis, Frequency, RecordSeq};

/// Station details for one side of a contact.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationInfo {
    /// Station callsign.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call: Option<String>,
    /// Operator callsign when it differs from the station.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    /// Station owner callsign.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Operator name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Two-letter continent code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
    /// Country name as logged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// DXCC entity name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    /// Free-form location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qth: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Primary subdivision (state, province).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// WAE/CQ region code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,
    /// Signal report sent by this side, plus any contest exchange.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_signal_report: Option<String>,
    /// Secondary subdivision as `PREFIX/VALUE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    /// CQ zone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cq_zone: Option<i32>,
    /// ITU zone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itu_zone: Option<i32>,
    /// DXCC entity code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dxcc_code: Option<i32>,
    /// Contact e-mail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Maidenhead locator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<String>,
    /// Latitude as logged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<String>,
    /// Longitude as logged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<String>,
    /// Callsign prefix of the entity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_prefix: Option<String>,
    /// Transmit power as logged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    /// Receive frequency for split contacts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freq: Option<Frequency>,
    /// Receive band for split contacts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<String>,
}

/// One confirmation channel that fired for a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QslChannel {
    /// Service name, e.g. `lotw` or `card`.
    pub via: String,
    /// Always true for a recorded channel.
    pub received: bool,
    /// When the confirmation was received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_on: Option<DateTime<Utc>>,
    /// When our confirmation was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_on: Option<DateTime<Utc>>,
    /// Service-specific record id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Aggregated confirmation state across channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Qsl {
    /// True when any channel fired.
    pub received: bool,
    /// Earliest receipt across channels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_on: Option<DateTime<Utc>>,
    /// [`Qsl::received_on`] in epoch millis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_on_millis: Option<EpochMillis>,
    /// Channels in detection order.
    pub sources: Vec<QslChannel>,
}

impl Qsl {
    /// Looks up a channel by service name.
    pub fn channel(&self, via: &str) -> Option<&QslChannel> {
        self.sources.iter().find(|s| s.via == via)
    }

    /// Name-keyed view of [`Qsl::sources`], as used by older QSON exports.
    pub fn by_via(&self) -> BTreeMap<&str, &QslChannel> {
        self.sources.iter().map(|s| (s.via.as_str(), s)).collect()
    }
}

/// Auxiliary reference such as a contest or an award program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Reference kind, e.g. `contest`, `pota`, `potaActivation`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Reference identifier.
    #[serde(rename = "ref")]
    pub reference: String,
    /// Set when the reference belongs to our station.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub our: bool,
    /// Set when the reference belongs to the contacted station.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub their: bool,
    /// Program name as written in the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Island identifier within an island group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub island: Option<String>,
}

/// Fully normalized contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    /// Position in the source file.
    pub sequence: RecordSeq,
    /// Our station.
    pub our: StationInfo,
    /// The contacted station.
    pub their: StationInfo,
    /// Operating frequency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freq: Option<Frequency>,
    /// Band label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<String>,
    /// Emission mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Contact start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    /// Contact start in epoch millis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at_millis: Option<EpochMillis>,
    /// Contact end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<DateTime<Utc>>,
    /// Contact end in epoch millis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at_millis: Option<EpochMillis>,
    /// Confirmation state, absent when no channel fired.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qsl: Option<Qsl>,
    /// Contest and award references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub refs: Vec<Reference>,
}

impl ContactRecord {
    /// Returns references of the given kind.
    pub fn refs_of<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Reference> + 'a {
        self.refs.iter().filter(move |r| r.kind == kind)
    }
}
