//! aps-schemas
//!
//! Wire shapes for the APRS map transports, exactly as the server emits
//! them. Timestamps arrive as float epoch seconds and are truncated to
//! whole seconds when converted into core reports; the `ssid` token on the
//! wire becomes the core `ssid_class`.

use std::collections::BTreeMap;

use aps_reconcile::{LatLon, PositionReport};
use serde::{Deserialize, Serialize};

/// One event from the push feed.
///
/// Only `position` carries data the core cares about; every other tag
/// deserializes to [`FeedEvent::Other`] and is ignored upstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedEvent {
    Position(WirePosition),
    #[serde(other)]
    Other,
}

/// Position payload as pushed over the feed and embedded (without the
/// callsign key) in snapshot responses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WirePosition {
    pub callsign: String,
    pub ssid: String,
    pub lat: f64,
    pub lon: f64,
    /// Float epoch seconds, server-side `time.time()`.
    pub timestamp: f64,
}

impl WirePosition {
    /// Core report for this wire position, keyed by the full callsign.
    pub fn to_report(&self) -> PositionReport {
        PositionReport::new(
            self.callsign.clone(),
            LatLon::new(self.lat, self.lon),
            self.timestamp as i64,
            self.ssid.clone(),
        )
    }
}

/// One snapshot entry; the station id is the payload's object key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub lat: f64,
    pub lon: f64,
    pub ssid: String,
    pub timestamp: f64,
}

impl SnapshotEntry {
    pub fn to_report(&self, station_id: &str) -> PositionReport {
        PositionReport::new(
            station_id,
            LatLon::new(self.lat, self.lon),
            self.timestamp as i64,
            self.ssid.clone(),
        )
    }
}

/// Full snapshot payload: station id → latest position. Absence of a key
/// signals removal.
pub type SnapshotPayload = BTreeMap<String, SnapshotEntry>;

/// Flatten a snapshot payload into core reports, sorted by station id.
pub fn snapshot_reports(payload: &SnapshotPayload) -> Vec<PositionReport> {
    payload
        .iter()
        .map(|(station_id, entry)| entry.to_report(station_id))
        .collect()
}

/// One received APRS text message, as listed by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StationMessage {
    pub sender: String,
    pub recipient: String,
    pub info: String,
    pub timestamp: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_event_deserializes() {
        let json = r#"{"type":"position","callsign":"IW0ABC-9","ssid":"9",
                       "lat":44.5,"lon":11.2,"timestamp":1700000000.25}"#;
        let event: FeedEvent = serde_json::from_str(json).unwrap();
        let FeedEvent::Position(pos) = event else {
            panic!("expected position event");
        };
        let report = pos.to_report();
        assert_eq!(report.station_id, "IW0ABC-9");
        assert_eq!(report.ssid_class, "9");
        assert_eq!(report.timestamp, 1_700_000_000, "float secs truncate");
    }

    #[test]
    fn unknown_event_types_are_ignored() {
        let json = r#"{"type":"telemetry","vals":[1,2,3]}"#;
        let event: FeedEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, FeedEvent::Other);
    }

    #[test]
    fn snapshot_payload_keyed_by_station_id() {
        let json = r#"{
          "IW0ABC-9": {"lat":44.5,"lon":11.2,"ssid":"9","timestamp":1700000000.0},
          "IK1XYZ":   {"lat":45.0,"lon":7.7,"ssid":"0","timestamp":1700000100.5}
        }"#;
        let payload: SnapshotPayload = serde_json::from_str(json).unwrap();
        let reports = snapshot_reports(&payload);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].station_id, "IK1XYZ");
        assert_eq!(reports[1].station_id, "IW0ABC-9");
        assert_eq!(reports[1].ssid_class, "9");
    }

    #[test]
    fn message_list_deserializes() {
        let json = r#"[{"sender":"IZ6NNH","recipient":"IW0ABC-9",
                        "info":"QSL 73","timestamp":1700000000.0}]"#;
        let msgs: Vec<StationMessage> = serde_json::from_str(json).unwrap();
        assert_eq!(msgs[0].sender, "IZ6NNH");
        assert_eq!(msgs[0].info, "QSL 73");
    }
}
