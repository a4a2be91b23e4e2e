use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair. Exact equality is intentional: trail dedup
/// compares the coordinates a station actually reported, not a distance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// One timestamped position observation for a station.
///
/// `station_id` is the full callsign including SSID (e.g. `"IW0ABC-9"`);
/// `ssid_class` is the icon-category token derived from it (e.g. `"9"`).
/// Immutable once received.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionReport {
    pub station_id: String,
    pub position: LatLon,
    /// Epoch seconds, UTC.
    pub timestamp: i64,
    pub ssid_class: String,
}

impl PositionReport {
    pub fn new(
        station_id: impl Into<String>,
        position: LatLon,
        timestamp: i64,
        ssid_class: impl Into<String>,
    ) -> Self {
        Self {
            station_id: station_id.into(),
            position,
            timestamp,
            ssid_class: ssid_class.into(),
        }
    }
}

/// Opaque reference to a rendered map marker, allocated by the presenter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerHandle(pub u64);

/// Opaque reference to a rendered trail polyline, allocated by the presenter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrailHandle(pub u64);

/// Current marker state for one visible station.
///
/// Exists iff the station is inside the active time window and was present
/// in the most recent snapshot or push update.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerState {
    pub station_id: String,
    pub position: LatLon,
    pub ssid_class: String,
    pub handle: MarkerHandle,
    /// Timestamp of the report that last touched this marker.
    pub last_heard: i64,
}

/// Accumulated movement trail for one tracked station.
///
/// Exists iff the user has enabled tracking for the station; `positions` is
/// append-only while tracking is on and never contains two equal points in
/// a row.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackState {
    pub station_id: String,
    pub positions: Vec<LatLon>,
    pub handle: TrailHandle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serde_round_trip() {
        let r = PositionReport::new("IW0ABC-9", LatLon::new(44.5, 11.2), 1_700_000_000, "9");
        let json = serde_json::to_string(&r).unwrap();
        let back: PositionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }

    #[test]
    fn latlon_equality_is_exact() {
        assert_eq!(LatLon::new(44.5, 11.2), LatLon::new(44.5, 11.2));
        assert_ne!(LatLon::new(44.5, 11.2), LatLon::new(44.5, 11.200001));
    }
}
