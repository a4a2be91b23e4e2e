//! Popup markup: the pure rendering collaborator the engine consumes.
//!
//! Produces the HTML fragment shown when the user clicks a station marker:
//! DMS coordinates, a copy-pasteable decimal pair, last-heard time, and the
//! tracking toggle state. Times are UTC.

use aps_reconcile::{PopupRender, PositionReport};
use chrono::DateTime;

/// Decimal degrees → `44° 30' 0.00" N` style DMS with cardinal suffix.
pub fn decimal_to_dms(value: f64, is_lat: bool) -> String {
    let card = match (is_lat, value >= 0.0) {
        (true, true) => 'N',
        (true, false) => 'S',
        (false, true) => 'E',
        (false, false) => 'W',
    };
    let abs = value.abs();
    let deg = abs.floor();
    let min_f = (abs - deg) * 60.0;
    let min = min_f.floor();
    let sec = (min_f - min) * 60.0;
    format!("{deg:.0}\u{b0} {min:.0}' {sec:.2}\" {card}")
}

/// Epoch seconds → `HH:MM` UTC, or `--:--` for out-of-range values.
pub fn format_time_hm(ts: i64) -> String {
    match DateTime::from_timestamp(ts, 0) {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}

/// Epoch seconds → `DD/MM/YYYY HH:MM:SS` UTC, for the message panel.
pub fn format_date_time(ts: i64) -> String {
    match DateTime::from_timestamp(ts, 0) {
        Some(dt) => dt.format("%d/%m/%Y %H:%M:%S").to_string(),
        None => "--".to_string(),
    }
}

/// Production popup renderer.
pub struct HtmlPopup;

impl PopupRender for HtmlPopup {
    fn render(&self, report: &PositionReport, tracked: bool) -> String {
        let lat_dms = decimal_to_dms(report.position.lat, true);
        let lon_dms = decimal_to_dms(report.position.lon, false);
        let checked = if tracked { " checked" } else { "" };
        format!(
            "<strong>{id}</strong><br>\
             Lat: {lat_dms}<br>\
             Lon: {lon_dms}<br>\
             G-Maps: {lat:.6},{lon:.6}<br>\
             Last heard: {time}<br>\
             <label><input type=\"checkbox\"{checked}> Track</label>",
            id = report.station_id,
            lat = report.position.lat,
            lon = report.position.lon,
            time = format_time_hm(report.timestamp),
        )
    }
}
