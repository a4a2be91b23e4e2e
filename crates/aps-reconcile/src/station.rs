//! Station registry: at most one marker per station identity.

use std::collections::BTreeMap;

use crate::{IconTable, MarkerState, PopupRender, PositionReport, Presenter};

/// Owns the map from station identity to its current marker state.
#[derive(Default)]
pub struct StationRegistry {
    markers: BTreeMap<String, MarkerState>,
}

impl StationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or update the marker for `report.station_id`.
    ///
    /// First report places a marker with the icon chosen by `ssid_class`;
    /// subsequent reports move it in place. If the popup is currently open
    /// the presenter is asked to refresh its content.
    pub fn upsert(
        &mut self,
        report: &PositionReport,
        tracked: bool,
        icons: &IconTable,
        popup: &dyn PopupRender,
        presenter: &mut dyn Presenter,
    ) -> &MarkerState {
        if let Some(state) = self.markers.get_mut(&report.station_id) {
            state.position = report.position;
            state.ssid_class = report.ssid_class.clone();
            state.last_heard = report.timestamp;
            presenter.move_marker(state.handle, state.position);
            if presenter.popup_is_open(state.handle) {
                presenter.refresh_popup(state.handle, popup.render(report, tracked));
            }
        } else {
            let icon = icons.icon_for(&report.ssid_class);
            let handle = presenter.place_marker(&report.station_id, report.position, icon);
            self.markers.insert(
                report.station_id.clone(),
                MarkerState {
                    station_id: report.station_id.clone(),
                    position: report.position,
                    ssid_class: report.ssid_class.clone(),
                    handle,
                    last_heard: report.timestamp,
                },
            );
        }
        &self.markers[&report.station_id]
    }

    /// Remove the marker for `station_id`, if present. No-op otherwise.
    ///
    /// Callers owning a track registry must cascade track teardown *before*
    /// calling this (see `ReconcileEngine::remove_station`).
    pub fn remove(&mut self, station_id: &str, presenter: &mut dyn Presenter) {
        if let Some(state) = self.markers.remove(station_id) {
            presenter.remove_marker(state.handle);
        }
    }

    pub fn get(&self, station_id: &str) -> Option<&MarkerState> {
        self.markers.get(station_id)
    }

    pub fn contains(&self, station_id: &str) -> bool {
        self.markers.contains_key(station_id)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Registered ids in deterministic (sorted) order.
    pub fn station_ids(&self) -> Vec<String> {
        self.markers.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{DebugPopup, PresenterCall, RecordingPresenter};
    use crate::LatLon;

    fn report(id: &str, lat: f64, lon: f64, ts: i64) -> PositionReport {
        PositionReport::new(id, LatLon::new(lat, lon), ts, "9")
    }

    #[test]
    fn first_report_places_marker_with_class_icon() {
        let mut reg = StationRegistry::new();
        let mut p = RecordingPresenter::new();
        let icons = IconTable::builtin();

        let state = reg
            .upsert(&report("IW0ABC-9", 44.5, 11.2, 100), false, &icons, &DebugPopup, &mut p)
            .clone();

        assert_eq!(state.position, LatLon::new(44.5, 11.2));
        assert_eq!(p.live_markers(), 1);
        assert!(matches!(
            &p.calls[0],
            PresenterCall::PlaceMarker { station_id, icon, .. }
                if station_id == "IW0ABC-9" && icon == "icons/vehicle.png"
        ));
    }

    #[test]
    fn second_report_moves_in_place() {
        let mut reg = StationRegistry::new();
        let mut p = RecordingPresenter::new();
        let icons = IconTable::builtin();

        let first = reg
            .upsert(&report("IW0ABC-9", 44.5, 11.2, 100), false, &icons, &DebugPopup, &mut p)
            .handle;
        let second = reg
            .upsert(&report("IW0ABC-9", 44.6, 11.3, 200), false, &icons, &DebugPopup, &mut p)
            .handle;

        assert_eq!(first, second, "upsert must not re-place the marker");
        assert_eq!(p.live_markers(), 1);
        assert_eq!(reg.get("IW0ABC-9").unwrap().position, LatLon::new(44.6, 11.3));
        assert_eq!(reg.get("IW0ABC-9").unwrap().last_heard, 200);
    }

    #[test]
    fn popup_refreshed_only_when_open() {
        let mut reg = StationRegistry::new();
        let mut p = RecordingPresenter::new();
        let icons = IconTable::builtin();

        let handle = reg
            .upsert(&report("IW0ABC-9", 44.5, 11.2, 100), false, &icons, &DebugPopup, &mut p)
            .handle;
        reg.upsert(&report("IW0ABC-9", 44.6, 11.3, 200), false, &icons, &DebugPopup, &mut p);
        assert_eq!(p.popup_refreshes(), 0);

        p.open_popup(handle);
        reg.upsert(&report("IW0ABC-9", 44.7, 11.4, 300), false, &icons, &DebugPopup, &mut p);
        assert_eq!(p.popup_refreshes(), 1);
    }

    #[test]
    fn remove_is_noop_for_absent_id() {
        let mut reg = StationRegistry::new();
        let mut p = RecordingPresenter::new();
        reg.remove("NOCALL", &mut p);
        assert!(p.calls.is_empty());
    }
}
