//! In-process presentation doubles for tests.
//!
//! [`RecordingPresenter`] is a pure in-memory map surface: it allocates
//! handles, keeps the live marker/trail sets, and records every call so
//! tests can assert on the exact sequence of presentation effects. No
//! rendering, no IO.

use std::collections::{BTreeMap, BTreeSet};

use crate::{IconId, LatLon, MarkerHandle, PopupRender, PositionReport, Presenter, TrailHandle};

/// One recorded presentation effect.
#[derive(Clone, Debug, PartialEq)]
pub enum PresenterCall {
    PlaceMarker {
        handle: MarkerHandle,
        station_id: String,
        position: LatLon,
        icon: String,
    },
    MoveMarker {
        handle: MarkerHandle,
        position: LatLon,
    },
    RemoveMarker {
        handle: MarkerHandle,
    },
    RefreshPopup {
        handle: MarkerHandle,
        content: String,
    },
    DrawTrail {
        handle: TrailHandle,
        points: Vec<LatLon>,
    },
    RedrawTrail {
        handle: TrailHandle,
        points: Vec<LatLon>,
    },
    RemoveTrail {
        handle: TrailHandle,
    },
}

/// Recording map-surface double.
#[derive(Default)]
pub struct RecordingPresenter {
    pub calls: Vec<PresenterCall>,
    next_handle: u64,
    markers: BTreeMap<MarkerHandle, LatLon>,
    trails: BTreeMap<TrailHandle, Vec<LatLon>>,
    open_popups: BTreeSet<MarkerHandle>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    /// Number of markers currently on the surface.
    pub fn live_markers(&self) -> usize {
        self.markers.len()
    }

    /// Number of trails currently on the surface.
    pub fn live_trails(&self) -> usize {
        self.trails.len()
    }

    /// Current rendered position of a live marker.
    pub fn marker_position(&self, handle: MarkerHandle) -> Option<LatLon> {
        self.markers.get(&handle).copied()
    }

    /// Points of a live trail as last drawn.
    pub fn trail_points(&self, handle: TrailHandle) -> Option<&[LatLon]> {
        self.trails.get(&handle).map(Vec::as_slice)
    }

    /// Simulate the user opening a marker's popup.
    pub fn open_popup(&mut self, handle: MarkerHandle) {
        self.open_popups.insert(handle);
    }

    pub fn popup_refreshes(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, PresenterCall::RefreshPopup { .. }))
            .count()
    }
}

impl Presenter for RecordingPresenter {
    fn place_marker(&mut self, station_id: &str, position: LatLon, icon: &IconId) -> MarkerHandle {
        let handle = MarkerHandle(self.next());
        self.markers.insert(handle, position);
        self.calls.push(PresenterCall::PlaceMarker {
            handle,
            station_id: station_id.to_string(),
            position,
            icon: icon.as_str().to_string(),
        });
        handle
    }

    fn move_marker(&mut self, handle: MarkerHandle, position: LatLon) {
        self.markers.insert(handle, position);
        self.calls.push(PresenterCall::MoveMarker { handle, position });
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.markers.remove(&handle);
        self.open_popups.remove(&handle);
        self.calls.push(PresenterCall::RemoveMarker { handle });
    }

    fn popup_is_open(&self, handle: MarkerHandle) -> bool {
        self.open_popups.contains(&handle)
    }

    fn refresh_popup(&mut self, handle: MarkerHandle, content: String) {
        self.calls.push(PresenterCall::RefreshPopup { handle, content });
    }

    fn draw_trail(&mut self, points: &[LatLon]) -> TrailHandle {
        let handle = TrailHandle(self.next());
        self.trails.insert(handle, points.to_vec());
        self.calls.push(PresenterCall::DrawTrail {
            handle,
            points: points.to_vec(),
        });
        handle
    }

    fn redraw_trail(&mut self, handle: TrailHandle, points: &[LatLon]) {
        self.trails.insert(handle, points.to_vec());
        self.calls.push(PresenterCall::RedrawTrail {
            handle,
            points: points.to_vec(),
        });
    }

    fn remove_trail(&mut self, handle: TrailHandle) {
        self.trails.remove(&handle);
        self.calls.push(PresenterCall::RemoveTrail { handle });
    }
}

/// Minimal renderer for tests: stable, greppable, not HTML.
pub struct DebugPopup;

impl PopupRender for DebugPopup {
    fn render(&self, report: &PositionReport, tracked: bool) -> String {
        format!(
            "{} @ {},{} ts={} tracked={}",
            report.station_id,
            report.position.lat,
            report.position.lon,
            report.timestamp,
            tracked
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique_across_kinds() {
        let mut p = RecordingPresenter::new();
        let m = p.place_marker("IW0ABC-9", LatLon::new(1.0, 2.0), &IconId::new("icons/car.png"));
        let t = p.draw_trail(&[LatLon::new(1.0, 2.0)]);
        assert_ne!(m.0, t.0);
    }

    #[test]
    fn remove_marker_closes_popup() {
        let mut p = RecordingPresenter::new();
        let m = p.place_marker("IW0ABC-9", LatLon::new(1.0, 2.0), &IconId::new("icons/car.png"));
        p.open_popup(m);
        assert!(p.popup_is_open(m));
        p.remove_marker(m);
        assert!(!p.popup_is_open(m));
    }
}
