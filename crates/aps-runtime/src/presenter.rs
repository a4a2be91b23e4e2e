//! Headless presenter: logs presentation effects instead of drawing them.
//!
//! Stands in for a real map surface when the runtime runs without a UI
//! process attached. Popups are never open on a headless surface, so
//! `refresh_popup` is unreachable in practice.

use aps_reconcile::{IconId, LatLon, MarkerHandle, Presenter, TrailHandle};
use tracing::{debug, info};

#[derive(Default)]
pub struct TracePresenter {
    next_handle: u64,
    markers: u64,
    trails: u64,
}

impl TracePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    pub fn marker_count(&self) -> u64 {
        self.markers
    }

    pub fn trail_count(&self) -> u64 {
        self.trails
    }
}

impl Presenter for TracePresenter {
    fn place_marker(&mut self, station_id: &str, position: LatLon, icon: &IconId) -> MarkerHandle {
        let handle = MarkerHandle(self.next());
        self.markers += 1;
        info!(
            station = station_id,
            lat = position.lat,
            lon = position.lon,
            icon = icon.as_str(),
            "marker placed"
        );
        handle
    }

    fn move_marker(&mut self, handle: MarkerHandle, position: LatLon) {
        debug!(handle = handle.0, lat = position.lat, lon = position.lon, "marker moved");
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.markers = self.markers.saturating_sub(1);
        info!(handle = handle.0, "marker removed");
    }

    fn popup_is_open(&self, _handle: MarkerHandle) -> bool {
        false
    }

    fn refresh_popup(&mut self, handle: MarkerHandle, _content: String) {
        debug!(handle = handle.0, "popup refresh (headless, ignored)");
    }

    fn draw_trail(&mut self, points: &[LatLon]) -> TrailHandle {
        let handle = TrailHandle(self.next());
        self.trails += 1;
        info!(handle = handle.0, points = points.len(), "trail drawn");
        handle
    }

    fn redraw_trail(&mut self, handle: TrailHandle, points: &[LatLon]) {
        debug!(handle = handle.0, points = points.len(), "trail redrawn");
    }

    fn remove_trail(&mut self, handle: TrailHandle) {
        self.trails = self.trails.saturating_sub(1);
        info!(handle = handle.0, "trail removed");
    }
}
