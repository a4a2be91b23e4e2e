//! Presentation capability boundary.
//!
//! The engine never touches a map surface directly: every visible effect
//! goes through [`Presenter`], and popup markup comes from a [`PopupRender`]
//! collaborator. Both are object-safe so the runtime can hold trait objects
//! and tests can substitute in-process doubles.

use crate::{IconId, LatLon, MarkerHandle, PositionReport, TrailHandle};

/// Map-surface capability set consumed by the reconciliation core.
///
/// Handles are opaque and allocated by the implementation; the core only
/// stores and returns them. Implementations must tolerate `remove_*` being
/// the last call they ever see for a handle.
pub trait Presenter: Send {
    /// Place a new marker. Called at most once per visible station between
    /// removals.
    fn place_marker(&mut self, station_id: &str, position: LatLon, icon: &IconId) -> MarkerHandle;

    /// Move an existing marker in place.
    fn move_marker(&mut self, handle: MarkerHandle, position: LatLon);

    /// Remove a marker and release its handle.
    fn remove_marker(&mut self, handle: MarkerHandle);

    /// Whether the marker's popup/info surface is currently open.
    fn popup_is_open(&self, handle: MarkerHandle) -> bool;

    /// Replace the displayed popup content. Only called while the popup is
    /// reported open.
    fn refresh_popup(&mut self, handle: MarkerHandle, content: String);

    /// Draw a new trail polyline through `points` (seeded with one point on
    /// tracking enable).
    fn draw_trail(&mut self, points: &[LatLon]) -> TrailHandle;

    /// Redraw an existing trail with the full updated sequence.
    fn redraw_trail(&mut self, handle: TrailHandle, points: &[LatLon]);

    /// Remove a trail and release its handle.
    fn remove_trail(&mut self, handle: TrailHandle);
}

/// Pure popup-markup renderer.
///
/// `tracked` reflects whether the station currently has an active trail so
/// the popup can show the tracking toggle state.
pub trait PopupRender: Send {
    fn render(&self, report: &PositionReport, tracked: bool) -> String;
}

/// Any plain closure with the right shape is a renderer.
impl<F> PopupRender for F
where
    F: Fn(&PositionReport, bool) -> String + Send,
{
    fn render(&self, report: &PositionReport, tracked: bool) -> String {
        self(report, tracked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_popup_renderers() {
        let render = |r: &PositionReport, tracked: bool| format!("{} {}", r.station_id, tracked);
        let report = PositionReport::new("IW0ABC-9", LatLon::new(44.5, 11.2), 0, "9");
        assert_eq!(render.render(&report, true), "IW0ABC-9 true");
    }

    #[test]
    fn presenter_is_object_safe() {
        fn _takes(_p: &mut dyn Presenter) {}
    }
}
