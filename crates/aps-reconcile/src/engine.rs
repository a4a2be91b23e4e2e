//! Reconciliation engine: drives both registries to convergence.
//!
//! Two ingestion paths share one invariant set:
//! - push path (`on_push_report`): single-station update from the event feed
//! - snapshot path (`on_snapshot`): full diff against a polled snapshot
//!
//! Within one snapshot pass removals are applied before any upsert, so a
//! station id can be atomically replaced without transient duplicate
//! presentation state. Station removal always cascades into track teardown
//! before the marker goes away.

use std::collections::BTreeMap;

use crate::{
    IconTable, PopupRender, PositionReport, Presenter, StationRegistry, TimeWindow, TrackError,
    TrackRegistry,
};

/// Owns the registries, the presentation adapter, and the active window.
///
/// Generic over the presenter so tests can reach into a concrete double;
/// the popup renderer stays a trait object because the engine never needs
/// to know anything about markup.
pub struct ReconcileEngine<P: Presenter> {
    presenter: P,
    popup: Box<dyn PopupRender>,
    icons: IconTable,
    window: TimeWindow,
    stations: StationRegistry,
    tracks: TrackRegistry,
}

impl<P: Presenter> ReconcileEngine<P> {
    pub fn new(presenter: P, popup: Box<dyn PopupRender>, icons: IconTable, window: TimeWindow) -> Self {
        Self {
            presenter,
            popup,
            icons,
            window,
            stations: StationRegistry::new(),
            tracks: TrackRegistry::new(),
        }
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Switch the active window. Takes effect immediately for the push path;
    /// the caller is expected to trigger a snapshot fetch so aged-out
    /// stations are swept promptly.
    pub fn set_window(&mut self, window: TimeWindow) {
        self.window = window;
    }

    pub fn stations(&self) -> &StationRegistry {
        &self.stations
    }

    pub fn tracks(&self) -> &TrackRegistry {
        &self.tracks
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Single-station update from the push feed.
    ///
    /// A stale report is a removal signal: the station ages out together
    /// with its track. A fresh report upserts the marker and, for tracked
    /// stations, records the new position into the trail.
    pub fn on_push_report(&mut self, report: &PositionReport, now: i64) {
        if self.window.is_stale(report, now) {
            self.remove_station(&report.station_id);
            return;
        }
        self.apply_report(report);
    }

    /// Full reconciliation against a polled snapshot.
    ///
    /// Target set = reports that survive the window filter. Every
    /// registered station absent from the target set is cascaded out first;
    /// then every target report is upserted. A completed fetch is always
    /// reconciled against current registry state, so stale in-flight
    /// responses are superseded by the next pass rather than special-cased.
    pub fn on_snapshot(&mut self, reports: &[PositionReport], now: i64) {
        let mut target: BTreeMap<&str, &PositionReport> = BTreeMap::new();
        for report in reports {
            if !self.window.is_stale(report, now) {
                // Last entry wins for a duplicated id, matching object-keyed
                // snapshot payloads.
                target.insert(report.station_id.as_str(), report);
            }
        }

        // Removals before upserts.
        for station_id in self.stations.station_ids() {
            if !target.contains_key(station_id.as_str()) {
                self.remove_station(&station_id);
            }
        }

        for report in target.values() {
            self.apply_report(report);
        }
    }

    /// Enable trail accumulation for a visible station.
    pub fn enable_tracking(&mut self, station_id: &str) -> Result<(), TrackError> {
        self.tracks
            .enable(station_id, &self.stations, &mut self.presenter)
    }

    /// Disable trail accumulation. No-op if not tracking.
    pub fn disable_tracking(&mut self, station_id: &str) {
        self.tracks.disable(station_id, &mut self.presenter);
    }

    fn apply_report(&mut self, report: &PositionReport) {
        let tracked = self.tracks.contains(&report.station_id);
        let position = self
            .stations
            .upsert(
                report,
                tracked,
                &self.icons,
                self.popup.as_ref(),
                &mut self.presenter,
            )
            .position;
        self.tracks
            .record_if_moved(&report.station_id, position, &mut self.presenter);
    }

    /// Cascade order matters: the track must go before the marker so the
    /// "no track without a marker" invariant holds at every step.
    fn remove_station(&mut self, station_id: &str) {
        self.tracks.disable(station_id, &mut self.presenter);
        self.stations.remove(station_id, &mut self.presenter);
    }
}
