//! Track registry: user-enabled movement trails.
//!
//! Independent lifecycle from the station registry, but a trail may only
//! exist for a currently-visible station. The engine enforces the cascade:
//! station removal disables the track first.

use std::collections::BTreeMap;
use std::fmt;

use crate::{LatLon, Presenter, StationRegistry, TrackState};

/// Rejection for invalid tracking requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrackError {
    /// Tracking an absent station is not permitted.
    StationNotVisible { station_id: String },
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackError::StationNotVisible { station_id } => {
                write!(f, "station '{station_id}' has no marker; cannot enable tracking")
            }
        }
    }
}

impl std::error::Error for TrackError {}

/// Owns the map from station identity to its accumulated trail.
#[derive(Default)]
pub struct TrackRegistry {
    tracks: BTreeMap<String, TrackState>,
}

impl TrackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `station_id`, seeding the trail with the station's
    /// current position. No-op if already tracking.
    pub fn enable(
        &mut self,
        station_id: &str,
        stations: &StationRegistry,
        presenter: &mut dyn Presenter,
    ) -> Result<(), TrackError> {
        if self.tracks.contains_key(station_id) {
            return Ok(());
        }
        let marker = stations
            .get(station_id)
            .ok_or_else(|| TrackError::StationNotVisible {
                station_id: station_id.to_string(),
            })?;
        let seed = vec![marker.position];
        let handle = presenter.draw_trail(&seed);
        self.tracks.insert(
            station_id.to_string(),
            TrackState {
                station_id: station_id.to_string(),
                positions: seed,
                handle,
            },
        );
        Ok(())
    }

    /// Stop tracking `station_id` and tear down its trail. No-op otherwise.
    pub fn disable(&mut self, station_id: &str, presenter: &mut dyn Presenter) {
        if let Some(state) = self.tracks.remove(station_id) {
            presenter.remove_trail(state.handle);
        }
    }

    /// Append `position` to the trail iff it differs from the last recorded
    /// point. Sole dedup point for stationary beacons. No-op when the
    /// station is not tracked.
    pub fn record_if_moved(
        &mut self,
        station_id: &str,
        position: LatLon,
        presenter: &mut dyn Presenter,
    ) {
        let Some(state) = self.tracks.get_mut(station_id) else {
            return;
        };
        if state.positions.last() == Some(&position) {
            return;
        }
        state.positions.push(position);
        presenter.redraw_trail(state.handle, &state.positions);
    }

    pub fn get(&self, station_id: &str) -> Option<&TrackState> {
        self.tracks.get(station_id)
    }

    pub fn contains(&self, station_id: &str) -> bool {
        self.tracks.contains_key(station_id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Tracked ids in deterministic (sorted) order.
    pub fn tracked_ids(&self) -> Vec<String> {
        self.tracks.keys().cloned().collect()
    }
}
