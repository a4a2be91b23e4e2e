//! aps-reconcile
//!
//! Station-state reconciliation engine for the APRS map.
//!
//! Architectural decisions:
//! - Two ingestion paths: single push reports and full poll snapshots
//! - Snapshot absence removes a station; staleness removes a station
//! - Removal always cascades into track teardown
//! - Removals applied before upserts within one reconciliation pass
//! - All presentation effects go through the `Presenter` capability trait
//!
//! Deterministic, pure logic. No IO. No clocks — `now` is a parameter.

mod engine;
mod icons;
mod station;
mod track;
mod types;
mod window;

pub mod presenter;
pub mod testkit;

pub use engine::ReconcileEngine;
pub use icons::{IconId, IconTable, IconTableError};
pub use presenter::{PopupRender, Presenter};
pub use station::StationRegistry;
pub use track::{TrackError, TrackRegistry};
pub use types::{LatLon, MarkerHandle, MarkerState, PositionReport, TrackState, TrailHandle};
pub use window::{TimeWindow, UnknownWindowToken};
