//! Commands into the loop and notifications out of it.

use aps_reconcile::TimeWindow;
use serde::{Deserialize, Serialize};

/// User-initiated actions handled by the runtime loop.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Switch the global time window; triggers an immediate snapshot pass.
    SetWindow(TimeWindow),
    EnableTracking(String),
    DisableTracking(String),
    /// Fire-and-forget message send; outcome is reported on the bus only.
    SendMessage {
        destination: String,
        message: String,
    },
}

/// Notifications broadcast to whoever is listening (UI, logs, tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BusMsg {
    MessageSent {
        destination: String,
        reply: String,
    },
    MessageFailed {
        destination: String,
        error: String,
    },
    TrackingRejected {
        station_id: String,
        error: String,
    },
    SnapshotApplied {
        stations: usize,
    },
}
