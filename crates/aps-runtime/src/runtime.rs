//! The event loop.
//!
//! One task owns the engine; push items, snapshot ticks, and commands are
//! serialized through a single `select!`, so each reaction runs to
//! completion before the next. Snapshot fetches happen inline: a completed
//! fetch always reconciles against current registry state, which is what
//! makes reordered/in-flight responses safe (last writer wins, next tick
//! corrects any divergence).

use std::time::Duration;

use aps_feed::{FeedError, MessageClient, SnapshotSource};
use aps_reconcile::{Presenter, ReconcileEngine};
use aps_schemas::{snapshot_reports, FeedEvent};
use futures_util::{Stream, StreamExt};
use tokio::sync::{broadcast, mpsc};
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{info, warn};

use crate::bus::{BusMsg, Command};

#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Fixed snapshot poll interval; re-armed unconditionally after each run.
    pub snapshot_interval: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            snapshot_interval: Duration::from_secs(15),
        }
    }
}

/// Cloneable handle for feeding commands in and listening on the bus.
///
/// The loop exits when every handle (and thus every command sender) has
/// been dropped.
#[derive(Clone)]
pub struct RuntimeHandle {
    commands: mpsc::Sender<Command>,
    bus: broadcast::Sender<BusMsg>,
}

impl RuntimeHandle {
    /// Queue a command; returns `false` if the runtime has shut down.
    pub async fn send(&self, cmd: Command) -> bool {
        self.commands.send(cmd).await.is_ok()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BusMsg> {
        self.bus.subscribe()
    }

    /// The bus as a `Stream`, for UI layers that consume streams. Lagging
    /// subscribers receive a `BroadcastStreamRecvError` item and continue.
    pub fn bus_stream(&self) -> BroadcastStream<BusMsg> {
        BroadcastStream::new(self.bus.subscribe())
    }
}

/// Owns the engine and the transports; see [`Runtime::run`].
pub struct Runtime<P: Presenter, S: SnapshotSource> {
    engine: ReconcileEngine<P>,
    snapshots: S,
    messages: MessageClient,
    commands: mpsc::Receiver<Command>,
    bus: broadcast::Sender<BusMsg>,
    cfg: RuntimeConfig,
}

impl<P: Presenter, S: SnapshotSource> Runtime<P, S> {
    pub fn new(
        engine: ReconcileEngine<P>,
        snapshots: S,
        messages: MessageClient,
        cfg: RuntimeConfig,
    ) -> (Self, RuntimeHandle) {
        let (cmd_tx, cmd_rx) = mpsc::channel(64);
        let (bus, _rx) = broadcast::channel(256);
        let handle = RuntimeHandle {
            commands: cmd_tx,
            bus: bus.clone(),
        };
        (
            Self {
                engine,
                snapshots,
                messages,
                commands: cmd_rx,
                bus,
                cfg,
            },
            handle,
        )
    }

    pub fn engine(&self) -> &ReconcileEngine<P> {
        &self.engine
    }

    /// Run until every command sender is dropped.
    ///
    /// `push` is the decoded push feed; when it closes, polling continues —
    /// reconnecting is the caller's policy, and the periodic snapshot keeps
    /// the map converging meanwhile.
    pub async fn run<St>(&mut self, mut push: St)
    where
        St: Stream<Item = Result<FeedEvent, FeedError>> + Unpin,
    {
        let mut tick = tokio::time::interval(self.cfg.snapshot_interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut push_closed = false;

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    self.run_snapshot().await;
                }
                item = push.next(), if !push_closed => {
                    match item {
                        Some(Ok(FeedEvent::Position(pos))) => {
                            self.engine.on_push_report(&pos.to_report(), now());
                        }
                        Some(Ok(FeedEvent::Other)) => {}
                        Some(Err(e)) => {
                            // Skip; the next push or snapshot corrects it.
                            warn!(error = %e, "push feed item dropped");
                        }
                        None => {
                            info!("push feed closed; continuing on snapshots only");
                            push_closed = true;
                        }
                    }
                }
                cmd = self.commands.recv() => {
                    match cmd {
                        Some(cmd) => self.handle_command(cmd).await,
                        None => {
                            info!("all runtime handles dropped; shutting down");
                            break;
                        }
                    }
                }
            }
        }
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::SetWindow(window) => {
                self.engine.set_window(window);
                // Sweep aged-out stations right away instead of waiting for
                // the next tick.
                self.run_snapshot().await;
            }
            Command::EnableTracking(station_id) => {
                if let Err(e) = self.engine.enable_tracking(&station_id) {
                    warn!(station = %station_id, error = %e, "tracking rejected");
                    let _ = self.bus.send(BusMsg::TrackingRejected {
                        station_id,
                        error: e.to_string(),
                    });
                }
            }
            Command::DisableTracking(station_id) => {
                self.engine.disable_tracking(&station_id);
            }
            Command::SendMessage {
                destination,
                message,
            } => match self.messages.send_message(&destination, &message).await {
                Ok(reply) => {
                    let _ = self.bus.send(BusMsg::MessageSent { destination, reply });
                }
                Err(e) => {
                    let _ = self.bus.send(BusMsg::MessageFailed {
                        destination,
                        error: e.to_string(),
                    });
                }
            },
        }
    }

    /// One poll cycle. A failed fetch leaves the registries untouched; the
    /// next tick retries.
    async fn run_snapshot(&mut self) {
        match self.snapshots.fetch_positions(self.engine.window()).await {
            Ok(payload) => {
                let reports = snapshot_reports(&payload);
                self.engine.on_snapshot(&reports, now());
                let _ = self.bus.send(BusMsg::SnapshotApplied {
                    stations: reports.len(),
                });
            }
            Err(e) => {
                warn!(error = %e, "snapshot fetch failed; keeping current state");
            }
        }
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
