//! aps-runtime entry point.
//!
//! Thin by design: set up tracing, build the engine and transports, open
//! the push feed, run the loop. All logic lives in the library modules.

use anyhow::Context;
use aps_feed::{HttpSnapshotSource, MessageClient, PushFeedClient};
use aps_reconcile::{IconTable, ReconcileEngine, TimeWindow};
use aps_runtime::{HtmlPopup, Runtime, RuntimeConfig, TracePresenter};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let base_url =
        std::env::var("APS_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:5032".to_string());
    info!("aps-runtime polling {base_url}");

    let engine = ReconcileEngine::new(
        TracePresenter::new(),
        Box::new(HtmlPopup),
        IconTable::builtin(),
        TimeWindow::Realtime,
    );
    let (mut runtime, handle) = Runtime::new(
        engine,
        HttpSnapshotSource::new(&base_url),
        MessageClient::new(&base_url),
        RuntimeConfig::default(),
    );

    let push = PushFeedClient::new(&base_url)
        .connect()
        .await
        .context("push feed connect failed")?;

    // Holding the handle keeps the command channel open for the whole run.
    let _handle = handle;
    runtime.run(Box::pin(push)).await;
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
