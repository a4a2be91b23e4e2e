//! Periodic snapshot fetch: `GET /positions.json?range=<window>`.

use aps_reconcile::TimeWindow;
use aps_schemas::SnapshotPayload;

use crate::FeedError;

/// Pluggable snapshot source so the runtime loop can be tested without a
/// live server.
#[async_trait::async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch the full point-in-time position set for `window`.
    async fn fetch_positions(&self, window: TimeWindow) -> Result<SnapshotPayload, FeedError>;
}

/// HTTP-backed snapshot source.
#[derive(Debug, Clone)]
pub struct HttpSnapshotSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSnapshotSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn positions_url(&self) -> String {
        format!("{}/positions.json", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait::async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn fetch_positions(&self, window: TimeWindow) -> Result<SnapshotPayload, FeedError> {
        let resp = self
            .http
            .get(self.positions_url())
            .query(&[("range", window.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(FeedError::Status {
                code: status.as_u16(),
                message,
            });
        }

        resp.json::<SnapshotPayload>()
            .await
            .map_err(|e| FeedError::Decode(e.to_string()))
    }
}
