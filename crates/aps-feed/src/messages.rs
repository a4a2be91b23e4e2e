//! Message send and list transports.
//!
//! Sending is fire-and-forget from the core's point of view: the plain-text
//! confirmation body (or the error) is surfaced to the user and never fed
//! back into the registries.

use aps_schemas::StationMessage;

use crate::FeedError;

/// Client for `POST /send_message` and `GET /messages.json`.
#[derive(Debug, Clone)]
pub struct MessageClient {
    http: reqwest::Client,
    base_url: String,
}

impl MessageClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }

    /// Send a short text message to `destination`. Returns the server's
    /// plain-text confirmation. Not retried on failure.
    pub async fn send_message(
        &self,
        destination: &str,
        message: &str,
    ) -> Result<String, FeedError> {
        let resp = self
            .http
            .post(self.url("send_message"))
            .form(&[("destination", destination), ("message", message)])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(FeedError::Status {
                code: status.as_u16(),
                message: body,
            });
        }
        Ok(body)
    }

    /// Most recent received messages, newest first (server ordering).
    pub async fn recent_messages(&self) -> Result<Vec<StationMessage>, FeedError> {
        let resp = self.http.get(self.url("messages.json")).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(FeedError::Status {
                code: status.as_u16(),
                message,
            });
        }

        resp.json::<Vec<StationMessage>>()
            .await
            .map_err(|e| FeedError::Decode(e.to_string()))
    }
}
