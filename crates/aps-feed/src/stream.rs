//! Push feed: long-lived `GET /stream` SSE connection.
//!
//! The wire format is the EventSource framing the server emits: events are
//! `data:` lines terminated by a blank line. [`SseParser`] is pure and
//! chunk-boundary safe so it can sit directly on `bytes_stream()`; decoding
//! failures surface as per-item [`FeedError::Decode`] values the caller
//! skips, never as a dead stream.

use aps_schemas::FeedEvent;
use futures_util::{stream, Stream, StreamExt};

use crate::FeedError;

/// Incremental server-sent-events parser.
///
/// Feed raw bytes in with [`push`][SseParser::push]; completed event data
/// payloads come out. Field lines other than `data:` (comments, `event:`,
/// `id:`, `retry:`) are ignored. Partial events stay buffered across calls.
#[derive(Debug, Default)]
pub struct SseParser {
    buf: Vec<u8>,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one chunk and return the data payloads of every event the
    /// chunk completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);
        let mut out = Vec::new();
        while let Some((end, sep_len)) = find_event_boundary(&self.buf) {
            let block: Vec<u8> = self.buf.drain(..end + sep_len).take(end).collect();
            if let Some(data) = parse_event_block(&block) {
                out.push(data);
            }
        }
        out
    }
}

/// Earliest blank-line boundary: `\n\n` or `\r\n\r\n` (and the mixed
/// `\n\r\n` that normalizing servers can produce).
fn find_event_boundary(buf: &[u8]) -> Option<(usize, usize)> {
    let mut i = 0;
    while i < buf.len() {
        if buf[i] == b'\n' {
            let rest = &buf[i + 1..];
            if rest.first() == Some(&b'\n') {
                return Some((i + 1, 1));
            }
            if rest.starts_with(b"\r\n") {
                return Some((i + 1, 2));
            }
        }
        i += 1;
    }
    None
}

fn parse_event_block(block: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(block);
    let mut data_lines: Vec<&str> = Vec::new();
    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if let Some(rest) = line.strip_prefix("data:") {
            data_lines.push(rest.strip_prefix(' ').unwrap_or(rest));
        }
    }
    if data_lines.is_empty() {
        None
    } else {
        Some(data_lines.join("\n"))
    }
}

/// Client for the push feed.
#[derive(Debug, Clone)]
pub struct PushFeedClient {
    http: reqwest::Client,
    base_url: String,
}

impl PushFeedClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn stream_url(&self) -> String {
        format!("{}/stream", self.base_url.trim_end_matches('/'))
    }

    /// Open the SSE connection and decode events as they arrive.
    ///
    /// The stream ends when the server closes the connection; reconnecting
    /// is the caller's policy.
    pub async fn connect(
        &self,
    ) -> Result<impl Stream<Item = Result<FeedEvent, FeedError>> + Send, FeedError> {
        let resp = self.http.get(self.stream_url()).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(FeedError::Status {
                code: status.as_u16(),
                message,
            });
        }

        let mut parser = SseParser::new();
        Ok(resp.bytes_stream().flat_map(move |chunk| {
            let items: Vec<Result<FeedEvent, FeedError>> = match chunk {
                Ok(bytes) => parser
                    .push(&bytes)
                    .into_iter()
                    .map(|data| {
                        serde_json::from_str::<FeedEvent>(&data)
                            .map_err(|e| FeedError::Decode(e.to_string()))
                    })
                    .collect(),
                Err(e) => vec![Err(FeedError::Transport(e.to_string()))],
            };
            stream::iter(items)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_event_parses() {
        let mut p = SseParser::new();
        let out = p.push(b"data: {\"a\":1}\n\n");
        assert_eq!(out, vec!["{\"a\":1}".to_string()]);
    }

    #[test]
    fn event_split_across_chunks() {
        let mut p = SseParser::new();
        assert!(p.push(b"data: {\"type\":\"posi").is_empty());
        let out = p.push(b"tion\"}\n\ndata: x");
        assert_eq!(out, vec!["{\"type\":\"position\"}".to_string()]);
        let out = p.push(b"y\n\n");
        assert_eq!(out, vec!["xy".to_string()]);
    }

    #[test]
    fn crlf_framing_and_other_fields_ignored() {
        let mut p = SseParser::new();
        let out = p.push(b": keep-alive\r\nevent: position\r\ndata: {\"a\":1}\r\n\r\n");
        assert_eq!(out, vec!["{\"a\":1}".to_string()]);
    }

    #[test]
    fn multiple_data_lines_join_with_newline() {
        let mut p = SseParser::new();
        let out = p.push(b"data: one\ndata: two\n\n");
        assert_eq!(out, vec!["one\ntwo".to_string()]);
    }

    #[test]
    fn blank_keepalive_events_produce_nothing() {
        let mut p = SseParser::new();
        assert!(p.push(b"\n\n\n\n").is_empty());
        assert!(p.push(b": ping\n\n").is_empty());
    }

    #[test]
    fn parsed_payload_decodes_to_feed_event() {
        let mut p = SseParser::new();
        let out = p.push(
            b"data: {\"type\":\"position\",\"callsign\":\"IW0ABC-9\",\"ssid\":\"9\",\
              \"lat\":44.5,\"lon\":11.2,\"timestamp\":1700000000.0}\n\n",
        );
        let event: FeedEvent = serde_json::from_str(&out[0]).unwrap();
        assert!(matches!(event, FeedEvent::Position(_)));
    }
}
