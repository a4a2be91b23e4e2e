//! aps-feed
//!
//! Transport boundary for the APRS map: snapshot polling, the SSE push
//! feed, and message send/list. Each transport sits behind a trait or a
//! small client with an injectable base URL so the runtime can be exercised
//! against an in-process mock server. This crate does not touch the
//! registries; callers hand decoded payloads to the reconciliation engine.

mod error;
pub mod messages;
pub mod snapshot;
pub mod stream;

pub use error::FeedError;
pub use messages::MessageClient;
pub use snapshot::{HttpSnapshotSource, SnapshotSource};
pub use stream::{PushFeedClient, SseParser};
