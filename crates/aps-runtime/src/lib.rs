//! aps-runtime
//!
//! Single-task event loop around the reconciliation engine: push-feed
//! items, the periodic snapshot tick, and user commands all funnel through
//! one `select!` so registry mutation is strictly sequential. User-facing
//! outcomes (message sends, tracking rejections) surface on a broadcast
//! bus; nothing from that bus feeds back into the registries.

pub mod bus;
pub mod popup;
pub mod presenter;
pub mod runtime;

pub use bus::{BusMsg, Command};
pub use popup::HtmlPopup;
pub use presenter::TracePresenter;
pub use runtime::{Runtime, RuntimeConfig, RuntimeHandle};
