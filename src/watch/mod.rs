// src/watch/mod.rs

//! File watching and event dispatch.
//!
//! This module is responsible for:
//! - Translating `notify` events into a small, stable event vocabulary
//!   (`event.rs`).
//! - Owning the single OS-backed subscription and handing each watched path
//!   its own pair of streams (`source.rs`, `router.rs`).
//! - Running one listening task per path that turns those streams into log
//!   records (`dispatcher.rs`).

pub mod dispatcher;
pub mod event;
pub mod router;
pub mod source;

pub use dispatcher::{
    handle_error, handle_event, spawn_listener, EventSink, Listener, LogRecord, TracingSink,
};
pub use event::{Op, WatchError, WatchEvent};
pub use router::Router;
pub use source::{PathStream, Subscription};
