// src/watch/dispatcher.rs

//! Per-path listening tasks.
//!
//! Each watched path gets one tokio task that waits on whichever of its two
//! streams (events, errors) is ready first and turns every item into a
//! [`LogRecord`]. The task ends quietly as soon as either stream is closed.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::watch::event::{Op, WatchError, WatchEvent};
use crate::watch::source::PathStream;

/// One line of dispatcher output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogRecord {
    Event(WatchEvent),
    Modified(PathBuf),
    Error(WatchError),
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogRecord::Event(event) => write!(f, "Event: {event}"),
            LogRecord::Modified(path) => write!(f, "Modified file: {}", path.display()),
            LogRecord::Error(err) => write!(f, "Error: {err}"),
        }
    }
}

/// Where dispatcher output goes.
///
/// Production code uses [`TracingSink`]; tests can record what was emitted.
pub trait EventSink: Send + Sync {
    /// `watch` is the configured path whose listener produced the record.
    fn record(&self, watch: &str, record: LogRecord);
}

/// Sink that writes every record through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, watch: &str, record: LogRecord) {
        match record {
            LogRecord::Error(_) => warn!(watch = %watch, "{record}"),
            _ => info!(watch = %watch, "{record}"),
        }
    }
}

/// Log an event, plus the modified file name when it is a write.
pub fn handle_event(sink: &dyn EventSink, watch: &str, event: WatchEvent) {
    let modified = event.op.has(Op::WRITE).then(|| event.path.clone());

    sink.record(watch, LogRecord::Event(event));
    if let Some(path) = modified {
        sink.record(watch, LogRecord::Modified(path));
    }
}

/// Log a stream error. Errors never stop the listener.
pub fn handle_error(sink: &dyn EventSink, watch: &str, error: WatchError) {
    sink.record(watch, LogRecord::Error(error));
}

/// A running listening task and the path it serves.
#[derive(Debug)]
pub struct Listener {
    pub path: String,
    pub handle: JoinHandle<()>,
}

impl Listener {
    /// Wait for the task to finish (i.e. for its streams to close).
    pub async fn join(self) {
        if let Err(err) = self.handle.await {
            warn!(path = %self.path, error = %err, "listener task did not finish cleanly");
        }
    }
}

/// Spawn the listening task for `path`.
///
/// Must be called from within a tokio runtime.
pub fn spawn_listener(
    path: impl Into<String>,
    stream: PathStream,
    sink: Arc<dyn EventSink>,
) -> Listener {
    let path = path.into();
    let task_path = path.clone();
    let PathStream {
        mut events,
        mut errors,
    } = stream;

    let handle = tokio::spawn(async move {
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => handle_event(sink.as_ref(), &task_path, event),
                    None => break,
                },
                error = errors.recv() => match error {
                    Some(error) => handle_error(sink.as_ref(), &task_path, error),
                    None => break,
                },
            }
        }

        debug!(path = %task_path, "listener stream closed");
    });

    Listener { path, handle }
}
