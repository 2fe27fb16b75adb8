#![allow(dead_code)]

use std::sync::{Mutex, Once};
use std::time::Duration;

use pathwatch::watch::{EventSink, LogRecord};
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// Uses `with_test_writer()`, so output only shows up for failing tests
/// (unless run with `-- --nocapture`). Enable levels with `RUST_LOG=debug`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// `EventSink` that remembers everything it was given.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<(String, LogRecord)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<(String, LogRecord)> {
        self.records.lock().unwrap().clone()
    }

    /// Records emitted by the listener for `watch`.
    pub fn records_for(&self, watch: &str) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|(w, _)| w == watch)
            .map(|(_, r)| r)
            .collect()
    }

    pub fn lines(&self) -> Vec<String> {
        self.records().iter().map(|(_, r)| r.to_string()).collect()
    }

    /// Poll until `pred` holds for the recorded lines, or give up after
    /// `timeout`. Returns whether the predicate was satisfied.
    pub async fn wait_until<F>(&self, timeout: Duration, pred: F) -> bool
    where
        F: Fn(&[(String, LogRecord)]) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if pred(self.records().as_slice()) {
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}

impl EventSink for RecordingSink {
    fn record(&self, watch: &str, record: LogRecord) {
        self.records
            .lock()
            .unwrap()
            .push((watch.to_string(), record));
    }
}
