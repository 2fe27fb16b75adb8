// src/watch/source.rs

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::errors::{PathwatchError, Result};
use crate::watch::event::{WatchError, WatchEvent};
use crate::watch::router::Router;

/// The two streams belonging to one watched path.
///
/// Both are closed when the owning [`Subscription`] is closed or dropped.
#[derive(Debug)]
pub struct PathStream {
    pub events: mpsc::UnboundedReceiver<WatchEvent>,
    pub errors: mpsc::UnboundedReceiver<WatchError>,
}

impl PathStream {
    pub fn new(
        events: mpsc::UnboundedReceiver<WatchEvent>,
        errors: mpsc::UnboundedReceiver<WatchError>,
    ) -> Self {
        Self { events, errors }
    }
}

/// Live handle on the OS notification backend.
///
/// There is one `RecommendedWatcher` per subscription; every added path gets
/// its own [`PathStream`] fed from the shared notify callback. Dropping the
/// subscription stops watching and closes every stream.
pub struct Subscription {
    watcher: RecommendedWatcher,
    router: Arc<Mutex<Router>>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("routes", &lock(&self.router).len())
            .finish()
    }
}

impl Subscription {
    /// Create the backend watcher. Nothing is watched until [`add`](Self::add).
    pub fn subscribe() -> Result<Self> {
        let router = Arc::new(Mutex::new(Router::new()));

        // Called synchronously on the backend's thread.
        let watcher = RecommendedWatcher::new(
            {
                let router = Arc::clone(&router);
                move |res: notify::Result<Event>| {
                    let mut router = lock(&router);
                    match res {
                        Ok(event) => router.dispatch_event(&event),
                        Err(err) => router.dispatch_error(WatchError::from_notify(&err)),
                    }
                }
            },
            Config::default(),
        )?;

        debug!("notification subscription created");
        Ok(Self { watcher, router })
    }

    /// Start watching `path` (non-recursively) and return its streams.
    ///
    /// The route is registered before the backend watch so that no event
    /// racing the registration is lost; it is rolled back if the backend
    /// refuses the path.
    pub fn add(&mut self, path: &str) -> Result<PathStream> {
        let (events, errors) = lock(&self.router).add_route(path);

        if let Err(source) = self
            .watcher
            .watch(Path::new(path), RecursiveMode::NonRecursive)
        {
            lock(&self.router).remove_last_route(Path::new(path));
            return Err(PathwatchError::WatchError {
                path: path.to_string(),
                source,
            });
        }

        info!(path = %path, "watching");
        Ok(PathStream::new(events, errors))
    }

    /// Number of paths currently routed.
    pub fn len(&self) -> usize {
        lock(&self.router).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.router).is_empty()
    }

    /// Stop watching everything and close all streams.
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // The backend may drop its callback (and our senders) on another
        // thread some time later; clearing here closes the streams now.
        lock(&self.router).clear();
        debug!("notification subscription closed");
    }
}

fn lock(router: &Mutex<Router>) -> MutexGuard<'_, Router> {
    // A panic while routing leaves the table consistent enough to keep going.
    router.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
