// src/watch/router.rs

//! Fan-out from the single `notify` callback to per-path streams.

use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::watch::event::{WatchError, WatchEvent};

/// One registered watch path and the senders feeding its listening task.
#[derive(Debug)]
struct Route {
    /// Path exactly as it was configured.
    root: PathBuf,
    /// Canonical form, if it could be resolved at registration time.
    ///
    /// Some backends report canonical paths (e.g. FSEvents resolving
    /// `/tmp` to `/private/tmp`), others echo the registered path back.
    canonical: Option<PathBuf>,
    events: mpsc::UnboundedSender<WatchEvent>,
    errors: mpsc::UnboundedSender<WatchError>,
}

impl Route {
    /// Watches are non-recursive: a route only covers its root and the
    /// root's direct children.
    fn covers(&self, path: &Path) -> bool {
        reported_by(&self.root, path)
            || self
                .canonical
                .as_ref()
                .is_some_and(|canonical| reported_by(canonical, path))
    }

    fn is_closed(&self) -> bool {
        self.events.is_closed() && self.errors.is_closed()
    }
}

fn reported_by(root: &Path, path: &Path) -> bool {
    path == root || path.parent() == Some(root)
}

/// Routing table shared between the subscription and the notify callback.
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `root` and return the receiving ends for it.
    pub fn add_route(
        &mut self,
        root: impl Into<PathBuf>,
    ) -> (
        mpsc::UnboundedReceiver<WatchEvent>,
        mpsc::UnboundedReceiver<WatchError>,
    ) {
        let root = root.into();
        let canonical = root.canonicalize().ok().filter(|c| *c != root);

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (errors_tx, errors_rx) = mpsc::unbounded_channel();

        self.routes.push(Route {
            root,
            canonical,
            events: events_tx,
            errors: errors_tx,
        });

        (events_rx, errors_rx)
    }

    /// Drop the most recently added route for `root`.
    ///
    /// Used to roll back a registration the backend refused.
    pub fn remove_last_route(&mut self, root: &Path) {
        if let Some(idx) = self.routes.iter().rposition(|r| r.root == root) {
            self.routes.remove(idx);
        }
    }

    /// Drop every route, closing all streams.
    pub fn clear(&mut self) {
        self.routes.clear();
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Deliver a raw `notify` event to every route covering its paths.
    pub fn dispatch_event(&mut self, event: &notify::Event) {
        let events = WatchEvent::from_notify(event);
        if events.is_empty() {
            trace!(?event, "ignoring notify event without a mapped op");
            return;
        }

        for watch_event in events {
            for route in self.routes.iter().filter(|r| r.covers(&watch_event.path)) {
                // A closed receiver only means that listener has gone away.
                let _ = route.events.send(watch_event.clone());
            }
        }

        self.prune_closed();
    }

    /// Deliver a backend error.
    ///
    /// Errors naming paths go to the routes covering those paths; errors
    /// without paths go to everyone.
    pub fn dispatch_error(&mut self, error: WatchError) {
        for route in self.routes.iter().filter(|r| {
            error.paths.is_empty() || error.paths.iter().any(|p| r.covers(p))
        }) {
            let _ = route.errors.send(error.clone());
        }

        self.prune_closed();
    }

    fn prune_closed(&mut self) {
        let before = self.routes.len();
        self.routes.retain(|r| !r.is_closed());
        let pruned = before - self.routes.len();
        if pruned > 0 {
            debug!(pruned, "dropped routes whose listeners are gone");
        }
    }
}
