// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod watch;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{load_or_create_default, Config};
use crate::watch::{spawn_listener, EventSink, Listener, Subscription, TracingSink};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (creating the default file if needed)
/// - one subscription plus one listening task per configured path
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = args.config;
    let cfg = load_or_create_default(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    if args.dry_run {
        print_dry_run(&config_path, &cfg);
        return Ok(());
    }

    let sink: Arc<dyn EventSink> = Arc::new(TracingSink);
    let session = start_watching(&cfg, sink)?;
    info!(paths = ?session.paths(), "pathwatch started");

    tokio::signal::ctrl_c()
        .await
        .context("listening for Ctrl+C")?;

    info!("shutdown requested, stopping watchers");
    session.shutdown().await;
    Ok(())
}

/// Handle on a running set of listeners.
///
/// Holding it keeps the subscription alive; there is no way for it to end
/// on its own.
#[derive(Debug)]
pub struct WatchSession {
    subscription: Subscription,
    listeners: Vec<Listener>,
}

impl WatchSession {
    /// Watched paths, in registration order.
    pub fn paths(&self) -> Vec<&str> {
        self.listeners.iter().map(|l| l.path.as_str()).collect()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Close the subscription and wait for every listener to drain.
    pub async fn shutdown(self) {
        let WatchSession {
            subscription,
            listeners,
        } = self;

        subscription.close();
        for listener in listeners {
            listener.join().await;
        }
        debug!("all listeners finished");
    }
}

/// Register every configured path, in order, and spawn its listener.
///
/// Registration is all-or-nothing: the first path the backend refuses aborts
/// setup. No listener is spawned for it or any later path, and the
/// listeners already running end once the dropped subscription closes their
/// streams.
pub fn start_watching(cfg: &Config, sink: Arc<dyn EventSink>) -> errors::Result<WatchSession> {
    let mut subscription = Subscription::subscribe()?;
    let mut listeners = Vec::with_capacity(cfg.paths.len());

    for path in &cfg.paths {
        let stream = subscription.add(path)?;
        listeners.push(spawn_listener(path.clone(), stream, Arc::clone(&sink)));
    }

    if listeners.is_empty() {
        info!("no paths configured; nothing to watch");
    }

    Ok(WatchSession {
        subscription,
        listeners,
    })
}

/// Simple dry-run output: where the config lives and what would be watched.
fn print_dry_run(config_path: &Path, cfg: &Config) {
    println!("pathwatch dry-run");
    println!("  config = {}", config_path.display());
    println!();

    println!("paths ({}):", cfg.paths.len());
    for path in &cfg.paths {
        println!("  - {path}");
    }

    debug!("dry-run complete (no watching)");
}
