mod common;

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use pathwatch::config::Config;
use pathwatch::errors::PathwatchError;
use pathwatch::start_watching;
use pathwatch::watch::{LogRecord, Subscription};

use common::RecordingSink;

type TestResult = Result<(), Box<dyn Error>>;

const WAIT: Duration = Duration::from_secs(5);

fn config_for(paths: &[&std::path::Path]) -> Config {
    Config {
        paths: paths.iter().map(|p| p.display().to_string()).collect(),
    }
}

fn modified_name(record: &LogRecord) -> Option<String> {
    match record {
        LogRecord::Modified(path) => path.file_name().map(|n| n.to_string_lossy().into_owned()),
        _ => None,
    }
}

#[tokio::test]
async fn each_path_gets_its_own_listener() -> TestResult {
    common::init_tracing();
    let dir_a = tempfile::tempdir()?;
    let dir_b = tempfile::tempdir()?;
    let cfg = config_for(&[dir_a.path(), dir_b.path()]);
    let sink = Arc::new(RecordingSink::new());

    let session = start_watching(&cfg, sink.clone())?;
    assert_eq!(session.listener_count(), 2);
    assert_eq!(session.paths(), cfg.paths.iter().map(String::as_str).collect::<Vec<_>>());

    fs::write(dir_a.path().join("only-in-a.txt"), b"hello")?;

    let watch_a = cfg.paths[0].clone();
    let seen = sink
        .wait_until(WAIT, |records| {
            records.iter().any(|(w, r)| {
                *w == watch_a && modified_name(r).as_deref() == Some("only-in-a.txt")
            })
        })
        .await;
    assert!(seen, "no write reported for A: {:?}", sink.lines());

    assert!(
        sink.records_for(&cfg.paths[1]).is_empty(),
        "B's listener saw A's change: {:?}",
        sink.records_for(&cfg.paths[1])
    );

    tokio::time::timeout(WAIT, session.shutdown()).await?;
    Ok(())
}

#[tokio::test]
async fn unregistrable_path_aborts_setup() -> TestResult {
    let dir_a = tempfile::tempdir()?;
    let dir_c = tempfile::tempdir()?;
    let missing = dir_a.path().join("does-not-exist");
    let cfg = config_for(&[dir_a.path(), &missing, dir_c.path()]);
    let sink = Arc::new(RecordingSink::new());

    match start_watching(&cfg, sink.clone()) {
        Err(PathwatchError::WatchError { path, .. }) => {
            assert_eq!(PathBuf::from(path), missing);
        }
        Err(e) => panic!("expected WatchError, got: {e:?}"),
        Ok(session) => panic!("expected error, got {session:?}"),
    }

    // Nothing is listening on the path after the failing one.
    fs::write(dir_c.path().join("late.txt"), b"x")?;
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(sink.records_for(&cfg.paths[2]).is_empty());
    Ok(())
}

#[tokio::test]
async fn empty_config_starts_no_listeners() -> TestResult {
    let sink = Arc::new(RecordingSink::new());

    let session = start_watching(&Config::empty(), sink)?;
    assert_eq!(session.listener_count(), 0);

    tokio::time::timeout(WAIT, session.shutdown()).await?;
    Ok(())
}

#[tokio::test]
async fn closing_subscription_closes_every_stream() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().display().to_string();

    let mut subscription = Subscription::subscribe()?;
    let mut stream = subscription.add(&path)?;
    assert_eq!(subscription.len(), 1);

    subscription.close();

    assert!(tokio::time::timeout(WAIT, stream.events.recv()).await?.is_none());
    assert!(tokio::time::timeout(WAIT, stream.errors.recv()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn refused_path_leaves_no_route_behind() -> TestResult {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("nope").display().to_string();

    let mut subscription = Subscription::subscribe()?;
    assert!(subscription.add(&missing).is_err());
    assert!(subscription.is_empty());
    Ok(())
}
