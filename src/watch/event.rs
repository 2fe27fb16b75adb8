// src/watch/event.rs

//! Change events and stream errors as seen by the dispatcher.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::path::PathBuf;

use notify::event::{ModifyKind, RenameMode};
use notify::EventKind;

/// Set of change kinds carried by a [`WatchEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Op(u8);

impl Op {
    pub const CREATE: Op = Op(1 << 0);
    pub const WRITE: Op = Op(1 << 1);
    pub const REMOVE: Op = Op(1 << 2);
    pub const RENAME: Op = Op(1 << 3);
    pub const CHMOD: Op = Op(1 << 4);

    const NAMES: [(Op, &'static str); 5] = [
        (Op::CREATE, "CREATE"),
        (Op::REMOVE, "REMOVE"),
        (Op::WRITE, "WRITE"),
        (Op::RENAME, "RENAME"),
        (Op::CHMOD, "CHMOD"),
    ];

    pub const fn empty() -> Op {
        Op(0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every kind in `other` is also set in `self`.
    pub const fn has(self, other: Op) -> bool {
        !other.is_empty() && self.0 & other.0 == other.0
    }
}

impl BitOr for Op {
    type Output = Op;

    fn bitor(self, rhs: Op) -> Op {
        Op(self.0 | rhs.0)
    }
}

impl BitOrAssign for Op {
    fn bitor_assign(&mut self, rhs: Op) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.pad("[no events]");
        }

        let joined = Op::NAMES
            .iter()
            .filter(|(op, _)| self.has(*op))
            .map(|(_, name)| *name)
            .collect::<Vec<_>>()
            .join("|");
        f.pad(&joined)
    }
}

/// A single filesystem change: one path, one set of kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub path: PathBuf,
    pub op: Op,
}

impl WatchEvent {
    pub fn new(path: impl Into<PathBuf>, op: Op) -> Self {
        Self {
            path: path.into(),
            op,
        }
    }

    /// Split a `notify` event into one `WatchEvent` per affected path.
    ///
    /// Access notifications and kinds with no meaningful mapping produce no
    /// events. A two-sided rename yields `RENAME` for the old name and
    /// `CREATE` for the new one.
    pub fn from_notify(event: &notify::Event) -> Vec<WatchEvent> {
        if let EventKind::Modify(ModifyKind::Name(RenameMode::Both)) = event.kind {
            let mut out = Vec::with_capacity(2);
            if let Some(from) = event.paths.first() {
                out.push(WatchEvent::new(from.clone(), Op::RENAME));
            }
            if let Some(to) = event.paths.get(1) {
                out.push(WatchEvent::new(to.clone(), Op::CREATE));
            }
            return out;
        }

        let op = op_for_kind(&event.kind);
        if op.is_empty() {
            return Vec::new();
        }

        event
            .paths
            .iter()
            .map(|path| WatchEvent::new(path.clone(), op))
            .collect()
    }
}

impl fmt::Display for WatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<13} {:?}", self.op, self.path.display().to_string())
    }
}

fn op_for_kind(kind: &EventKind) -> Op {
    match kind {
        EventKind::Create(_) => Op::CREATE,
        EventKind::Remove(_) => Op::REMOVE,
        EventKind::Modify(ModifyKind::Metadata(_)) => Op::CHMOD,
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => Op::CREATE,
        EventKind::Modify(ModifyKind::Name(_)) => Op::RENAME,
        EventKind::Modify(_) => Op::WRITE,
        EventKind::Access(_) | EventKind::Any | EventKind::Other => Op::empty(),
    }
}

/// An error reported by the notification backend.
///
/// Kept as plain data so the same error can be delivered to every affected
/// subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchError {
    pub message: String,
    pub paths: Vec<PathBuf>,
}

impl WatchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            paths: Vec::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    pub fn from_notify(err: &notify::Error) -> Self {
        Self {
            message: err.to_string(),
            paths: err.paths.clone(),
        }
    }
}

impl fmt::Display for WatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for WatchError {}
