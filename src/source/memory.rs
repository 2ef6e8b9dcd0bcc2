//! In-memory screen source
//!
//! A scriptable `ScreenSource` with no terminal host behind it. Sessions
//! hold a snapshot and a pushable update queue. Used by the integration
//! tests and by the standalone binary, which serves the protocol without a
//! host backend compiled in.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::core::ScreenSnapshot;

use super::{Profile, ScreenSource, SessionHandle, SourceError, SourcePoll, UpdateStream};

/// Profile colors for an in-memory session. `None` fields exercise the
/// fallback paths of palette resolution.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfile {
    pub foreground: Option<String>,
    pub background: Option<String>,
    pub cursor: Option<String>,
    /// Up to 16 entries; missing or `None` slots resolve to the fallback.
    pub ansi: Vec<Option<String>>,
}

impl Profile for MemoryProfile {
    fn foreground_color(&self) -> Option<String> {
        self.foreground.clone()
    }

    fn background_color(&self) -> Option<String> {
        self.background.clone()
    }

    fn cursor_color(&self) -> Option<String> {
        self.cursor.clone()
    }

    fn ansi_color(&self, idx: usize) -> Option<String> {
        self.ansi.get(idx).cloned().flatten()
    }
}

type UpdateItem = Result<ScreenSnapshot, SourceError>;

/// One scriptable session.
pub struct MemorySession {
    profile: MemoryProfile,
    snapshot: Mutex<ScreenSnapshot>,
    snapshot_fails: Mutex<bool>,
    /// Sender side of the current subscription, if any.
    subscriber: Mutex<Option<Sender<UpdateItem>>>,
    /// Items pushed before any subscriber attached; drained into the next
    /// subscription so scripted updates are never lost to timing.
    pending: Mutex<Vec<UpdateItem>>,
}

impl MemorySession {
    pub fn new(profile: MemoryProfile, snapshot: ScreenSnapshot) -> Self {
        Self {
            profile,
            snapshot: Mutex::new(snapshot),
            snapshot_fails: Mutex::new(false),
            subscriber: Mutex::new(None),
            pending: Mutex::new(Vec::new()),
        }
    }

    /// A session showing plain text rows with the cursor at the origin.
    pub fn from_text_rows(rows: &[&str], cols: u16) -> Self {
        Self::new(
            MemoryProfile::default(),
            ScreenSnapshot::from_text_rows(rows, cols),
        )
    }

    /// Replace the stored snapshot and deliver it to the current
    /// subscriber, if one is listening.
    pub fn push_update(&self, snapshot: ScreenSnapshot) {
        *lock(&self.snapshot) = snapshot.clone();
        self.push_item(Ok(snapshot));
    }

    /// Deliver an error to the current subscriber; its poll loop exits.
    pub fn push_error(&self, error: SourceError) {
        self.push_item(Err(error));
    }

    fn push_item(&self, item: UpdateItem) {
        let subscriber = lock(&self.subscriber);
        match subscriber.as_ref() {
            Some(tx) => {
                let _ = tx.send(item);
            }
            None => lock(&self.pending).push(item),
        }
    }

    /// Drop the sender side so the subscriber observes a closed stream.
    pub fn close_stream(&self) {
        lock(&self.subscriber).take();
    }

    /// Make subsequent `snapshot()` calls fail.
    pub fn set_snapshot_fails(&self, fails: bool) {
        *lock(&self.snapshot_fails) = fails;
    }
}

impl SessionHandle for MemorySession {
    fn profile(&self) -> Box<dyn Profile> {
        Box::new(self.profile.clone())
    }

    fn snapshot(&self) -> Result<ScreenSnapshot, SourceError> {
        if *lock(&self.snapshot_fails) {
            return Err(SourceError::Snapshot("snapshot disabled".to_string()));
        }
        Ok(lock(&self.snapshot).clone())
    }

    fn updates(&self) -> Result<Box<dyn UpdateStream>, SourceError> {
        // Lock order matches push_item: subscriber, then pending.
        let mut subscriber = lock(&self.subscriber);
        let (tx, rx) = mpsc::channel();
        for item in lock(&self.pending).drain(..) {
            let _ = tx.send(item);
        }
        // A new subscription replaces any previous one.
        *subscriber = Some(tx);
        Ok(Box::new(MemoryUpdateStream { rx }))
    }
}

struct MemoryUpdateStream {
    rx: Receiver<UpdateItem>,
}

impl UpdateStream for MemoryUpdateStream {
    fn next_update(&mut self, timeout: Duration) -> Result<SourcePoll, SourceError> {
        match self.rx.recv_timeout(timeout) {
            Ok(Ok(snapshot)) => Ok(SourcePoll::Update(snapshot)),
            Ok(Err(error)) => Err(error),
            Err(RecvTimeoutError::Timeout) => Ok(SourcePoll::TimedOut),
            Err(RecvTimeoutError::Disconnected) => Ok(SourcePoll::Closed),
        }
    }
}

/// A screen source backed by a map of in-memory sessions.
#[derive(Default)]
pub struct MemorySource {
    sessions: Mutex<HashMap<String, Arc<MemorySession>>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session under `id`, returning the shared handle so the
    /// caller can keep scripting it.
    pub fn insert(&self, id: &str, session: MemorySession) -> Arc<MemorySession> {
        let session = Arc::new(session);
        lock(&self.sessions).insert(id.to_string(), session.clone());
        session
    }
}

impl ScreenSource for MemorySource {
    fn session(&self, id: &str) -> Option<Arc<dyn SessionHandle>> {
        lock(&self.sessions)
            .get(id)
            .cloned()
            .map(|s| s as Arc<dyn SessionHandle>)
    }
}

/// Lock a mutex, recovering from poisoning. Sessions stay usable even if a
/// test thread panicked while holding the lock.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
