//! External screen-source interface
//!
//! The bridge never talks to a terminal host directly. Session lookup,
//! profile colors, screen snapshots, and the update stream are all consumed
//! through the trait objects defined here; a host backend implements them
//! and registers itself with the transport.

pub mod memory;

use std::sync::Arc;
use std::time::Duration;

use crate::core::ScreenSnapshot;

/// Error type for screen-source operations
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("session disconnected: {0}")]
    Disconnected(String),

    #[error("streaming failed: {0}")]
    Stream(String),

    #[error("snapshot unavailable: {0}")]
    Snapshot(String),
}

/// Outcome of one bounded wait on an update stream.
#[derive(Debug)]
pub enum SourcePoll {
    /// A fresh snapshot arrived.
    Update(ScreenSnapshot),
    /// The bounded wait elapsed with no update.
    TimedOut,
    /// The stream ended normally.
    Closed,
}

/// Best-effort color accessors over a terminal profile.
///
/// Every method may fail independently; callers substitute fallbacks
/// instead of treating `None` as an error.
pub trait Profile {
    fn foreground_color(&self) -> Option<String>;
    fn background_color(&self) -> Option<String>;
    fn cursor_color(&self) -> Option<String>;
    /// ANSI palette entry, `idx` in `0..16`.
    fn ansi_color(&self, idx: usize) -> Option<String>;
}

/// A connection to a terminal host, able to look up sessions by id.
pub trait ScreenSource: Send + Sync {
    fn session(&self, id: &str) -> Option<Arc<dyn SessionHandle>>;
}

/// A live handle to one terminal session.
pub trait SessionHandle: Send + Sync {
    fn profile(&self) -> Box<dyn Profile>;

    /// Fetch the current screen contents.
    fn snapshot(&self) -> Result<ScreenSnapshot, SourceError>;

    /// Open a stream of screen updates. The subscription is released when
    /// the returned stream is dropped.
    fn updates(&self) -> Result<Box<dyn UpdateStream>, SourceError>;
}

/// A subscription to screen updates for one session.
pub trait UpdateStream: Send {
    /// Wait for the next update, bounded by `timeout`.
    fn next_update(&mut self, timeout: Duration) -> Result<SourcePoll, SourceError>;
}
