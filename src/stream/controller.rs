//! Streaming session controller
//!
//! Drives the watch/stop/quit lifecycle over a screen source. At most one
//! activation is live at any time; switching targets always cancels and
//! joins the previous poll thread before the next one starts, so no two
//! poll threads ever run concurrently and no frame from a retired
//! activation is emitted after its replacement's `profile` event.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::BridgeConfig;
use crate::core::{Frame, Palette};
use crate::protocol::{Command, Event, EventSink};
use crate::source::{ScreenSource, SessionHandle, SourceError, SourcePoll};

/// The live state for the currently watched session.
struct Activation {
    session_id: String,
    /// Cooperative cancellation flag, checked at every bounded-wait
    /// boundary of the poll loop.
    cancel: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Command-driven state machine owning zero or one poll thread.
pub struct StreamController {
    source: Arc<dyn ScreenSource>,
    sink: Arc<dyn EventSink>,
    config: BridgeConfig,
    active: Option<Activation>,
}

impl StreamController {
    pub fn new(
        source: Arc<dyn ScreenSource>,
        sink: Arc<dyn EventSink>,
        config: BridgeConfig,
    ) -> Self {
        Self {
            source,
            sink,
            config,
            active: None,
        }
    }

    /// Apply one inbound command. Returns `true` when the transport loop
    /// should terminate.
    pub fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Watch { session_id } => {
                self.watch(&session_id);
                false
            }
            Command::Stop => {
                self.stop();
                false
            }
            Command::Quit => {
                self.quit();
                true
            }
            Command::Unknown => false,
        }
    }

    /// Switch streaming to `session_id`.
    ///
    /// Any current activation is fully retired first. Activation then
    /// resolves the session, emits `profile`, emits one best-effort
    /// initial frame, and spawns the poll thread.
    pub fn watch(&mut self, session_id: &str) {
        self.retire();

        let Some(session) = self.source.session(session_id) else {
            self.sink
                .emit(&Event::error(format!("Session not found: {}", session_id)));
            return;
        };

        let palette = Palette::from_profile(session.profile().as_ref());
        self.sink.emit(&Event::Profile {
            session_id: session_id.to_string(),
            colors: palette.clone(),
        });

        // Initial frame so the watcher sees the current screen immediately.
        // Failure here is reported but does not abort the activation.
        match session.snapshot() {
            Ok(snapshot) => {
                let frame = Frame::build(&snapshot, &palette, session_id);
                self.sink.emit(&Event::Content(frame));
            }
            Err(e) => {
                self.sink
                    .emit(&Event::error(format!("Initial fetch failed: {}", e)));
            }
        }

        let cancel = Arc::new(AtomicBool::new(false));
        let handle = {
            let cancel = cancel.clone();
            let sink = self.sink.clone();
            let session_id = session_id.to_string();
            let timeout = self.config.poll_timeout();
            thread::spawn(move || poll_loop(session, session_id, palette, cancel, sink, timeout))
        };

        info!(session = session_id, "streaming started");
        self.active = Some(Activation {
            session_id: session_id.to_string(),
            cancel,
            handle,
        });
    }

    /// Stop streaming. Idempotent: always emits `stopped`, even from idle.
    pub fn stop(&mut self) {
        self.retire();
        self.sink.emit(&Event::Stopped);
    }

    /// Tear down the current activation without emitting `stopped`.
    pub fn quit(&mut self) {
        self.retire();
    }

    /// Whether a poll thread is currently owned. The thread may already
    /// have exited on its own after a source error.
    pub fn is_streaming(&self) -> bool {
        self.active.is_some()
    }

    /// Cancel and join the current poll thread, then wait out the settle
    /// period so the source can release the session before a new
    /// subscription is opened.
    fn retire(&mut self) {
        let Some(activation) = self.active.take() else {
            return;
        };

        activation.cancel.store(true, Ordering::SeqCst);
        if activation.handle.join().is_err() {
            warn!(session = %activation.session_id, "poll thread panicked");
        }
        debug!(session = %activation.session_id, "streaming retired");

        thread::sleep(self.config.settle_delay());
    }
}

impl Drop for StreamController {
    fn drop(&mut self) {
        if let Some(activation) = self.active.take() {
            activation.cancel.store(true, Ordering::SeqCst);
            let _ = activation.handle.join();
        }
    }
}

/// The poll loop, run on its own thread for the lifetime of one activation.
///
/// Waits for updates in bounded intervals; every timeout re-checks the
/// cancellation flag, which bounds cancellation latency by one interval.
fn poll_loop(
    session: Arc<dyn SessionHandle>,
    session_id: String,
    palette: Palette,
    cancel: Arc<AtomicBool>,
    sink: Arc<dyn EventSink>,
    timeout: Duration,
) {
    let mut updates = match session.updates() {
        Ok(updates) => updates,
        Err(e) => {
            sink.emit(&Event::error(format!("Streaming error: {}", e)));
            return;
        }
    };

    while !cancel.load(Ordering::SeqCst) {
        match updates.next_update(timeout) {
            Ok(SourcePoll::Update(snapshot)) => {
                // A cancel racing the update wins: nothing is emitted for
                // a retired activation.
                if cancel.load(Ordering::SeqCst) {
                    break;
                }
                let frame = Frame::build(&snapshot, &palette, &session_id);
                sink.emit(&Event::Content(frame));
            }
            Ok(SourcePoll::TimedOut) => continue,
            Ok(SourcePoll::Closed) => {
                debug!(session = %session_id, "update stream closed");
                break;
            }
            Err(SourceError::Disconnected(msg)) => {
                sink.emit(&Event::error(format!("Session disconnected: {}", msg)));
                break;
            }
            Err(e) => {
                sink.emit(&Event::error(format!("Streaming error: {}", e)));
                break;
            }
        }
    }
}
