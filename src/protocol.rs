//! Wire protocol
//!
//! Newline-delimited JSON, UTF-8, compact. Commands arrive one per line on
//! the inbound stream; events leave one per line on the outbound stream.
//!
//! Inbound:  `{"cmd":"watch","sessionId":"..."}`, `{"cmd":"stop"}`,
//! `{"cmd":"quit"}`. Unknown `cmd` values are ignored without an event.
//!
//! Outbound: `ready`, `profile`, `content`, `error`, `stopped`.

use std::io::{self, Write};
use std::sync::Mutex;

use serde::Serialize;

use crate::core::{Frame, Palette};

/// Error type for inbound protocol violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("Invalid JSON")]
    InvalidJson,

    #[error("Missing {0}")]
    MissingField(&'static str),
}

/// An inbound command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start (or switch) streaming the given session.
    Watch { session_id: String },
    /// Stop the current stream.
    Stop,
    /// Shut the bridge down.
    Quit,
    /// Unrecognized command; ignored silently.
    Unknown,
}

/// Parse one input line into a command.
///
/// An unparsable line or a `watch` without a session id is a protocol
/// error; a well-formed object with an unrecognized `cmd` is `Unknown`.
pub fn parse_command(line: &str) -> Result<Command, ProtocolError> {
    let value: serde_json::Value =
        serde_json::from_str(line.trim()).map_err(|_| ProtocolError::InvalidJson)?;

    let Some(cmd) = value.get("cmd").and_then(|v| v.as_str()) else {
        return Ok(Command::Unknown);
    };

    match cmd {
        "watch" => {
            let session_id = value
                .get("sessionId")
                .and_then(|v| v.as_str())
                .ok_or(ProtocolError::MissingField("sessionId"))?;
            Ok(Command::Watch {
                session_id: session_id.to_string(),
            })
        }
        "stop" => Ok(Command::Stop),
        "quit" => Ok(Command::Quit),
        _ => Ok(Command::Unknown),
    }
}

/// An outbound event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    /// Emitted once at startup, before any command is read.
    Ready,
    /// The resolved palette for a freshly watched session.
    Profile {
        #[serde(rename = "sessionId")]
        session_id: String,
        colors: Palette,
    },
    /// One encoded screen frame.
    Content(Frame),
    Error {
        message: String,
    },
    /// The current stream was stopped.
    Stopped,
}

impl Event {
    pub fn error(message: impl Into<String>) -> Self {
        Event::Error {
            message: message.into(),
        }
    }
}

/// Sink for outbound events.
///
/// The controller and its poll thread share one sink, so implementations
/// must be safe to call from both.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &Event);
}

/// Writes events as compact JSON lines to stdout, flushing after each.
pub struct StdoutSink;

impl EventSink for StdoutSink {
    fn emit(&self, event: &Event) {
        match serde_json::to_string(event) {
            Ok(line) => {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                let _ = writeln!(out, "{}", line);
                let _ = out.flush();
            }
            Err(e) => tracing::error!("failed to serialize event: {}", e),
        }
    }
}

/// Collects events in memory. Used by the integration tests and by hosts
/// that embed the controller and consume events directly.
#[derive(Default)]
pub struct BufferSink {
    events: Mutex<Vec<Event>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl EventSink for BufferSink {
    fn emit(&self, event: &Event) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}
