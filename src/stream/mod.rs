//! Streaming session management
//!
//! The command-driven state machine that owns zero or one active poll
//! thread and emits frames and lifecycle events.

mod controller;

pub use controller::StreamController;
