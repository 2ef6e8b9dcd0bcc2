//! Term Bridge Library
//!
//! Translates a live terminal screen grid into a compact, run-length-encoded
//! JSON representation and streams it over standard streams. This crate
//! provides:
//!
//! - `core`: palette and color resolution, run encoding, frame assembly
//! - `source`: the interface to an external screen source (terminal host)
//! - `stream`: the command-driven streaming session controller
//! - `protocol`: inbound commands and outbound events on the wire
//! - `transport`: the newline-delimited JSON loop over stdin/stdout

pub mod config;
pub mod core;
pub mod protocol;
pub mod source;
pub mod stream;
pub mod transport;
