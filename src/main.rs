//! Term Bridge
//!
//! Streams styled terminal screen content as newline-delimited JSON over
//! stdin/stdout. Logging goes to stderr; stdout carries only the wire
//! protocol.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use term_bridge::config::BridgeConfig;
use term_bridge::protocol::StdoutSink;
use term_bridge::source::memory::MemorySource;
use term_bridge::transport;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    info!("starting term-bridge");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("fatal error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> io::Result<()> {
    let config = BridgeConfig::load_or_default();

    // The standalone binary has no terminal-host backend compiled in; it
    // serves the protocol against an empty in-memory source. Embedders
    // supply a real `ScreenSource` and call `transport::run` themselves.
    let source = Arc::new(MemorySource::new());

    let stdin = io::stdin();
    transport::run(stdin.lock(), source, Arc::new(StdoutSink), config)
}
