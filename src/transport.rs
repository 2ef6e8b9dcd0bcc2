//! Line-delimited JSON transport
//!
//! Reads one command per line from the input, drives the controller, and
//! emits events through the sink. `ready` is emitted before the first
//! read. The loop ends on `quit` or when the input closes; either way the
//! live activation is torn down before returning.

use std::io::{self, BufRead};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::BridgeConfig;
use crate::protocol::{parse_command, Event, EventSink};
use crate::source::ScreenSource;
use crate::stream::StreamController;

/// Run the bridge until `quit` or end of input.
pub fn run(
    input: impl BufRead,
    source: Arc<dyn ScreenSource>,
    sink: Arc<dyn EventSink>,
    config: BridgeConfig,
) -> io::Result<()> {
    sink.emit(&Event::Ready);

    let mut controller = StreamController::new(source, sink.clone(), config);

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(command) => {
                debug!(?command, "command received");
                if controller.handle(command) {
                    info!("quit received, shutting down");
                    return Ok(());
                }
            }
            Err(e) => sink.emit(&Event::error(e.to_string())),
        }
    }

    // Input closed without a quit; tear down the same way.
    info!("input closed, shutting down");
    controller.quit();
    Ok(())
}
