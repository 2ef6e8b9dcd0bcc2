//! Screen encoding core
//!
//! Pure translation from raw screen snapshots to the wire representation:
//! color and palette resolution, run-length encoding of styled rows, and
//! frame assembly. Nothing in this module performs I/O or holds state
//! across calls.

mod color;
mod frame;
mod palette;
mod run;
mod snapshot;
mod style;

pub use color::ColorRef;
pub use frame::{Frame, FALLBACK_COLS, FALLBACK_ROWS};
pub use palette::{resolve_or, Palette};
pub use run::{encode_row, Run};
pub use snapshot::{CursorPos, GridSize, ScreenSnapshot, SnapshotCell};
pub use style::{CellStyle, ResolvedStyle};
