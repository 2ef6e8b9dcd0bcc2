//! Frame assembly
//!
//! A frame is one fully self-contained encoding of the visible grid: every
//! row run-length encoded, plus cursor position and dimensions. There is
//! no diffing against prior frames.

use serde::Serialize;
use tracing::warn;

use super::palette::Palette;
use super::run::{encode_row, Run};
use super::snapshot::{CursorPos, ScreenSnapshot};

/// Columns to report when a snapshot carries no size information.
pub const FALLBACK_COLS: u16 = 80;
/// Rows to report when a snapshot carries no size information.
pub const FALLBACK_ROWS: u16 = 25;

/// One point-in-time encoding of the visible grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub lines: Vec<Vec<Run>>,
    pub cursor: CursorPos,
    pub cols: u16,
    pub rows: u16,
}

impl Frame {
    /// Encode a raw snapshot against a palette.
    ///
    /// When the snapshot reports no grid size the frame falls back to
    /// 80x25; the degraded path is logged, not silent.
    pub fn build(snapshot: &ScreenSnapshot, palette: &Palette, session_id: &str) -> Self {
        let lines = snapshot
            .lines
            .iter()
            .map(|row| encode_row(row, palette))
            .collect();

        let (cols, rows) = match snapshot.size {
            Some(size) => (size.cols, size.rows),
            None => {
                warn!(
                    session = session_id,
                    "snapshot reported no grid size, assuming {}x{}", FALLBACK_COLS, FALLBACK_ROWS
                );
                (FALLBACK_COLS, FALLBACK_ROWS)
            }
        };

        Self {
            session_id: session_id.to_string(),
            lines,
            cursor: snapshot.cursor,
            cols,
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::snapshot::GridSize;

    #[test]
    fn test_build_carries_cursor_and_size() {
        let mut snapshot = ScreenSnapshot::from_text_rows(&["hello", "world"], 5);
        snapshot.cursor = CursorPos { x: 3, y: 1 };

        let frame = Frame::build(&snapshot, &Palette::default(), "s1");

        assert_eq!(frame.session_id, "s1");
        assert_eq!(frame.lines.len(), 2);
        assert_eq!(frame.lines[0].len(), 1);
        assert_eq!(frame.lines[0][0].text, "hello");
        assert_eq!(frame.cursor, CursorPos { x: 3, y: 1 });
        assert_eq!(frame.cols, 5);
        assert_eq!(frame.rows, 2);
    }

    #[test]
    fn test_missing_size_falls_back() {
        let mut snapshot = ScreenSnapshot::from_text_rows(&["x"], 1);
        snapshot.size = None;

        let frame = Frame::build(&snapshot, &Palette::default(), "s1");

        assert_eq!(frame.cols, FALLBACK_COLS);
        assert_eq!(frame.rows, FALLBACK_ROWS);
    }

    #[test]
    fn test_empty_rows_encode_empty() {
        let snapshot = ScreenSnapshot {
            lines: vec![vec![], vec![]],
            cursor: CursorPos::default(),
            size: Some(GridSize { cols: 10, rows: 2 }),
        };

        let frame = Frame::build(&snapshot, &Palette::default(), "s1");

        assert_eq!(frame.lines.len(), 2);
        assert!(frame.lines[0].is_empty());
        assert!(frame.lines[1].is_empty());
    }

    #[test]
    fn test_frame_serialization_shape() {
        let snapshot = ScreenSnapshot::from_text_rows(&["ab"], 2);
        let frame = Frame::build(&snapshot, &Palette::default(), "s1");
        let json = serde_json::to_string(&frame).unwrap();

        assert_eq!(
            json,
            r#"{"sessionId":"s1","lines":[[{"t":"ab"}]],"cursor":{"x":0,"y":0},"cols":2,"rows":1}"#
        );
    }
}
