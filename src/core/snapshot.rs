//! Raw screen snapshots
//!
//! The unencoded form of a screen capture as delivered by a screen source:
//! a grid of characters with optional styles, a cursor position, and the
//! session's reported dimensions. Snapshots are inputs to frame assembly
//! and are never mutated by the core.

use serde::Serialize;

use super::style::CellStyle;

/// Grid dimensions reported by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub cols: u16,
    pub rows: u16,
}

/// Cursor position within the visible grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CursorPos {
    pub x: u16,
    pub y: u16,
}

/// One cell of a raw screen snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotCell {
    pub ch: char,
    /// `None` when the source reported no styling for this cell.
    pub style: Option<CellStyle>,
}

impl SnapshotCell {
    /// An unstyled cell.
    pub fn plain(ch: char) -> Self {
        Self { ch, style: None }
    }

    /// A styled cell.
    pub fn styled(ch: char, style: CellStyle) -> Self {
        Self {
            ch,
            style: Some(style),
        }
    }
}

/// A point-in-time capture of the visible grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenSnapshot {
    /// Rows of cells, top to bottom.
    pub lines: Vec<Vec<SnapshotCell>>,
    pub cursor: CursorPos,
    /// Reported grid size; `None` when the source could not supply one.
    pub size: Option<GridSize>,
}

impl ScreenSnapshot {
    /// Build a snapshot from plain text rows, one character per cell.
    pub fn from_text_rows(rows: &[&str], cols: u16) -> Self {
        let lines = rows
            .iter()
            .map(|row| row.chars().map(SnapshotCell::plain).collect())
            .collect();
        Self {
            lines,
            cursor: CursorPos::default(),
            size: Some(GridSize {
                cols,
                rows: rows.len() as u16,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_rows() {
        let snapshot = ScreenSnapshot::from_text_rows(&["ab", "c"], 2);
        assert_eq!(snapshot.lines.len(), 2);
        assert_eq!(snapshot.lines[0].len(), 2);
        assert_eq!(snapshot.lines[0][0].ch, 'a');
        assert_eq!(snapshot.lines[0][0].style, None);
        assert_eq!(snapshot.size, Some(GridSize { cols: 2, rows: 2 }));
    }
}
