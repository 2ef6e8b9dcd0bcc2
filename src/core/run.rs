//! Run-length encoding of styled rows
//!
//! Collapses a row of per-cell styles into minimal contiguous runs of
//! identical resolved style. Structural equality over `ResolvedStyle` is
//! the sole boundary condition; there is no heuristic merging.

use serde::Serialize;

use super::palette::Palette;
use super::snapshot::SnapshotCell;
use super::style::ResolvedStyle;

/// A maximal stretch of consecutive cells sharing one resolved style.
///
/// Invariant: `text` is non-empty and every character in it was resolved
/// to exactly `style`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    #[serde(rename = "t")]
    pub text: String,
    #[serde(flatten)]
    pub style: ResolvedStyle,
}

impl Run {
    fn new(ch: char, style: ResolvedStyle) -> Self {
        Self {
            text: ch.to_string(),
            style,
        }
    }
}

/// Encode one row of cells into an ordered list of minimal runs.
///
/// A cell without a style resolves to the all-default style. An empty row
/// yields an empty list, never a list containing one empty run.
pub fn encode_row(cells: &[SnapshotCell], palette: &Palette) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut current: Option<Run> = None;

    for cell in cells {
        let style = cell
            .style
            .map(|s| s.resolve(palette))
            .unwrap_or_default();

        let extends = current.as_ref().is_some_and(|run| run.style == style);
        if extends {
            if let Some(run) = current.as_mut() {
                run.text.push(cell.ch);
            }
        } else {
            if let Some(run) = current.take() {
                runs.push(run);
            }
            current = Some(Run::new(cell.ch, style));
        }
    }

    if let Some(run) = current {
        runs.push(run);
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::ColorRef;
    use crate::core::style::CellStyle;
    use proptest::prelude::*;

    fn bold() -> CellStyle {
        CellStyle {
            bold: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_style_change_splits_runs() {
        let palette = Palette::default();
        // A A B B B A with distinct resolved styles
        let a = SnapshotCell::plain('a');
        let b = SnapshotCell::styled('b', bold());
        let row = [a, a, b, b, b, a];

        let runs = encode_row(&row, &palette);

        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].text, "aa");
        assert_eq!(runs[1].text, "bbb");
        assert_eq!(runs[2].text, "a");
        assert!(runs[1].style.bold);
        assert!(!runs[2].style.bold);
    }

    #[test]
    fn test_empty_row_yields_no_runs() {
        let palette = Palette::default();
        assert!(encode_row(&[], &palette).is_empty());
    }

    #[test]
    fn test_absent_style_equals_default_style() {
        let palette = Palette::default();
        // An unstyled cell and a cell carrying the all-default style must
        // land in the same run.
        let row = [
            SnapshotCell::plain('x'),
            SnapshotCell::styled('y', CellStyle::default()),
        ];

        let runs = encode_row(&row, &palette);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "xy");
    }

    #[test]
    fn test_equal_resolved_styles_merge_across_refs() {
        let mut palette = Palette::default();
        palette.ansi[7] = "#c7c7c7".to_string();
        // Indexed 7 resolves to the same hex as an equal TrueColor; those
        // runs merge because comparison is over the resolved form.
        let row = [
            SnapshotCell::styled(
                'p',
                CellStyle {
                    fg: ColorRef::Standard(7),
                    ..Default::default()
                },
            ),
            SnapshotCell::styled(
                'q',
                CellStyle {
                    fg: ColorRef::TrueColor(0xc7, 0xc7, 0xc7),
                    ..Default::default()
                },
            ),
        ];

        let runs = encode_row(&row, &palette);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "pq");
    }

    #[test]
    fn test_run_serializes_with_wire_keys() {
        let palette = Palette::default();
        let row = [SnapshotCell::styled('z', bold())];
        let runs = encode_row(&row, &palette);
        let json = serde_json::to_string(&runs[0]).unwrap();
        assert_eq!(json, r#"{"t":"z","b":true}"#);
    }

    proptest! {
        /// A row of N cells sharing one resolved style encodes as exactly
        /// one run of length N, for all N >= 1.
        #[test]
        fn prop_uniform_row_is_one_run(n in 1usize..200) {
            let palette = Palette::default();
            let row: Vec<SnapshotCell> =
                (0..n).map(|_| SnapshotCell::styled('x', bold())).collect();

            let runs = encode_row(&row, &palette);
            prop_assert_eq!(runs.len(), 1);
            prop_assert_eq!(runs[0].text.chars().count(), n);
        }

        /// Runs cover the row left to right with no gaps and no overlaps.
        #[test]
        fn prop_runs_cover_row(cells in proptest::collection::vec(0u8..3, 0..64)) {
            let palette = Palette::default();
            let styles = [
                CellStyle::default(),
                CellStyle { bold: true, ..Default::default() },
                CellStyle { italic: true, ..Default::default() },
            ];
            let row: Vec<SnapshotCell> = cells
                .iter()
                .map(|&i| SnapshotCell::styled((b'a' + i) as char, styles[i as usize]))
                .collect();

            let runs = encode_row(&row, &palette);

            let total: usize = runs.iter().map(|r| r.text.chars().count()).sum();
            prop_assert_eq!(total, row.len());

            let rebuilt: String = runs.iter().flat_map(|r| r.text.chars()).collect();
            let original: String = row.iter().map(|c| c.ch).collect();
            prop_assert_eq!(rebuilt, original);

            // Adjacent runs never share a style, otherwise they would have
            // been merged.
            for pair in runs.windows(2) {
                prop_assert_ne!(&pair[0].style, &pair[1].style);
            }
        }
    }
}
