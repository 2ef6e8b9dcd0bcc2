//! Cell styles
//!
//! `CellStyle` is the abstract per-cell descriptor reported by the screen
//! source; `ResolvedStyle` is its wire-facing projection after color
//! resolution. Run boundaries are decided by structural equality over the
//! resolved form.

use serde::Serialize;

use super::color::ColorRef;
use super::palette::Palette;

/// Rendering attributes of one grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: ColorRef,
    pub bg: ColorRef,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub inverse: bool,
    pub faint: bool,
}

impl CellStyle {
    /// Resolve against a palette into the wire-facing projection.
    pub fn resolve(&self, palette: &Palette) -> ResolvedStyle {
        ResolvedStyle {
            fg: self.fg.resolve(palette),
            bg: self.bg.resolve(palette),
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
            strikethrough: self.strikethrough,
            inverse: self.inverse,
            faint: self.faint,
        }
    }
}

/// A cell style after color resolution.
///
/// Absent colors mean "use the terminal default" and never reach the wire;
/// boolean flags appear in the encoding only when true.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg: Option<String>,
    #[serde(rename = "b", skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(rename = "i", skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(rename = "u", skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(rename = "s", skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    #[serde(rename = "inv", skip_serializing_if = "is_false")]
    pub inverse: bool,
    #[serde(rename = "f", skip_serializing_if = "is_false")]
    pub faint: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_carries_flags() {
        let style = CellStyle {
            bold: true,
            underline: true,
            ..Default::default()
        };
        let resolved = style.resolve(&Palette::default());

        assert!(resolved.bold);
        assert!(resolved.underline);
        assert!(!resolved.italic);
        assert_eq!(resolved.fg, None);
        assert_eq!(resolved.bg, None);
    }

    #[test]
    fn test_resolve_colors() {
        let mut palette = Palette::default();
        palette.ansi[4] = "#0000ee".to_string();

        let style = CellStyle {
            fg: ColorRef::Standard(4),
            bg: ColorRef::TrueColor(16, 32, 48),
            ..Default::default()
        };
        let resolved = style.resolve(&palette);

        assert_eq!(resolved.fg, Some("#0000ee".to_string()));
        assert_eq!(resolved.bg, Some("#102030".to_string()));
    }

    #[test]
    fn test_plain_style_serializes_empty() {
        let resolved = ResolvedStyle::default();
        let json = serde_json::to_string(&resolved).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_flags_serialize_only_when_true() {
        let resolved = ResolvedStyle {
            bold: true,
            inverse: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&resolved).unwrap();
        assert_eq!(json, r#"{"b":true,"inv":true}"#);
    }

    #[test]
    fn test_default_fg_never_serialized() {
        let style = CellStyle {
            fg: ColorRef::Default,
            bold: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&style.resolve(&Palette::default())).unwrap();
        assert!(!json.contains("fg"));
    }
}
