//! Cell color references
//!
//! A cell's color arrives from the screen source as an abstract reference:
//! the terminal default, an index into the extended 256-color space, or a
//! direct RGB triple. Resolution maps a reference plus the active palette
//! to a concrete hex color, or to "no override" for defaults.

use super::palette::Palette;

/// A per-cell color reference, as reported by the screen source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRef {
    /// Use the terminal's default foreground or background.
    Default,
    /// An index into the extended 256-color space.
    Standard(u16),
    /// 24-bit RGB color.
    TrueColor(u8, u8, u8),
}

impl Default for ColorRef {
    fn default() -> Self {
        ColorRef::Default
    }
}

impl ColorRef {
    /// Resolve this reference to a hex color against the given palette.
    ///
    /// Returns `None` when the cell should keep the terminal default, and
    /// also for out-of-range indices: resolution degrades to "no override"
    /// rather than failing frame construction.
    pub fn resolve(&self, palette: &Palette) -> Option<String> {
        match *self {
            ColorRef::Default => None,
            ColorRef::TrueColor(r, g, b) => Some(hex(r, g, b)),
            ColorRef::Standard(idx) => resolve_indexed(idx, palette),
        }
    }
}

/// Resolve an index in the 256-color space.
fn resolve_indexed(idx: u16, palette: &Palette) -> Option<String> {
    match idx {
        // The 16 ANSI colors come from the session's profile
        0..=15 => palette.ansi.get(idx as usize).cloned(),
        // 216 color cube (16-231), component steps of 0x33
        16..=231 => {
            let n = idx - 16;
            let r = (n / 36) % 6;
            let g = (n / 6) % 6;
            let b = n % 6;
            Some(hex((r * 51) as u8, (g * 51) as u8, (b * 51) as u8))
        }
        // Grayscale ramp (232-255)
        232..=255 => {
            let v = ((idx - 232) * 10 + 8) as u8;
            Some(hex(v, v, v))
        }
        _ => None,
    }
}

/// Format an RGB triple as `#rrggbb`.
fn hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}
