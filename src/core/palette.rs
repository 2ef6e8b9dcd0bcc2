//! Profile color palette
//!
//! A palette is built once per streaming activation from the session's
//! profile and is immutable afterwards. Every lookup is best-effort: a
//! missing or unsupported field substitutes a documented fallback instead
//! of failing the whole resolution.

use serde::Serialize;
use tracing::debug;

use crate::source::Profile;

/// Fallback when the profile cannot supply a foreground color.
pub const FALLBACK_FOREGROUND: &str = "#c7c7c7";
/// Fallback when the profile cannot supply a background color.
pub const FALLBACK_BACKGROUND: &str = "#000000";
/// Fallback when the profile cannot supply a cursor color.
pub const FALLBACK_CURSOR: &str = "#ffffff";
/// Fallback for any missing ANSI palette slot.
pub const FALLBACK_ANSI: &str = "#c7c7c7";

/// The resolved color palette for one streaming activation.
///
/// Serializes as the `colors` object of the `profile` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    /// Default foreground color.
    #[serde(rename = "fg")]
    pub foreground: String,
    /// Default background color.
    #[serde(rename = "bg")]
    pub background: String,
    /// Cursor color.
    pub cursor: String,
    /// The 16 ANSI colors. Always exactly 16 entries.
    pub ansi: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            foreground: FALLBACK_FOREGROUND.to_string(),
            background: FALLBACK_BACKGROUND.to_string(),
            cursor: FALLBACK_CURSOR.to_string(),
            ansi: vec![FALLBACK_ANSI.to_string(); 16],
        }
    }
}

/// Resolve one optional color lookup, substituting `fallback` when the
/// profile could not supply the field.
///
/// Returns the color plus whether the fallback was taken, so degraded
/// resolution is observable without relying on a logging side channel.
pub fn resolve_or(value: Option<String>, fallback: &str) -> (String, bool) {
    match value {
        Some(color) => (color, false),
        None => (fallback.to_string(), true),
    }
}

impl Palette {
    /// Build a palette from a profile snapshot.
    ///
    /// Each of the 19 lookups (fg, bg, cursor, 16 ANSI slots) is attempted
    /// independently; failures degrade to per-field fallbacks.
    pub fn from_profile(profile: &dyn Profile) -> Self {
        let (foreground, degraded) = resolve_or(profile.foreground_color(), FALLBACK_FOREGROUND);
        if degraded {
            debug!("profile has no foreground color, using fallback");
        }

        let (background, degraded) = resolve_or(profile.background_color(), FALLBACK_BACKGROUND);
        if degraded {
            debug!("profile has no background color, using fallback");
        }

        let (cursor, degraded) = resolve_or(profile.cursor_color(), FALLBACK_CURSOR);
        if degraded {
            debug!("profile has no cursor color, using fallback");
        }

        let mut ansi = Vec::with_capacity(16);
        for idx in 0..16 {
            let (color, degraded) = resolve_or(profile.ansi_color(idx), FALLBACK_ANSI);
            if degraded {
                debug!(idx, "profile has no ANSI color, using fallback");
            }
            ansi.push(color);
        }

        Self {
            foreground,
            background,
            cursor,
            ansi,
        }
    }
}
