//! The menu palette: accent color plus fixed companion colors.

use serde::{Deserialize, Serialize};
use vello::peniko::Color;

use crate::color::{offset_rgb, parse_hex, Rgb};
use crate::error::ColorError;

/// The default accent color (`#1E88E5`).
pub const DEFAULT_ACCENT: Color = Color::from_rgb8(0x1E, 0x88, 0xE5);

/// The default accent color as a hex string.
pub const DEFAULT_ACCENT_HEX: &str = "#1E88E5";

/// Colors used by menu rendering.
///
/// All text is painted with `text` over an `outline` stroke; `accent` marks
/// titles, hovered items and the progress fill. `positive`/`negative` color
/// the list navigation chevrons and the confirm/cancel buttons; `rating`
/// colors the star row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuPalette {
    /// The accent (theme) color.
    #[serde(with = "crate::serde_color")]
    pub accent: Color,
    /// Default text fill.
    #[serde(with = "crate::serde_color")]
    pub text: Color,
    /// Text outline stroke.
    #[serde(with = "crate::serde_color")]
    pub outline: Color,
    /// Rating glyph fill.
    #[serde(with = "crate::serde_color")]
    pub rating: Color,
    /// "Go" color: next chevron, confirm button.
    #[serde(with = "crate::serde_color")]
    pub positive: Color,
    /// "Stop" color: edge chevron, cancel button.
    #[serde(with = "crate::serde_color")]
    pub negative: Color,
}

impl MenuPalette {
    /// Build a palette around the given accent hex color.
    pub fn with_accent(hex: &str) -> Result<Self, ColorError> {
        Ok(Self {
            accent: parse_hex(hex)?,
            ..Self::default()
        })
    }

    /// The translucent highlight painted behind a hovered menu item.
    ///
    /// The offset parameter of [offset_rgb] is the reserved desaturation
    /// hook; the highlight uses an offset of zero.
    pub fn highlight(&self) -> Color {
        let Rgb { r, g, b } = offset_rgb(self.accent, 0);
        Color::from_rgba8(r, g, b, 128)
    }
}

impl Default for MenuPalette {
    fn default() -> Self {
        Self {
            accent: DEFAULT_ACCENT,
            text: Color::from_rgb8(255, 255, 255),
            outline: Color::from_rgb8(0, 0, 0),
            rating: Color::from_rgb8(0xFF, 0xC1, 0x07),
            positive: Color::from_rgb8(0x4C, 0xAF, 0x50),
            negative: Color::from_rgb8(0xF4, 0x43, 0x36),
        }
    }
}
