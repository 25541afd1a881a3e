//! Hex color parsing and the channel-offset utility used for highlights.

use vello::peniko::Color;

use crate::error::ColorError;

/// An 8-bit RGB triple.
///
/// Used where the menu needs raw channels rather than a [Color], e.g. to
/// build the translucent hover highlight from the accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Convert into an opaque [Color].
    pub fn to_color(self) -> Color {
        Color::from_rgb8(self.r, self.g, self.b)
    }

    /// Convert into a [Color] with the given alpha.
    pub fn to_color_with_alpha(self, alpha: f32) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, (alpha.clamp(0.0, 1.0) * 255.0) as u8)
    }
}

/// Parse a `#rrggbb` or `#rrggbbaa` hex string into a [Color].
///
/// The leading `#` is optional.
pub fn parse_hex(hex: &str) -> Result<Color, ColorError> {
    let digits = hex.trim_start_matches('#');

    // Slicing below is byte-indexed, so anything outside ASCII hex is
    // rejected before the length is even considered.
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidDigit {
            input: hex.to_string(),
        });
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| ColorError::InvalidDigit {
            input: hex.to_string(),
        })
    };

    if digits.len() == 6 {
        Ok(Color::from_rgb8(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
        ))
    } else if digits.len() == 8 {
        Ok(Color::from_rgba8(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            channel(6..8)?,
        ))
    } else {
        Err(ColorError::InvalidLength {
            input: hex.to_string(),
        })
    }
}

/// Parse a hex color and offset every channel by `offset`, clamping each
/// channel to `[0, 255]`.
///
/// An offset of `0` is a useful identity: it yields the raw channels of the
/// input color, which the menu widget turns into a translucent highlight.
pub fn hex_to_offset(hex: &str, offset: i32) -> Result<Rgb, ColorError> {
    let color = parse_hex(hex)?;
    Ok(offset_rgb(color, offset))
}

/// Offset every channel of `color` by `offset`, clamped to `[0, 255]`.
pub fn offset_rgb(color: Color, offset: i32) -> Rgb {
    let channel = |c: f32| ((c * 255.0).round() as i32 + offset).clamp(0, 255) as u8;

    Rgb {
        r: channel(color.components[0]),
        g: channel(color.components[1]),
        b: channel(color.components[2]),
    }
}
