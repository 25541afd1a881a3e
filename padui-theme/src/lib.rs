#![warn(missing_docs)]

//! Colors and palette handling for padui => See the `padui` crate for more.
//!
//! Menus are themed around a single accent color plus a small fixed palette
//! (text, outline, rating and status colors). This crate owns hex color
//! parsing, the channel-offset utility used for hover highlights, and the
//! [palette::MenuPalette] type consumed by the widget crate.

/// Hex color parsing and the channel-offset utility.
pub mod color;

/// Error types for color and palette handling.
pub mod error;

/// The menu palette: accent color plus fixed companion colors.
pub mod palette;

/// Custom serialization helpers for [vello::peniko::Color].
pub mod serde_color;

pub use color::{hex_to_offset, parse_hex, Rgb};
pub use error::ColorError;
pub use palette::MenuPalette;
