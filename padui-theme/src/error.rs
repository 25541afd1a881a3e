//! # Color Error Types
//!
//! Specific, context-rich errors for color parsing, instead of stringly-typed
//! failures bubbling out of the widget crate.

use thiserror::Error;

/// Errors that can occur while parsing colors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// A hex color string did not have 6 or 8 hex digits.
    #[error("Hex color '{input}' must have 6 or 8 hex digits")]
    InvalidLength {
        /// The offending input string.
        input: String,
    },

    /// A hex color string contained a non-hex character.
    #[error("Hex color '{input}' contains invalid hex digits")]
    InvalidDigit {
        /// The offending input string.
        input: String,
    },
}
