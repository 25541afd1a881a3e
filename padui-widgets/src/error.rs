//! Menu construction errors.

use padui_theme::error::ColorError;
use thiserror::Error;

/// Errors raised when constructing a menu.
///
/// Menus never raise errors after construction; degenerate runtime state
/// (empty option lists, out-of-range indices, unreachable assets) degrades
/// gracefully instead.
#[derive(Error, Debug)]
pub enum MenuError {
    /// The configuration reaches a state where the selection handler would
    /// be invoked, but none was supplied.
    #[error("Menu style '{style}' can invoke the selection handler, but none was supplied")]
    MissingSelectionHandler {
        /// The style that requires the handler.
        style: &'static str,
    },

    /// The surface size must be positive.
    #[error("Invalid menu size: {0}")]
    InvalidSize(u32),

    /// The scale factor must be positive and finite.
    #[error("Invalid menu scale: {0}")]
    InvalidScale(f64),

    /// The theme color hex string failed to parse.
    #[error(transparent)]
    Color(#[from] ColorError),
}
