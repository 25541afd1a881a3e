#![warn(missing_docs)]

//! Core functionality for padui => See the `padui` crate for more.
//!
//! This crate hosts everything the menu widget needs that is not menu logic:
//! the graphics backend abstraction, text layout and measurement, the shared
//! asset cache, background task scheduling, and update signalling.

/// Re-export of [vello] types used across the toolkit.
pub mod vg {
    pub use vello::kurbo;
    pub use vello::peniko;
    pub use vello::Scene;
}

/// Graphics backend abstraction and its implementations.
pub mod vgi;

/// Shared bitmap asset cache and the loader seam.
pub mod assets;

/// Scheduling of delayed, cancellable background tasks.
pub mod tasks;

/// Text measurement and greedy word wrapping.
pub mod text;

/// Text rendering using Parley for proper text layout and glyph mapping.
pub mod text_render;

/// Render-update flags and the redraw invalidation handle.
pub mod update;
