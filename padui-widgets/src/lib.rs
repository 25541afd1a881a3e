#![warn(missing_docs)]

//! Menu widget for padui => See the `padui` crate for more.
//!
//! The widget is an immediate-mode canvas menu: every input mutation
//! re-runs a full layout, hit-test and paint pass against the configured
//! option list, then dispatches any consumed press. The stages are pure
//! functions over [geometry::FrameLayout]; [menu::Menu] is the state
//! container that sequences them.

/// Menu configuration and the style selector.
pub mod config;

/// Menu construction errors.
pub mod error;

/// The layout stage: pure geometry from config, options and assets.
pub mod geometry;

/// The hit-test stage: pointer position to hit target.
pub mod hit;

/// The menu widget itself.
pub mod menu;

/// Logical-pixel layout constants and icon glyphs.
pub mod metrics;

/// Menu options and their per-option callbacks.
pub mod option;

/// The paint stage: laid-out frame to graphics backend calls.
pub mod paint;

pub use config::{MenuConfig, MenuStyle};
pub use error::MenuError;
pub use hit::{HitTarget, MenuAction};
pub use menu::{Menu, MenuContext, MenuHandlers};
pub use option::{Align, HAnchor, IconRef, ImagePlacement, MenuOption, VAnchor};
