#![warn(missing_docs)]

//! A square, immediate-mode canvas menu rendered with Rust.

pub use vello::peniko as color;

pub use padui_core as core;
pub use padui_theme as theme;
pub use padui_widgets as widgets;

/// A "prelude" for users of the padui toolkit.
///
/// Importing this module brings into scope the most common types
/// needed to host a basic padui menu.
///
/// ```rust
/// use padui::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::assets::{AssetCache, AssetLoader, Bitmap, FsLoader};
    pub use crate::core::tasks::{Scheduler, SmolScheduler};
    pub use crate::core::update::{Invalidator, Update};
    pub use crate::core::vg::*;
    pub use crate::core::vgi::{Graphics, VelloGraphics};

    // Theme
    pub use crate::theme::MenuPalette;

    // Widget
    pub use crate::widgets::{
        Align, HAnchor, HitTarget, IconRef, ImagePlacement, Menu, MenuAction, MenuConfig,
        MenuContext, MenuError, MenuHandlers, MenuOption, MenuStyle, VAnchor,
    };
}
