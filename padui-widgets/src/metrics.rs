//! Layout constants and icon-font codepoints.
//!
//! All length constants are in logical pixels and get multiplied by the
//! menu's scale factor at layout time. Font sizes follow the same rule.

use std::time::Duration;

/// Padding between the surface edge and the menu frame content.
pub const FRAME_PADDING: f64 = 12.0;
/// Vertical spacing between stacked items and below the title band.
pub const ITEM_SPACING: f64 = 8.0;

/// Menu title font size.
pub const TITLE_FONT_SIZE: f64 = 24.0;
/// Stacked item title font size.
pub const ITEM_FONT_SIZE: f64 = 16.0;
/// Item title font size in the `title` style, absent a per-option override.
pub const TITLE_STYLE_FONT_SIZE: f64 = 20.0;
/// Description font size.
pub const DESCRIPTION_FONT_SIZE: f64 = 12.0;
/// Stacked item status font size.
pub const STATUS_FONT_SIZE: f64 = 14.0;
/// List body font size (item title in the carousel view).
pub const LIST_FONT_SIZE: f64 = 18.0;
/// List body secondary font size (description, status, rating, user card).
pub const LIST_DETAIL_FONT_SIZE: f64 = 12.0;
/// Default floating item font size.
pub const FLOATING_FONT_SIZE: f64 = 14.0;
/// Footer font size.
pub const FOOTER_FONT_SIZE: f64 = 14.0;
/// Sub-footer font size.
pub const SUB_FOOTER_FONT_SIZE: f64 = 10.0;

/// Progress bar height (and the advance it adds).
pub const PROGRESS_HEIGHT: f64 = 12.0;
/// Gap above the progress bar and the status line.
pub const SECTION_GAP: f64 = 6.0;

/// Stacked icon cell size.
pub const ICON_SIZE: f64 = 32.0;
/// Stacked icon cell size for compact items.
pub const COMPACT_ICON_SIZE: f64 = 18.0;

/// Footer baseline distance from the bottom edge.
pub const FOOTER_BOTTOM_OFFSET: f64 = 6.0;
/// Sub-footer baseline distance from the bottom edge.
pub const SUB_FOOTER_BOTTOM_OFFSET: f64 = 26.0;
/// Height of the band above the bottom edge that activates the sub-footer.
pub const SUB_FOOTER_HOT_BAND: f64 = 36.0;

/// Text outline stroke width for stacked content, titles and footers.
pub const TEXT_OUTLINE_WIDTH: f64 = 4.0;
/// Text outline stroke width for floating items.
pub const FLOATING_OUTLINE_WIDTH: f64 = 3.0;

/// Pointer cursor disc radius.
pub const CURSOR_RADIUS: f64 = 4.0;
/// Pointer cursor outline stroke width.
pub const CURSOR_STROKE_WIDTH: f64 = 2.0;

/// Logo width as a fraction of the surface width (standard and list styles).
pub const LOGO_WIDTH_RATIO: f64 = 0.9;
/// Logo height in the absolute style.
pub const ABSOLUTE_LOGO_HEIGHT: f64 = 32.0;

/// Left indent of the list body.
pub const LIST_BODY_INDENT: f64 = 48.0;
/// Multiline floating text line height.
pub const FLOATING_LINE_HEIGHT: f64 = 18.0;

/// Delay before re-rendering when an asset is registered but not yet loaded.
pub const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Family name of the glyph icon font.
pub const ICON_FONT: &str = "fluent";

/// Previous-item chevron.
pub const GLYPH_PREV: char = '\u{EDD5}';
/// Next-item chevron.
pub const GLYPH_NEXT: char = '\u{EDD6}';
/// Cancel button glyph.
pub const GLYPH_CANCEL: char = '\u{EA39}';
/// Confirm button glyph.
pub const GLYPH_CONFIRM: char = '\u{E930}';
/// Full rating star.
pub const GLYPH_STAR_FULL: char = '\u{E00A}';
/// Half rating star.
pub const GLYPH_STAR_HALF: char = '\u{F0E7}';
/// Empty rating star.
pub const GLYPH_STAR_EMPTY: char = '\u{E1CE}';
