//! Menu option model.
//!
//! Options are declarative: every field is data fixed before the first
//! render, validated and clamped by the builder. Which fields a render
//! consults depends on the menu style; stacked styles read the
//! title/description/status/progress group, the absolute style reads the
//! text/anchor group.

use padui_core::vg::peniko::Color;

use crate::metrics::{GLYPH_STAR_EMPTY, GLYPH_STAR_FULL, GLYPH_STAR_HALF};

/// Callback attached to a single option, taking precedence over the menu's
/// selection handler. Receives the option's tag.
pub type OptionCallback = Box<dyn FnMut(Option<&str>)>;

/// An icon reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconRef {
    /// A single codepoint from the glyph icon font.
    Glyph(char),
    /// An asset key (path, URL or data reference) resolved through the
    /// asset cache.
    Bitmap(String),
}

/// Horizontal anchor of a floating item, with its offset in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HAnchor {
    /// Offset from the left edge.
    Left(f64),
    /// Offset from the right edge.
    Right(f64),
}

/// Vertical anchor of a floating item, with its offset in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VAnchor {
    /// Offset from the top edge.
    Top(f64),
    /// Offset from the bottom edge.
    Bottom(f64),
}

/// Alignment of a floating item relative to its horizontal anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// The anchor offset is the item's near edge.
    #[default]
    Start,
    /// The item is centered on the anchor offset.
    Center,
}

/// A decorative bitmap placed at an explicit position, in logical pixels.
///
/// Options carrying a placement are pure blits: no text, no hit region.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePlacement {
    /// Asset key of the bitmap.
    pub key: String,
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

/// One menu entry.
pub struct MenuOption {
    /// Opaque selection identifier passed to callbacks. `None` is a valid
    /// tag (the cancel semantics of the list style rely on it).
    pub tag: Option<String>,
    /// Item title (stacked styles and list body).
    pub title: Option<String>,
    /// Word-wrapped description.
    pub description: Option<String>,
    /// Status line.
    pub status: Option<String>,
    /// Status line color override.
    pub status_color: Option<Color>,
    /// Single-line (or multiline) text of a floating item.
    pub text: Option<String>,
    /// Text color override for floating items.
    pub color: Option<Color>,
    /// Icon reference.
    pub icon: Option<IconRef>,
    /// Icon color override for glyph icons.
    pub icon_color: Option<Color>,
    /// Bitmap icon size override, in logical pixels.
    pub icon_size: Option<f64>,
    /// Mask bitmap icons to a circle.
    pub circle_icon: bool,
    /// Compact stacked layout (smaller icon cell).
    pub compact: bool,
    /// Progress percentage in `[0, 100]`.
    pub progress: Option<f32>,
    /// Rating in `[0, 5]`, half-star granularity.
    pub rating: Option<f32>,
    /// User identity line of the list body. Avatar rendering is not
    /// implemented; the text paints and a reminder is logged.
    pub user_card: Option<String>,
    /// Start highlighted (seeds the hit candidate for pad navigation).
    pub highlighted: bool,
    /// Horizontal anchor (floating items).
    pub h_anchor: Option<HAnchor>,
    /// Vertical anchor (floating items).
    pub v_anchor: Option<VAnchor>,
    /// Font size override, in logical pixels.
    pub font_size: Option<f64>,
    /// Composite opacity in `[0, 1]` (floating items).
    pub opacity: f32,
    /// Alignment relative to the horizontal anchor.
    pub align: Align,
    /// Wrap floating text instead of painting a single line.
    pub multiline: bool,
    /// Skip the outline stroke on floating text.
    pub no_stroke: bool,
    /// Explicit bitmap placement; makes the option a pure blit.
    pub image: Option<ImagePlacement>,
    /// Per-option activation callback, taking precedence over the menu's
    /// selection handler.
    pub on_activate: Option<OptionCallback>,
}

impl Default for MenuOption {
    fn default() -> Self {
        Self {
            tag: None,
            title: None,
            description: None,
            status: None,
            status_color: None,
            text: None,
            color: None,
            icon: None,
            icon_color: None,
            icon_size: None,
            circle_icon: false,
            compact: false,
            progress: None,
            rating: None,
            user_card: None,
            highlighted: false,
            h_anchor: None,
            v_anchor: None,
            font_size: None,
            opacity: 1.0,
            align: Align::Start,
            multiline: false,
            no_stroke: false,
            image: None,
            on_activate: None,
        }
    }
}

impl MenuOption {
    /// Create an empty option.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pure-blit image option.
    pub fn image(key: impl Into<String>, left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            image: Some(ImagePlacement {
                key: key.into(),
                left,
                top,
                width,
                height,
            }),
            ..Self::default()
        }
    }

    /// Sets the selection tag and returns the option.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Sets the title and returns the option.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description and returns the option.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the status line and returns the option.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the status color and returns the option.
    pub fn with_status_color(mut self, color: Color) -> Self {
        self.status_color = Some(color);
        self
    }

    /// Sets the floating text and returns the option.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the floating text color and returns the option.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the icon and returns the option.
    pub fn with_icon(mut self, icon: IconRef) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Sets the glyph icon color and returns the option.
    pub fn with_icon_color(mut self, color: Color) -> Self {
        self.icon_color = Some(color);
        self
    }

    /// Sets the bitmap icon size and returns the option.
    pub fn with_icon_size(mut self, size: f64) -> Self {
        self.icon_size = Some(size);
        self
    }

    /// Masks bitmap icons to a circle and returns the option.
    pub fn with_circle_icon(mut self) -> Self {
        self.circle_icon = true;
        self
    }

    /// Enables the compact stacked layout and returns the option.
    pub fn with_compact(mut self) -> Self {
        self.compact = true;
        self
    }

    /// Sets the progress percentage, clamped to `[0, 100]`, and returns the
    /// option.
    pub fn with_progress(mut self, progress: f32) -> Self {
        self.progress = Some(progress.clamp(0.0, 100.0));
        self
    }

    /// Sets the rating, clamped to `[0, 5]`, and returns the option.
    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating.clamp(0.0, 5.0));
        self
    }

    /// Sets the user identity line and returns the option.
    pub fn with_user_card(mut self, user_card: impl Into<String>) -> Self {
        self.user_card = Some(user_card.into());
        self
    }

    /// Starts the option highlighted and returns it.
    pub fn with_highlighted(mut self) -> Self {
        self.highlighted = true;
        self
    }

    /// Sets the horizontal anchor and returns the option.
    pub fn with_h_anchor(mut self, anchor: HAnchor) -> Self {
        self.h_anchor = Some(anchor);
        self
    }

    /// Sets the vertical anchor and returns the option.
    pub fn with_v_anchor(mut self, anchor: VAnchor) -> Self {
        self.v_anchor = Some(anchor);
        self
    }

    /// Sets the font size override and returns the option.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = Some(font_size);
        self
    }

    /// Sets the composite opacity, clamped to `[0, 1]`, and returns the
    /// option.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Sets the anchor alignment and returns the option.
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Enables multiline floating text and returns the option.
    pub fn with_multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    /// Skips the floating text outline and returns the option.
    pub fn with_no_stroke(mut self) -> Self {
        self.no_stroke = true;
        self
    }

    /// Sets the activation callback and returns the option.
    pub fn with_on_activate(mut self, callback: impl FnMut(Option<&str>) + 'static) -> Self {
        self.on_activate = Some(Box::new(callback));
        self
    }
}

/// The five-slot rating row for a rating value.
///
/// Slot `r` (1-based) is full when `rating >= r`, half when
/// `rating >= r - 0.5`, empty otherwise. Every glyph is followed by a space,
/// matching the spacing the row is measured and painted with.
pub fn rating_glyphs(rating: f32) -> String {
    let mut row = String::new();

    for slot in 1..=5 {
        let threshold = slot as f32;

        let glyph = if rating >= threshold {
            GLYPH_STAR_FULL
        } else if rating >= threshold - 0.5 {
            GLYPH_STAR_HALF
        } else {
            GLYPH_STAR_EMPTY
        };

        row.push(glyph);
        row.push(' ');
    }

    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(rating: f32) -> (usize, usize, usize) {
        let row = rating_glyphs(rating);
        let full = row.chars().filter(|c| *c == GLYPH_STAR_FULL).count();
        let half = row.chars().filter(|c| *c == GLYPH_STAR_HALF).count();
        let empty = row.chars().filter(|c| *c == GLYPH_STAR_EMPTY).count();
        (full, half, empty)
    }

    #[test]
    fn test_rating_three_and_a_half() {
        assert_eq!(counts(3.5), (3, 1, 1));
    }

    #[test]
    fn test_rating_extremes() {
        assert_eq!(counts(0.0), (0, 0, 5));
        assert_eq!(counts(5.0), (5, 0, 0));
    }

    #[test]
    fn test_rating_slots_are_ordered_full_to_empty() {
        let row = rating_glyphs(2.5);
        let glyphs: Vec<char> = row.chars().filter(|c| *c != ' ').collect();
        assert_eq!(
            glyphs,
            vec![
                GLYPH_STAR_FULL,
                GLYPH_STAR_FULL,
                GLYPH_STAR_HALF,
                GLYPH_STAR_EMPTY,
                GLYPH_STAR_EMPTY
            ]
        );
    }

    #[test]
    fn test_builder_clamps_ranges() {
        let option = MenuOption::new()
            .with_progress(140.0)
            .with_rating(9.0)
            .with_opacity(2.0);
        assert_eq!(option.progress, Some(100.0));
        assert_eq!(option.rating, Some(5.0));
        assert_eq!(option.opacity, 1.0);
    }
}
