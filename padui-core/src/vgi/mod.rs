//! Vector Graphics Interface abstraction.
//!
//! This module provides an abstraction over rendering backends, allowing the
//! menu renderer to be decoupled from the specific implementation (e.g.
//! Vello). The trait is deliberately shaped around what menu painting needs:
//! rectangles, circles, rounded rectangles, bitmap blits, alpha/clip layers
//! and outlined text.

use vello::kurbo::{Affine, BezPath, Point, Rect, Shape};
use vello::peniko::Brush;

use crate::assets::Bitmap;
use crate::text::TextMeasure;

/// A trait for rendering the menu's 2D primitives.
///
/// Backends also implement [TextMeasure] so the layout stage can measure
/// with the same metrics the paint stage draws with.
pub trait Graphics: TextMeasure {
    /// Reset the surface for a fresh frame.
    fn clear(&mut self);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, brush: &Brush);

    /// Stroke an axis-aligned rectangle.
    fn stroke_rect(&mut self, rect: Rect, width: f64, brush: &Brush);

    /// Fill a rounded rectangle.
    ///
    /// Backends without rounded-rectangle support inherit the plain
    /// rectangle fallback.
    fn fill_rounded_rect(&mut self, rect: Rect, _radius: f64, brush: &Brush) {
        self.fill_rect(rect, brush);
    }

    /// Fill a circle.
    fn fill_circle(&mut self, center: Point, radius: f64, brush: &Brush);

    /// Stroke a circle.
    fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, brush: &Brush);

    /// Paint a single line of text with `origin` at its top-left corner.
    fn fill_text(
        &mut self,
        text: &str,
        family: Option<&str>,
        font_size: f32,
        origin: Point,
        brush: &Brush,
    );

    /// Stroke the outline of a single line of text.
    fn stroke_text(
        &mut self,
        text: &str,
        family: Option<&str>,
        font_size: f32,
        origin: Point,
        width: f64,
        brush: &Brush,
    );

    /// Blit a bitmap scaled into `dst`.
    fn draw_bitmap(&mut self, bitmap: &Bitmap, dst: Rect);

    /// Push a layer clipped to `clip` and composited at `alpha`.
    fn push_layer(&mut self, alpha: f32, clip: &BezPath, transform: Affine);

    /// Pop the most recent layer.
    fn pop_layer(&mut self);

    /// Access the underlying Scene, for hosts that composite it onward.
    /// Returns None if the backend has no Scene.
    fn as_scene_mut(&mut self) -> Option<&mut vello::Scene> {
        None
    }
}

/// Helper function to convert a shape to BezPath for use with layer clips.
pub fn shape_to_path(shape: &impl Shape) -> BezPath {
    shape.to_path(0.1)
}

/// Paint text in the menu's outlined style.
///
/// The paint sequence is fill, stroke, fill: the second fill restores the
/// glyph interior over the stroke's inward half, giving the heavier outlined
/// look the menus use everywhere.
#[allow(clippy::too_many_arguments)]
pub fn draw_outlined_text(
    graphics: &mut dyn Graphics,
    text: &str,
    family: Option<&str>,
    font_size: f32,
    origin: Point,
    fill: &Brush,
    outline: &Brush,
    stroke_width: f64,
) {
    graphics.fill_text(text, family, font_size, origin, fill);
    graphics.stroke_text(text, family, font_size, origin, stroke_width, outline);
    graphics.fill_text(text, family, font_size, origin, fill);
}

/// A default graphics implementation using Vello.
pub mod vello_vg;

/// A recording backend for headless tests and paint debugging.
pub mod recording;

pub use recording::RecordingGraphics;
pub use vello_vg::VelloGraphics;
