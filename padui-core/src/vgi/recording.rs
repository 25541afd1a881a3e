use vello::kurbo::{Affine, BezPath, Point, Rect};
use vello::peniko::{Brush, Color};

use crate::assets::Bitmap;
use crate::text::{FixedMeasure, TextMeasure};
use crate::vgi::Graphics;

/// One recorded drawing operation.
///
/// Brushes are captured as their solid color where possible; image and
/// gradient brushes record as `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// The surface was cleared.
    Clear,
    /// A filled rectangle.
    FillRect {
        /// Target rectangle.
        rect: Rect,
        /// Solid brush color, if solid.
        color: Option<Color>,
    },
    /// A stroked rectangle.
    StrokeRect {
        /// Target rectangle.
        rect: Rect,
        /// Stroke width.
        width: f64,
        /// Solid brush color, if solid.
        color: Option<Color>,
    },
    /// A filled rounded rectangle.
    FillRoundedRect {
        /// Target rectangle.
        rect: Rect,
        /// Corner radius.
        radius: f64,
        /// Solid brush color, if solid.
        color: Option<Color>,
    },
    /// A filled circle.
    FillCircle {
        /// Center point.
        center: Point,
        /// Radius.
        radius: f64,
        /// Solid brush color, if solid.
        color: Option<Color>,
    },
    /// A stroked circle.
    StrokeCircle {
        /// Center point.
        center: Point,
        /// Radius.
        radius: f64,
        /// Stroke width.
        width: f64,
        /// Solid brush color, if solid.
        color: Option<Color>,
    },
    /// A filled text run.
    FillText {
        /// The text painted.
        text: String,
        /// Font family, if overridden.
        family: Option<String>,
        /// Font size in pixels.
        font_size: f32,
        /// Top-left origin.
        origin: Point,
        /// Solid brush color, if solid.
        color: Option<Color>,
    },
    /// A stroked text run.
    StrokeText {
        /// The text painted.
        text: String,
        /// Font family, if overridden.
        family: Option<String>,
        /// Font size in pixels.
        font_size: f32,
        /// Top-left origin.
        origin: Point,
        /// Stroke width.
        width: f64,
        /// Solid brush color, if solid.
        color: Option<Color>,
    },
    /// A bitmap blit.
    DrawBitmap {
        /// Source bitmap size.
        size: (u32, u32),
        /// Destination rectangle.
        dst: Rect,
    },
    /// A layer push with the given alpha.
    PushLayer {
        /// Composite alpha of the layer.
        alpha: f32,
    },
    /// A layer pop.
    PopLayer,
}

fn brush_color(brush: &Brush) -> Option<Color> {
    match brush {
        Brush::Solid(color) => Some((*color).into()),
        _ => None,
    }
}

/// A [Graphics] backend that records operations instead of rasterizing.
///
/// Measurement uses [FixedMeasure], so layout driven by this backend is
/// fully deterministic without any fonts installed.
#[derive(Default)]
pub struct RecordingGraphics {
    ops: Vec<Op>,
    measure: FixedMeasure,
}

impl RecordingGraphics {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All operations recorded since the last [Graphics::clear].
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// All recorded text fills, in paint order.
    pub fn filled_texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether any recorded op matches the predicate.
    pub fn contains(&self, predicate: impl Fn(&Op) -> bool) -> bool {
        self.ops.iter().any(predicate)
    }
}

impl TextMeasure for RecordingGraphics {
    fn measure_width(&self, text: &str, family: Option<&str>, font_size: f32) -> f32 {
        self.measure.measure_width(text, family, font_size)
    }
}

impl Graphics for RecordingGraphics {
    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(Op::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, brush: &Brush) {
        self.ops.push(Op::FillRect {
            rect,
            color: brush_color(brush),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, width: f64, brush: &Brush) {
        self.ops.push(Op::StrokeRect {
            rect,
            width,
            color: brush_color(brush),
        });
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, brush: &Brush) {
        self.ops.push(Op::FillRoundedRect {
            rect,
            radius,
            color: brush_color(brush),
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, brush: &Brush) {
        self.ops.push(Op::FillCircle {
            center,
            radius,
            color: brush_color(brush),
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, brush: &Brush) {
        self.ops.push(Op::StrokeCircle {
            center,
            radius,
            width,
            color: brush_color(brush),
        });
    }

    fn fill_text(
        &mut self,
        text: &str,
        family: Option<&str>,
        font_size: f32,
        origin: Point,
        brush: &Brush,
    ) {
        self.ops.push(Op::FillText {
            text: text.to_string(),
            family: family.map(str::to_string),
            font_size,
            origin,
            color: brush_color(brush),
        });
    }

    fn stroke_text(
        &mut self,
        text: &str,
        family: Option<&str>,
        font_size: f32,
        origin: Point,
        width: f64,
        brush: &Brush,
    ) {
        self.ops.push(Op::StrokeText {
            text: text.to_string(),
            family: family.map(str::to_string),
            font_size,
            origin,
            width,
            color: brush_color(brush),
        });
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, dst: Rect) {
        self.ops.push(Op::DrawBitmap {
            size: (bitmap.width, bitmap.height),
            dst,
        });
    }

    fn push_layer(&mut self, alpha: f32, _clip: &BezPath, _transform: Affine) {
        self.ops.push(Op::PushLayer { alpha });
    }

    fn pop_layer(&mut self) {
        self.ops.push(Op::PopLayer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vgi::draw_outlined_text;
    use vello::peniko::Color;

    #[test]
    fn test_outlined_text_paints_fill_stroke_fill() {
        let mut recorder = RecordingGraphics::new();
        let fill = Brush::Solid(Color::from_rgb8(255, 255, 255));
        let outline = Brush::Solid(Color::from_rgb8(0, 0, 0));

        draw_outlined_text(
            &mut recorder,
            "Play",
            None,
            16.0,
            Point::new(4.0, 4.0),
            &fill,
            &outline,
            4.0,
        );

        let kinds: Vec<_> = recorder
            .ops()
            .iter()
            .map(|op| match op {
                Op::FillText { .. } => "fill",
                Op::StrokeText { .. } => "stroke",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["fill", "stroke", "fill"]);
    }

    #[test]
    fn test_clear_drops_previous_ops() {
        let mut recorder = RecordingGraphics::new();
        let brush = Brush::Solid(Color::from_rgb8(1, 2, 3));
        recorder.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), &brush);
        recorder.clear();
        assert_eq!(recorder.ops(), &[Op::Clear]);
    }
}
