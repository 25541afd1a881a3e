// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text rendering using Parley for proper text layout and glyph mapping

use std::borrow::Cow;

use parley::fontique::{Collection, CollectionOptions};
use parley::style::FontStack;
use parley::{Alignment, FontContext, Layout, LayoutContext, StyleProperty};
use vello::kurbo::{Affine, Stroke};
use vello::peniko::{Brush, Fill};
use vello::Scene;

use crate::text::TextMeasure;

/// How a glyph run is painted.
enum GlyphStyle {
    Fill,
    Stroke(f64),
}

/// Text rendering context that manages font and layout contexts.
///
/// One context should be shared between measurement and painting so the
/// widths the layout stage computes match the glyphs the paint stage emits.
pub struct TextRenderContext {
    font_cx: FontContext,
    layout_cx: LayoutContext,
}

impl TextRenderContext {
    /// Create a new text rendering context with system fonts loaded.
    pub fn new() -> Self {
        let font_cx = FontContext {
            collection: Collection::new(CollectionOptions {
                system_fonts: true,
                ..Default::default()
            }),
            source_cache: Default::default(),
        };

        Self {
            font_cx,
            layout_cx: LayoutContext::new(),
        }
    }

    /// Lay out and shape a family once so its metrics are resident.
    ///
    /// Icon fonts historically rendered with stale metrics on their first
    /// paint; running this once at startup replaces the old scheduled
    /// re-render workaround.
    pub fn warm_font(&mut self, family: &str) {
        let _ = self.measure_width("\u{E00A}", Some(family), 16.0);
        log::debug!("warmed font metrics for family '{family}'");
    }

    /// Paint a single filled run of text at the given transform.
    pub fn fill_run(
        &mut self,
        scene: &mut Scene,
        text: &str,
        family: Option<&str>,
        font_size: f32,
        brush: &Brush,
        transform: Affine,
    ) {
        self.draw_run(scene, text, family, font_size, brush, transform, GlyphStyle::Fill);
    }

    /// Paint a single stroked (outline) run of text at the given transform.
    pub fn stroke_run(
        &mut self,
        scene: &mut Scene,
        text: &str,
        family: Option<&str>,
        font_size: f32,
        width: f64,
        brush: &Brush,
        transform: Affine,
    ) {
        self.draw_run(
            scene,
            text,
            family,
            font_size,
            brush,
            transform,
            GlyphStyle::Stroke(width),
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_run(
        &mut self,
        scene: &mut Scene,
        text: &str,
        family: Option<&str>,
        font_size: f32,
        brush: &Brush,
        transform: Affine,
        style: GlyphStyle,
    ) {
        if text.is_empty() {
            return;
        }

        let display_scale = 1.0;
        let mut builder = self
            .layout_cx
            .ranged_builder(&mut self.font_cx, text, display_scale, true);

        builder.push_default(StyleProperty::FontSize(font_size));
        if let Some(family) = family {
            builder.push_default(StyleProperty::FontStack(FontStack::Source(Cow::Borrowed(
                family,
            ))));
        }

        let mut layout: Layout<[u8; 4]> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, Alignment::Start, Default::default());

        for line in layout.lines() {
            for item in line.items() {
                let parley::PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };

                let mut x = glyph_run.offset();
                let y = glyph_run.baseline();
                let run = glyph_run.run();
                let font = run.font();
                let run_font_size = run.font_size();
                let synthesis = run.synthesis();
                let glyph_xform = synthesis
                    .skew()
                    .map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0));
                let coords = run.normalized_coords();

                let glyphs: Vec<_> = glyph_run.glyphs().collect();
                if glyphs.is_empty() {
                    continue;
                }

                let builder = scene
                    .draw_glyphs(font)
                    .brush(brush)
                    .hint(true)
                    .transform(transform)
                    .glyph_transform(glyph_xform)
                    .font_size(run_font_size)
                    .normalized_coords(coords);

                let glyphs = glyphs.into_iter().map(|glyph| {
                    let gx = x + glyph.x;
                    let gy = y - glyph.y;
                    x += glyph.advance;
                    vello::Glyph {
                        id: glyph.id as _,
                        x: gx,
                        y: gy,
                    }
                });

                match style {
                    GlyphStyle::Fill => builder.draw(Fill::NonZero, glyphs),
                    GlyphStyle::Stroke(width) => builder.draw(&Stroke::new(width), glyphs),
                }
            }
        }
    }

    /// Measure the width of text using Parley's layout system.
    pub fn measure_text_width(&self, text: &str, family: Option<&str>, font_size: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }

        // Temporary contexts so measurement can take `&self`.
        let mut temp_layout_cx = LayoutContext::<[u8; 4]>::new();
        let mut temp_font_cx = FontContext {
            collection: self.font_cx.collection.clone(),
            source_cache: Default::default(),
        };

        let display_scale = 1.0;
        let mut builder = temp_layout_cx.ranged_builder(&mut temp_font_cx, text, display_scale, true);

        builder.push_default(StyleProperty::FontSize(font_size));
        if let Some(family) = family {
            builder.push_default(StyleProperty::FontStack(FontStack::Source(Cow::Borrowed(
                family,
            ))));
        }

        let mut layout = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, Alignment::Start, Default::default());

        let mut total_width = 0.0;
        for line in layout.lines() {
            for item in line.items() {
                let parley::PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };

                for glyph in glyph_run.glyphs() {
                    total_width += glyph.advance;
                }
            }
        }

        total_width
    }
}

impl TextMeasure for TextRenderContext {
    fn measure_width(&self, text: &str, family: Option<&str>, font_size: f32) -> f32 {
        self.measure_text_width(text, family, font_size)
    }
}

impl Default for TextRenderContext {
    fn default() -> Self {
        Self::new()
    }
}
