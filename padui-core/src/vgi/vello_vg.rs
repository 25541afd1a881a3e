use std::sync::Arc;

use vello::kurbo::{Affine, BezPath, Circle, Point, Rect, RoundedRect, RoundedRectRadii, Stroke};
use vello::peniko::{Blob, Brush, Fill, ImageAlphaType, ImageBrush, ImageData, ImageFormat, Mix};
use vello::Scene;

use crate::assets::Bitmap;
use crate::text::TextMeasure;
use crate::text_render::TextRenderContext;
use crate::vgi::Graphics;

/// A Vello-based implementation of the [Graphics] trait.
///
/// Owns its [Scene] and a [TextRenderContext]; after a frame the host pulls
/// the scene via [Self::scene_mut] (or [Graphics::as_scene_mut]) and submits
/// it however it likes. No GPU work happens here.
pub struct VelloGraphics {
    scene: Scene,
    text: TextRenderContext,
}

impl VelloGraphics {
    /// Create a backend with a fresh scene and text context.
    pub fn new() -> Self {
        Self::with_text_context(TextRenderContext::new())
    }

    /// Create a backend around an existing text context (e.g. one that was
    /// already warmed for the icon font).
    pub fn with_text_context(text: TextRenderContext) -> Self {
        Self {
            scene: Scene::new(),
            text,
        }
    }

    /// Get a mutable reference to the underlying Scene.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Access the text context, e.g. to warm additional fonts.
    pub fn text_context_mut(&mut self) -> &mut TextRenderContext {
        &mut self.text
    }

    fn image_brush(bitmap: &Bitmap) -> ImageBrush {
        let data: Arc<dyn AsRef<[u8]> + Send + Sync> = bitmap.data.clone();
        ImageBrush::new(ImageData {
            data: Blob::new(data),
            format: ImageFormat::Rgba8,
            alpha_type: ImageAlphaType::Alpha,
            width: bitmap.width,
            height: bitmap.height,
        })
    }
}

impl Default for VelloGraphics {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasure for VelloGraphics {
    fn measure_width(&self, text: &str, family: Option<&str>, font_size: f32) -> f32 {
        self.text.measure_width(text, family, font_size)
    }
}

impl Graphics for VelloGraphics {
    fn clear(&mut self) {
        self.scene.reset();
    }

    fn fill_rect(&mut self, rect: Rect, brush: &Brush) {
        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, brush, None, &rect);
    }

    fn stroke_rect(&mut self, rect: Rect, width: f64, brush: &Brush) {
        self.scene
            .stroke(&Stroke::new(width), Affine::IDENTITY, brush, None, &rect);
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, brush: &Brush) {
        let rounded = RoundedRect::from_rect(rect, RoundedRectRadii::from_single_radius(radius));
        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, brush, None, &rounded);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, brush: &Brush) {
        let circle = Circle::new(center, radius);
        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, brush, None, &circle);
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, brush: &Brush) {
        let circle = Circle::new(center, radius);
        self.scene
            .stroke(&Stroke::new(width), Affine::IDENTITY, brush, None, &circle);
    }

    fn fill_text(
        &mut self,
        text: &str,
        family: Option<&str>,
        font_size: f32,
        origin: Point,
        brush: &Brush,
    ) {
        self.text.fill_run(
            &mut self.scene,
            text,
            family,
            font_size,
            brush,
            Affine::translate((origin.x, origin.y)),
        );
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
        self.text.stroke_run(
            &mut self.scene,
            text,
            family,
            font_size,
            width,
            brush,
            Affine::translate((origin.x, origin.y)),
        );
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, dst: Rect) {
        if bitmap.width == 0 || bitmap.height == 0 {
            return;
        }

        let brush = Self::image_brush(bitmap);
        let transform = Affine::translate((dst.x0, dst.y0))
            * Affine::scale_non_uniform(
                dst.width() / bitmap.width as f64,
                dst.height() / bitmap.height as f64,
            );
        self.scene.draw_image(&brush, transform);
    }

    fn push_layer(&mut self, alpha: f32, clip: &BezPath, transform: Affine) {
        self.scene.push_layer(Mix::Normal, alpha, transform, clip);
    }

    fn pop_layer(&mut self) {
        self.scene.pop_layer();
    }

    fn as_scene_mut(&mut self) -> Option<&mut Scene> {
        Some(&mut self.scene)
    }
}

/// A type alias for the default graphics implementation.
pub type DefaultGraphics = VelloGraphics;
