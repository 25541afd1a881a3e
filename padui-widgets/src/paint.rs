//! The paint stage of the frame pipeline.
//!
//! Drives a [Graphics] backend from a [FrameLayout] and the hit result.
//! The only pointer-dependent decisions made here are cosmetic: accent
//! recoloring of the hit candidate, the hover highlight, the grow-and-fade
//! of icon-only floating items and the sub-footer hot color. Dispatch is
//! the menu's job.

use padui_core::assets::AssetCache;
use padui_core::vg::kurbo::{Affine, Circle, Point, Rect};
use padui_core::vg::peniko::{Brush, Color};
use padui_core::vgi::{draw_outlined_text, shape_to_path, Graphics};
use padui_theme::palette::MenuPalette;

use crate::geometry::{
    FloatingItem, FrameLayout, IconLayout, ItemKind, StackedItem, TextLine, TitleBand,
};
use crate::hit::HitTarget;
use crate::metrics::{
    CURSOR_RADIUS, CURSOR_STROKE_WIDTH, FLOATING_OUTLINE_WIDTH, ICON_FONT, TEXT_OUTLINE_WIDTH,
};

/// Pointer-dependent inputs of the paint stage.
pub struct PaintEnv<'a> {
    /// The resolved palette.
    pub palette: &'a MenuPalette,
    /// The asset cache, for bitmap lookups.
    pub assets: &'a AssetCache,
    /// The persisted hit candidate.
    pub candidate: Option<&'a HitTarget>,
    /// Whether the pointer sits in the sub-footer hot band.
    pub sub_footer_hot: bool,
    /// Pointer position in device pixels (`(-1, -1)` when absent).
    pub hover: Point,
    /// Whether to draw the pointer cursor overlay.
    pub show_cursor: bool,
}

/// Paint one laid-out frame.
pub fn paint_frame(graphics: &mut dyn Graphics, frame: &FrameLayout, env: &PaintEnv) {
    graphics.clear();

    let outline_width = TEXT_OUTLINE_WIDTH * frame.scale;

    match &frame.title {
        Some(TitleBand::Logo { key, rect }) => {
            if let Some(bitmap) = env.assets.bitmap(key) {
                graphics.draw_bitmap(&bitmap, *rect);
            }
        },
        Some(TitleBand::Text(line)) => {
            paint_line(graphics, frame, env, line, false, outline_width, false);
        },
        None => {},
    }

    for item in &frame.items {
        let is_candidate = matches!(
            (&item.target, env.candidate),
            (Some(target), Some(candidate)) if target == candidate
        );

        match &item.kind {
            ItemKind::Stacked(stacked) => {
                paint_stacked(graphics, frame, env, stacked, is_candidate);
            },
            ItemKind::Floating(floating) => {
                paint_floating(graphics, frame, env, floating, is_candidate);
            },
            ItemKind::Image(image) => {
                if let Some(bitmap) = env.assets.bitmap(&image.key) {
                    graphics.draw_bitmap(&bitmap, image.rect);
                }
            },
        }
    }

    for line in &frame.body {
        paint_line(graphics, frame, env, line, false, outline_width, false);
    }

    if let Some(line) = &frame.footer {
        paint_line(graphics, frame, env, line, false, outline_width, false);
    }

    if let Some(line) = &frame.sub_footer {
        let color = if env.sub_footer_hot {
            env.palette.accent
        } else {
            line.color
        };
        draw_outlined_text(
            graphics,
            &line.text,
            frame.family.as_deref(),
            line.font_size,
            line.origin,
            &Brush::Solid(color),
            &Brush::Solid(env.palette.outline),
            outline_width,
        );
    }

    // The cursor overlay paints even over deferred frames.
    if env.show_cursor && env.hover.x > 0.0 && env.hover.y > 0.0 {
        let radius = CURSOR_RADIUS * frame.scale;
        graphics.fill_circle(
            env.hover,
            radius,
            &Brush::Solid(Color::from_rgba8(255, 255, 255, 191)),
        );
        graphics.stroke_circle(
            env.hover,
            radius,
            CURSOR_STROKE_WIDTH * frame.scale,
            &Brush::Solid(Color::from_rgba8(0, 0, 0, 229)),
        );
    }
}

fn paint_line(
    graphics: &mut dyn Graphics,
    frame: &FrameLayout,
    env: &PaintEnv,
    line: &TextLine,
    is_candidate: bool,
    stroke_width: f64,
    no_stroke: bool,
) {
    let family = if line.icon_font {
        Some(ICON_FONT)
    } else {
        frame.family.as_deref()
    };

    let color = if is_candidate && line.accent_on_hit {
        env.palette.accent
    } else {
        line.color
    };
    let fill = Brush::Solid(color);

    if no_stroke {
        graphics.fill_text(&line.text, family, line.font_size, line.origin, &fill);
    } else {
        draw_outlined_text(
            graphics,
            &line.text,
            family,
            line.font_size,
            line.origin,
            &fill,
            &Brush::Solid(env.palette.outline),
            stroke_width,
        );
    }
}

fn paint_glyph(
    graphics: &mut dyn Graphics,
    env: &PaintEnv,
    glyph: &str,
    origin: Point,
    font_size: f32,
    color: Color,
    stroke_width: f64,
) {
    draw_outlined_text(
        graphics,
        glyph,
        Some(ICON_FONT),
        font_size,
        origin,
        &Brush::Solid(color),
        &Brush::Solid(env.palette.outline),
        stroke_width,
    );
}

fn paint_bitmap_icon(
    graphics: &mut dyn Graphics,
    env: &PaintEnv,
    key: &str,
    rect: Rect,
    circle: bool,
    faded: bool,
) {
    let Some(bitmap) = env.assets.bitmap(key) else {
        return;
    };

    if faded {
        graphics.push_layer(0.5, &shape_to_path(&rect), Affine::IDENTITY);
    }
    if circle {
        let mask = Circle::new(rect.center(), rect.width() / 2.0);
        graphics.push_layer(1.0, &shape_to_path(&mask), Affine::IDENTITY);
    }

    graphics.draw_bitmap(&bitmap, rect);

    if circle {
        graphics.pop_layer();
    }
    if faded {
        graphics.pop_layer();
    }
}

fn paint_stacked(
    graphics: &mut dyn Graphics,
    frame: &FrameLayout,
    env: &PaintEnv,
    item: &StackedItem,
    is_candidate: bool,
) {
    if is_candidate {
        if let Some((rect, radius)) = &item.highlight {
            graphics.fill_rounded_rect(*rect, *radius, &Brush::Solid(env.palette.highlight()));
        }
    }

    let outline_width = TEXT_OUTLINE_WIDTH * frame.scale;

    match &item.icon {
        Some(IconLayout::Glyph {
            glyph,
            origin,
            font_size,
            color,
        }) => {
            paint_glyph(graphics, env, glyph, *origin, *font_size, *color, outline_width);
        },
        Some(IconLayout::Bitmap { key, rect, circle }) => {
            paint_bitmap_icon(graphics, env, key, *rect, *circle, false);
        },
        None => {},
    }

    for line in &item.lines {
        paint_line(graphics, frame, env, line, is_candidate, outline_width, false);
    }

    if let Some(bar) = &item.progress {
        graphics.fill_rect(bar.fill, &Brush::Solid(bar.color));
        graphics.stroke_rect(bar.outline, bar.stroke_width, &Brush::Solid(env.palette.outline));
    }
}

fn paint_floating(
    graphics: &mut dyn Graphics,
    frame: &FrameLayout,
    env: &PaintEnv,
    item: &FloatingItem,
    is_candidate: bool,
) {
    let layered = item.opacity < 1.0;
    if layered {
        let surface = Rect::new(0.0, 0.0, frame.width, frame.height);
        graphics.push_layer(item.opacity, &shape_to_path(&surface), Affine::IDENTITY);
    }

    let outline_width = FLOATING_OUTLINE_WIDTH * frame.scale;

    match &item.icon {
        Some(IconLayout::Glyph {
            glyph,
            origin,
            font_size,
            color,
        }) => {
            let color = if is_candidate && item.icon_accent_on_hit {
                env.palette.accent
            } else {
                *color
            };
            paint_glyph(graphics, env, glyph, *origin, *font_size, color, outline_width);
        },
        Some(IconLayout::Bitmap { key, rect, circle }) => {
            // Icon-only items react to the candidate by growing 6 logical
            // pixels around their center and compositing at half alpha.
            let (rect, faded) = if is_candidate && item.grow_icon {
                (rect.inflate(3.0 * frame.scale, 3.0 * frame.scale), true)
            } else {
                (*rect, false)
            };
            paint_bitmap_icon(graphics, env, key, rect, *circle, faded);
        },
        None => {},
    }

    for line in &item.lines {
        paint_line(
            graphics,
            frame,
            env,
            line,
            is_candidate,
            outline_width,
            item.no_stroke,
        );
    }

    if layered {
        graphics.pop_layer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MenuConfig, MenuStyle};
    use crate::geometry::{layout_frame, LayoutInput};
    use crate::option::MenuOption;
    use padui_core::assets::{AssetCache, ManualLoader};
    use padui_core::vgi::recording::{Op, RecordingGraphics};
    use std::sync::Arc;

    fn assets() -> Arc<AssetCache> {
        Arc::new(AssetCache::new(Arc::new(ManualLoader::new())))
    }

    fn frame_for(config: &MenuConfig, options: &[MenuOption], assets: &AssetCache) -> FrameLayout {
        let palette = MenuPalette::default();
        let input = LayoutInput {
            config,
            palette: &palette,
            options,
            list_index: 0,
            has_sub_footer_action: true,
        };
        layout_frame(&input, &RecordingGraphics::new(), assets)
    }

    fn env<'a>(
        palette: &'a MenuPalette,
        assets: &'a AssetCache,
        candidate: Option<&'a HitTarget>,
        hover: Point,
        sub_footer_hot: bool,
    ) -> PaintEnv<'a> {
        PaintEnv {
            palette,
            assets,
            candidate,
            sub_footer_hot,
            hover,
            show_cursor: true,
        }
    }

    #[test]
    fn test_title_text_paints_fill_stroke_fill() {
        let assets = assets();
        let palette = MenuPalette::default();
        let config = MenuConfig::default().with_title("Main Menu");
        let frame = frame_for(&config, &[], &assets);

        let mut recorder = RecordingGraphics::new();
        paint_frame(
            &mut recorder,
            &frame,
            &env(&palette, &assets, None, Point::new(-1.0, -1.0), false),
        );

        assert_eq!(
            recorder.filled_texts(),
            vec!["Main Menu", "Main Menu"],
            "title paints two fills around one stroke"
        );
        assert!(recorder.contains(|op| matches!(op, Op::StrokeText { text, .. } if text == "Main Menu")));
    }

    #[test]
    fn test_highlight_painted_only_for_candidate() {
        let assets = assets();
        let palette = MenuPalette::default();
        let config = MenuConfig::default();
        let options = vec![MenuOption::new().with_title("Item").with_tag("item")];
        let frame = frame_for(&config, &options, &assets);

        let mut recorder = RecordingGraphics::new();
        paint_frame(
            &mut recorder,
            &frame,
            &env(&palette, &assets, None, Point::new(-1.0, -1.0), false),
        );
        assert!(!recorder.contains(|op| matches!(op, Op::FillRoundedRect { .. })));

        let candidate = HitTarget::Option(0);
        let mut recorder = RecordingGraphics::new();
        paint_frame(
            &mut recorder,
            &frame,
            &env(&palette, &assets, Some(&candidate), Point::new(5.0, 25.0), false),
        );
        assert!(recorder.contains(|op| matches!(
            op,
            Op::FillRoundedRect { color: Some(c), .. } if *c == palette.highlight()
        )));
    }

    #[test]
    fn test_cursor_needs_positive_hover() {
        let assets = assets();
        let palette = MenuPalette::default();
        let config = MenuConfig::default();
        let frame = frame_for(&config, &[], &assets);

        let mut recorder = RecordingGraphics::new();
        paint_frame(
            &mut recorder,
            &frame,
            &env(&palette, &assets, None, Point::new(-1.0, -1.0), false),
        );
        assert!(!recorder.contains(|op| matches!(op, Op::FillCircle { .. })));

        let mut recorder = RecordingGraphics::new();
        paint_frame(
            &mut recorder,
            &frame,
            &env(&palette, &assets, None, Point::new(40.0, 40.0), false),
        );
        assert!(recorder.contains(
            |op| matches!(op, Op::FillCircle { center, radius, .. } if *center == Point::new(40.0, 40.0) && *radius == 4.0)
        ));
        assert!(recorder.contains(|op| matches!(op, Op::StrokeCircle { width, .. } if *width == 2.0)));
    }

    #[test]
    fn test_sub_footer_recolors_in_hot_band() {
        let assets = assets();
        let palette = MenuPalette::default();
        let config = MenuConfig::default().with_sub_footer("v2.1");
        let frame = frame_for(&config, &[], &assets);

        let mut recorder = RecordingGraphics::new();
        paint_frame(
            &mut recorder,
            &frame,
            &env(&palette, &assets, None, Point::new(10.0, 310.0), true),
        );
        assert!(recorder.contains(|op| matches!(
            op,
            Op::FillText { text, color: Some(c), .. } if text == "v2.1" && *c == palette.accent
        )));
    }

    #[test]
    fn test_list_style_paints_chevrons_in_icon_font() {
        let assets = assets();
        let palette = MenuPalette::default();
        let config = MenuConfig::default().with_style(MenuStyle::List);
        let options = vec![
            MenuOption::new().with_title("One").with_tag("one"),
            MenuOption::new().with_title("Two").with_tag("two"),
        ];
        let frame = frame_for(&config, &options, &assets);

        let mut recorder = RecordingGraphics::new();
        paint_frame(
            &mut recorder,
            &frame,
            &env(&palette, &assets, None, Point::new(-1.0, -1.0), false),
        );

        assert!(recorder.contains(|op| matches!(
            op,
            Op::FillText { text, family: Some(f), .. }
                if f == ICON_FONT && text.contains('\u{EDD5}')
        )));
        assert!(recorder.contains(|op| matches!(
            op,
            Op::FillText { text, .. } if text == "Confirm"
        )));
    }
}
