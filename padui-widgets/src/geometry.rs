//! The layout stage of the frame pipeline.
//!
//! Layout is a pure function of the menu configuration, the option list,
//! the carousel index, a text measurer and an asset-cache snapshot. It
//! produces every rectangle and text line the paint stage will draw, the
//! hit regions the hit-test stage will consult, and the asset bookkeeping
//! the menu acts on afterwards (keys to request, whether a retry is due,
//! whether the frame is deferred). Nothing in here draws or mutates shared
//! state.

use padui_core::assets::{AssetCache, AssetStatus};
use padui_core::text::{wrap_text, TextMeasure};
use padui_core::vg::kurbo::{Point, Rect};
use padui_core::vg::peniko::Color;
use padui_theme::palette::MenuPalette;

use crate::config::{MenuConfig, MenuStyle};
use crate::hit::{Bounds, HitTarget, MenuAction};
use crate::metrics::{
    ABSOLUTE_LOGO_HEIGHT, COMPACT_ICON_SIZE, DESCRIPTION_FONT_SIZE, FLOATING_FONT_SIZE,
    FLOATING_LINE_HEIGHT, FOOTER_BOTTOM_OFFSET, FOOTER_FONT_SIZE, FRAME_PADDING, GLYPH_CANCEL,
    GLYPH_CONFIRM, GLYPH_NEXT, GLYPH_PREV, ICON_SIZE, ITEM_FONT_SIZE, ITEM_SPACING,
    LIST_BODY_INDENT, LIST_DETAIL_FONT_SIZE, LIST_FONT_SIZE, LOGO_WIDTH_RATIO, PROGRESS_HEIGHT, SECTION_GAP,
    STATUS_FONT_SIZE, SUB_FOOTER_BOTTOM_OFFSET, SUB_FOOTER_FONT_SIZE, SUB_FOOTER_HOT_BAND,
    TITLE_FONT_SIZE, TITLE_STYLE_FONT_SIZE,
};
use crate::option::{rating_glyphs, Align, HAnchor, IconRef, ImagePlacement, MenuOption, VAnchor};

/// One positioned line of text, ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// The text to paint.
    pub text: String,
    /// Top-left origin in device pixels.
    pub origin: Point,
    /// Font size in device pixels.
    pub font_size: f32,
    /// Fill color.
    pub color: Color,
    /// Whether the line uses the glyph icon font instead of the menu font.
    pub icon_font: bool,
    /// Paint with the accent color when the item is the hit candidate.
    pub accent_on_hit: bool,
}

/// The title band at the top of standard and list frames.
#[derive(Debug, Clone, PartialEq)]
pub enum TitleBand {
    /// A loaded logo bitmap, scaled into `rect`.
    Logo {
        /// Asset key of the bitmap.
        key: String,
        /// Destination rectangle.
        rect: Rect,
    },
    /// The plain title text, accent colored and centered.
    Text(TextLine),
}

/// A laid-out icon.
#[derive(Debug, Clone, PartialEq)]
pub enum IconLayout {
    /// A glyph from the icon font, painted outlined like text.
    Glyph {
        /// The glyph as a string.
        glyph: String,
        /// Top-left origin in device pixels.
        origin: Point,
        /// Font size in device pixels.
        font_size: f32,
        /// Fill color.
        color: Color,
    },
    /// A bitmap blit, optionally masked to a circle.
    Bitmap {
        /// Asset key of the bitmap.
        key: String,
        /// Destination rectangle.
        rect: Rect,
        /// Mask to an inscribed circle.
        circle: bool,
    },
}

/// A laid-out progress bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBar {
    /// The filled portion.
    pub fill: Rect,
    /// The full-width outline.
    pub outline: Rect,
    /// Fill color (the accent).
    pub color: Color,
    /// Outline stroke width.
    pub stroke_width: f64,
}

/// A stacked item of the menu and title styles.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedItem {
    /// Hover highlight rectangle and corner radius, menu style only.
    pub highlight: Option<(Rect, f64)>,
    /// Icon in the left cell.
    pub icon: Option<IconLayout>,
    /// Title, description and status lines in paint order.
    pub lines: Vec<TextLine>,
    /// Progress bar.
    pub progress: Option<ProgressBar>,
}

/// A free-floating, edge-anchored item.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingItem {
    /// Icon, already positioned.
    pub icon: Option<IconLayout>,
    /// Color the glyph icon with the accent when the item is the candidate.
    pub icon_accent_on_hit: bool,
    /// Grow and fade the bitmap icon when the item is the candidate
    /// (icon-only items).
    pub grow_icon: bool,
    /// Text lines, already wrapped for multiline items.
    pub lines: Vec<TextLine>,
    /// Skip the outline stroke on the text.
    pub no_stroke: bool,
    /// Composite opacity.
    pub opacity: f32,
}

/// A decorative bitmap blit.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageItem {
    /// Asset key of the bitmap.
    pub key: String,
    /// Destination rectangle.
    pub rect: Rect,
}

/// Style-specific content of one laid-out item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    /// A stacked item.
    Stacked(StackedItem),
    /// A floating item.
    Floating(FloatingItem),
    /// A decorative image.
    Image(ImageItem),
}

/// One laid-out item: its activation target, hit region and paint content.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemGeometry {
    /// What activating the item does. `None` means not hit-testable.
    pub target: Option<HitTarget>,
    /// The pointer-containment region.
    pub bounds: Bounds,
    /// The paint content.
    pub kind: ItemKind,
}

/// The complete geometry of one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameLayout {
    /// Surface width in device pixels.
    pub width: f64,
    /// Surface height in device pixels.
    pub height: f64,
    /// Scale factor, for stroke widths derived at paint time.
    pub scale: f64,
    /// Menu font family.
    pub family: Option<String>,
    /// Title band.
    pub title: Option<TitleBand>,
    /// Items in render order (also hit-test tie-break order).
    pub items: Vec<ItemGeometry>,
    /// List body lines, not hit-testable.
    pub body: Vec<TextLine>,
    /// Footer line.
    pub footer: Option<TextLine>,
    /// Sub-footer line.
    pub sub_footer: Option<TextLine>,
    /// Top edge of the sub-footer hot band, when it is active.
    pub sub_footer_hot_top: Option<f64>,
    /// Asset keys referenced for the first time; the menu requests them.
    pub requests: Vec<String>,
    /// An asset is registered but not loaded; the menu schedules one
    /// delayed re-render as a fallback for a missed completion.
    pub needs_retry: bool,
    /// Layout stopped early waiting for the title band's asset.
    pub deferred: bool,
}

/// Read-only inputs of the layout stage.
pub struct LayoutInput<'a> {
    /// The menu configuration.
    pub config: &'a MenuConfig,
    /// The resolved palette.
    pub palette: &'a MenuPalette,
    /// The option list.
    pub options: &'a [MenuOption],
    /// The carousel index (list style).
    pub list_index: usize,
    /// Whether a sub-footer action handler is installed.
    pub has_sub_footer_action: bool,
}

/// Lay out one frame.
pub fn layout_frame(
    input: &LayoutInput,
    measure: &dyn TextMeasure,
    assets: &AssetCache,
) -> FrameLayout {
    let size = input.config.scaled_size();
    let mut frame = FrameLayout {
        width: size,
        height: size,
        scale: input.config.scale,
        family: input.config.font.clone(),
        ..FrameLayout::default()
    };

    match input.config.style {
        MenuStyle::Menu | MenuStyle::Title => layout_standard(&mut frame, input, measure, assets),
        MenuStyle::Absolute => layout_absolute(&mut frame, input, measure, assets),
        MenuStyle::List => layout_list(&mut frame, input, measure, assets),
    }

    frame
}

/// Title band shared by the standard and list styles: the logo scaled to
/// 90% of the surface width, or the centered accent-colored title text.
///
/// Returns the y cursor below the band, or `None` when layout is deferred
/// on the logo asset.
fn layout_title_band(
    frame: &mut FrameLayout,
    input: &LayoutInput,
    measure: &dyn TextMeasure,
    assets: &AssetCache,
) -> Option<f64> {
    let config = input.config;
    let s = config.scale;
    let padding = FRAME_PADDING * s;
    let mut y = padding;

    if let Some(key) = &config.title_logo {
        let bitmap = match assets.status(key) {
            None => {
                frame.requests.push(key.clone());
                frame.deferred = true;
                return None;
            },
            Some(AssetStatus::Pending) => {
                frame.needs_retry = true;
                frame.deferred = true;
                return None;
            },
            Some(AssetStatus::Loaded) => match assets.bitmap(key) {
                Some(bitmap) => bitmap,
                None => {
                    frame.needs_retry = true;
                    frame.deferred = true;
                    return None;
                },
            },
        };

        let dw = (frame.width * LOGO_WIDTH_RATIO).round();
        let dx = (frame.width / 2.0 - dw / 2.0).round();
        let dh = (f64::from(bitmap.height) * (dw / f64::from(bitmap.width))).round();

        frame.title = Some(TitleBand::Logo {
            key: key.clone(),
            rect: Rect::new(dx, y, dx + dw, y + dh),
        });
        y += dh;
    } else if let Some(title) = &config.title {
        let font_size = (TITLE_FONT_SIZE * s) as f32;
        let width = f64::from(measure.measure_width(title, config.font.as_deref(), font_size));
        let dx = (frame.width / 2.0 - width / 2.0).round();

        frame.title = Some(TitleBand::Text(TextLine {
            text: title.clone(),
            origin: Point::new(dx, y),
            font_size,
            color: input.palette.accent,
            icon_font: false,
            accent_on_hit: false,
        }));
        y += TITLE_FONT_SIZE * s + padding;
    }

    Some(y)
}

fn layout_standard(
    frame: &mut FrameLayout,
    input: &LayoutInput,
    measure: &dyn TextMeasure,
    assets: &AssetCache,
) {
    let s = input.config.scale;

    let Some(mut y) = layout_title_band(frame, input, measure, assets) else {
        return;
    };
    y += ITEM_SPACING * s;

    for (index, option) in input.options.iter().enumerate() {
        let (item, height) = layout_stacked(frame, input, measure, assets, option, y);

        frame.items.push(ItemGeometry {
            target: Some(HitTarget::Option(index)),
            bounds: Bounds::Band {
                top: y,
                bottom: y + height,
            },
            kind: ItemKind::Stacked(item),
        });

        y += height + ITEM_SPACING * s;
    }

    layout_footers(frame, input, measure);
}

/// Lay out one stacked item with `top` as its upper edge. Returns the item
/// and its computed height, which includes the leading inner padding.
fn layout_stacked(
    frame: &mut FrameLayout,
    input: &LayoutInput,
    measure: &dyn TextMeasure,
    assets: &AssetCache,
    option: &MenuOption,
    top: f64,
) -> (StackedItem, f64) {
    let config = input.config;
    let palette = input.palette;
    let s = config.scale;
    let pad = config.item_padding * s;
    let w = frame.width;
    let family = config.font.as_deref();

    let mut item_text_x = pad;
    let mut icon_width = 0.0;
    let mut icon = None;

    // Icons only exist in the menu style; the title style is text-only.
    if config.style == MenuStyle::Menu {
        if let Some(icon_ref) = &option.icon {
            let cell = if option.compact {
                COMPACT_ICON_SIZE
            } else {
                ICON_SIZE
            } * s;

            item_text_x = if option.compact {
                cell + pad * 8.0
            } else {
                cell + pad * 2.0
            };

            match icon_ref {
                IconRef::Glyph(glyph) => {
                    item_text_x += pad * 2.0;
                    let pos = 2.0 * s + pad;

                    icon = Some(IconLayout::Glyph {
                        glyph: glyph.to_string(),
                        origin: Point::new(pos, top + pos),
                        font_size: cell as f32,
                        color: option.icon_color.unwrap_or(palette.text),
                    });
                },
                IconRef::Bitmap(key) => match assets.status(key) {
                    None => frame.requests.push(key.clone()),
                    // Still loading; the completion callback invalidates.
                    Some(AssetStatus::Pending) => {},
                    Some(AssetStatus::Loaded) => {
                        icon_width = cell;
                        icon = Some(IconLayout::Bitmap {
                            key: key.clone(),
                            rect: Rect::new(pad, top + pad, pad + cell, top + pad + cell),
                            circle: option.circle_icon,
                        });
                    },
                },
            }
        }
    }

    let mut item_y = pad;
    let mut lines = Vec::new();
    let wrap_width = (w - (icon_width + pad * 2.0)) as f32;

    if let Some(title) = &option.title {
        let (font_size, x, advance, accent_on_hit) = if config.style == MenuStyle::Title {
            let logical = option.font_size.unwrap_or(TITLE_STYLE_FONT_SIZE);
            let font_size = (logical * s) as f32;
            let width = f64::from(measure.measure_width(title, family, font_size));
            let x = (w / 2.0 - width / 2.0).round();
            (font_size, x, (logical + 2.0) * s, true)
        } else {
            (
                (ITEM_FONT_SIZE * s) as f32,
                item_text_x,
                (ITEM_FONT_SIZE + 2.0) * s,
                false,
            )
        };

        lines.push(TextLine {
            text: title.clone(),
            origin: Point::new(x, top + item_y),
            font_size,
            color: palette.text,
            icon_font: false,
            accent_on_hit,
        });
        item_y += advance + 4.0 * s;
    }

    if let Some(description) = &option.description {
        let font_size = (DESCRIPTION_FONT_SIZE * s) as f32;
        let wrapped = wrap_text(measure, description, family, font_size, wrap_width);

        for (n, line) in wrapped.iter().enumerate() {
            lines.push(TextLine {
                text: line.clone(),
                origin: Point::new(
                    item_text_x,
                    top + item_y + n as f64 * DESCRIPTION_FONT_SIZE * s,
                ),
                font_size,
                color: palette.text,
                icon_font: false,
                accent_on_hit: false,
            });
        }
        item_y += wrapped.len() as f64 * DESCRIPTION_FONT_SIZE * s;
    }

    let mut progress = None;
    if let Some(pct) = option.progress.filter(|p| *p > 0.0) {
        item_y += SECTION_GAP * s;

        let full = w - pad * 2.0;
        let bar_height = PROGRESS_HEIGHT * s;
        let fill_width = full * f64::from(pct) / 100.0;

        progress = Some(ProgressBar {
            fill: Rect::new(pad, top + item_y, pad + fill_width, top + item_y + bar_height),
            outline: Rect::new(pad, top + item_y, pad + full, top + item_y + bar_height),
            color: palette.accent,
            stroke_width: s,
        });
        item_y += PROGRESS_HEIGHT * s;
    }

    if let Some(status) = &option.status {
        item_y += SECTION_GAP * s;

        let font_size = (STATUS_FONT_SIZE * s) as f32;
        let wrapped = wrap_text(measure, status, family, font_size, wrap_width);
        let color = option.status_color.unwrap_or(palette.text);

        for (n, line) in wrapped.iter().enumerate() {
            lines.push(TextLine {
                text: line.clone(),
                origin: Point::new(item_text_x, top + item_y + n as f64 * STATUS_FONT_SIZE * s),
                font_size,
                color,
                icon_font: false,
                accent_on_hit: false,
            });
        }
        item_y += wrapped.len() as f64 * STATUS_FONT_SIZE * s;
    }

    let height = item_y;

    let highlight = (config.style == MenuStyle::Menu).then(|| {
        (
            Rect::new(0.0, top, w, top + height + pad),
            6.0 * config.item_padding * s,
        )
    });

    (
        StackedItem {
            highlight,
            icon,
            lines,
            progress,
        },
        height,
    )
}

fn layout_footers(frame: &mut FrameLayout, input: &LayoutInput, measure: &dyn TextMeasure) {
    let config = input.config;
    let s = config.scale;
    let family = config.font.as_deref();
    let (w, h) = (frame.width, frame.height);

    if let Some(footer) = &config.footer {
        let font_size = (FOOTER_FONT_SIZE * s) as f32;
        let width = f64::from(measure.measure_width(footer, family, font_size));
        let x = (w / 2.0 - width / 2.0).round();

        frame.footer = Some(TextLine {
            text: footer.clone(),
            origin: Point::new(x, h - FOOTER_BOTTOM_OFFSET * s - f64::from(font_size)),
            font_size,
            color: input.palette.text,
            icon_font: false,
            accent_on_hit: false,
        });
    }

    if let Some(sub_footer) = &config.sub_footer {
        let font_size = (SUB_FOOTER_FONT_SIZE * s) as f32;
        let width = f64::from(measure.measure_width(sub_footer, family, font_size));
        let x = (w / 2.0 - width / 2.0).round();

        frame.sub_footer = Some(TextLine {
            text: sub_footer.clone(),
            origin: Point::new(x, h - SUB_FOOTER_BOTTOM_OFFSET * s - f64::from(font_size)),
            font_size,
            color: input.palette.text,
            icon_font: false,
            accent_on_hit: false,
        });

        if input.has_sub_footer_action {
            frame.sub_footer_hot_top = Some(h - SUB_FOOTER_HOT_BAND * s);
        }
    }
}

fn layout_absolute(
    frame: &mut FrameLayout,
    input: &LayoutInput,
    measure: &dyn TextMeasure,
    assets: &AssetCache,
) {
    let config = input.config;
    let s = config.scale;
    let padding = FRAME_PADDING * s;

    if let Some(key) = &config.title_logo {
        match assets.status(key) {
            None => {
                frame.requests.push(key.clone());
                frame.deferred = true;
                return;
            },
            Some(AssetStatus::Pending) => {
                frame.needs_retry = true;
                frame.deferred = true;
                return;
            },
            Some(AssetStatus::Loaded) => {
                if let Some(bitmap) = assets.bitmap(key) {
                    let dh = (ABSOLUTE_LOGO_HEIGHT * s).round();
                    let dw = (f64::from(bitmap.width) * (dh / f64::from(bitmap.height))).round();

                    frame.title = Some(TitleBand::Logo {
                        key: key.clone(),
                        rect: Rect::new(padding, padding, padding + dw, padding + dh),
                    });
                }
            },
        }
    }

    for (index, option) in input.options.iter().enumerate() {
        if let Some(image) = &option.image {
            layout_image(frame, input, assets, image);
            continue;
        }

        let spec = FloatingSpec::from_option(index, option, input.palette);
        layout_floating(frame, input, measure, assets, &spec);
    }
}

fn layout_image(
    frame: &mut FrameLayout,
    input: &LayoutInput,
    assets: &AssetCache,
    image: &ImagePlacement,
) {
    let s = input.config.scale;

    match assets.status(&image.key) {
        None => frame.requests.push(image.key.clone()),
        Some(AssetStatus::Pending) => frame.needs_retry = true,
        Some(AssetStatus::Loaded) => {
            let x = (image.left * s).round();
            let y = (image.top * s).round();
            let w = (image.width * s).round();
            let h = (image.height * s).round();

            frame.items.push(ItemGeometry {
                target: None,
                bounds: Bounds::None,
                kind: ItemKind::Image(ImageItem {
                    key: image.key.clone(),
                    rect: Rect::new(x, y, x + w, y + h),
                }),
            });
        },
    }
}

/// Inputs of one floating item, either borrowed from a [MenuOption] or
/// synthesized for the list style's auxiliary buttons.
struct FloatingSpec<'a> {
    target: Option<HitTarget>,
    icon_accent: bool,
    text: Option<&'a str>,
    icon: Option<&'a IconRef>,
    icon_color: Color,
    icon_size: Option<f64>,
    circle: bool,
    font_size: f64,
    opacity: f32,
    align: Align,
    multiline: bool,
    no_stroke: bool,
    color: Color,
    h_anchor: Option<HAnchor>,
    v_anchor: Option<VAnchor>,
}

impl<'a> FloatingSpec<'a> {
    fn from_option(index: usize, option: &'a MenuOption, palette: &MenuPalette) -> Self {
        let interactive = option.tag.is_some() || option.on_activate.is_some();

        Self {
            target: interactive.then_some(HitTarget::Option(index)),
            icon_accent: option.tag.is_some(),
            text: option.text.as_deref(),
            icon: option.icon.as_ref(),
            icon_color: option.icon_color.unwrap_or(palette.text),
            icon_size: option.icon_size,
            circle: option.circle_icon,
            font_size: option.font_size.unwrap_or(FLOATING_FONT_SIZE),
            opacity: option.opacity,
            align: option.align,
            multiline: option.multiline,
            no_stroke: option.no_stroke,
            color: option.color.unwrap_or(palette.text),
            h_anchor: option.h_anchor,
            v_anchor: option.v_anchor,
        }
    }
}

fn layout_floating(
    frame: &mut FrameLayout,
    input: &LayoutInput,
    measure: &dyn TextMeasure,
    assets: &AssetCache,
    spec: &FloatingSpec,
) {
    let config = input.config;
    let s = config.scale;
    let pad = config.item_padding * s;
    let (w, h) = (frame.width, frame.height);
    let family = config.font.as_deref();
    let device_font = (spec.font_size * s) as f32;

    // Box size from text metrics and/or the icon's fixed allotment.
    let mut width = 0.0;
    let mut height = 0.0;

    if let Some(text) = spec.text {
        width += f64::from(measure.measure_width(text, family, device_font));
        height = 18.0 * s;
    }

    if spec.icon.is_some() {
        width += spec.icon_size.map_or(26.0, |v| v + 7.0) * s;
        height = 22.0 * s;
    }

    let mut dx = 0.0;
    let mut dy = 0.0;

    match spec.h_anchor {
        Some(HAnchor::Left(offset)) => {
            dx = offset * s;
            if spec.align == Align::Center {
                dx -= width / 2.0;
            }
        },
        Some(HAnchor::Right(offset)) => {
            dx = w - (offset * s + width);
            if spec.align == Align::Center {
                dx += width / 2.0;
            }
        },
        None => {},
    }

    match spec.v_anchor {
        Some(VAnchor::Top(offset)) => dy = offset * s,
        Some(VAnchor::Bottom(offset)) => dy = h - (offset * s + height),
        None => {},
    }

    let mut text_x = pad;
    let mut text_y = pad;
    let mut icon = None;
    let mut grow_icon = false;

    if let Some(icon_ref) = spec.icon {
        let inset = (pad + 2.0 * s).round();

        match icon_ref {
            IconRef::Glyph(glyph) => {
                icon = Some(IconLayout::Glyph {
                    glyph: glyph.to_string(),
                    origin: Point::new(dx + inset, dy + inset),
                    font_size: ((spec.font_size + 2.0) * s) as f32,
                    color: spec.icon_color,
                });
                text_x += 26.0 * s;
            },
            IconRef::Bitmap(key) => {
                let base = spec.icon_size.unwrap_or(spec.font_size + 3.0);

                match assets.status(key) {
                    None => frame.requests.push(key.clone()),
                    Some(AssetStatus::Pending) => {},
                    Some(AssetStatus::Loaded) => {
                        let size = base * s;
                        icon = Some(IconLayout::Bitmap {
                            key: key.clone(),
                            rect: Rect::new(dx + inset, dy + inset, dx + inset + size, dy + inset + size),
                            circle: spec.circle,
                        });
                        grow_icon = spec.icon_accent && spec.text.is_none();
                    },
                }
                text_x += (base + 7.0) * s;
            },
        }

        text_y += 4.0 * s;
    }

    let mut lines = Vec::new();
    if let Some(text) = spec.text {
        let origin_x = (dx + text_x).round();
        let origin_y = (dy + text_y).round();

        if spec.multiline {
            let max_width = ((w - text_x * 2.0).floor()) as f32;
            let wrapped = wrap_text(measure, text, family, device_font, max_width);

            for (n, line) in wrapped.iter().enumerate() {
                lines.push(TextLine {
                    text: line.clone(),
                    origin: Point::new(origin_x, origin_y + n as f64 * FLOATING_LINE_HEIGHT * s),
                    font_size: device_font,
                    color: spec.color,
                    icon_font: false,
                    accent_on_hit: true,
                });
            }
        } else {
            lines.push(TextLine {
                text: text.to_string(),
                origin: Point::new(origin_x, origin_y),
                font_size: device_font,
                color: spec.color,
                icon_font: false,
                accent_on_hit: true,
            });
        }
    }

    frame.items.push(ItemGeometry {
        target: spec.target.clone(),
        bounds: Bounds::Box(Rect::new(dx, dy, dx + width, dy + height)),
        kind: ItemKind::Floating(FloatingItem {
            icon,
            icon_accent_on_hit: spec.icon_accent,
            grow_icon,
            lines,
            no_stroke: spec.no_stroke,
            opacity: spec.opacity,
        }),
    });
}

fn layout_list(
    frame: &mut FrameLayout,
    input: &LayoutInput,
    measure: &dyn TextMeasure,
    assets: &AssetCache,
) {
    let config = input.config;
    let palette = input.palette;
    let s = config.scale;
    let family = config.font.as_deref();
    let w = frame.width;

    let Some(mut y) = layout_title_band(frame, input, measure, assets) else {
        return;
    };
    y += config.list_item_padding * s;

    // Logical top of the navigation chevron row, fixed before the body
    // grows downward.
    let nav_top = ((y + 9.0 * s) / s).floor();

    let index = if input.list_index < input.options.len() {
        input.list_index
    } else {
        0
    };

    if let Some(option) = input.options.get(index) {
        let title_x = LIST_BODY_INDENT * s;
        // The list body advances by the title's line height for every
        // section after the description, whatever their font size.
        let advance = (LIST_FONT_SIZE + 2.0) * s;
        let detail_font = (LIST_DETAIL_FONT_SIZE * s) as f32;

        if let Some(title) = &option.title {
            frame.body.push(TextLine {
                text: title.clone(),
                origin: Point::new(title_x, y),
                font_size: (LIST_FONT_SIZE * s) as f32,
                color: palette.text,
                icon_font: false,
                accent_on_hit: false,
            });
            y += advance + 4.0 * s;
        }

        if let Some(description) = &option.description {
            let max_width = (w - (title_x * 2.0 + FRAME_PADDING * s * 2.0)) as f32;
            let wrapped = wrap_text(measure, description, family, detail_font, max_width);

            for (n, line) in wrapped.iter().enumerate() {
                frame.body.push(TextLine {
                    text: line.clone(),
                    origin: Point::new(title_x, y + n as f64 * LIST_DETAIL_FONT_SIZE * s),
                    font_size: detail_font,
                    color: palette.text,
                    icon_font: false,
                    accent_on_hit: false,
                });
            }
            y += wrapped.len() as f64 * LIST_DETAIL_FONT_SIZE * s;
        }

        if let Some(status) = &option.status {
            y += SECTION_GAP * s;

            frame.body.push(TextLine {
                text: status.clone(),
                origin: Point::new(title_x, y),
                font_size: detail_font,
                color: option.status_color.unwrap_or(palette.text),
                icon_font: false,
                accent_on_hit: false,
            });
            y += advance + 4.0 * s;
        }

        if let Some(rating) = option.rating.filter(|r| *r > 0.0) {
            frame.body.push(TextLine {
                text: rating_glyphs(rating),
                origin: Point::new(title_x, y),
                font_size: detail_font,
                color: palette.rating,
                icon_font: true,
                accent_on_hit: false,
            });
            y += advance + 4.0 * s;
        }

        if let Some(user_card) = &option.user_card {
            log::debug!("user card avatar rendering is not implemented; painting text only");
            y += SECTION_GAP * s;

            frame.body.push(TextLine {
                text: user_card.clone(),
                origin: Point::new(title_x, y),
                font_size: detail_font,
                color: palette.text,
                icon_font: false,
                accent_on_hit: false,
            });
        }
    }

    if input.options.len() > 1 {
        let at_front = index == 0;
        let at_back = index == input.options.len() - 1;

        let prev_icon = IconRef::Glyph(GLYPH_PREV);
        let next_icon = IconRef::Glyph(GLYPH_NEXT);
        let cancel_icon = IconRef::Glyph(GLYPH_CANCEL);
        let confirm_icon = IconRef::Glyph(GLYPH_CONFIRM);

        #[allow(clippy::too_many_arguments)]
        fn aux<'a>(
            action: MenuAction,
            icon: &'a IconRef,
            icon_color: Color,
            icon_accent: bool,
            text: Option<&'a str>,
            text_color: Color,
            h_anchor: HAnchor,
            v_anchor: VAnchor,
        ) -> FloatingSpec<'a> {
            FloatingSpec {
                target: Some(HitTarget::Action(action)),
                icon_accent,
                text,
                icon: Some(icon),
                icon_color,
                icon_size: None,
                circle: false,
                font_size: FLOATING_FONT_SIZE,
                opacity: 1.0,
                align: Align::Start,
                multiline: false,
                no_stroke: false,
                color: text_color,
                h_anchor: Some(h_anchor),
                v_anchor: Some(v_anchor),
            }
        }

        let prev_color = if at_front {
            palette.negative
        } else {
            palette.positive
        };
        let next_color = if at_back {
            palette.negative
        } else {
            palette.positive
        };

        layout_floating(
            frame,
            input,
            measure,
            assets,
            &aux(
                MenuAction::PrevItem,
                &prev_icon,
                prev_color,
                true,
                None,
                palette.text,
                HAnchor::Left(12.0),
                VAnchor::Top(nav_top),
            ),
        );
        layout_floating(
            frame,
            input,
            measure,
            assets,
            &aux(
                MenuAction::NextItem,
                &next_icon,
                next_color,
                true,
                None,
                palette.text,
                HAnchor::Right(12.0),
                VAnchor::Top(nav_top),
            ),
        );
        layout_floating(
            frame,
            input,
            measure,
            assets,
            &aux(
                MenuAction::Cancel,
                &cancel_icon,
                palette.negative,
                false,
                Some(&config.cancel_text),
                palette.text,
                HAnchor::Left(12.0),
                VAnchor::Bottom(12.0),
            ),
        );
        layout_floating(
            frame,
            input,
            measure,
            assets,
            &aux(
                MenuAction::Confirm,
                &confirm_icon,
                palette.positive,
                true,
                Some(&config.confirm_text),
                palette.text,
                HAnchor::Right(12.0),
                VAnchor::Bottom(12.0),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MenuConfig;
    use padui_core::assets::{test_bitmap, AssetCache, ManualLoader};
    use padui_core::text::FixedMeasure;
    use std::sync::Arc;

    fn cache() -> (Arc<ManualLoader>, Arc<AssetCache>) {
        let loader = Arc::new(ManualLoader::new());
        let cache = Arc::new(AssetCache::new(loader.clone()));
        (loader, cache)
    }

    fn layout(config: &MenuConfig, options: &[MenuOption], assets: &AssetCache) -> FrameLayout {
        let palette = MenuPalette::default();
        let input = LayoutInput {
            config,
            palette: &palette,
            options,
            list_index: 0,
            has_sub_footer_action: false,
        };
        layout_frame(&input, &FixedMeasure::default(), assets)
    }

    #[test]
    fn test_stacked_items_get_band_bounds_in_order() {
        let (_, assets) = cache();
        let config = MenuConfig::default();
        let options = vec![
            MenuOption::new().with_title("First"),
            MenuOption::new().with_title("Second"),
        ];

        let frame = layout(&config, &options, &assets);

        assert_eq!(frame.items.len(), 2);
        assert_eq!(frame.items[0].target, Some(HitTarget::Option(0)));
        assert_eq!(frame.items[1].target, Some(HitTarget::Option(1)));

        let (Bounds::Band { top: t0, bottom: b0 }, Bounds::Band { top: t1, .. }) =
            (&frame.items[0].bounds, &frame.items[1].bounds)
        else {
            panic!("expected band bounds");
        };
        // Items stack downward with 8px spacing between bands.
        assert_eq!(*t1, *b0 + 8.0);
        assert!(*b0 > *t0);
    }

    #[test]
    fn test_missing_logo_defers_and_requests() {
        let (loader, assets) = cache();
        let config = MenuConfig::default().with_title_logo("logo.png");
        let options = vec![MenuOption::new().with_title("First")];

        let frame = layout(&config, &options, &assets);
        assert!(frame.deferred);
        assert!(!frame.needs_retry);
        assert_eq!(frame.requests, vec!["logo.png".to_string()]);
        assert!(frame.items.is_empty());

        // Once registered but unloaded, layout asks for a retry instead.
        assets.request("logo.png");
        let frame = layout(&config, &options, &assets);
        assert!(frame.deferred);
        assert!(frame.needs_retry);
        assert!(frame.requests.is_empty());

        // Once loaded, the band appears at 90% width and items lay out.
        loader.complete_all(&test_bitmap(100, 50));
        let frame = layout(&config, &options, &assets);
        assert!(!frame.deferred);
        let Some(TitleBand::Logo { rect, .. }) = &frame.title else {
            panic!("expected a logo band");
        };
        assert_eq!(rect.width(), 288.0);
        assert_eq!(rect.height(), 144.0);
        assert_eq!(frame.items.len(), 1);
    }

    #[test]
    fn test_pending_item_icon_is_skipped_without_defer() {
        let (_, assets) = cache();
        let config = MenuConfig::default();
        let options =
            vec![MenuOption::new()
                .with_title("First")
                .with_icon(IconRef::Bitmap("icon.png".to_string()))];

        let frame = layout(&config, &options, &assets);
        assert!(!frame.deferred);
        assert_eq!(frame.requests, vec!["icon.png".to_string()]);

        assets.request("icon.png");
        let frame = layout(&config, &options, &assets);
        assert!(!frame.deferred);
        assert!(!frame.needs_retry);
        assert!(frame.requests.is_empty());

        let ItemKind::Stacked(item) = &frame.items[0].kind else {
            panic!("expected a stacked item");
        };
        assert!(item.icon.is_none());
    }

    #[test]
    fn test_list_aux_items_flank_the_body() {
        let (_, assets) = cache();
        let config = MenuConfig::default().with_style(MenuStyle::List);
        let options = vec![
            MenuOption::new().with_title("One").with_tag("one"),
            MenuOption::new().with_title("Two").with_tag("two"),
        ];

        let frame = layout(&config, &options, &assets);

        let targets: Vec<_> = frame.items.iter().map(|i| i.target.clone()).collect();
        assert_eq!(
            targets,
            vec![
                Some(HitTarget::Action(MenuAction::PrevItem)),
                Some(HitTarget::Action(MenuAction::NextItem)),
                Some(HitTarget::Action(MenuAction::Cancel)),
                Some(HitTarget::Action(MenuAction::Confirm)),
            ]
        );

        // At index 0 the previous chevron is the stop color.
        let (ItemKind::Floating(prev), ItemKind::Floating(next)) =
            (&frame.items[0].kind, &frame.items[1].kind)
        else {
            panic!("expected floating items");
        };
        let (Some(IconLayout::Glyph { color: prev_color, .. }), Some(IconLayout::Glyph { color: next_color, .. })) =
            (&prev.icon, &next.icon)
        else {
            panic!("expected glyph icons");
        };
        assert_eq!(*prev_color, MenuPalette::default().negative);
        assert_eq!(*next_color, MenuPalette::default().positive);
    }

    #[test]
    fn test_single_option_list_has_no_aux_items() {
        let (_, assets) = cache();
        let config = MenuConfig::default().with_style(MenuStyle::List);
        let options = vec![MenuOption::new().with_title("Only")];

        let frame = layout(&config, &options, &assets);
        assert!(frame.items.is_empty());
        assert!(!frame.body.is_empty());
    }

    #[test]
    fn test_floating_anchors_measure_from_edges() {
        let (_, assets) = cache();
        let config = MenuConfig::default().with_style(MenuStyle::Absolute);
        let options = vec![MenuOption::new()
            .with_text("Hi")
            .with_tag("hi")
            .with_h_anchor(HAnchor::Right(10.0))
            .with_v_anchor(VAnchor::Bottom(10.0))];

        let frame = layout(&config, &options, &assets);
        let Bounds::Box(rect) = &frame.items[0].bounds else {
            panic!("expected box bounds");
        };

        // FixedMeasure: "Hi" at font 14 is 2 * 14 * 0.5 = 14px wide, 18px tall.
        assert_eq!(rect.x1, 320.0 - 10.0);
        assert_eq!(rect.width(), 14.0);
        assert_eq!(rect.y1, 320.0 - 10.0);
        assert_eq!(rect.height(), 18.0);
    }

    #[test]
    fn test_untagged_floating_item_is_not_hit_testable() {
        let (_, assets) = cache();
        let config = MenuConfig::default().with_style(MenuStyle::Absolute);
        let options = vec![MenuOption::new()
            .with_text("Label")
            .with_h_anchor(HAnchor::Left(10.0))
            .with_v_anchor(VAnchor::Top(10.0))];

        let frame = layout(&config, &options, &assets);
        assert_eq!(frame.items[0].target, None);
    }

    #[test]
    fn test_sub_footer_hot_band_requires_action() {
        let (_, assets) = cache();
        let config = MenuConfig::default().with_sub_footer("v1.2.3");
        let options = vec![];
        let palette = MenuPalette::default();

        let input = LayoutInput {
            config: &config,
            palette: &palette,
            options: &options,
            list_index: 0,
            has_sub_footer_action: false,
        };
        let frame = layout_frame(&input, &FixedMeasure::default(), &assets);
        assert!(frame.sub_footer.is_some());
        assert_eq!(frame.sub_footer_hot_top, None);

        let input = LayoutInput {
            has_sub_footer_action: true,
            ..input
        };
        let frame = layout_frame(&input, &FixedMeasure::default(), &assets);
        assert_eq!(frame.sub_footer_hot_top, Some(320.0 - 36.0));
    }
}
