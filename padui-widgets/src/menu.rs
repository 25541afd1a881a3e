//! The menu widget itself.
//!
//! [Menu] owns the graphics backend, the configuration, the option list and
//! all pointer state, and turns input mutations into full frame passes:
//! layout, hit test, paint, dispatch. Every externally visible mutation
//! re-renders immediately, so a host only ever forwards events and presents
//! the backend's output.

use std::sync::Arc;

use padui_core::assets::AssetCache;
use padui_core::tasks::{Scheduler, TaskHandle};
use padui_core::update::{Invalidator, Update};
use padui_core::vg::kurbo::Point;
use padui_core::vgi::Graphics;
use padui_theme::palette::MenuPalette;

use crate::config::{MenuConfig, MenuStyle};
use crate::error::MenuError;
use crate::geometry::{layout_frame, LayoutInput};
use crate::hit::{hit_test, HitTarget, MenuAction};
use crate::metrics::{ICON_FONT, ITEM_FONT_SIZE, RETRY_DELAY};
use crate::option::{IconRef, MenuOption};
use crate::paint::{paint_frame, PaintEnv};

/// Shared services a menu renders against.
#[derive(Clone)]
pub struct MenuContext {
    /// The asset cache bitmaps are loaded through.
    pub assets: Arc<AssetCache>,
    /// The scheduler used for deferred re-render retries.
    pub scheduler: Arc<dyn Scheduler>,
}

/// Host callbacks.
///
/// All handlers are optional except that styles which can reach the
/// selection handler require one at construction time.
#[derive(Default)]
pub struct MenuHandlers {
    /// Invoked with the activated option's tag, or `None` for cancel.
    pub on_selection: Option<Box<dyn FnMut(Option<&str>)>>,
    /// Invoked after every completed frame pass.
    pub on_updated: Option<Box<dyn FnMut()>>,
    /// Invoked when a press lands in the sub-footer hot band.
    pub on_sub_footer: Option<Box<dyn FnMut()>>,
    /// Invoked on gamepad confirm. When absent, a pad press activates the
    /// current hit candidate instead.
    pub on_pad_down: Option<Box<dyn FnMut()>>,
}

/// An immediate-mode canvas menu.
pub struct Menu<G: Graphics> {
    graphics: G,
    config: MenuConfig,
    palette: MenuPalette,
    options: Vec<MenuOption>,
    handlers: MenuHandlers,
    ctx: MenuContext,
    invalidator: Arc<Invalidator>,
    hover: (i32, i32),
    pressed: bool,
    suspended: bool,
    candidate: Option<HitTarget>,
    list_index: usize,
    pending_retry: Option<TaskHandle>,
}

/// Whether the style and options can reach the selection handler.
fn requires_selection(style: MenuStyle, options: &[MenuOption]) -> bool {
    match style {
        MenuStyle::Menu | MenuStyle::Title => !options.is_empty(),
        // Single-option lists render no confirm or cancel controls.
        MenuStyle::List => options.len() > 1,
        MenuStyle::Absolute => options
            .iter()
            .any(|o| o.tag.is_some() && o.on_activate.is_none() && o.image.is_none()),
    }
}

fn style_name(style: MenuStyle) -> &'static str {
    match style {
        MenuStyle::Menu => "menu",
        MenuStyle::Title => "title",
        MenuStyle::Absolute => "absolute",
        MenuStyle::List => "list",
    }
}

impl<G: Graphics> Menu<G> {
    /// Build a menu and render its first frame.
    pub fn new(
        graphics: G,
        config: MenuConfig,
        options: Vec<MenuOption>,
        handlers: MenuHandlers,
        ctx: MenuContext,
    ) -> Result<Self, MenuError> {
        if config.size == 0 {
            return Err(MenuError::InvalidSize(config.size));
        }
        if !config.scale.is_finite() || config.scale <= 0.0 {
            return Err(MenuError::InvalidScale(config.scale));
        }

        let palette = MenuPalette::with_accent(&config.theme)?;

        if requires_selection(config.style, &options) && handlers.on_selection.is_none() {
            return Err(MenuError::MissingSelectionHandler {
                style: style_name(config.style),
            });
        }

        // Touch the icon font once up front so glyph measurement is warm
        // before the first frame that needs it.
        let uses_icon_font = config.style == MenuStyle::List
            || options
                .iter()
                .any(|o| matches!(o.icon, Some(IconRef::Glyph(_))) || o.rating.is_some());
        if uses_icon_font {
            let _ = graphics.measure_width("\u{E00A}", Some(ICON_FONT), ITEM_FONT_SIZE as f32);
        }

        let candidate = options
            .iter()
            .rposition(|o| o.highlighted && o.tag.is_some())
            .map(HitTarget::Option);

        let invalidator = Arc::new(Invalidator::new());
        ctx.assets.subscribe(&invalidator);

        let list_index = config.initial_index;
        let mut menu = Self {
            graphics,
            config,
            palette,
            options,
            handlers,
            ctx,
            invalidator,
            hover: (-1, -1),
            pressed: false,
            suspended: false,
            candidate,
            list_index,
            pending_retry: None,
        };
        menu.render();
        Ok(menu)
    }

    /// Run frame passes until the frame settles. A pass may request a
    /// follow-up draw (carousel navigation), so this is bounded rather
    /// than single-shot.
    pub fn render(&mut self) {
        if self.suspended {
            return;
        }
        for _ in 0..3 {
            let update = self.render_pass();
            if !update.contains(Update::DRAW) {
                break;
            }
        }
    }

    fn render_pass(&mut self) -> Update {
        let mut update = Update::empty();

        // An out-of-range carousel index resets to the front, the same
        // fallback layout applies when it reads the index.
        if self.list_index >= self.options.len() {
            self.list_index = 0;
        }

        let input = LayoutInput {
            config: &self.config,
            palette: &self.palette,
            options: &self.options,
            list_index: self.list_index,
            has_sub_footer_action: self.handlers.on_sub_footer.is_some(),
        };
        let frame = layout_frame(&input, &self.graphics, &self.ctx.assets);
        if frame.deferred {
            update |= Update::DEFER;
        }

        for key in &frame.requests {
            self.ctx.assets.request(key);
        }

        if frame.needs_retry {
            let retry_idle = self
                .pending_retry
                .as_ref()
                .is_none_or(TaskHandle::is_finished);
            if retry_idle {
                let invalidator = Arc::clone(&self.invalidator);
                self.pending_retry = Some(self.ctx.scheduler.schedule(
                    RETRY_DELAY,
                    Box::new(move || invalidator.invalidate()),
                ));
            }
        }

        let hit = hit_test(&frame, f64::from(self.hover.0), f64::from(self.hover.1));
        if hit.target.is_some() {
            // The candidate persists until the pointer moves again, so a
            // press anywhere activates the last thing the pointer touched.
            self.candidate = hit.target.clone();
        }

        let env = PaintEnv {
            palette: &self.palette,
            assets: &self.ctx.assets,
            candidate: self.candidate.as_ref(),
            sub_footer_hot: hit.sub_footer,
            hover: Point::new(f64::from(self.hover.0), f64::from(self.hover.1)),
            show_cursor: self.config.show_cursor,
        };
        paint_frame(&mut self.graphics, &frame, &env);

        if self.pressed {
            self.pressed = false;
            update |= self.dispatch(hit.sub_footer);
        }

        if let Some(on_updated) = self.handlers.on_updated.as_mut() {
            on_updated();
        }

        update
    }

    fn dispatch(&mut self, sub_footer_hot: bool) -> Update {
        match self.candidate.clone() {
            Some(HitTarget::Option(index)) => {
                let tag = self.options.get(index).and_then(|o| o.tag.clone());
                if let Some(on_activate) =
                    self.options.get_mut(index).and_then(|o| o.on_activate.as_mut())
                {
                    on_activate(tag.as_deref());
                } else if let Some(on_selection) = self.handlers.on_selection.as_mut() {
                    on_selection(tag.as_deref());
                }
                Update::empty()
            },
            Some(HitTarget::Action(MenuAction::PrevItem)) => {
                if !self.options.is_empty() {
                    self.list_index = self
                        .list_index
                        .checked_sub(1)
                        .unwrap_or(self.options.len() - 1);
                }
                Update::DRAW
            },
            Some(HitTarget::Action(MenuAction::NextItem)) => {
                if !self.options.is_empty() {
                    self.list_index = (self.list_index + 1) % self.options.len();
                }
                Update::DRAW
            },
            Some(HitTarget::Action(MenuAction::Cancel)) => {
                if let Some(on_selection) = self.handlers.on_selection.as_mut() {
                    on_selection(None);
                }
                Update::empty()
            },
            Some(HitTarget::Action(MenuAction::Confirm)) => {
                let tag = self
                    .options
                    .get(self.list_index)
                    .and_then(|o| o.tag.clone());
                if let Some(on_selection) = self.handlers.on_selection.as_mut() {
                    on_selection(tag.as_deref());
                }
                Update::empty()
            },
            None => {
                if sub_footer_hot {
                    if let Some(on_sub_footer) = self.handlers.on_sub_footer.as_mut() {
                        on_sub_footer();
                    }
                }
                Update::empty()
            },
        }
    }

    /// Move the pointer, in device pixels. Clears the hit candidate and
    /// re-renders when the (rounded) position changed.
    pub fn set_hover(&mut self, x: f64, y: f64) {
        let position = (x.round() as i32, y.round() as i32);
        if position == self.hover {
            return;
        }
        self.hover = position;
        self.candidate = None;
        self.render();
    }

    /// Move the pointer, as a fraction of the surface size on each axis.
    pub fn set_hover_ratio(&mut self, rx: f64, ry: f64) {
        let size = self.config.scaled_size();
        self.set_hover(rx * size, ry * size);
    }

    /// Press and release at a position given as surface-size fractions.
    pub fn click_at_ratio(&mut self, rx: f64, ry: f64) {
        self.set_hover_ratio(rx, ry);
        self.press();
    }

    /// Press and release at the pointer's current position, ignoring any
    /// stale candidate from before the last pointer move.
    pub fn click_at_current(&mut self) {
        self.candidate = None;
        self.press();
    }

    /// Press at the current position. The press is consumed by the next
    /// frame pass, which this triggers.
    pub fn press(&mut self) {
        self.pressed = true;
        self.render();
        self.pressed = false;
    }

    /// Release the pointer without dispatching.
    pub fn release(&mut self) {
        self.pressed = false;
    }

    /// Gamepad confirm. Forwards to the host handler when one is set,
    /// otherwise activates the current hit candidate.
    pub fn pad_down(&mut self) {
        if let Some(on_pad_down) = self.handlers.on_pad_down.as_mut() {
            on_pad_down();
        } else {
            self.click_at_current();
        }
    }

    /// Suspend or resume rendering. Resuming re-renders immediately.
    pub fn set_suspended(&mut self, suspended: bool) {
        let was = self.suspended;
        self.suspended = suspended;
        if was && !suspended {
            self.render();
        }
    }

    /// Force the hit candidate, as gamepad focus movement does.
    pub fn set_hit_candidate(&mut self, candidate: Option<HitTarget>) {
        self.candidate = candidate;
        self.render();
    }

    /// Re-render if anything invalidated the surface since the last pass
    /// (asset completions, scheduled retries).
    pub fn pump(&mut self) {
        if self.invalidator.take() {
            self.render();
        }
    }

    /// The current hit candidate.
    pub fn hit_candidate(&self) -> Option<&HitTarget> {
        self.candidate.as_ref()
    }

    /// The current carousel index.
    pub fn list_index(&self) -> usize {
        self.list_index
    }

    /// The invalidator external sources can poke to request a re-render.
    pub fn invalidator(&self) -> &Arc<Invalidator> {
        &self.invalidator
    }

    /// The graphics backend.
    pub fn graphics(&self) -> &G {
        &self.graphics
    }

    /// The graphics backend, mutably. Hosts use this to present the
    /// backend's output.
    pub fn graphics_mut(&mut self) -> &mut G {
        &mut self.graphics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use padui_core::assets::{test_bitmap, AssetCache, ManualLoader};
    use padui_core::tasks::ManualScheduler;
    use padui_core::vgi::recording::RecordingGraphics;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn context() -> (MenuContext, Arc<ManualLoader>, Arc<ManualScheduler>) {
        let loader = Arc::new(ManualLoader::new());
        let scheduler = Arc::new(ManualScheduler::new());
        let ctx = MenuContext {
            assets: Arc::new(AssetCache::new(loader.clone())),
            scheduler: scheduler.clone(),
        };
        (ctx, loader, scheduler)
    }

    fn selection_log() -> (Rc<RefCell<Vec<Option<String>>>>, MenuHandlers) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let handlers = MenuHandlers {
            on_selection: Some(Box::new(move |tag: Option<&str>| {
                sink.borrow_mut().push(tag.map(str::to_owned));
            })),
            ..Default::default()
        };
        (log, handlers)
    }

    fn two_items() -> Vec<MenuOption> {
        vec![
            MenuOption::new().with_title("First").with_tag("first"),
            MenuOption::new().with_title("Second").with_tag("second"),
        ]
    }

    #[test]
    fn test_missing_selection_handler_rejected() {
        let (ctx, _, _) = context();
        let result = Menu::new(
            RecordingGraphics::new(),
            MenuConfig::default(),
            two_items(),
            MenuHandlers::default(),
            ctx,
        );
        assert!(matches!(
            result,
            Err(MenuError::MissingSelectionHandler { style: "menu" })
        ));
    }

    #[test]
    fn test_empty_menu_needs_no_handler() {
        let (ctx, _, _) = context();
        assert!(Menu::new(
            RecordingGraphics::new(),
            MenuConfig::default().with_title("Hello"),
            Vec::new(),
            MenuHandlers::default(),
            ctx,
        )
        .is_ok());
    }

    #[test]
    fn test_click_outside_everything_fires_nothing() {
        let (ctx, _, _) = context();
        let (log, handlers) = selection_log();
        let mut menu = Menu::new(
            RecordingGraphics::new(),
            MenuConfig::default(),
            two_items(),
            handlers,
            ctx,
        )
        .unwrap();

        menu.set_hover(310.0, 310.0);
        menu.press();
        assert!(log.borrow().is_empty());
        assert_eq!(menu.hit_candidate(), None);
    }

    #[test]
    fn test_click_on_item_fires_selection_with_tag() {
        let (ctx, _, _) = context();
        let (log, handlers) = selection_log();
        let mut menu = Menu::new(
            RecordingGraphics::new(),
            MenuConfig::default(),
            two_items(),
            handlers,
            ctx,
        )
        .unwrap();

        // Items span the surface width; the first item's band starts just
        // below the frame padding.
        menu.set_hover(160.0, 30.0);
        assert_eq!(menu.hit_candidate(), Some(&HitTarget::Option(0)));
        menu.press();
        assert_eq!(log.borrow().as_slice(), [Some("first".to_owned())]);
    }

    #[test]
    fn test_option_activate_shadows_selection_handler() {
        let (ctx, _, _) = context();
        let (log, handlers) = selection_log();
        let activated = Rc::new(RefCell::new(Vec::new()));
        let sink = activated.clone();
        let options = vec![MenuOption::new()
            .with_title("Custom")
            .with_tag("custom")
            .with_on_activate(move |tag| {
                sink.borrow_mut().push(tag.map(str::to_owned));
            })];
        let mut menu = Menu::new(
            RecordingGraphics::new(),
            MenuConfig::default(),
            options,
            handlers,
            ctx,
        )
        .unwrap();

        menu.set_hover(160.0, 30.0);
        menu.press();
        assert_eq!(activated.borrow().as_slice(), [Some("custom".to_owned())]);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_list_navigation_wraps_both_directions() {
        let (ctx, _, _) = context();
        let (_, handlers) = selection_log();
        let mut menu = Menu::new(
            RecordingGraphics::new(),
            MenuConfig::default().with_style(MenuStyle::List),
            two_items(),
            handlers,
            ctx,
        )
        .unwrap();

        assert_eq!(menu.list_index(), 0);
        menu.set_hit_candidate(Some(HitTarget::Action(MenuAction::PrevItem)));
        menu.press();
        assert_eq!(menu.list_index(), 1, "prev wraps from the front");
        menu.set_hit_candidate(Some(HitTarget::Action(MenuAction::NextItem)));
        menu.press();
        assert_eq!(menu.list_index(), 0, "next wraps from the back");
    }

    #[test]
    fn test_out_of_range_initial_index_resets_to_front() {
        let (ctx, _, _) = context();
        let (log, handlers) = selection_log();
        let mut config = MenuConfig::default().with_style(MenuStyle::List);
        config.initial_index = 7;
        let mut menu = Menu::new(RecordingGraphics::new(), config, two_items(), handlers, ctx)
            .unwrap();

        assert_eq!(menu.list_index(), 0);
        menu.set_hit_candidate(Some(HitTarget::Action(MenuAction::Confirm)));
        menu.press();
        assert_eq!(log.borrow().as_slice(), [Some("first".to_owned())]);
    }

    #[test]
    fn test_list_confirm_reports_current_tag() {
        let (ctx, _, _) = context();
        let (log, handlers) = selection_log();
        let mut menu = Menu::new(
            RecordingGraphics::new(),
            MenuConfig::default().with_style(MenuStyle::List),
            two_items(),
            handlers,
            ctx,
        )
        .unwrap();

        menu.set_hit_candidate(Some(HitTarget::Action(MenuAction::NextItem)));
        menu.press();
        menu.set_hit_candidate(Some(HitTarget::Action(MenuAction::Confirm)));
        menu.press();
        assert_eq!(log.borrow().as_slice(), [Some("second".to_owned())]);
    }

    #[test]
    fn test_list_cancel_reports_none() {
        let (ctx, _, _) = context();
        let (log, handlers) = selection_log();
        let mut menu = Menu::new(
            RecordingGraphics::new(),
            MenuConfig::default().with_style(MenuStyle::List),
            two_items(),
            handlers,
            ctx,
        )
        .unwrap();

        menu.set_hit_candidate(Some(HitTarget::Action(MenuAction::Cancel)));
        menu.press();
        assert_eq!(log.borrow().as_slice(), [None]);
    }

    #[test]
    fn test_clicking_next_chevron_by_position() {
        let (ctx, _, _) = context();
        let (_, handlers) = selection_log();
        let mut menu = Menu::new(
            RecordingGraphics::new(),
            MenuConfig::default()
                .with_style(MenuStyle::List)
                .with_title("Choose"),
            two_items(),
            handlers,
            ctx,
        )
        .unwrap();

        // The next chevron hugs the right edge at the carousel's title row.
        menu.set_hover(295.0, 115.0);
        assert_eq!(
            menu.hit_candidate(),
            Some(&HitTarget::Action(MenuAction::NextItem))
        );
        menu.press();
        assert_eq!(menu.list_index(), 1);
    }

    #[test]
    fn test_sub_footer_press_fires_handler() {
        let (ctx, _, _) = context();
        let fired = Rc::new(RefCell::new(0));
        let sink = fired.clone();
        let handlers = MenuHandlers {
            on_sub_footer: Some(Box::new(move || *sink.borrow_mut() += 1)),
            ..Default::default()
        };
        let mut menu = Menu::new(
            RecordingGraphics::new(),
            MenuConfig::default().with_sub_footer("build 42"),
            Vec::new(),
            handlers,
            ctx,
        )
        .unwrap();

        menu.set_hover(10.0, 300.0);
        menu.press();
        assert_eq!(*fired.borrow(), 1);
    }

    #[test]
    fn test_pending_asset_schedules_one_retry() {
        let (ctx, loader, scheduler) = context();
        let mut menu = Menu::new(
            RecordingGraphics::new(),
            MenuConfig::default().with_title_logo("logo.png"),
            Vec::new(),
            MenuHandlers::default(),
            ctx,
        )
        .unwrap();

        // The first frame only registers the asset; a retry starts once a
        // later frame finds it still pending.
        assert_eq!(loader.pending_keys(), ["logo.png"]);
        assert_eq!(scheduler.pending(), 0);

        menu.set_hover(5.0, 5.0);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.last_delay(), Some(Duration::from_millis(500)));

        // Further renders do not stack retries while one is in flight.
        menu.set_hover(6.0, 6.0);
        assert_eq!(scheduler.pending(), 1);

        // The retry invalidates, and the pump re-renders against the still
        // pending asset, scheduling the next retry.
        scheduler.run_pending();
        menu.pump();
        assert_eq!(scheduler.pending(), 1);

        loader.complete_all(&test_bitmap(10, 10));
        menu.pump();
        scheduler.run_pending();
        menu.pump();
        assert_eq!(scheduler.pending(), 0, "loaded assets stop the retries");
    }

    #[test]
    fn test_asset_completion_invalidates_surface() {
        let (ctx, loader, _) = context();
        let assets = ctx.assets.clone();
        let menu = Menu::new(
            RecordingGraphics::new(),
            MenuConfig::default().with_title_logo("logo.png"),
            Vec::new(),
            MenuHandlers::default(),
            ctx,
        )
        .unwrap();

        assert!(!menu.invalidator().is_dirty());
        loader.complete_all(&test_bitmap(10, 10));
        assert!(menu.invalidator().is_dirty());
        assert!(assets.bitmap("logo.png").is_some());
    }

    #[test]
    fn test_updated_handler_fires_every_pass() {
        let (ctx, _, _) = context();
        let passes = Rc::new(RefCell::new(0));
        let sink = passes.clone();
        let handlers = MenuHandlers {
            on_updated: Some(Box::new(move || *sink.borrow_mut() += 1)),
            ..Default::default()
        };
        let mut menu = Menu::new(
            RecordingGraphics::new(),
            MenuConfig::default().with_title("T"),
            Vec::new(),
            handlers,
            ctx,
        )
        .unwrap();

        let initial = *passes.borrow();
        assert!(initial >= 1);
        menu.set_hover(10.0, 10.0);
        assert_eq!(*passes.borrow(), initial + 1);
    }

    #[test]
    fn test_suspend_blocks_rendering_until_resume() {
        let (ctx, _, _) = context();
        let passes = Rc::new(RefCell::new(0));
        let sink = passes.clone();
        let handlers = MenuHandlers {
            on_updated: Some(Box::new(move || *sink.borrow_mut() += 1)),
            ..Default::default()
        };
        let mut menu = Menu::new(
            RecordingGraphics::new(),
            MenuConfig::default(),
            Vec::new(),
            handlers,
            ctx,
        )
        .unwrap();

        menu.set_suspended(true);
        let frozen = *passes.borrow();
        menu.set_hover(50.0, 50.0);
        assert_eq!(*passes.borrow(), frozen);
        menu.set_suspended(false);
        assert_eq!(*passes.borrow(), frozen + 1);
    }

    #[test]
    fn test_invalid_size_and_scale_rejected() {
        let (ctx, _, _) = context();
        let mut config = MenuConfig::default();
        config.size = 0;
        assert!(matches!(
            Menu::new(
                RecordingGraphics::new(),
                config,
                Vec::new(),
                MenuHandlers::default(),
                ctx.clone(),
            ),
            Err(MenuError::InvalidSize(0))
        ));

        let mut config = MenuConfig::default();
        config.scale = f64::NAN;
        assert!(matches!(
            Menu::new(
                RecordingGraphics::new(),
                config,
                Vec::new(),
                MenuHandlers::default(),
                ctx,
            ),
            Err(MenuError::InvalidScale(_))
        ));
    }

    #[test]
    fn test_highlighted_option_seeds_candidate() {
        let (ctx, _, _) = context();
        let (log, handlers) = selection_log();
        let options = vec![
            MenuOption::new().with_title("First").with_tag("first"),
            MenuOption::new()
                .with_title("Second")
                .with_tag("second")
                .with_highlighted(),
        ];
        let mut menu = Menu::new(
            RecordingGraphics::new(),
            MenuConfig::default(),
            options,
            handlers,
            ctx,
        )
        .unwrap();

        assert_eq!(menu.hit_candidate(), Some(&HitTarget::Option(1)));
        menu.pad_down();
        // A pad press with no pointer has no candidate to activate.
        assert!(log.borrow().is_empty());
    }
}
