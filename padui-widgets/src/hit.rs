//! Pointer hit-testing over frame geometry.

use padui_core::vg::kurbo::Rect;

use crate::geometry::FrameLayout;

/// Built-in actions of the list style's auxiliary buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Step the carousel to the previous option, wrapping at the front.
    PrevItem,
    /// Step the carousel to the next option, wrapping at the back.
    NextItem,
    /// Fire the selection handler with no tag.
    Cancel,
    /// Fire the selection handler with the current option's tag.
    Confirm,
}

/// What activating a hit region does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    /// Activate the option at this index.
    Option(usize),
    /// Run a built-in action.
    Action(MenuAction),
}

/// The pointer-containment region of one item.
#[derive(Debug, Clone, PartialEq)]
pub enum Bounds {
    /// A full-width horizontal band; only the pointer's y coordinate
    /// matters. Used by stacked items.
    Band {
        /// Top edge, exclusive.
        top: f64,
        /// Bottom edge, exclusive.
        bottom: f64,
    },
    /// An axis-aligned box with exclusive edges. Used by floating items.
    Box(Rect),
    /// Not hit-testable.
    None,
}

impl Bounds {
    fn contains(&self, x: f64, y: f64) -> bool {
        match self {
            Bounds::Band { top, bottom } => y > *top && y < *bottom,
            Bounds::Box(rect) => x > rect.x0 && x < rect.x1 && y > rect.y0 && y < rect.y1,
            Bounds::None => false,
        }
    }
}

/// Outcome of hit-testing one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HitResult {
    /// The winning target, if the pointer intersects any.
    pub target: Option<HitTarget>,
    /// Whether the pointer sits in the sub-footer's hot band.
    pub sub_footer: bool,
}

/// Test the pointer against a laid-out frame.
///
/// Items are evaluated in render order and the last containing item wins,
/// so overlapping regions resolve to the one painted on top. All edge
/// comparisons are strict; a pointer exactly on an edge misses. The no-hover
/// sentinel `(-1, -1)` naturally misses everything.
pub fn hit_test(frame: &FrameLayout, x: f64, y: f64) -> HitResult {
    let mut target = None;

    for item in &frame.items {
        let Some(candidate) = &item.target else {
            continue;
        };

        if item.bounds.contains(x, y) {
            target = Some(candidate.clone());
        }
    }

    let sub_footer = frame.sub_footer_hot_top.is_some_and(|top| y > top);

    HitResult { target, sub_footer }
}
