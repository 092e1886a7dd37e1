//! Placement geometry for tour overlays
//!
//! Pure functions that turn a target's on-screen bounds into positions for the
//! tooltip, the spotlight cut-out, help badges and progress dots. Renderers
//! resolve targets to a [`Rect`]; nothing here knows how.

use crate::tour::Placement;

/// Gap between the target and the tooltip
pub const TOOLTIP_OFFSET: f32 = 20.0;

/// Spotlight extends this far beyond the target on every side
pub const SPOTLIGHT_PADDING: f32 = 8.0;

/// Help badge sits this far inside the target's top-right corner
pub const BADGE_INSET: f32 = 8.0;

/// Axis-aligned bounds in screen coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Grow by `amount` on every side
    pub fn inflate(&self, amount: f32) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }
}

/// Tooltip anchor point plus the shift to apply, as a fraction of the
/// tooltip's own width and height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipAnchor {
    pub x: f32,
    pub y: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl TooltipAnchor {
    /// Top-left corner once the tooltip size is known
    pub fn resolve(&self, width: f32, height: f32) -> (f32, f32) {
        (
            self.x + self.translate_x * width,
            self.y + self.translate_y * height,
        )
    }
}

/// Edge of the tooltip that carries the pointer arrow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowEdge {
    Top,
    Bottom,
    Right,
}

/// Progress dot state for a step indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotState {
    Done,
    Current,
    Upcoming,
}

/// Where to put the tooltip for `target`.
///
/// `Right` renders below the target like `Bottom`, which keeps wide media
/// tooltips on screen next to a side navigation.
pub fn tooltip_anchor(target: Rect, placement: Placement) -> TooltipAnchor {
    let (x, y, translate_x, translate_y) = match placement {
        Placement::Top => (target.center_x(), target.top() - TOOLTIP_OFFSET, -0.5, -1.0),
        Placement::Bottom | Placement::Right => {
            (target.center_x(), target.bottom() + TOOLTIP_OFFSET, -0.5, 0.0)
        }
        Placement::Left => (target.left() - TOOLTIP_OFFSET, target.center_y(), -1.0, -0.5),
        Placement::BottomLeft => (target.left(), target.bottom() + TOOLTIP_OFFSET, 0.0, 0.0),
        Placement::BottomRight => (target.right(), target.bottom() + TOOLTIP_OFFSET, -1.0, 0.0),
    };

    TooltipAnchor {
        x,
        y,
        translate_x,
        translate_y,
    }
}

/// Which tooltip edge points back at the target
pub fn arrow_edge(placement: Placement) -> ArrowEdge {
    match placement {
        Placement::Top => ArrowEdge::Bottom,
        Placement::Left => ArrowEdge::Right,
        Placement::Bottom | Placement::Right | Placement::BottomLeft | Placement::BottomRight => {
            ArrowEdge::Top
        }
    }
}

/// Cut-out in the dimmed backdrop around `target`
pub fn spotlight(target: Rect) -> Rect {
    target.inflate(SPOTLIGHT_PADDING)
}

/// Help badge position: near the top-right corner of `target`
pub fn help_badge(target: Rect) -> (f32, f32) {
    (target.right() - BADGE_INSET, target.top() - BADGE_INSET)
}

/// One dot per step, relative to the current index
pub fn progress_dots(step_index: usize, total: usize) -> Vec<DotState> {
    (0..total)
        .map(|i| match i.cmp(&step_index) {
            std::cmp::Ordering::Less => DotState::Done,
            std::cmp::Ordering::Equal => DotState::Current,
            std::cmp::Ordering::Greater => DotState::Upcoming,
        })
        .collect()
}

/// Whether the action button finishes the flow rather than advancing it
pub fn is_final_step(step_index: usize, total: usize) -> bool {
    total > 0 && step_index + 1 >= total
}
