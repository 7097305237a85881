#![forbid(unsafe_code)]

//! Tooltip, arrow, and step-badge placement around a highlighted region.
//!
//! The tooltip always spans the canvas width minus margins; only its
//! vertical anchor moves. It goes on whichever side of the target has more
//! room, measured from the target's center. The arrow sits between the
//! target and the tooltip, and the step badge hugs the target's top-left
//! corner (or top-right when the left one would be off-canvas).
//!
//! # Invariants
//!
//! 1. Placement is a pure function: identical inputs give identical results.
//! 2. The tooltip and the arrow carry exactly one vertical anchor each.
//! 3. The tooltip anchor is within `[0, canvas.height]`; its left edge and
//!    width are within `[0, canvas.width]`.
//! 4. The badge left offset is within `[0, canvas.width - STEP_NUMBER_DIAMETER]`
//!    (or exactly 0 when the canvas is narrower than the badge).
//!
//! # Failure Modes
//!
//! - Off-canvas or zero-size targets never fail. The arrow and badge top
//!   follow the target wherever it is.

use coachmark_core::geometry::{CanvasSize, Rect, Vec2};
use tracing::debug;

/// Gap between the target, the tooltip, and the canvas edges.
pub const MARGIN: f64 = 13.0;
/// Half the arrow's base.
pub const ARROW_SIZE: f64 = 6.0;
/// Radius of the step-number badge.
pub const STEP_NUMBER_RADIUS: f64 = 14.0;
/// Diameter of the step-number badge.
pub const STEP_NUMBER_DIAMETER: f64 = 2.0 * STEP_NUMBER_RADIUS;

/// Status bar that may cover the top of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct StatusBarInset {
    /// Status bar height in canvas units.
    pub height: f64,
    /// The canvas already excludes the status bar.
    pub visible_in_canvas: bool,
    /// The platform draws the status bar over the canvas.
    pub overlaps: bool,
}

impl StatusBarInset {
    /// No status bar.
    pub const NONE: Self = Self {
        height: 0.0,
        visible_in_canvas: false,
        overlaps: false,
    };

    /// Amount to subtract from target tops.
    #[must_use]
    pub fn offset(&self) -> f64 {
        if self.overlaps && !self.visible_in_canvas {
            self.height
        } else {
            0.0
        }
    }
}

/// Which side of the target the tooltip goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalSide {
    Top,
    Bottom,
}

/// Which half of the canvas the target leans away from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalSide {
    Left,
    Right,
}

/// A vertical offset measured from either the top or the bottom edge of
/// the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerticalAnchor {
    /// Distance from the canvas top to the element's top edge.
    Top(f64),
    /// Distance from the canvas bottom to the element's bottom edge.
    Bottom(f64),
}

impl VerticalAnchor {
    #[must_use]
    pub fn top(self) -> Option<f64> {
        match self {
            Self::Top(v) => Some(v),
            Self::Bottom(_) => None,
        }
    }

    #[must_use]
    pub fn bottom(self) -> Option<f64> {
        match self {
            Self::Bottom(v) => Some(v),
            Self::Top(_) => None,
        }
    }

    /// The offset, whichever edge it is measured from.
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Top(v) | Self::Bottom(v) => v,
        }
    }
}

/// The tooltip box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipBox {
    pub anchor: VerticalAnchor,
    pub left: f64,
    pub width: f64,
}

/// Which border of the arrow is painted, which decides the way it points.
///
/// `Bottom` draws an upward-pointing arrow (tooltip below the target),
/// `Top` a downward-pointing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowColorSide {
    Top,
    Bottom,
}

/// The arrow joining the tooltip to the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowPlacement {
    pub anchor: VerticalAnchor,
    pub left: f64,
    pub color_side: ArrowColorSide,
}

/// Top-left corner of the step-number badge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgePlacement {
    pub left: f64,
    pub top: f64,
}

impl BadgePlacement {
    #[must_use]
    pub const fn as_vec2(self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }
}

impl From<Vec2> for BadgePlacement {
    fn from(v: Vec2) -> Self {
        Self { left: v.x, top: v.y }
    }
}

/// Where the highlight animates to: the target's size, and its top-left
/// corner floored and clamped to the canvas origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightTarget {
    pub size: Vec2,
    pub position: Vec2,
}

/// Everything derived from one step's target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementResult {
    pub tooltip: TooltipBox,
    pub arrow: ArrowPlacement,
    pub step_number: BadgePlacement,
    pub vertical: VerticalSide,
    pub horizontal: HorizontalSide,
    /// The target after the status-bar adjustment.
    pub rect: Rect,
    pub is_circle: bool,
    pub highlight: HighlightTarget,
}

/// Place the tooltip, arrow, and badge for `rect` on `canvas`.
///
/// `rect` is in canvas coordinates before the status-bar adjustment;
/// `status_bar_offset` is subtracted from its top (see
/// [`StatusBarInset::offset`]).
#[must_use]
pub fn compute_placement(
    rect: Rect,
    canvas: CanvasSize,
    current_step_index: usize,
    circle_step_indices: &[usize],
    status_bar_offset: f64,
) -> PlacementResult {
    let rect = rect.offset_y(-status_bar_offset);
    let is_circle = circle_step_indices.contains(&current_step_index);
    let center = rect.center();

    let to_top = center.y;
    let to_bottom = (center.y - canvas.height).abs();
    let to_left = center.x;
    let to_right = (center.x - canvas.width).abs();

    let vertical = if to_bottom > to_top {
        VerticalSide::Bottom
    } else {
        VerticalSide::Top
    };
    let horizontal = if to_left > to_right {
        HorizontalSide::Left
    } else {
        HorizontalSide::Right
    };

    let tooltip_left = (2.0 * MARGIN).min(canvas.width.max(0.0));
    let tooltip_width = (canvas.width - 4.0 * MARGIN).max(0.0);
    let clamp_v = |v: f64| v.clamp(0.0, canvas.height.max(0.0));

    let (tooltip_anchor, arrow_anchor, color_side) = match vertical {
        VerticalSide::Bottom => {
            let top = clamp_v(rect.bottom() + MARGIN);
            (
                VerticalAnchor::Top(top),
                VerticalAnchor::Top(top - 2.0 * ARROW_SIZE),
                ArrowColorSide::Bottom,
            )
        }
        VerticalSide::Top => {
            let bottom = clamp_v(canvas.height - (rect.top() - MARGIN));
            (
                VerticalAnchor::Bottom(bottom),
                VerticalAnchor::Bottom(bottom - 2.0 * ARROW_SIZE),
                ArrowColorSide::Top,
            )
        }
    };

    let arrow_left = if is_circle {
        rect.left() + rect.width / 2.0 - MARGIN + 2.0
    } else {
        match horizontal {
            HorizontalSide::Left => rect.left() + MARGIN,
            HorizontalSide::Right => tooltip_left + MARGIN,
        }
    };

    let step_number = BadgePlacement {
        left: badge_left(&rect, canvas.width),
        top: rect.top() - STEP_NUMBER_RADIUS,
    };

    let highlight = HighlightTarget {
        size: rect.size(),
        position: Vec2::new(rect.left().max(0.0).floor(), rect.top().max(0.0).floor()),
    };

    debug!(
        ?vertical,
        ?horizontal,
        is_circle,
        step = current_step_index,
        "placement computed"
    );

    PlacementResult {
        tooltip: TooltipBox {
            anchor: tooltip_anchor,
            left: tooltip_left,
            width: tooltip_width,
        },
        arrow: ArrowPlacement {
            anchor: arrow_anchor,
            left: arrow_left,
            color_side,
        },
        step_number,
        vertical,
        horizontal,
        rect,
        is_circle,
        highlight,
    }
}

fn badge_left(rect: &Rect, canvas_width: f64) -> f64 {
    let max_left = (canvas_width - STEP_NUMBER_DIAMETER).max(0.0);
    let mut left = rect.left() - STEP_NUMBER_RADIUS;
    if left < 0.0 {
        left = rect.right() - STEP_NUMBER_RADIUS;
        if left > max_left {
            left = max_left;
        }
    }
    left.clamp(0.0, max_left)
}
