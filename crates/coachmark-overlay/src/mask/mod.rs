#![forbid(unsafe_code)]

//! Spotlight mask generation.
//!
//! A mask is one path with two sub-paths: the full canvas rectangle, then
//! the cutout around the highlighted region. Filled with the even-odd rule,
//! the cutout renders as a hole in the backdrop. No layer compositing is
//! involved.
//!
//! The cutout sub-path comes from an [`OutlineStrategy`]. The default,
//! [`RoundedOutline`], draws a rounded rectangle or a circle; callers can
//! plug in any other shape (closures implement the trait) and the
//! generator emits their output unmodified after the background.
//!
//! # Invariants
//!
//! 1. The first sub-path is always exactly `M0,0H{w}V{h}H0V0Z`.
//! 2. The fill rule is always [`FillRule::EvenOdd`].
//! 3. No coordinate is rounded.

pub mod opaque;
pub mod outline;

use std::fmt;

use coachmark_core::geometry::{CanvasSize, Vec2};
use tracing::trace;

use outline::{Num, circle_outline, effective_radius, rounded_rect_outline};

pub use opaque::frame_rects;

/// Per-step styling of the cutout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MaskStyle {
    /// Corner radius for rectangular cutouts.
    pub border_radius: f64,
    /// Force a circular cutout regardless of `border_radius`.
    pub is_circle: bool,
}

impl MaskStyle {
    /// Rectangular cutout with the given corner radius.
    #[must_use]
    pub const fn rounded(border_radius: f64) -> Self {
        Self {
            border_radius,
            is_circle: false,
        }
    }

    /// Circular cutout.
    #[must_use]
    pub const fn circle() -> Self {
        Self {
            border_radius: 0.0,
            is_circle: true,
        }
    }
}

/// How overlapping sub-paths are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Points enclosed an odd number of times are filled.
    #[default]
    EvenOdd,
}

impl FillRule {
    /// SVG `fill-rule` attribute value.
    #[must_use]
    pub const fn as_svg(self) -> &'static str {
        match self {
            Self::EvenOdd => "evenodd",
        }
    }
}

/// A complete mask: path data plus the fill rule that turns the cutout
/// into a hole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskShape {
    /// SVG path data.
    pub d: String,
    pub fill_rule: FillRule,
}

impl fmt::Display for MaskShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.d)
    }
}

/// Builds the cutout sub-path for a highlighted region.
///
/// The returned string is appended verbatim after the canvas background and
/// must be a closed sub-path starting with an absolute move.
pub trait OutlineStrategy {
    fn outline(&self, size: Vec2, position: Vec2, canvas: CanvasSize, style: &MaskStyle) -> String;
}

impl<F> OutlineStrategy for F
where
    F: Fn(Vec2, Vec2, CanvasSize, &MaskStyle) -> String,
{
    fn outline(&self, size: Vec2, position: Vec2, canvas: CanvasSize, style: &MaskStyle) -> String {
        self(size, position, canvas, style)
    }
}

/// Rounded rectangle, or circle when [`MaskStyle::is_circle`] is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundedOutline;

impl OutlineStrategy for RoundedOutline {
    fn outline(&self, size: Vec2, position: Vec2, _canvas: CanvasSize, style: &MaskStyle) -> String {
        let radius = effective_radius(size, style.border_radius, style.is_circle);
        let body = if style.is_circle {
            circle_outline(radius)
        } else {
            rounded_rect_outline(size, radius)
        };
        format!("M{},{}{body}Z", Num(position.x), Num(position.y + radius))
    }
}

/// Mask generator with a pluggable cutout outline.
pub struct MaskPathGenerator {
    strategy: Box<dyn OutlineStrategy>,
}

impl fmt::Debug for MaskPathGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaskPathGenerator").finish_non_exhaustive()
    }
}

impl Default for MaskPathGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MaskPathGenerator {
    /// Generator using [`RoundedOutline`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_strategy(RoundedOutline)
    }

    /// Generator using a caller-supplied outline.
    #[must_use]
    pub fn with_strategy(strategy: impl OutlineStrategy + 'static) -> Self {
        Self {
            strategy: Box::new(strategy),
        }
    }

    /// Build the mask for a cutout of `size` at `position`.
    #[must_use]
    pub fn build(&self, size: Vec2, position: Vec2, canvas: CanvasSize, style: &MaskStyle) -> MaskShape {
        let mut d = background(canvas);
        d.push_str(&self.strategy.outline(size, position, canvas, style));
        trace!(len = d.len(), "mask built");
        MaskShape {
            d,
            fill_rule: FillRule::EvenOdd,
        }
    }
}

/// Build a mask with the default [`RoundedOutline`].
#[must_use]
pub fn build_mask(size: Vec2, position: Vec2, canvas: CanvasSize, style: &MaskStyle) -> MaskShape {
    let mut d = background(canvas);
    d.push_str(&RoundedOutline.outline(size, position, canvas, style));
    MaskShape {
        d,
        fill_rule: FillRule::EvenOdd,
    }
}

fn background(canvas: CanvasSize) -> String {
    format!("M0,0H{}V{}H0V0Z", Num(canvas.width), Num(canvas.height))
}
