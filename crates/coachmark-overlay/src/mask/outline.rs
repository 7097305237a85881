#![forbid(unsafe_code)]

//! Cutout outline geometry.
//!
//! Pure functions producing relative SVG path segments for the highlighted
//! region. Every segment starts at the left edge of the cutout, `radius`
//! below its top, and ends back on that edge so the caller can close the
//! sub-path with `Z`.

use std::fmt::{self, Write as _};

use coachmark_core::geometry::Vec2;

/// Corner radius actually used for a cutout of `size`.
///
/// Circles use half the width. Rounded rectangles use `border_radius`,
/// reduced to half the height when it would not fit. The result is always
/// within `[0, min(size.x, size.y) / 2]`; negative sizes (possible while an
/// overshooting easing is mid-flight) yield zero.
#[must_use]
pub fn effective_radius(size: Vec2, border_radius: f64, is_circle: bool) -> f64 {
    let radius = if is_circle {
        size.x / 2.0
    } else if 2.0 * border_radius > size.y {
        size.y / 2.0
    } else {
        border_radius
    };
    let ceiling = size.min_component() / 2.0;
    radius.max(0.0).min(ceiling).max(0.0)
}

/// Quarter-turn relative arc of `radius` towards `(dx, dy)`.
///
/// Signs `(1, -1)`, `(1, 1)`, `(-1, 1)`, `(-1, -1)` trace the top-left,
/// top-right, bottom-right, and bottom-left corners clockwise.
#[must_use]
pub fn corner_arc(dx: f64, dy: f64, radius: f64) -> String {
    let mut out = String::new();
    push_corner(&mut out, dx, dy, radius);
    out
}

/// Full circle of `radius` as two half-circle arcs.
#[must_use]
pub fn circle_outline(radius: f64) -> String {
    let r = Num(radius);
    let d = Num(2.0 * radius);
    let back = Num(-2.0 * radius);
    format!("a{r} {r} 0 1 0 {d} 0a{r} {r} 0 1 0 {back} 0")
}

/// Rounded rectangle of `size` with corner `radius`.
#[must_use]
pub fn rounded_rect_outline(size: Vec2, radius: f64) -> String {
    let across = size.x - 2.0 * radius;
    let down = size.y - 2.0 * radius;

    let mut out = String::with_capacity(128);
    push_corner(&mut out, 1.0, -1.0, radius);
    let _ = write!(out, "h{}", Num(across));
    push_corner(&mut out, 1.0, 1.0, radius);
    let _ = write!(out, "v{}", Num(down));
    push_corner(&mut out, -1.0, 1.0, radius);
    let _ = write!(out, "h{}", Num(-across));
    push_corner(&mut out, -1.0, -1.0, radius);
    out
}

fn push_corner(out: &mut String, dx: f64, dy: f64, radius: f64) {
    let r = Num(radius);
    let _ = write!(out, "a{r} {r} 0 0 1 {} {}", Num(dx * radius), Num(dy * radius));
}

/// Path number formatting: shortest round-trip decimal, never `-0`.
#[derive(Clone, Copy)]
pub(crate) struct Num(pub(crate) f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0.0 {
            f.write_str("0")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
