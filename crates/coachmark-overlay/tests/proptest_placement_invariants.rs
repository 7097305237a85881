//! Property-based invariant tests for tooltip and badge placement.
//!
//! 1. Placement is idempotent
//! 2. Vertical side is Bottom iff the center is closer to the top; ties go to Top
//! 3. Horizontal side is Left iff the center is farther from the left edge
//! 4. Tooltip anchor, left edge, and width stay within the canvas
//! 5. Tooltip and arrow are anchored to the same edge, opposite the arrow color
//! 6. Badge left offset is within [0, width - STEP_NUMBER_DIAMETER]
//! 7. The highlight target is the adjusted rect, floored and clamped at the origin
//! 8. No panics on arbitrary (including off-canvas and degenerate) targets

use coachmark_core::geometry::{CanvasSize, Rect};
use coachmark_overlay::placement::{
    ArrowColorSide, HorizontalSide, STEP_NUMBER_DIAMETER, VerticalAnchor, VerticalSide,
    compute_placement,
};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn canvas_strategy() -> impl Strategy<Value = CanvasSize> {
    (1.0f64..2400.0, 1.0f64..2400.0).prop_map(|(w, h)| CanvasSize::new(w, h))
}

/// Targets anywhere near the canvas, including partly or fully outside it.
fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-500.0f64..2500.0, -500.0f64..2500.0, 0.0f64..800.0, 0.0f64..800.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn circle_steps_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..8, 0..4)
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn placement_is_idempotent(
        rect in rect_strategy(),
        canvas in canvas_strategy(),
        step in 0usize..8,
        circles in circle_steps_strategy(),
        inset in 0.0f64..40.0,
    ) {
        let a = compute_placement(rect, canvas, step, &circles, inset);
        let b = compute_placement(rect, canvas, step, &circles, inset);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn side_selection_follows_distances(
        rect in rect_strategy(),
        canvas in canvas_strategy(),
        inset in 0.0f64..40.0,
    ) {
        let p = compute_placement(rect, canvas, 0, &[], inset);
        let center = p.rect.center();
        let to_top = center.y;
        let to_bottom = (center.y - canvas.height).abs();
        let to_left = center.x;
        let to_right = (center.x - canvas.width).abs();

        prop_assert_eq!(p.vertical == VerticalSide::Bottom, to_bottom > to_top);
        prop_assert_eq!(p.horizontal == HorizontalSide::Left, to_left > to_right);
    }

    #[test]
    fn tooltip_stays_within_canvas(
        rect in rect_strategy(),
        canvas in canvas_strategy(),
    ) {
        let p = compute_placement(rect, canvas, 0, &[], 0.0);
        let anchor = p.tooltip.anchor.value();
        prop_assert!((0.0..=canvas.height).contains(&anchor), "anchor {} outside [0, {}]", anchor, canvas.height);
        prop_assert!(p.tooltip.left >= 0.0 && p.tooltip.left <= canvas.width);
        prop_assert!(p.tooltip.width >= 0.0 && p.tooltip.width <= canvas.width);
    }

    #[test]
    fn anchors_are_exclusive_and_consistent(
        rect in rect_strategy(),
        canvas in canvas_strategy(),
    ) {
        let p = compute_placement(rect, canvas, 0, &[], 0.0);
        match (p.tooltip.anchor, p.arrow.anchor) {
            (VerticalAnchor::Top(t), VerticalAnchor::Top(a)) => {
                prop_assert_eq!(p.vertical, VerticalSide::Bottom);
                prop_assert_eq!(p.arrow.color_side, ArrowColorSide::Bottom);
                prop_assert_eq!(a, t - 12.0);
            }
            (VerticalAnchor::Bottom(t), VerticalAnchor::Bottom(a)) => {
                prop_assert_eq!(p.vertical, VerticalSide::Top);
                prop_assert_eq!(p.arrow.color_side, ArrowColorSide::Top);
                prop_assert_eq!(a, t - 12.0);
            }
            (tooltip, arrow) => {
                prop_assert!(false, "mismatched anchors: {:?} vs {:?}", tooltip, arrow);
            }
        }
        prop_assert!(p.tooltip.anchor.top().is_some() != p.tooltip.anchor.bottom().is_some());
    }

    #[test]
    fn badge_stays_within_canvas(
        rect in rect_strategy(),
        canvas in canvas_strategy(),
    ) {
        let p = compute_placement(rect, canvas, 0, &[], 0.0);
        let max_left = (canvas.width - STEP_NUMBER_DIAMETER).max(0.0);
        prop_assert!(
            p.step_number.left >= 0.0 && p.step_number.left <= max_left,
            "badge left {} outside [0, {}]",
            p.step_number.left,
            max_left
        );
    }

    #[test]
    fn highlight_target_tracks_adjusted_rect(
        rect in rect_strategy(),
        canvas in canvas_strategy(),
        inset in 0.0f64..40.0,
    ) {
        let p = compute_placement(rect, canvas, 0, &[], inset);
        prop_assert_eq!(p.rect.y, rect.y - inset);
        prop_assert_eq!(p.highlight.size.x, rect.width);
        prop_assert_eq!(p.highlight.size.y, rect.height);
        prop_assert_eq!(p.highlight.position.x, p.rect.x.max(0.0).floor());
        prop_assert_eq!(p.highlight.position.y, p.rect.y.max(0.0).floor());
    }

    #[test]
    fn circle_flag_follows_step_list(
        step in 0usize..8,
        circles in circle_steps_strategy(),
    ) {
        let p = compute_placement(
            Rect::new(10.0, 10.0, 40.0, 40.0),
            CanvasSize::new(400.0, 400.0),
            step,
            &circles,
            0.0,
        );
        prop_assert_eq!(p.is_circle, circles.contains(&step));
    }
}
