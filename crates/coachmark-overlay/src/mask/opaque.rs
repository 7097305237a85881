#![forbid(unsafe_code)]

//! Four-band backdrop for surfaces without vector paths.
//!
//! The cutout is left uncovered by four plain rectangles: a full-width band
//! above it, a full-width band below it, and two bands beside it spanning
//! its height. Corners are never rounded.

use coachmark_core::geometry::{CanvasSize, Rect, Vec2};

/// Bands covering everything except the cutout, in the order
/// top, bottom, left, right.
///
/// Extents are clamped to be non-negative, so a cutout hanging off the
/// canvas produces empty bands rather than inverted ones.
#[must_use]
pub fn frame_rects(size: Vec2, position: Vec2, canvas: CanvasSize) -> [Rect; 4] {
    let cut_bottom = position.y + size.y;
    let cut_right = position.x + size.x;
    let band_height = size.y.max(0.0);

    [
        Rect::new(0.0, 0.0, canvas.width, position.y.max(0.0)),
        Rect::new(
            0.0,
            cut_bottom,
            canvas.width,
            (canvas.height - cut_bottom).max(0.0),
        ),
        Rect::new(0.0, position.y, position.x.max(0.0), band_height),
        Rect::new(
            cut_right,
            position.y,
            (canvas.width - cut_right).max(0.0),
            band_height,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_surround_cutout() {
        let [top, bottom, left, right] = frame_rects(
            Vec2::new(100.0, 40.0),
            Vec2::new(50.0, 500.0),
            CanvasSize::new(800.0, 600.0),
        );
        assert_eq!(top, Rect::new(0.0, 0.0, 800.0, 500.0));
        assert_eq!(bottom, Rect::new(0.0, 540.0, 800.0, 60.0));
        assert_eq!(left, Rect::new(0.0, 500.0, 50.0, 40.0));
        assert_eq!(right, Rect::new(150.0, 500.0, 650.0, 40.0));
    }

    #[test]
    fn bands_cover_canvas_area_minus_cutout() {
        let canvas = CanvasSize::new(320.0, 480.0);
        let bands = frame_rects(Vec2::new(60.0, 30.0), Vec2::new(20.0, 100.0), canvas);
        let covered: f64 = bands.iter().map(|r| r.width * r.height).sum();
        assert_eq!(covered, 320.0 * 480.0 - 60.0 * 30.0);
    }

    #[test]
    fn off_canvas_cutout_gives_empty_bands() {
        let bands = frame_rects(
            Vec2::new(50.0, 50.0),
            Vec2::new(300.0, 460.0),
            CanvasSize::new(320.0, 480.0),
        );
        assert_eq!(bands[1].height, 0.0);
        assert_eq!(bands[3].width, 0.0);
        assert!(bands.iter().all(|r| r.width >= 0.0 && r.height >= 0.0));
    }
}
