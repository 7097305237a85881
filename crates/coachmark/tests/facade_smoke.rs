use coachmark::prelude::*;
use coachmark::{PlacementResult, VerticalSide, compute_placement};

struct Counter(std::rc::Rc<std::cell::Cell<usize>>);

impl MaskSurface for Counter {
    fn set_mask(&mut self, _mask: &OverlayMask) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn prelude_runs_a_two_step_tour() {
    let scheduler = FrameScheduler::new();
    let count = std::rc::Rc::new(std::cell::Cell::new(0));
    let overlay = TourOverlay::new(OverlayConfig::default(), scheduler.clone(), Counter(count.clone()));
    overlay.handle_layout(360.0, 640.0);

    pollster::block_on(overlay.show_step(StepTarget::new(0, Rect::new(20.0, 40.0, 100.0, 30.0))))
        .expect("first step");
    assert_eq!(count.get(), 1);

    let shown = pollster::block_on(overlay.show_step(StepTarget::new(1, Rect::new(200.0, 560.0, 120.0, 40.0))))
        .expect("second step");
    while !scheduler.is_idle() {
        scheduler.run_frame(std::time::Duration::from_millis(16));
    }
    assert!(shown.highlight.is_finished());
    assert!(count.get() > 2);
    assert_eq!(shown.placement.vertical, VerticalSide::Top);
}

#[test]
fn crate_modules_are_reachable() {
    let direct: PlacementResult = compute_placement(
        Rect::new(0.0, 0.0, 10.0, 10.0),
        CanvasSize::new(100.0, 100.0),
        0,
        &[],
        0.0,
    );
    let via_module = coachmark::overlay::placement::compute_placement(
        Rect::new(0.0, 0.0, 10.0, 10.0),
        coachmark::core::geometry::CanvasSize::new(100.0, 100.0),
        0,
        &[],
        0.0,
    );
    assert_eq!(direct, via_module);
}
