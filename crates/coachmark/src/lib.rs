#![forbid(unsafe_code)]

//! coachmark public facade crate.
//!
//! Re-exports the types a host needs to run a guided tour: the overlay
//! session, its configuration, the mask surface seam, and the geometry it
//! speaks in. The [`prelude`] covers day-to-day usage.
//!
//! ```
//! use coachmark::prelude::*;
//!
//! let scheduler = FrameScheduler::new();
//! let surface = RecordingSurface::new();
//! let overlay = TourOverlay::new(OverlayConfig::default(), scheduler, surface.clone());
//! overlay.handle_layout(800.0, 600.0);
//!
//! let step = StepTarget::new(0, Rect::new(50.0, 500.0, 100.0, 40.0));
//! let shown = pollster::block_on(overlay.show_step(step)).expect("layout reported");
//! assert_eq!(shown.placement.tooltip.left, 26.0);
//! assert_eq!(surface.len(), 1);
//! ```

// --- Core re-exports -------------------------------------------------------

pub use coachmark_core::animation::{Easing, Tween};
pub use coachmark_core::frame::{FrameInfo, FrameScheduler};
pub use coachmark_core::geometry::{CanvasSize, Rect, Vec2};

// --- Overlay re-exports ----------------------------------------------------

pub use coachmark_overlay::config::{ConfigError, OverlayConfig, OverlayKind};
pub use coachmark_overlay::coordinator::{
    AnimationCoordinator, MaskSurface, OverlayMask, RecordingSurface,
};
pub use coachmark_overlay::error::{DegradationAction, OverlayError, Result};
pub use coachmark_overlay::layout::{LayoutChange, LayoutProbe};
pub use coachmark_overlay::mask::{
    FillRule, MaskPathGenerator, MaskShape, MaskStyle, OutlineStrategy, build_mask,
};
pub use coachmark_overlay::motion::{Transition, TransitionOutcome};
pub use coachmark_overlay::overlay::{
    NavigationIntent, OverlayFrame, ShownStep, StepTarget, TourController, TourOverlay,
};
pub use coachmark_overlay::placement::{
    BadgePlacement, HorizontalSide, PlacementResult, StatusBarInset, VerticalAnchor,
    VerticalSide, compute_placement,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CanvasSize, Easing, FrameScheduler, MaskSurface, NavigationIntent, OverlayConfig,
        OverlayError, OverlayMask, RecordingSurface, Rect, Result, StepTarget, TourController,
        TourOverlay, Vec2,
    };

    pub use crate::{core, overlay};
}

pub use coachmark_core as core;
pub use coachmark_overlay as overlay;
