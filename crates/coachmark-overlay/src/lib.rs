#![forbid(unsafe_code)]

//! Overlay: spotlight masks, tooltip placement, and step transitions.
//!
//! # Role in coachmark
//! `coachmark-overlay` is the geometry and placement engine of a guided
//! tour. Given the bounds of the element a step points at, it darkens the
//! rest of the canvas, decides where the tooltip, arrow, and step badge go,
//! and animates the cutout and badge from one step to the next.
//!
//! # Primary responsibilities
//! - **Mask**: [`mask::build_mask`] and [`mask::MaskPathGenerator`] produce
//!   an even-odd path with a rounded or circular hole; [`mask::frame_rects`]
//!   is the four-band fallback.
//! - **Placement**: [`placement::compute_placement`].
//! - **Animation**: [`coordinator::AnimationCoordinator`] owns the animated
//!   values and pushes a mask to the [`coordinator::MaskSurface`] for every
//!   frame that changes them.
//! - **Layout**: [`layout::LayoutProbe`] waits for the host to measure the
//!   canvas.
//! - **Session**: [`overlay::TourOverlay`] runs one tour on top of the above.
//!
//! # How it fits in the system
//! Hosts drive time through a [`coachmark_core::frame::FrameScheduler`],
//! report layout through [`overlay::TourOverlay::handle_layout`], and draw
//! whatever [`overlay::TourOverlay::render_state`] returns.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod layout;
pub mod mask;
pub mod motion;
pub mod overlay;
pub mod placement;

pub use config::{ConfigError, OverlayConfig, OverlayKind};
pub use coordinator::{AnimationCoordinator, MaskSurface, OverlayMask, RecordingSurface};
pub use error::{DegradationAction, OverlayError, Result};
pub use layout::{CanvasLayout, LayoutChange, LayoutProbe};
pub use mask::{FillRule, MaskPathGenerator, MaskShape, MaskStyle, OutlineStrategy, RoundedOutline, build_mask};
pub use motion::{Transition, TransitionOutcome};
pub use overlay::{NavigationIntent, OverlayFrame, ShownStep, StepTarget, TourController, TourOverlay};
pub use placement::{PlacementResult, StatusBarInset, compute_placement};
