#![forbid(unsafe_code)]

//! The tour overlay session.
//!
//! [`TourOverlay`] ties layout acquisition, placement, and the animation
//! coordinator together for one tour. The controller that owns the steps
//! calls [`TourOverlay::show_step`] for each one; the host reports canvas
//! layout through [`TourOverlay::handle_layout`] and reads what to draw
//! from [`TourOverlay::render_state`].
//!
//! # Invariants
//!
//! 1. Nothing is rendered until the canvas layout has resolved.
//! 2. The first step after construction or [`TourOverlay::reset`] snaps;
//!    later steps animate when [`OverlayConfig::animated`] is set.
//! 3. Hiding a visible overlay resets it; all per-tour state is dropped.

use std::cell::RefCell;

use coachmark_core::frame::FrameScheduler;
use coachmark_core::geometry::{CanvasSize, Rect, Vec2};
use tracing::{debug, info_span};

use crate::config::OverlayConfig;
use crate::coordinator::{AnimationCoordinator, MaskSurface, OverlayMask};
use crate::error::{OverlayError, Result};
use crate::layout::{LayoutChange, LayoutProbe};
use crate::mask::{MaskStyle, OutlineStrategy};
use crate::motion::Transition;
use crate::placement::{BadgePlacement, PlacementResult, compute_placement};

/// One step's target, as measured by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepTarget {
    /// Zero-based step index.
    pub index: usize,
    /// Target bounds in canvas coordinates.
    pub rect: Rect,
    /// Overrides [`OverlayConfig::border_radius`] for this step.
    pub border_radius: Option<f64>,
}

impl StepTarget {
    #[must_use]
    pub const fn new(index: usize, rect: Rect) -> Self {
        Self {
            index,
            rect,
            border_radius: None,
        }
    }

    #[must_use]
    pub const fn with_border_radius(mut self, radius: f64) -> Self {
        self.border_radius = Some(radius);
        self
    }
}

/// Navigation requested from the tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationIntent {
    Next,
    Prev,
    Stop,
}

/// The owner of the tour's steps.
pub trait TourController {
    fn next(&mut self);
    fn prev(&mut self);
    fn stop(&mut self);
}

/// A step that has been placed and whose transitions are under way.
#[derive(Debug, Clone)]
pub struct ShownStep {
    pub placement: PlacementResult,
    /// Completes when the cutout reaches the target.
    pub highlight: Transition,
    /// Completes when the badge reaches its offset.
    pub badge: Transition,
}

/// Everything the host needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    pub canvas: CanvasSize,
    pub placement: PlacementResult,
    /// Last mask pushed to the surface.
    pub mask: Option<OverlayMask>,
    /// Animated badge offset.
    pub badge: BadgePlacement,
    pub highlight_size: Vec2,
    pub highlight_position: Vec2,
    pub backdrop_color: String,
    pub arrow_color: String,
}

#[derive(Debug, Default)]
struct SessionState {
    /// Set while a step is being shown, cleared by reset.
    container_visible: bool,
    /// Visibility requested by the host.
    visible: bool,
    animated: bool,
    epoch: u64,
    step: Option<StepTarget>,
    placement: Option<PlacementResult>,
}

/// One tour's overlay.
pub struct TourOverlay {
    config: OverlayConfig,
    probe: LayoutProbe,
    coordinator: AnimationCoordinator,
    controller: RefCell<Option<Box<dyn TourController>>>,
    state: RefCell<SessionState>,
}

impl std::fmt::Debug for TourOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TourOverlay")
            .field("config", &self.config)
            .field("state", &self.state.borrow())
            .field("coordinator", &self.coordinator)
            .finish_non_exhaustive()
    }
}

impl TourOverlay {
    /// An overlay drawing to `surface`, waiting for host layout reports.
    pub fn new(config: OverlayConfig, scheduler: FrameScheduler, surface: impl MaskSurface + 'static) -> Self {
        let coordinator = AnimationCoordinator::new(scheduler.clone(), surface);
        coordinator.set_overlay_kind(config.overlay_kind);
        Self {
            config,
            probe: LayoutProbe::new(scheduler),
            coordinator,
            controller: RefCell::new(None),
            state: RefCell::default(),
        }
    }

    /// Use `probe` for layout, e.g. [`LayoutProbe::headless`].
    #[must_use]
    pub fn with_layout_probe(mut self, probe: LayoutProbe) -> Self {
        self.probe = probe;
        self
    }

    /// Forward navigation intents to `controller`.
    #[must_use]
    pub fn with_controller(self, controller: impl TourController + 'static) -> Self {
        *self.controller.borrow_mut() = Some(Box::new(controller));
        self
    }

    /// Replace the cutout outline.
    #[must_use]
    pub fn with_outline_strategy(self, strategy: impl OutlineStrategy + 'static) -> Self {
        self.coordinator.set_outline_strategy(strategy);
        self
    }

    #[must_use]
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    #[must_use]
    pub fn coordinator(&self) -> &AnimationCoordinator {
        &self.coordinator
    }

    #[must_use]
    pub fn probe(&self) -> &LayoutProbe {
        &self.probe
    }

    /// Whether the overlay container is shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        let state = self.state.borrow();
        state.container_visible || state.visible
    }

    /// Show `step`: wait for layout, place it, and start the transitions.
    ///
    /// Resolves once the transitions have started; await the returned
    /// [`ShownStep`]'s transitions to wait for them to finish. Fails with
    /// [`OverlayError::Dismissed`] if the overlay is reset while waiting
    /// for layout.
    pub async fn show_step(&self, step: StepTarget) -> Result<ShownStep> {
        let epoch = {
            let mut state = self.state.borrow_mut();
            state.container_visible = true;
            state.epoch
        };

        let canvas = self.probe.await_canvas_layout().await;

        let animated = {
            let state = self.state.borrow();
            if state.epoch != epoch {
                debug!(step = step.index, "step dropped: overlay was reset");
                return Err(OverlayError::Dismissed { step: step.index });
            }
            state.animated
        };

        let shown = self.apply(step, canvas, animated);
        self.state.borrow_mut().animated = self.config.animated;
        Ok(shown)
    }

    /// The current step's placement.
    pub fn placement(&self) -> Result<PlacementResult> {
        if self.probe.resolved().is_none() {
            return Err(OverlayError::UnresolvedLayout);
        }
        self.state
            .borrow()
            .placement
            .ok_or(OverlayError::UnresolvedLayout)
    }

    /// What to draw now, or `None` while there is nothing to draw.
    #[must_use]
    pub fn render_state(&self) -> Option<OverlayFrame> {
        if !self.is_visible() {
            return None;
        }
        let canvas = self.probe.resolved()?;
        let placement = self.state.borrow().placement?;
        Some(OverlayFrame {
            canvas,
            placement,
            mask: self.coordinator.current_mask(),
            badge: self.coordinator.badge(),
            highlight_size: self.coordinator.size(),
            highlight_position: self.coordinator.position(),
            backdrop_color: self.config.backdrop_color.clone(),
            arrow_color: self.config.arrow_color.clone(),
        })
    }

    /// Host layout callback.
    ///
    /// On a resize while a step is shown, the step is placed again for the
    /// new canvas without animation and the new placement is returned.
    pub fn handle_layout(&self, width: f64, height: f64) -> Option<PlacementResult> {
        let LayoutChange::Resized(canvas) = self.probe.on_layout(width, height) else {
            return None;
        };
        let step = self.state.borrow().step?;
        Some(self.apply(step, canvas, false).placement)
    }

    /// Forward a navigation intent. Stopping resets the overlay first.
    pub fn handle_intent(&self, intent: NavigationIntent) {
        if intent == NavigationIntent::Stop {
            self.reset();
        }
        let mut controller = self.controller.borrow_mut();
        let Some(controller) = controller.as_mut() else {
            debug!(?intent, "no controller attached");
            return;
        };
        match intent {
            NavigationIntent::Next => controller.next(),
            NavigationIntent::Prev => controller.prev(),
            NavigationIntent::Stop => controller.stop(),
        }
    }

    /// Host-requested visibility. Going from visible to hidden resets.
    pub fn set_visible(&self, visible: bool) {
        let was_visible = std::mem::replace(&mut self.state.borrow_mut().visible, visible);
        if was_visible && !visible {
            self.reset();
        }
    }

    /// Drop all per-tour state: layout, placement, animation mode, and the
    /// transitions in flight. The highlight and badge stay where they were
    /// stopped; the next step snaps from there.
    pub fn reset(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.animated = false;
            state.container_visible = false;
            state.epoch += 1;
            state.step = None;
            state.placement = None;
        }
        self.probe.invalidate();
        self.coordinator.cancel();
        self.coordinator.set_canvas(None);
        debug!("overlay reset");
    }

    fn apply(&self, step: StepTarget, canvas: CanvasSize, animated: bool) -> ShownStep {
        let _span = info_span!("overlay.step", step = step.index, animated).entered();
        let config = &self.config;
        let placement = compute_placement(
            step.rect,
            canvas,
            step.index,
            &config.circle_steps,
            config.status_bar.offset(),
        );

        self.coordinator.set_canvas(Some(canvas));
        self.coordinator.set_style(MaskStyle {
            border_radius: step.border_radius.unwrap_or(config.border_radius),
            is_circle: placement.is_circle,
        });

        let badge = self.coordinator.move_badge(
            placement.step_number,
            animated,
            config.animation_duration(),
            config.easing,
        );
        let highlight = self.coordinator.transition_to(
            placement.highlight.size,
            placement.highlight.position,
            animated,
            config.mask_animation_duration(),
            config.mask_easing,
        );

        {
            let mut state = self.state.borrow_mut();
            state.step = Some(step);
            state.placement = Some(placement);
        }

        ShownStep {
            placement,
            highlight,
            badge,
        }
    }
}
