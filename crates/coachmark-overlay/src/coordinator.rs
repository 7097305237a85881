#![forbid(unsafe_code)]

//! Highlight and badge animation, and mask delivery.
//!
//! The [`AnimationCoordinator`] is the only writer of the highlight's size
//! and position. One listener, shared by both values, rebuilds the mask and
//! hands it to the [`MaskSurface`]; it is the only way frames reach the
//! surface. Animated frames write both values in one batch, so the mask is
//! rebuilt once per frame. A snap that leaves both values unchanged (for
//! example after a canvas resize) rebuilds explicitly, so every snap
//! produces exactly one mask. An animated transition started after the
//! style, canvas, or outline changed rebuilds immediately, so the new look
//! is drawn even when the animated values never move.
//!
//! # Failure Modes
//!
//! - **Canvas not measured**: rebuilds are skipped until
//!   [`AnimationCoordinator::set_canvas`] is called. Nothing is pushed to
//!   the surface in the meantime.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use coachmark_core::animation::Easing;
use coachmark_core::frame::FrameScheduler;
use coachmark_core::geometry::{CanvasSize, Rect, Vec2};
use coachmark_core::reactive::{Listener, Observable, Subscription};
use tracing::{debug, trace};

use crate::config::OverlayKind;
use crate::mask::{MaskPathGenerator, MaskShape, MaskStyle, OutlineStrategy, frame_rects};
use crate::motion::{Motion, Transition};
use crate::placement::BadgePlacement;

/// What the surface draws for the backdrop.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayMask {
    /// One even-odd path.
    Vector(MaskShape),
    /// Bands top, bottom, left, right of the cutout.
    Frame([Rect; 4]),
}

/// Receives every rebuilt mask.
pub trait MaskSurface {
    fn set_mask(&mut self, mask: &OverlayMask);
}

/// Surface that records masks; handy for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    masks: Rc<RefCell<Vec<OverlayMask>>>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of masks received.
    #[must_use]
    pub fn len(&self) -> usize {
        self.masks.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The most recent mask.
    #[must_use]
    pub fn last(&self) -> Option<OverlayMask> {
        self.masks.borrow().last().cloned()
    }

    /// All masks received so far.
    #[must_use]
    pub fn masks(&self) -> Vec<OverlayMask> {
        self.masks.borrow().clone()
    }
}

impl MaskSurface for RecordingSurface {
    fn set_mask(&mut self, mask: &OverlayMask) {
        self.masks.borrow_mut().push(mask.clone());
    }
}

struct MaskPipeline {
    generator: MaskPathGenerator,
    surface: Box<dyn MaskSurface>,
    canvas: Option<CanvasSize>,
    style: MaskStyle,
    kind: OverlayKind,
    rebuilds: u64,
    last: Option<OverlayMask>,
    /// Inputs of the last pushed mask other than the animated values.
    built_with: Option<(MaskStyle, CanvasSize, OverlayKind)>,
    outline_changed: bool,
}

impl MaskPipeline {
    /// Whether the surface shows a mask built for another style, canvas,
    /// kind, or outline. Nothing is stale before the first push.
    fn is_stale(&self) -> bool {
        let (Some(canvas), Some(built)) = (self.canvas, self.built_with) else {
            return false;
        };
        self.outline_changed || built != (self.style, canvas, self.kind)
    }

    fn rebuild(&mut self, size: Vec2, position: Vec2) -> bool {
        let Some(canvas) = self.canvas else {
            trace!("mask rebuild skipped: layout unresolved");
            return false;
        };
        let mask = match self.kind {
            OverlayKind::Vector => {
                OverlayMask::Vector(self.generator.build(size, position, canvas, &self.style))
            }
            OverlayKind::OpaqueBox => OverlayMask::Frame(frame_rects(size, position, canvas)),
        };
        self.surface.set_mask(&mask);
        self.rebuilds += 1;
        trace!(rebuild = self.rebuilds, "mask pushed");
        self.last = Some(mask);
        self.built_with = Some((self.style, canvas, self.kind));
        self.outline_changed = false;
        true
    }
}

/// Owns the highlight's size and position and the badge offset.
pub struct AnimationCoordinator {
    size: Observable<Vec2>,
    position: Observable<Vec2>,
    highlight: Motion,
    badge: Motion,
    badge_value: Observable<Vec2>,
    pipeline: Rc<RefCell<MaskPipeline>>,
    _subscriptions: [Subscription; 2],
}

impl std::fmt::Debug for AnimationCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationCoordinator")
            .field("size", &self.size.get())
            .field("position", &self.position.get())
            .field("badge", &self.badge_value.get())
            .field("rebuilds", &self.rebuilds())
            .finish_non_exhaustive()
    }
}

impl AnimationCoordinator {
    /// A coordinator pushing masks to `surface`, with everything at zero
    /// and no canvas.
    pub fn new(scheduler: FrameScheduler, surface: impl MaskSurface + 'static) -> Self {
        let size = Observable::new(Vec2::ZERO);
        let position = Observable::new(Vec2::ZERO);
        let badge_value = Observable::new(Vec2::ZERO);

        let pipeline = Rc::new(RefCell::new(MaskPipeline {
            generator: MaskPathGenerator::new(),
            surface: Box::new(surface),
            canvas: None,
            style: MaskStyle::default(),
            kind: OverlayKind::Vector,
            rebuilds: 0,
            last: None,
            built_with: None,
            outline_changed: false,
        }));

        let listener: Listener<Vec2> = {
            let pipeline = Rc::downgrade(&pipeline);
            let size = size.clone();
            let position = position.clone();
            Rc::new(move |_: &Vec2| {
                if let Some(pipeline) = pipeline.upgrade() {
                    pipeline.borrow_mut().rebuild(size.get(), position.get());
                }
            })
        };
        let subscriptions = [
            size.subscribe_shared(Rc::clone(&listener)),
            position.subscribe_shared(listener),
        ];

        Self {
            highlight: Motion::new("highlight", scheduler.clone(), vec![size.clone(), position.clone()]),
            badge: Motion::new("badge", scheduler, vec![badge_value.clone()]),
            size,
            position,
            badge_value,
            pipeline,
            _subscriptions: subscriptions,
        }
    }

    /// Replace the cutout outline.
    pub fn set_outline_strategy(&self, strategy: impl OutlineStrategy + 'static) {
        let mut pipeline = self.pipeline.borrow_mut();
        pipeline.generator = MaskPathGenerator::with_strategy(strategy);
        pipeline.outline_changed = true;
    }

    pub fn set_overlay_kind(&self, kind: OverlayKind) {
        self.pipeline.borrow_mut().kind = kind;
    }

    /// Set the canvas masks are built for. `None` stops rebuilding.
    pub fn set_canvas(&self, canvas: Option<CanvasSize>) {
        self.pipeline.borrow_mut().canvas = canvas;
    }

    pub fn set_style(&self, style: MaskStyle) {
        self.pipeline.borrow_mut().style = style;
    }

    #[must_use]
    pub fn style(&self) -> MaskStyle {
        self.pipeline.borrow().style
    }

    /// Current highlight size.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.size.get()
    }

    /// Current highlight position.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position.get()
    }

    /// Current badge offset.
    #[must_use]
    pub fn badge(&self) -> BadgePlacement {
        self.badge_value.get().into()
    }

    /// Masks pushed to the surface so far.
    #[must_use]
    pub fn rebuilds(&self) -> u64 {
        self.pipeline.borrow().rebuilds
    }

    /// The most recently pushed mask.
    #[must_use]
    pub fn current_mask(&self) -> Option<OverlayMask> {
        self.pipeline.borrow().last.clone()
    }

    /// Whether the highlight is mid-animation.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.highlight.is_running()
    }

    /// Rebuild and push the mask from the current values.
    ///
    /// Returns `false` when the canvas is not known.
    pub fn rebuild(&self) -> bool {
        let (size, position) = (self.size.get(), self.position.get());
        self.pipeline.borrow_mut().rebuild(size, position)
    }

    /// Move the highlight to `size` at `position`.
    ///
    /// Without animation both values are set at once and the mask is
    /// rebuilt exactly once before this returns. With animation both values
    /// tween from where they are now, and the mask is rebuilt on every
    /// frame that changes them; if the style, canvas, or outline changed
    /// since the last push, it is also rebuilt once before this returns.
    /// Either way, any transition still running is superseded.
    pub fn transition_to(
        &self,
        size: Vec2,
        position: Vec2,
        animated: bool,
        duration: Duration,
        easing: Easing,
    ) -> Transition {
        debug!(?size, ?position, animated, "highlight transition");
        if animated {
            let transition = self.highlight.animate(&[size, position], duration, easing);
            if self.pipeline.borrow().is_stale() {
                self.rebuild();
            }
            return transition;
        }
        let (transition, changed) = self.highlight.snap(&[size, position]);
        if !changed {
            self.rebuild();
        }
        transition
    }

    /// Abandon the highlight and badge transitions in flight. Values stay
    /// where they are and their transitions resolve as superseded.
    pub fn cancel(&self) {
        self.highlight.cancel();
        self.badge.cancel();
    }

    /// Move the step badge to `target`.
    pub fn move_badge(
        &self,
        target: BadgePlacement,
        animated: bool,
        duration: Duration,
        easing: Easing,
    ) -> Transition {
        let target = target.as_vec2();
        if animated {
            self.badge.animate(&[target], duration, easing)
        } else {
            self.badge.snap(&[target]).0
        }
    }
}
