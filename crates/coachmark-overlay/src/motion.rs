#![forbid(unsafe_code)]

//! Frame-driven transitions of a group of observable vectors.
//!
//! A [`Motion`] owns a fixed set of [`Observable<Vec2>`] tracks and moves
//! all of them together, either instantly or over a duration. Every frame
//! writes all tracks inside one [`BatchScope`], so a listener shared by the
//! tracks sees one notification per frame.
//!
//! # Invariants
//!
//! 1. All tracks of a transition start on the same frame and finish on the
//!    same frame.
//! 2. At most one frame callback per motion does any work on a given frame.
//! 3. A new transition supersedes the running one; tracks continue from
//!    their current values, and the old [`Transition`] resolves to
//!    [`TransitionOutcome::Superseded`].
//! 4. A settled transition leaves every track exactly on its target.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};
use std::time::Duration;

use coachmark_core::animation::{Easing, Tween};
use coachmark_core::frame::{FrameInfo, FrameScheduler};
use coachmark_core::geometry::Vec2;
use coachmark_core::reactive::{BatchScope, Observable};
use tracing::trace;

/// How a transition ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The targets were reached.
    Settled,
    /// A newer transition took over before the targets were reached.
    Superseded,
}

#[derive(Default)]
struct TransitionSlot {
    outcome: Option<TransitionOutcome>,
    waker: Option<Waker>,
}

impl TransitionSlot {
    fn resolve(slot: &Rc<RefCell<Self>>, outcome: TransitionOutcome) {
        let waker = {
            let mut slot = slot.borrow_mut();
            if slot.outcome.is_some() {
                return;
            }
            slot.outcome = Some(outcome);
            slot.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

/// Completion signal of one transition.
///
/// The transition runs whether or not this is awaited; awaiting only
/// observes the outcome.
#[derive(Clone)]
pub struct Transition {
    slot: Rc<RefCell<TransitionSlot>>,
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("outcome", &self.outcome())
            .finish()
    }
}

impl Transition {
    fn pending() -> Self {
        Self {
            slot: Rc::new(RefCell::new(TransitionSlot::default())),
        }
    }

    fn settled() -> Self {
        let transition = Self::pending();
        transition.slot.borrow_mut().outcome = Some(TransitionOutcome::Settled);
        transition
    }

    /// The outcome, once known.
    #[must_use]
    pub fn outcome(&self) -> Option<TransitionOutcome> {
        self.slot.borrow().outcome
    }

    /// Whether the transition has ended, either way.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.outcome().is_some()
    }
}

impl Future for Transition {
    type Output = TransitionOutcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut slot = self.slot.borrow_mut();
        match slot.outcome {
            Some(outcome) => Poll::Ready(outcome),
            None => {
                slot.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}

struct Active {
    generation: u64,
    tweens: Vec<Tween<Vec2>>,
    slot: Rc<RefCell<TransitionSlot>>,
}

struct MotionState {
    generation: u64,
    active: Option<Active>,
    frames: u64,
}

/// A set of vectors that always move together.
#[derive(Clone)]
pub struct Motion {
    name: &'static str,
    tracks: Rc<[Observable<Vec2>]>,
    state: Rc<RefCell<MotionState>>,
    scheduler: FrameScheduler,
}

impl std::fmt::Debug for Motion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Motion")
            .field("name", &self.name)
            .field("generation", &state.generation)
            .field("running", &state.active.is_some())
            .finish()
    }
}

impl Motion {
    /// A motion over `tracks`, driven by `scheduler`.
    #[must_use]
    pub fn new(name: &'static str, scheduler: FrameScheduler, tracks: Vec<Observable<Vec2>>) -> Self {
        Self {
            name,
            tracks: tracks.into(),
            state: Rc::new(RefCell::new(MotionState {
                generation: 0,
                active: None,
                frames: 0,
            })),
            scheduler,
        }
    }

    /// Current values, in track order.
    #[must_use]
    pub fn values(&self) -> Vec<Vec2> {
        self.tracks.iter().map(Observable::get).collect()
    }

    /// Whether a transition is in flight.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.borrow().active.is_some()
    }

    /// Frames that advanced a transition so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.state.borrow().frames
    }

    /// Jump every track to its target in one batch.
    ///
    /// Returns the finished transition and whether any value changed.
    pub fn snap(&self, targets: &[Vec2]) -> (Transition, bool) {
        self.supersede();
        let mut changed = false;
        {
            let _batch = BatchScope::new();
            for (track, target) in self.tracks.iter().zip(targets) {
                changed |= track.set(*target);
            }
        }
        trace!(motion = self.name, changed, "snapped");
        (Transition::settled(), changed)
    }

    /// Tween every track from its current value to its target.
    pub fn animate(&self, targets: &[Vec2], duration: Duration, easing: Easing) -> Transition {
        let generation = self.supersede();
        let tweens = self
            .tracks
            .iter()
            .zip(targets)
            .map(|(track, target)| Tween::new(track.get(), *target, duration, easing))
            .collect();
        let transition = Transition::pending();
        self.state.borrow_mut().active = Some(Active {
            generation,
            tweens,
            slot: Rc::clone(&transition.slot),
        });
        trace!(motion = self.name, generation, ?duration, "animation started");
        self.schedule(generation);
        transition
    }

    /// Abandon the running transition, if any, leaving values where they
    /// are.
    pub fn cancel(&self) {
        self.supersede();
    }

    /// Abandon the running transition, if any. Returns the new generation.
    fn supersede(&self) -> u64 {
        let previous = {
            let mut state = self.state.borrow_mut();
            state.generation += 1;
            state.active.take()
        };
        if let Some(active) = previous {
            trace!(motion = self.name, generation = active.generation, "superseded");
            TransitionSlot::resolve(&active.slot, TransitionOutcome::Superseded);
        }
        self.state.borrow().generation
    }

    fn schedule(&self, generation: u64) {
        let motion = self.clone();
        self.scheduler
            .request_frame(move |info| motion.advance(generation, info));
    }

    fn advance(&self, generation: u64, info: FrameInfo) {
        let (values, finished) = {
            let mut state = self.state.borrow_mut();
            let Some(active) = state.active.as_mut() else {
                return;
            };
            if active.generation != generation {
                return;
            }
            let mut done = true;
            for tween in &mut active.tweens {
                done &= tween.tick(info.delta);
            }
            let values: Vec<Vec2> = active.tweens.iter().map(Tween::value).collect();
            state.frames += 1;
            let finished = if done { state.active.take() } else { None };
            (values, finished)
        };

        {
            let _batch = BatchScope::new();
            for (track, value) in self.tracks.iter().zip(values) {
                track.set(value);
            }
        }

        match finished {
            Some(active) => {
                trace!(motion = self.name, generation, frame = info.index, "settled");
                TransitionSlot::resolve(&active.slot, TransitionOutcome::Settled);
            }
            None => self.schedule(generation),
        }
    }
}
