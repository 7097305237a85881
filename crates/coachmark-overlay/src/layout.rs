#![forbid(unsafe_code)]

//! Canvas layout acquisition.
//!
//! Hosts measure the overlay's canvas asynchronously after it is shown and
//! report the result through [`LayoutProbe::on_layout`]. Placement cannot
//! run until that happens, so [`LayoutProbe::await_canvas_layout`] returns
//! a future that checks once per frame and resolves on the first report
//! with a nonzero width.
//!
//! Headless probes (tests, server-side rendering) resolve immediately with
//! a zero-sized canvas.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use coachmark_core::frame::FrameScheduler;
use coachmark_core::geometry::CanvasSize;
use tracing::{debug, trace};

/// What a host layout report changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutChange {
    /// Recorded for the next layout wait; nothing was resolved yet.
    Recorded,
    /// Same size as the resolved layout.
    Unchanged,
    /// The resolved canvas changed size.
    Resized(CanvasSize),
}

#[derive(Debug, Default)]
struct ProbeState {
    reported: CanvasSize,
    resolved: Option<CanvasSize>,
    headless: bool,
    polls: u64,
}

/// Shared record of the host-reported canvas size.
///
/// Cloning yields another handle to the same record.
#[derive(Debug, Clone)]
pub struct LayoutProbe {
    state: Rc<RefCell<ProbeState>>,
    scheduler: FrameScheduler,
}

impl LayoutProbe {
    /// A probe that waits for host reports.
    #[must_use]
    pub fn new(scheduler: FrameScheduler) -> Self {
        Self {
            state: Rc::default(),
            scheduler,
        }
    }

    /// A probe that resolves immediately with [`CanvasSize::ZERO`].
    #[must_use]
    pub fn headless(scheduler: FrameScheduler) -> Self {
        let probe = Self::new(scheduler);
        probe.state.borrow_mut().headless = true;
        probe
    }

    #[must_use]
    pub fn is_headless(&self) -> bool {
        self.state.borrow().headless
    }

    /// Host layout callback.
    ///
    /// Once a layout has resolved, a report with a different nonzero size
    /// updates it and returns [`LayoutChange::Resized`].
    ///
    /// A zero-width report after resolution returns
    /// [`LayoutChange::Unchanged`] and keeps the resolved canvas, but it is
    /// still recorded as the latest report. After the next
    /// [`invalidate`](Self::invalidate) a layout wait therefore stays
    /// pending until a nonzero report arrives.
    pub fn on_layout(&self, width: f64, height: f64) -> LayoutChange {
        let size = CanvasSize::new(width, height);
        let mut state = self.state.borrow_mut();
        state.reported = size;
        match state.resolved {
            None => LayoutChange::Recorded,
            Some(resolved) if resolved == size || !size.is_measured() => LayoutChange::Unchanged,
            Some(_) => {
                state.resolved = Some(size);
                debug!(width, height, "canvas resized");
                LayoutChange::Resized(size)
            }
        }
    }

    /// The resolved canvas, if any.
    #[must_use]
    pub fn resolved(&self) -> Option<CanvasSize> {
        self.state.borrow().resolved
    }

    /// Forget the resolved canvas. The last host report is kept.
    pub fn invalidate(&self) {
        self.state.borrow_mut().resolved = None;
    }

    /// Times a layout wait found no usable report.
    #[must_use]
    pub fn pending_polls(&self) -> u64 {
        self.state.borrow().polls
    }

    /// Wait until the host has reported a nonzero width.
    #[must_use]
    pub fn await_canvas_layout(&self) -> CanvasLayout {
        CanvasLayout {
            probe: self.clone(),
        }
    }

    fn poll_once(&self) -> Option<CanvasSize> {
        let mut state = self.state.borrow_mut();
        let size = if state.headless {
            CanvasSize::ZERO
        } else if state.reported.is_measured() {
            state.reported
        } else {
            state.polls += 1;
            return None;
        };
        state.resolved = Some(size);
        Some(size)
    }
}

/// Future returned by [`LayoutProbe::await_canvas_layout`].
#[derive(Debug)]
pub struct CanvasLayout {
    probe: LayoutProbe,
}

impl Future for CanvasLayout {
    type Output = CanvasSize;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.probe.poll_once() {
            Some(size) => {
                trace!(width = size.width, height = size.height, "layout resolved");
                Poll::Ready(size)
            }
            None => {
                self.probe.scheduler.wake_next_frame(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}
