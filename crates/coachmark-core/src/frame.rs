#![forbid(unsafe_code)]

//! Cooperative, frame-driven scheduling.
//!
//! The overlay never spawns threads or timers. The host calls
//! [`FrameScheduler::run_frame`] once per display frame (from its
//! `requestAnimationFrame`-style hook, vsync callback, or render loop) and
//! everything that asked for a frame runs then, on the same thread.
//!
//! # Invariants
//!
//! 1. Tasks run in the order they were requested (FIFO).
//! 2. A task requested while a frame is running is deferred to the next
//!    frame; a single `run_frame` never runs a task it queued itself.
//! 3. The first `run_frame` is frame 1; each later one increases the index
//!    by exactly 1. [`FrameScheduler::frame_index`] is 0 before any frame.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::task::Waker;
use std::time::Duration;

use tracing::trace;

/// Timing information handed to frame callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    /// Index of the frame being run (first frame is 1).
    pub index: u64,
    /// Time since the previous frame.
    pub delta: Duration,
    /// Total time across all frames run so far, including this one.
    pub elapsed: Duration,
}

enum FrameTask {
    Callback(Box<dyn FnOnce(FrameInfo)>),
    Wake(Waker),
}

#[derive(Default)]
struct SchedulerInner {
    queue: VecDeque<FrameTask>,
    frame: u64,
    elapsed: Duration,
}

/// Single-threaded frame scheduler shared by everything in one overlay.
///
/// Cloning yields another handle to the same queue.
#[derive(Clone, Default)]
pub struct FrameScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl std::fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("FrameScheduler")
            .field("frame", &inner.frame)
            .field("pending", &inner.queue.len())
            .field("elapsed", &inner.elapsed)
            .finish()
    }
}

impl FrameScheduler {
    /// Create an empty scheduler at frame 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` on the next frame.
    pub fn request_frame(&self, callback: impl FnOnce(FrameInfo) + 'static) {
        self.inner
            .borrow_mut()
            .queue
            .push_back(FrameTask::Callback(Box::new(callback)));
    }

    /// Wake `waker` on the next frame.
    pub fn wake_next_frame(&self, waker: Waker) {
        self.inner.borrow_mut().queue.push_back(FrameTask::Wake(waker));
    }

    /// Run one frame: every task queued before this call, in FIFO order.
    ///
    /// Returns the number of tasks run.
    pub fn run_frame(&self, delta: Duration) -> usize {
        let (tasks, info) = {
            let mut inner = self.inner.borrow_mut();
            inner.frame += 1;
            inner.elapsed = inner.elapsed.saturating_add(delta);
            let info = FrameInfo {
                index: inner.frame,
                delta,
                elapsed: inner.elapsed,
            };
            (std::mem::take(&mut inner.queue), info)
        };

        let count = tasks.len();
        for task in tasks {
            match task {
                FrameTask::Callback(callback) => callback(info),
                FrameTask::Wake(waker) => waker.wake(),
            }
        }
        if count > 0 {
            trace!(frame = info.index, tasks = count, "frame run");
        }
        count
    }

    /// Number of tasks waiting for the next frame.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Whether nothing is waiting for a frame.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }

    /// Index of the last frame run (0 before the first).
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.inner.borrow().frame
    }
}
