#![forbid(unsafe_code)]

//! Core: geometry, easing, observable values, and frame scheduling.
//!
//! # Role in coachmark
//! `coachmark-core` holds the pieces the overlay engine is built from but
//! that know nothing about tours: canvas geometry, tween math, a
//! value-with-subscribers primitive, and a cooperative frame scheduler.
//!
//! # Primary responsibilities
//! - **Geometry**: [`geometry::Vec2`], [`geometry::CanvasSize`], [`geometry::Rect`].
//! - **Animation**: [`animation::Easing`] curves and [`animation::Tween`].
//! - **Reactive**: [`reactive::Observable`] with [`reactive::BatchScope`]
//!   coalescing.
//! - **Frames**: [`frame::FrameScheduler`], driven by the host once per
//!   display frame.
//!
//! # How it fits in the system
//! `coachmark-overlay` composes these into the mask generator, placement
//! engine, and animation coordinator. Everything here is single-threaded
//! and clock-free; time only advances when the host runs a frame.

pub mod animation;
pub mod frame;
pub mod geometry;
pub mod reactive;

pub use animation::{Easing, Tween};
pub use frame::{FrameInfo, FrameScheduler};
pub use geometry::{CanvasSize, Rect, Vec2};
pub use reactive::{BatchScope, Observable, Subscription};
