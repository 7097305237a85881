#![forbid(unsafe_code)]

//! Reactive values: [`Observable`] with explicit subscriptions and
//! [`BatchScope`] notification coalescing.

pub mod batch;
pub mod observable;

pub use batch::BatchScope;
pub use observable::{Listener, Observable, Subscription};
