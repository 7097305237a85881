#![forbid(unsafe_code)]

//! Overlay error model and graceful degradation.
//!
//! Geometry and placement are total functions and never fail. What can go
//! wrong is timing (asking for a frame before the canvas is measured, or a
//! step finishing after the tour was dismissed) and configuration loading.
//! Every variant maps to a [`DegradationAction`] so the host can keep the
//! tour running instead of surfacing the error.

use std::fmt;

use crate::config::ConfigError;

/// What the host should do when an overlay operation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradationAction {
    /// Render nothing this frame and try again on the next one.
    SkipFrame,
    /// Drop the step silently.
    DropStep,
    /// Fall back to [`OverlayConfig::default`](crate::config::OverlayConfig::default).
    UseDefaults,
}

/// Errors surfaced by the overlay session.
#[derive(Debug)]
pub enum OverlayError {
    /// The canvas size is not known yet.
    UnresolvedLayout,
    /// The overlay was reset while the step was waiting for layout.
    Dismissed { step: usize },
    /// Configuration could not be loaded or is invalid.
    Config(ConfigError),
}

/// Standard result type for overlay APIs.
pub type Result<T> = std::result::Result<T, OverlayError>;

impl OverlayError {
    /// Determine the graceful degradation action for this error.
    #[must_use]
    pub fn degradation(&self) -> DegradationAction {
        match self {
            Self::UnresolvedLayout => DegradationAction::SkipFrame,
            Self::Dismissed { .. } => DegradationAction::DropStep,
            Self::Config(_) => DegradationAction::UseDefaults,
        }
    }
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedLayout => f.write_str("canvas layout has not been measured yet"),
            Self::Dismissed { step } => write!(f, "overlay dismissed before step {step} was shown"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for OverlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::UnresolvedLayout | Self::Dismissed { .. } => None,
        }
    }
}

impl From<ConfigError> for OverlayError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}
