#![forbid(unsafe_code)]

//! Overlay configuration as data.
//!
//! [`OverlayConfig`] collects every tunable of the overlay: backdrop look,
//! animation timing and curves, which steps use a circular cutout, and the
//! status-bar inset. With the `config` feature it loads from TOML or JSON;
//! missing fields fall back to the defaults below.
//!
//! ```toml
//! border_radius = 8.0
//! backdrop_color = "rgba(0, 0, 0, 0.6)"
//! animation_duration_ms = 250
//! easing = { elastic = 0.5 }
//! overlay_kind = "opaque-box"
//! circle_steps = [0, 3]
//!
//! [status_bar]
//! height = 24.0
//! overlaps = true
//! ```

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use coachmark_core::animation::Easing;

use crate::placement::StatusBarInset;

/// How the backdrop is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "kebab-case"))]
pub enum OverlayKind {
    /// One even-odd path with a rounded or circular cutout.
    #[default]
    Vector,
    /// Four rectangles around a square cutout, for surfaces without paths.
    OpaqueBox,
}

/// Every tunable of the overlay.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct OverlayConfig {
    /// Corner radius of rectangular cutouts.
    pub border_radius: f64,
    /// Backdrop fill, passed through to the surface untouched.
    pub backdrop_color: String,
    /// Arrow border color, passed through untouched.
    pub arrow_color: String,
    /// Animate between steps. The first step after a reset always snaps.
    pub animated: bool,
    /// Badge and tooltip animation length.
    pub animation_duration_ms: u64,
    /// Cutout animation length.
    pub mask_animation_duration_ms: u64,
    /// Badge and tooltip easing.
    pub easing: Easing,
    /// Cutout easing.
    pub mask_easing: Easing,
    pub overlay_kind: OverlayKind,
    /// Zero-based indices of steps drawn with a circular cutout.
    pub circle_steps: Vec<usize>,
    pub status_bar: StatusBarInset,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            border_radius: 0.0,
            backdrop_color: "rgba(0, 0, 0, 0.4)".into(),
            arrow_color: "#fff".into(),
            animated: true,
            animation_duration_ms: 400,
            mask_animation_duration_ms: 300,
            easing: Easing::DEFAULT_ELASTIC,
            mask_easing: Easing::Linear,
            overlay_kind: OverlayKind::Vector,
            circle_steps: Vec::new(),
            status_bar: StatusBarInset::NONE,
        }
    }
}

impl OverlayConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.border_radius.is_finite() || self.border_radius < 0.0 {
            errors.push(format!(
                "border_radius must be finite and >= 0, got {}",
                self.border_radius
            ));
        }

        if self.backdrop_color.trim().is_empty() {
            errors.push("backdrop_color must not be empty".into());
        }

        for (name, easing) in [("easing", self.easing), ("mask_easing", self.mask_easing)] {
            if let Easing::Elastic(b) = easing
                && (!b.is_finite() || b < 0.0)
            {
                errors.push(format!("{name} bounciness must be finite and >= 0, got {b}"));
            }
        }

        if !self.status_bar.height.is_finite() || self.status_bar.height < 0.0 {
            errors.push(format!(
                "status_bar.height must be finite and >= 0, got {}",
                self.status_bar.height
            ));
        }

        errors
    }

    /// Validate, turning any problems into a [`ConfigError::Validation`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    #[must_use]
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[must_use]
    pub fn mask_animation_duration(&self) -> Duration {
        Duration::from_millis(self.mask_animation_duration_ms)
    }
}

/// Errors that can occur when loading an overlay configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = OverlayConfig::default();
        assert!(config.animated);
        assert_eq!(config.animation_duration(), Duration::from_millis(400));
        assert_eq!(config.mask_animation_duration(), Duration::from_millis(300));
        assert_eq!(config.easing, Easing::Elastic(0.7));
        assert_eq!(config.mask_easing, Easing::Linear);
        assert_eq!(config.overlay_kind, OverlayKind::Vector);
        assert_eq!(config.backdrop_color, "rgba(0, 0, 0, 0.4)");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn validate_catches_negative_radius() {
        let config = OverlayConfig {
            border_radius: -1.0,
            ..OverlayConfig::default()
        };
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("border_radius")));
    }

    #[test]
    fn validate_catches_bad_elastic() {
        let config = OverlayConfig {
            mask_easing: Easing::Elastic(f64::NAN),
            ..OverlayConfig::default()
        };
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("mask_easing")));
    }

    #[test]
    fn validate_catches_empty_color_and_bad_status_bar() {
        let mut config = OverlayConfig::default();
        config.backdrop_color = "  ".into();
        config.status_bar.height = -3.0;
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert!(matches!(config.validated(), Err(ConfigError::Validation(e)) if e.len() == 2));
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_partial_override() {
        let config = OverlayConfig::from_toml_str(
            r#"
            border_radius = 8.0
            overlay_kind = "opaque-box"
            easing = { elastic = 0.5 }
            circle_steps = [0, 3]

            [status_bar]
            height = 24.0
            overlaps = true
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.border_radius, 8.0);
        assert_eq!(config.overlay_kind, OverlayKind::OpaqueBox);
        assert_eq!(config.easing, Easing::Elastic(0.5));
        assert_eq!(config.circle_steps, vec![0, 3]);
        assert_eq!(config.status_bar.offset(), 24.0);
        assert_eq!(config.animation_duration_ms, 400);
        assert_eq!(config.mask_easing, Easing::Linear);
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_partial_override() {
        let config = OverlayConfig::from_json_str(
            r#"{"animated": false, "mask_easing": "ease_in_out", "backdrop_color": "black"}"#,
        )
        .expect("valid json");
        assert!(!config.animated);
        assert_eq!(config.mask_easing, Easing::EaseInOut);
        assert_eq!(config.backdrop_color, "black");
    }

    #[cfg(feature = "config")]
    #[test]
    fn parse_errors_are_typed() {
        assert!(matches!(
            OverlayConfig::from_toml_str("border_radius = \"wide\""),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            OverlayConfig::from_json_str("{"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            OverlayConfig::from_toml_file("/nonexistent/coachmark.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
