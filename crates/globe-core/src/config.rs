//! Scene configuration gathered from the tuning constants.
//!
//! Everything here is checked once at start-up. A bad value is a fatal
//! configuration error: frontends refuse to create GPU state or issue loads
//! until `SceneConfig::validate` passes.

use crate::constants::*;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("at least one marker URI is required")]
    NoMarkers,
    #[error("marker orbit radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
    #[error("marker scale must be positive and finite, got {0}")]
    InvalidMarkerScale(f32),
    #[error("drag sensitivity must be positive and finite, got {0}")]
    InvalidSensitivity(f32),
    #[error("velocity decay must lie in [0, 1), got {0}")]
    InvalidDecay(f32),
    #[error("auto-rotate speed must be finite, got {0}")]
    InvalidAutoRotate(f32),
}

/// Tuning for the rotation controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationParams {
    pub sensitivity: f32,
    pub auto_rotate_speed: f32,
    pub decay: f32,
}

impl Default for RotationParams {
    fn default() -> Self {
        Self {
            sensitivity: DRAG_SENSITIVITY,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
            decay: VELOCITY_DECAY,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub marker_uris: Vec<String>,
    pub marker_radius: f32,
    pub marker_scale: f32,
    pub rotation: RotationParams,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            marker_uris: vec![DEFAULT_MARKER_URI.to_string(); MARKER_COUNT],
            marker_radius: MARKER_ORBIT_RADIUS,
            marker_scale: MARKER_SCALE,
            rotation: RotationParams::default(),
        }
    }
}

impl SceneConfig {
    pub fn with_marker_uris<I, S>(mut self, uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.marker_uris = uris.into_iter().map(Into::into).collect();
        self
    }

    pub fn marker_count(&self) -> usize {
        self.marker_uris.len()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.marker_uris.is_empty() {
            return Err(ConfigError::NoMarkers);
        }
        if !(self.marker_radius.is_finite() && self.marker_radius > 0.0) {
            return Err(ConfigError::InvalidRadius(self.marker_radius));
        }
        if !(self.marker_scale.is_finite() && self.marker_scale > 0.0) {
            return Err(ConfigError::InvalidMarkerScale(self.marker_scale));
        }
        let r = &self.rotation;
        if !(r.sensitivity.is_finite() && r.sensitivity > 0.0) {
            return Err(ConfigError::InvalidSensitivity(r.sensitivity));
        }
        if !(0.0..1.0).contains(&r.decay) {
            return Err(ConfigError::InvalidDecay(r.decay));
        }
        if !r.auto_rotate_speed.is_finite() {
            return Err(ConfigError::InvalidAutoRotate(r.auto_rotate_speed));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = SceneConfig::default();
        assert_eq!(cfg.marker_count(), MARKER_COUNT);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_empty_marker_list() {
        let cfg = SceneConfig::default().with_marker_uris(Vec::<String>::new());
        assert_eq!(cfg.validate(), Err(ConfigError::NoMarkers));
    }

    #[test]
    fn rejects_non_positive_radius() {
        let mut cfg = SceneConfig::default();
        cfg.marker_radius = 0.0;
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidRadius(0.0)));
        cfg.marker_radius = -1.5;
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidRadius(-1.5)));
    }

    #[test]
    fn rejects_decay_outside_unit_interval() {
        let mut cfg = SceneConfig::default();
        cfg.rotation.decay = 1.0;
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidDecay(1.0)));
        cfg.rotation.decay = -0.1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_nan_sensitivity() {
        let mut cfg = SceneConfig::default();
        cfg.rotation.sensitivity = f32::NAN;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidSensitivity(_))
        ));
    }
}
