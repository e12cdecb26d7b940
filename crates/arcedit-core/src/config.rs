//! Cursor configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::surface::{MAX_RAY_DISTANCE, TRACK_LENGTH};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables of the cursor tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Show the track crosshair even when no tool is picking.
    pub visible_when_idle: bool,
    /// Furthest hit distance along the pointer ray.
    pub max_ray_distance: f32,
    /// Length of the track surface and of the lateral track guide.
    pub track_length: f32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            visible_when_idle: false,
            max_ray_distance: MAX_RAY_DISTANCE,
            track_length: TRACK_LENGTH,
        }
    }
}

impl CursorConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json_str(&json)?;
        log::debug!("Loaded cursor config from {}", path.display());
        Ok(config)
    }

    /// Check that distances are positive and finite.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.max_ray_distance.is_finite() && self.max_ray_distance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_ray_distance must be positive, got {}",
                self.max_ray_distance
            )));
        }
        if !(self.track_length.is_finite() && self.track_length > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "track_length must be positive, got {}",
                self.track_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CursorConfig::default();
        assert!(!config.visible_when_idle);
        assert!((config.max_ray_distance - 120.0).abs() < f32::EPSILON);
        assert!((config.track_length - 100.0).abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = CursorConfig::from_json_str(r#"{ "visible_when_idle": true }"#).unwrap();
        assert!(config.visible_when_idle);
        assert!((config.max_ray_distance - 120.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rejects_bad_distance() {
        let err = CursorConfig::from_json_str(r#"{ "max_ray_distance": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = CursorConfig::from_json_str(r#"{ "track_length": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = CursorConfig::from_json_str("{ visible_when_idle").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "track_length": 80.0 }}"#).unwrap();
        let config = CursorConfig::load(file.path()).unwrap();
        assert!((config.track_length - 80.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CursorConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
