use serde::Deserialize;
use std::path::Path;

/// Errors from controller configuration.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid controller config: {field} must be finite and positive, got {value}")]
    InvalidConfig { field: &'static str, value: f32 },
}

/// Tuning for the fly controller. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Movement speed in world units per second.
    pub move_speed: f32,
    /// Look speed in degrees per pixel of mouse motion.
    pub look_sensitivity: f32,
    /// Zoom speed in field-of-view degrees per scroll unit.
    pub zoom_sensitivity: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            look_sensitivity: 0.1,
            zoom_sensitivity: 1.0,
        }
    }
}

impl ControllerConfig {
    /// Check that every tuning value is finite and positive.
    pub fn validate(&self) -> Result<(), InputError> {
        for (field, value) in [
            ("move_speed", self.move_speed),
            ("look_sensitivity", self.look_sensitivity),
            ("zoom_sensitivity", self.zoom_sensitivity),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(InputError::InvalidConfig { field, value });
            }
        }
        Ok(())
    }

    /// Load and validate a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }
}
