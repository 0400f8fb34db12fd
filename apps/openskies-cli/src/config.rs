use anyhow::{Context, Result};
use glam::Vec3;
use openskies_camera::Camera;
use openskies_input::ControllerConfig;
use serde::Deserialize;
use std::path::Path;

/// Startup configuration for `openskies fly`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Initial eye position.
    pub position: Vec3,
    /// Initial viewport size in pixels, `[width, height]`.
    pub viewport: [u32; 2],
    pub controller: ControllerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            viewport: [800, 600],
            controller: ControllerConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to open config {}", path.display()))?;
        let config: Self = serde_json::from_reader(file)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let [width, height] = self.viewport;
        if width == 0 || height == 0 {
            anyhow::bail!("viewport must be non-zero, got {width}x{height}");
        }
        if !self.position.is_finite() {
            anyhow::bail!("camera position must be finite, got {}", self.position);
        }
        self.controller.validate()?;
        Ok(())
    }

    pub fn aspect_ratio(&self) -> f32 {
        let [width, height] = self.viewport;
        width as f32 / height as f32
    }

    /// Build the starting camera.
    pub fn camera(&self) -> Camera {
        Camera::new(self.position, self.aspect_ratio())
    }
}
