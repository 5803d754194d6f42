//! JSON settings file for the preview harness.

use anyhow::{Context, Result};
use lumen_core::Scene;
use lumen_renderer::{CameraParams, RenderConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything the harness reads from `--config`. Missing sections fall back
/// to defaults; a missing camera means the preset view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub render: RenderConfig,
    pub camera: Option<CameraParams>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }
}

/// Load and validate a scene description.
pub fn load_scene(path: &Path) -> Result<Scene> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid scene {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_renderer::Backend;

    #[test]
    fn test_partial_settings() {
        let settings: Settings = serde_json::from_str(
            r#"{ "render": { "samples_per_pixel": 2, "backend": "scalar", "progressive": false } }"#,
        )
        .unwrap();
        assert_eq!(settings.render.samples_per_pixel, 2);
        assert_eq!(settings.render.backend, Backend::Scalar);
        assert!(!settings.render.progressive);
        assert!(settings.render.enable_light_sampling);
        assert!(settings.camera.is_none());
    }

    #[test]
    fn test_empty_settings() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.render, RenderConfig::default());
    }

    #[test]
    fn test_camera_section() {
        let settings: Settings =
            serde_json::from_str(r#"{ "camera": { "vertical_fov": 35.0, "aperture": 0.0 } }"#).unwrap();
        let camera = settings.camera.unwrap();
        assert_eq!(camera.vertical_fov, 35.0);
        assert_eq!(camera.aperture, 0.0);
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = Settings::load(Path::new("/nonexistent/lumen.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/lumen.json"));
    }
}
