use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{layout::RotationSource, Result, SceneError};

/// Top-level configuration structure for a scene session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub layout: LayoutConfig,
    pub camera: CameraConfig,
    pub render: RenderConfig,
}

impl SceneConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Rejects values the composer and render loop cannot work with.
    pub fn validate(&self) -> Result<()> {
        let camera = &self.camera;
        if !camera.min_distance.is_finite() || !camera.max_distance.is_finite() {
            return Err(SceneError::config("camera distances must be finite"));
        }
        if camera.min_distance < 0.0 || camera.min_distance >= camera.max_distance {
            return Err(SceneError::config(format!(
                "camera distance bounds [{}, {}] are empty",
                camera.min_distance, camera.max_distance
            )));
        }
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(SceneError::config(format!(
                "field of view {} is outside (0, 180)",
                camera.fov_degrees
            )));
        }
        if !camera.position.is_finite() || !camera.auto_rotate_speed.is_finite() {
            return Err(SceneError::config("camera position and speed must be finite"));
        }
        if self.render.fps == 0 {
            return Err(SceneError::config("render fps must be positive"));
        }
        Ok(())
    }
}

/// Counts and seeding for the procedural layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub orb_count: i32,
    pub star_count: i32,
    /// `None` draws star rotations from OS entropy instead of a seed.
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            orb_count: 15,
            star_count: 8,
            seed: Some(0x5EED),
        }
    }
}

impl LayoutConfig {
    pub fn rotation_source(&self) -> RotationSource {
        match self.seed {
            Some(seed) => RotationSource::Seeded(seed),
            None => RotationSource::Entropy,
        }
    }
}

/// Perspective camera and orbit control bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub fov_degrees: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub auto_rotate_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 12.0),
            fov_degrees: 60.0,
            min_distance: 8.0,
            max_distance: 25.0,
            auto_rotate_speed: 3.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub fps: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { fps: 60 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.layout.orb_count, 15);
        assert_eq!(config.layout.star_count, 8);
        assert_eq!(config.camera.min_distance, 8.0);
        assert_eq!(config.camera.max_distance, 25.0);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = SceneConfig::from_json_str(r#"{ "layout": { "seed": 7 } }"#).unwrap();
        assert_eq!(config.layout.seed, Some(7));
        assert_eq!(config.layout.orb_count, 15);
        assert_eq!(config.render.fps, 60);
    }

    #[test]
    fn rejects_inverted_distance_bounds() {
        let err = SceneConfig::from_json_str(
            r#"{ "camera": { "min_distance": 30.0, "max_distance": 10.0 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SceneError::Config(_)));
        assert!(format!("{err}").contains("[30, 10]"));
    }

    #[test]
    fn rejects_zero_fps() {
        let mut config = SceneConfig::default();
        config.render.fps = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_seed_means_entropy() {
        let layout = LayoutConfig {
            seed: None,
            ..LayoutConfig::default()
        };
        assert_eq!(layout.rotation_source(), RotationSource::Entropy);
    }
}
