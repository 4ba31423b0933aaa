//! Camera setup and orbit control parameters.

use std::f32::consts::{PI, TAU};

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::{config::CameraConfig, interaction::InteractionState};

/// Keeps the orbit away from the poles.
const POLAR_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchAction {
    Rotate,
    /// Pinch to zoom while panning.
    DollyPan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchMapping {
    pub one_finger: TouchAction,
    pub two_finger: TouchAction,
}

impl Default for TouchMapping {
    fn default() -> Self {
        Self {
            one_finger: TouchAction::Rotate,
            two_finger: TouchAction::DollyPan,
        }
    }
}

/// Orbit control surface derived from the interaction state each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraControlConfig {
    pub enabled: bool,
    pub enable_pan: bool,
    pub enable_zoom: bool,
    pub enable_rotate: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub touches: TouchMapping,
}

impl CameraControlConfig {
    pub fn derive(state: InteractionState, camera: &CameraConfig) -> Self {
        Self {
            enabled: state.controls_enabled(),
            enable_pan: true,
            enable_zoom: true,
            enable_rotate: true,
            min_distance: camera.min_distance,
            max_distance: camera.max_distance,
            auto_rotate: state.auto_rotate(),
            auto_rotate_speed: camera.auto_rotate_speed,
            touches: TouchMapping::default(),
        }
    }

    /// Auto-rotation in radians per second; a speed of 1 is one turn a minute.
    pub fn auto_rotate_rate(&self) -> f32 {
        TAU / 60.0 * self.auto_rotate_speed
    }
}

/// Perspective camera the scene is viewed through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraSetup {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_degrees: f32,
}

impl CameraSetup {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            position: config.position,
            target: Vec3::ZERO,
            fov_degrees: config.fov_degrees,
        }
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect, 0.1, 1000.0)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }
}

/// Spherical orbit around a target, owned and advanced by the host.
///
/// Input is ignored while the control surface is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Angle around +Y measured from +Z.
    pub azimuth: f32,
    /// Angle from +Y.
    pub polar: f32,
}

impl OrbitCamera {
    pub fn from_setup(setup: &CameraSetup) -> Self {
        let offset = setup.position - setup.target;
        let distance = offset.length();
        let polar = if distance > 0.0 {
            (offset.y / distance).clamp(-1.0, 1.0).acos()
        } else {
            PI / 2.0
        };
        Self {
            target: setup.target,
            distance,
            azimuth: offset.x.atan2(offset.z),
            polar,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        self.target + Vec3::new(sin_polar * sin_az, cos_polar, sin_polar * cos_az) * self.distance
    }

    /// Applies auto-rotation for `dt` seconds.
    pub fn advance(&mut self, dt: f32, controls: &CameraControlConfig) {
        if controls.enabled && controls.auto_rotate {
            self.azimuth = (self.azimuth - controls.auto_rotate_rate() * dt).rem_euclid(TAU);
        }
    }

    pub fn rotate(&mut self, d_azimuth: f32, d_polar: f32, controls: &CameraControlConfig) {
        if !(controls.enabled && controls.enable_rotate) {
            return;
        }
        self.azimuth = (self.azimuth + d_azimuth).rem_euclid(TAU);
        self.polar = (self.polar + d_polar).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
    }

    /// Multiplies the distance by `factor`, clamped to the control bounds.
    pub fn zoom(&mut self, factor: f32, controls: &CameraControlConfig) {
        if !(controls.enabled && controls.enable_zoom) || factor <= 0.0 {
            return;
        }
        self.distance =
            (self.distance * factor).clamp(controls.min_distance, controls.max_distance);
    }

    pub fn pan(&mut self, delta: Vec3, controls: &CameraControlConfig) {
        if controls.enabled && controls.enable_pan {
            self.target += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls(state: InteractionState) -> CameraControlConfig {
        CameraControlConfig::derive(state, &CameraConfig::default())
    }

    #[test]
    fn presentation_disables_controls() {
        let c = controls(InteractionState::Presentation);
        assert!(!c.enabled);
        assert!(!c.auto_rotate);
        assert!(c.enable_pan && c.enable_zoom && c.enable_rotate);
        assert_eq!((c.min_distance, c.max_distance), (8.0, 25.0));
        assert_eq!(c.touches.one_finger, TouchAction::Rotate);
        assert_eq!(c.touches.two_finger, TouchAction::DollyPan);
    }

    #[test]
    fn exploration_enables_auto_rotate() {
        let c = controls(InteractionState::Exploration);
        assert!(c.enabled);
        assert!(c.auto_rotate);
        assert!((c.auto_rotate_rate() - PI / 10.0).abs() < 1e-6);
    }

    #[test]
    fn orbit_round_trips_initial_position() {
        let setup = CameraSetup::from_config(&CameraConfig::default());
        let orbit = OrbitCamera::from_setup(&setup);
        assert!((orbit.distance - 12.0).abs() < 1e-6);
        assert!((orbit.eye() - setup.position).length() < 1e-4);
    }

    #[test]
    fn view_looks_at_the_heart() {
        let setup = CameraSetup::from_config(&CameraConfig::default());
        let origin = setup.view_matrix().transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.0, 0.0, -12.0)).length() < 1e-4);

        let clip = setup.projection_matrix(16.0 / 9.0).project_point3(origin);
        assert!(clip.x.abs() < 1e-5 && clip.y.abs() < 1e-5);
    }

    #[test]
    fn input_ignored_while_presenting() {
        let setup = CameraSetup::from_config(&CameraConfig::default());
        let mut orbit = OrbitCamera::from_setup(&setup);
        let before = orbit;
        let c = controls(InteractionState::Presentation);
        orbit.advance(1.0, &c);
        orbit.zoom(2.0, &c);
        orbit.rotate(0.5, 0.5, &c);
        orbit.pan(Vec3::X, &c);
        assert_eq!(orbit, before);
    }

    #[test]
    fn zoom_is_clamped_to_bounds() {
        let setup = CameraSetup::from_config(&CameraConfig::default());
        let mut orbit = OrbitCamera::from_setup(&setup);
        let c = controls(InteractionState::Exploration);
        orbit.zoom(10.0, &c);
        assert_eq!(orbit.distance, 25.0);
        orbit.zoom(0.01, &c);
        assert_eq!(orbit.distance, 8.0);
    }

    #[test]
    fn auto_rotate_keeps_distance() {
        let setup = CameraSetup::from_config(&CameraConfig::default());
        let mut orbit = OrbitCamera::from_setup(&setup);
        let c = controls(InteractionState::Exploration);
        orbit.advance(5.0, &c);
        assert!(orbit.azimuth > 0.0);
        assert!(((orbit.eye() - orbit.target).length() - 12.0).abs() < 1e-4);
    }
}
