//! Background star shell surrounding the scene.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::layout::Rgb;

const STARFIELD_SEED_SALT: u64 = 0x5747_4152_4649_454C;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarfieldParams {
    /// Inner radius of the shell.
    pub radius: f32,
    /// Thickness of the shell beyond `radius`.
    pub depth: f32,
    pub count: usize,
    /// Point size multiplier.
    pub factor: f32,
    pub saturation: f32,
    pub fade: bool,
    /// Twinkle speed used by the renderer.
    pub speed: f32,
}

impl Default for StarfieldParams {
    fn default() -> Self {
        Self {
            radius: 40.0,
            depth: 40.0,
            count: 2000,
            factor: 3.0,
            saturation: 0.5,
            fade: true,
            speed: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarPoint {
    pub position: Vec3,
    pub color: Rgb,
    pub size: f32,
}

impl StarfieldParams {
    /// Scatters the points, from the outer edge of the shell inwards, with
    /// hues sweeping the whole wheel across the sequence.
    pub fn generate(&self, seed: u64) -> Vec<StarPoint> {
        let mut rng = StdRng::seed_from_u64(seed ^ STARFIELD_SEED_SALT);
        let increment = self.depth / self.count.max(1) as f32;
        let mut radius = self.radius + self.depth;

        (0..self.count)
            .map(|i| {
                radius -= increment * rng.gen::<f32>();
                let polar = (1.0 - 2.0 * rng.gen::<f32>()).clamp(-1.0, 1.0).acos();
                let azimuth = TAU * rng.gen::<f32>();
                let (sin_polar, cos_polar) = polar.sin_cos();
                let (sin_az, cos_az) = azimuth.sin_cos();
                StarPoint {
                    position: Vec3::new(sin_polar * sin_az, cos_polar, sin_polar * cos_az)
                        * radius,
                    color: Rgb::from_hsl(
                        i as f32 / self.count as f32 * 360.0,
                        self.saturation,
                        0.9,
                    ),
                    size: (0.5 + 0.5 * rng.gen::<f32>()) * self.factor,
                }
            })
            .collect()
    }
}

/// Shell parameters together with the points scattered for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Starfield {
    pub params: StarfieldParams,
    pub points: Vec<StarPoint>,
}

impl Starfield {
    pub fn generate(params: StarfieldParams, seed: u64) -> Self {
        Self {
            points: params.generate(seed),
            params,
        }
    }
}
