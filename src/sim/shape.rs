//! Asteroid silhouette interpolation
//!
//! An asteroid's outline is a radial function of the angle around its centre.
//! A handful of random radius multipliers act as anchors at equal angular
//! steps; between anchors the multiplier is blended with a smoothstep curve,
//! giving a closed, lumpy outline without sharp corners.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::polar_to_cartesian;

/// Default number of anchors around the perimeter
pub const CONTROL_POINTS: usize = 8;
/// Smallest random radius multiplier
pub const CONTROL_MIN: f32 = 0.8;
/// Largest random radius multiplier
pub const CONTROL_MAX: f32 = 1.2;
/// Points in the drawn outline polygon
pub const SILHOUETTE_SAMPLES: usize = 32;
/// Angular buckets (one per degree) in the deformation lookup table
pub const ANGLE_BUCKETS: usize = 360;

/// Radius multipliers at equal angular anchors.
///
/// Holds N values plus a copy of the first appended at the end, so segment
/// `i` always blends `values[i]` and `values[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoints {
    values: Vec<f32>,
}

impl ControlPoints {
    /// Draw `n` multipliers uniformly from [`CONTROL_MIN`, `CONTROL_MAX`]
    pub fn random<R: Rng>(rng: &mut R, n: usize) -> Self {
        let values: Vec<f32> = (0..n.max(1))
            .map(|_| rng.random_range(CONTROL_MIN..=CONTROL_MAX))
            .collect();
        Self::from_values(&values)
    }

    /// Build from explicit multipliers (closing point is appended here).
    ///
    /// An empty slice yields a unit circle.
    pub fn from_values(values: &[f32]) -> Self {
        let mut values = if values.is_empty() {
            vec![1.0]
        } else {
            values.to_vec()
        };
        values.push(values[0]);
        Self { values }
    }

    /// Number of anchors (excludes the closing duplicate)
    pub fn len(&self) -> usize {
        self.values.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All stored values, closing duplicate included
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Largest multiplier (bounds the outline's extent)
    pub fn max_value(&self) -> f32 {
        self.values.iter().copied().fold(0.0, f32::max)
    }

    /// Radius multiplier at perimeter progress `t`.
    ///
    /// `t` is wrapped into [0, 1); exactly 1.0 resolves through the closing
    /// point and equals `interpolate(0.0)`.
    pub fn interpolate(&self, t: f32) -> f32 {
        let n = self.len();
        if t >= 1.0 && t - 1.0 < f32::EPSILON {
            return self.values[n];
        }

        let segment = t.rem_euclid(1.0) * n as f32;
        let i = (segment as usize).min(n - 1);
        let f = (segment - i as f32).clamp(0.0, 1.0);
        let f = f * f * (3.0 - 2.0 * f);

        self.values[i] * (1.0 - f) + self.values[i + 1] * f
    }

    /// Outline polygon in world space.
    ///
    /// Sample `i` sits at angle `TAU * i / samples` (measured from +x, then
    /// turned by `rotation`) at distance `radius * interpolate(i / samples)`.
    pub fn silhouette(&self, center: Vec2, radius: f32, rotation: f32, samples: usize) -> Vec<Vec2> {
        let turn = Vec2::from_angle(rotation);
        self.local_silhouette(radius, samples)
            .into_iter()
            .map(|p| center + turn.rotate(p))
            .collect()
    }

    /// Outline polygon relative to the centre, unrotated
    pub fn local_silhouette(&self, radius: f32, samples: usize) -> Vec<Vec2> {
        (0..samples)
            .map(|i| {
                let t = i as f32 / samples as f32;
                polar_to_cartesian(radius * self.interpolate(t), t * TAU)
            })
            .collect()
    }

    /// Outline radius for each whole degree, used by the compositor
    pub fn radius_table(&self, radius: f32) -> Vec<f32> {
        (0..ANGLE_BUCKETS)
            .map(|i| radius * self.interpolate(i as f32 / ANGLE_BUCKETS as f32))
            .collect()
    }
}

/// Bucket index for an angle in radians, clamped to the table
#[inline]
pub fn angle_bucket(angle: f32) -> usize {
    let degrees = angle.rem_euclid(TAU).to_degrees();
    (degrees as usize).min(ANGLE_BUCKETS - 1)
}
