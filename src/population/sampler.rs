use std::f32::consts::TAU;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::util::color::{hsl_to_rgb, Rgb};

/// Map three uniform numbers in `[0, 1)` to a point inside a sphere of
/// `radius` centered at the origin.
///
/// The cube root on `u1` keeps density constant per unit volume, and the
/// `acos` on `u2` keeps directions uniform over the sphere instead of
/// bunching at the poles.
#[must_use]
pub fn sample_in_sphere(radius: f32, u1: f32, u2: f32, u3: f32) -> Vec3 {
    let r = radius * u1.cbrt();
    let phi = (2.0 * u2 - 1.0).clamp(-1.0, 1.0).acos();
    let theta = TAU * u3;
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vec3::new(
        r * sin_phi * cos_theta,
        r * sin_phi * sin_theta,
        r * cos_phi,
    )
}

/// One generated element before classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Position inside the generation volume.
    pub position: Vec3,
    /// Display color.
    pub color: Rgb,
}

impl Sample {
    /// Distance from the origin.
    #[inline]
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.position.length()
    }
}

/// Draws volume-uniform samples inside a sphere.
pub struct VolumeSampler<R = StdRng> {
    rng: R,
    radius: f32,
}

impl VolumeSampler<StdRng> {
    /// Sampler seeded with `seed`, or from OS entropy when `None`.
    #[must_use]
    pub fn seeded(radius: f32, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self { rng, radius }
    }
}

impl<R: Rng> VolumeSampler<R> {
    /// Sampler over a caller-provided RNG.
    #[must_use]
    pub fn with_rng(rng: R, radius: f32) -> Self {
        Self { rng, radius }
    }

    /// Radius of the generation volume.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Draw a position.
    pub fn next_position(&mut self) -> Vec3 {
        let u1: f32 = self.rng.random();
        let u2: f32 = self.rng.random();
        let u3: f32 = self.rng.random();
        sample_in_sphere(self.radius, u1, u2, u3)
    }

    /// Draw a fully saturated, mid-lightness color of random hue.
    pub fn next_color(&mut self) -> Rgb {
        hsl_to_rgb(self.rng.random(), 1.0, 0.5)
    }

    /// Draw a position, then its color.
    pub fn next_sample(&mut self) -> Sample {
        let position = self.next_position();
        let color = self.next_color();
        Sample { position, color }
    }
}

impl<R: Rng> Iterator for VolumeSampler<R> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        Some(self.next_sample())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extreme_inputs_stay_inside_radius() {
        for &(u1, u2, u3) in &[
            (0.0, 0.0, 0.0),
            (0.999_999, 0.999_999, 0.999_999),
            (0.5, 0.5, 0.5),
            (0.999_999, 0.0, 0.25),
        ] {
            let p = sample_in_sphere(10.0, u1, u2, u3);
            assert!(p.length() <= 10.0 + 1e-4, "{p:?}");
        }
        assert_eq!(sample_in_sphere(10.0, 0.0, 0.3, 0.7), Vec3::ZERO);
    }

    #[test]
    fn radius_follows_cube_root() {
        let p = sample_in_sphere(8.0, 0.125, 0.5, 0.0);
        assert!((p.length() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn polar_mapping_is_uniform_in_cos_phi() {
        // u2 = 0 -> south pole, u2 = 1 -> north pole, u2 = 0.5 -> equator
        let south = sample_in_sphere(1.0, 0.999_999, 0.0, 0.0);
        let equator = sample_in_sphere(1.0, 0.999_999, 0.5, 0.0);
        assert!((south.z + 1.0).abs() < 1e-3);
        assert!(equator.z.abs() < 1e-3);
    }

    #[test]
    fn seeded_samplers_repeat() {
        let a: Vec<Sample> =
            VolumeSampler::seeded(300.0, Some(9)).take(16).collect();
        let b: Vec<Sample> =
            VolumeSampler::seeded(300.0, Some(9)).take(16).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn sub_sphere_counts_scale_with_cube_of_radius() {
        let n = 40_000;
        let radius = 100.0;
        let samples: Vec<f32> = VolumeSampler::seeded(radius, Some(42))
            .take(n)
            .map(|s| Sample::distance(&s))
            .collect();
        assert!(samples.iter().all(|&d| d <= radius + 1e-3));

        for frac in [0.25_f32, 0.5, 0.75] {
            let inside =
                samples.iter().filter(|&&d| d < radius * frac).count();
            let observed = inside as f32 / n as f32;
            let expected = frac.powi(3);
            assert!(
                (observed - expected).abs() < 0.01,
                "r = {frac}R: observed {observed}, expected {expected}"
            );
        }
    }

    #[test]
    fn octants_are_balanced() {
        let n = 16_000;
        let mut counts = [0usize; 8];
        for s in VolumeSampler::seeded(1.0, Some(3)).take(n) {
            let p = s.position;
            let idx = usize::from(p.x > 0.0)
                | (usize::from(p.y > 0.0) << 1)
                | (usize::from(p.z > 0.0) << 2);
            counts[idx] += 1;
        }
        for c in counts {
            let share = c as f32 / n as f32;
            assert!((share - 0.125).abs() < 0.015, "{counts:?}");
        }
    }
}
