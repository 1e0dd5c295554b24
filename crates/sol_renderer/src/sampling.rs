//! Random direction sampling for soft shadows and glossy reflection.

use rand::{Rng, RngCore};
use sol_math::Vec3;

/// Uniform float in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform float in [-1, 1).
#[inline]
pub fn gen_signed_f32(rng: &mut dyn RngCore) -> f32 {
    gen_f32(rng) * 2.0 - 1.0
}

/// Generate a uniformly distributed random unit vector.
///
/// Rejection-samples a point in the 4D unit ball and maps it onto the
/// sphere (Cook 1957), which avoids any trigonometry.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let x0 = gen_signed_f32(rng);
        let x1 = gen_signed_f32(rng);
        let x2 = gen_signed_f32(rng);
        let x3 = gen_signed_f32(rng);

        let (s0, s1, s2, s3) = (x0 * x0, x1 * x1, x2 * x2, x3 * x3);
        let len_sq = s0 + s1 + s2 + s3;
        if len_sq >= 1.0 || len_sq < 1e-12 {
            continue;
        }

        let inv = 1.0 / len_sq;
        return Vec3::new(
            2.0 * (x1 * x3 + x0 * x2) * inv,
            2.0 * (x2 * x3 - x0 * x1) * inv,
            (s0 + s3 - s1 - s2) * inv,
        );
    }
}

/// Perturb a unit direction for one of `samples` stochastic rays.
///
/// With a single sample or no spread the direction is returned untouched and
/// the generator is not advanced, so the result matches unsampled tracing.
pub fn jitter(direction: Vec3, samples: u32, spread: f32, rng: &mut dyn RngCore) -> Vec3 {
    if samples <= 1 || spread == 0.0 {
        return direction;
    }

    (direction + spread * random_unit_vector(rng))
        .try_normalize()
        .unwrap_or(direction)
}
