//! Recursive Whitted-style shading.
//!
//! Each call finds the nearest hit, adds ambient plus shadow-tested
//! Blinn-Phong terms for every light, and recurses along the mirror
//! direction while the depth budget lasts.

use rand::RngCore;
use sol_core::Color;
use sol_math::{Ray, Vec3};

use crate::renderer::RenderConfig;
use crate::sampling::jitter;
use crate::scene::World;

/// Color returned for rays that escape the scene or run out of depth.
///
/// The component-wise absolute value of the ray direction.
#[inline]
pub fn background(ray: &Ray) -> Color {
    ray.direction().abs()
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Reflection stops once the accumulated reflectivity along a path drops
/// below this weight.
pub const MIN_THROUGHPUT: f32 = 1e-4;

/// Hard limit on reflection bounces per primary ray, whatever the budget.
pub const MAX_RECURSION_DEPTH: i32 = 64;

/// Energy and bounce count carried down one reflection path.
#[derive(Clone, Copy, Debug)]
struct Path {
    throughput: f32,
    bounces: i32,
}

impl Path {
    const PRIMARY: Path = Path {
        throughput: 1.0,
        bounces: 0,
    };

    /// The path after reflecting off a surface, if it is still worth tracing.
    fn reflected(self, reflectivity: f32) -> Option<Path> {
        let next = Path {
            throughput: self.throughput * reflectivity,
            bounces: self.bounces + 1,
        };
        (next.throughput >= MIN_THROUGHPUT && next.bounces <= MAX_RECURSION_DEPTH).then_some(next)
    }
}

/// Compute the color seen along `ray`.
///
/// `depth` is the number of reflection bounces still allowed. A negative
/// budget returns the background without querying the scene. Reflection
/// also ends early when the path's accumulated reflectivity falls below
/// [`MIN_THROUGHPUT`] or after [`MAX_RECURSION_DEPTH`] bounces.
pub fn shade(
    world: &dyn World,
    ray: &Ray,
    depth: i32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    trace(world, ray, depth, Path::PRIMARY, config, rng)
}

fn trace(
    world: &dyn World,
    ray: &Ray,
    depth: i32,
    path: Path,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    if depth < 0 {
        return background(ray);
    }

    let Some((object, hit)) = world.find_nearest(ray) else {
        return background(ray);
    };

    let material = object.material();
    let normal = hit.normal;
    let position = ray.at(hit.distance);
    // Secondary rays start `bias` off the surface along the normal
    let offset_origin = position + normal * config.bias;
    let view = -ray.direction();

    let mut color = Color::ZERO;

    let shadow_samples = config.samples_at_depth(config.shadow_samples, depth);
    let shadow_weight = 1.0 / shadow_samples as f32;

    for light in world.lights() {
        let to_light = light.position - position;
        let dist_to_light = to_light.length();
        let light_dir = to_light.normalize_or_zero();
        let half = (view + light_dir).normalize_or_zero();

        let diffuse = material.diffuse * light.color * normal.dot(light_dir).max(0.0);
        let specular =
            material.specular * light.color * normal.dot(half).max(0.0).powf(material.shininess);
        let direct = diffuse.abs() + specular.abs();

        for _ in 0..shadow_samples {
            let direction = jitter(light_dir, shadow_samples, config.shadow_spread, rng);
            let shadow_ray = Ray::new(offset_origin, direction);
            let occluded = world
                .find_nearest(&shadow_ray)
                .is_some_and(|(_, blocker)| blocker.distance < dist_to_light);

            if !occluded {
                color += direct * shadow_weight;
            }
        }

        color += (light.color * material.ambient).abs();
    }

    let next_path = material
        .is_reflective()
        .then(|| path.reflected(material.reflectivity))
        .flatten();

    if let Some(next_path) = next_path {
        let mirror = reflect(ray.direction(), normal);
        let samples = config.samples_at_depth(config.reflection_samples, depth);
        let weight = material.reflectivity / samples as f32;

        for _ in 0..samples {
            let direction = jitter(mirror, samples, config.reflection_spread, rng);
            let reflected_ray = Ray::new(offset_origin, direction);
            color += trace(world, &reflected_ray, depth - 1, next_path, config, rng) * weight;
        }
    }

    color
}
