//! SOL Renderer - Whitted-style CPU ray tracing
//!
//! A recursive ray tracer with direct Blinn-Phong lighting, hard or
//! sampled soft shadows, and mirror or glossy reflection.
//!
//! The nearest-hit query is a linear scan over the scene's objects; there
//! is no acceleration structure.

mod hittable;
mod triangle;
mod plane;
mod sphere;
mod object;
mod scene;
mod sampling;
mod shading;
mod camera;
mod renderer;
mod output;

pub use hittable::{Hittable, Intersection};
pub use triangle::Triangle;
pub use plane::Plane;
pub use sphere::Sphere;
pub use object::Object;
pub use scene::{Scene, World};
pub use sampling::{gen_f32, gen_signed_f32, jitter, random_unit_vector};
pub use shading::{background, reflect, shade, MAX_RECURSION_DEPTH, MIN_THROUGHPUT};
pub use camera::Camera;
pub use renderer::{render, render_pixel, render_with_cancel, ImageBuffer, RenderConfig, RenderError};
pub use output::{max_luminance, save_image, tonemap};

/// Re-export the scene description and math types this crate consumes
pub use sol_core::{Color, Light, Material};
pub use sol_math::{Ray, Vec3};
