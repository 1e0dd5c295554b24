//! Planar quad primitive built from two triangles.

use std::sync::Arc;

use crate::hittable::{Hittable, Intersection};
use crate::triangle::Triangle;
use sol_core::Material;
use sol_math::{Ray, Vec3};

/// A planar quad `a b c d`, split along the `a c` diagonal.
///
/// Each half uses strict edge tests, so a ray passing exactly through the
/// shared `a c` diagonal misses both triangles and the quad.
#[derive(Debug, Clone)]
pub struct Plane {
    first: Triangle,
    second: Triangle,
    material: Arc<Material>,
}

impl Plane {
    /// Create a quad from four corners in winding order.
    pub fn new(a: Vec3, b: Vec3, c: Vec3, d: Vec3, material: Arc<Material>) -> Self {
        Self {
            first: Triangle::new(a, b, c, material.clone()),
            second: Triangle::new(a, c, d, material.clone()),
            material,
        }
    }

    /// Normal of the quad, taken from its first triangle.
    pub fn normal(&self) -> Vec3 {
        self.first.normal()
    }

    pub fn triangles(&self) -> [&Triangle; 2] {
        [&self.first, &self.second]
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

impl Hittable for Plane {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        // A planar quad is hit by at most one half, except on the diagonal
        self.first
            .intersect(ray)
            .or_else(|| self.second.intersect(ray))
    }
}
