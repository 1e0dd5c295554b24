//! Triangle primitive for ray tracing.
//!
//! Uses a ray-plane intersection followed by an inside-outside test against
//! each edge. Vertices must wind counter-clockwise around the front face.

use std::sync::Arc;

use crate::hittable::{Hittable, Intersection};
use sol_core::Material;
use sol_math::{Ray, Vec3};

/// A triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Vertices
    a: Vec3,
    b: Vec3,
    c: Vec3,
    /// Pre-computed face normal (unit length, or zero when degenerate)
    normal: Vec3,
    /// Material
    material: Arc<Material>,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(a: Vec3, b: Vec3, c: Vec3, material: Arc<Material>) -> Self {
        // Zero-area triangles get a zero normal and never report a hit
        let normal = (a - b).cross(b - c).normalize_or_zero();

        Self {
            a,
            b,
            c,
            normal,
            material,
        }
    }

    /// Face normal. Zero for a degenerate triangle.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.a, self.b, self.c]
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// True if the vertices are collinear or coincident.
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vec3::ZERO
    }

    /// Distance along the ray to the triangle, if it is hit.
    fn hit_distance(&self, ray: &Ray) -> Option<f32> {
        if self.is_degenerate() {
            return None;
        }

        let n = self.normal;
        let t = (self.a - ray.origin()).dot(n) / ray.direction().dot(n);

        // Parallel rays divide by zero and land here as inf or NaN
        if !t.is_finite() || t < 0.0 {
            return None;
        }

        let x = ray.at(t);
        let inside = (self.b - self.a).cross(x - self.a).dot(n) > 0.0
            && (self.c - self.b).cross(x - self.b).dot(n) > 0.0
            && (self.a - self.c).cross(x - self.c).dot(n) > 0.0;

        inside.then_some(t)
    }
}

impl Hittable for Triangle {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let distance = self.hit_distance(ray)?;
        Intersection::new(distance, self.normal)
    }
}
