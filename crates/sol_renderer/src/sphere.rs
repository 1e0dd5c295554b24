//! Sphere primitive for ray tracing.

use std::sync::Arc;

use crate::hittable::{Hittable, Intersection};
use sol_core::Material;
use sol_math::{Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    /// Radius squared; the radius itself is never needed
    radius_squared: f32,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius_squared: radius * radius,
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let d = ray.direction();
        let oc = ray.origin() - self.center;

        // A t^2 + B t + C = 0
        let a = d.dot(d);
        let b = 2.0 * d.dot(oc);
        let c = oc.dot(oc) - self.radius_squared;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let near = (-b - sqrtd) / (2.0 * a);
        let far = (-b + sqrtd) / (2.0 * a);

        // Sphere entirely behind the origin
        if near < 0.0 && far < 0.0 {
            return None;
        }

        let distance = if near > 0.0 { near } else { far };
        if !distance.is_finite() {
            return None;
        }

        let normal = (ray.at(distance) - self.center).try_normalize()?;
        Intersection::new(distance, normal)
    }
}
