//! Closed set of scene primitives.

use crate::hittable::{Hittable, Intersection};
use crate::{Plane, Sphere, Triangle};
use sol_core::Material;
use sol_math::Ray;

/// Any primitive that can live in a scene.
#[derive(Debug, Clone)]
pub enum Object {
    Triangle(Triangle),
    Plane(Plane),
    Sphere(Sphere),
}

impl Object {
    /// Material shared by this object.
    pub fn material(&self) -> &Material {
        match self {
            Object::Triangle(triangle) => triangle.material(),
            Object::Plane(plane) => plane.material(),
            Object::Sphere(sphere) => sphere.material(),
        }
    }
}

impl Hittable for Object {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        match self {
            Object::Triangle(triangle) => triangle.intersect(ray),
            Object::Plane(plane) => plane.intersect(ray),
            Object::Sphere(sphere) => sphere.intersect(ray),
        }
    }
}

impl From<Triangle> for Object {
    fn from(triangle: Triangle) -> Self {
        Object::Triangle(triangle)
    }
}

impl From<Plane> for Object {
    fn from(plane: Plane) -> Self {
        Object::Plane(plane)
    }
}

impl From<Sphere> for Object {
    fn from(sphere: Sphere) -> Self {
        Object::Sphere(sphere)
    }
}
