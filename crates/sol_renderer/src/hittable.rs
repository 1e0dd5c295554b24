//! Hittable trait and Intersection record for ray-object intersection.

use sol_math::{Ray, Vec3};

/// Record of a valid ray-object intersection.
///
/// A miss is `None`; there is no "invalid" intersection value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Distance from the ray origin along its direction (always >= 0)
    pub distance: f32,
    /// Unit surface normal at the hit point
    pub normal: Vec3,
}

impl Intersection {
    /// Build an intersection, rejecting non-finite or negative distances
    /// and normals that are not unit length.
    #[inline]
    pub fn new(distance: f32, normal: Vec3) -> Option<Self> {
        if !distance.is_finite() || distance < 0.0 || !normal.is_normalized() {
            return None;
        }
        Some(Self { distance, normal })
    }
}

/// Trait for shapes that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Intersect the ray with this shape.
    ///
    /// Returns the nearest non-negative hit, or `None`.
    fn intersect(&self, ray: &Ray) -> Option<Intersection>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection_rejects_bad_values() {
        assert!(Intersection::new(1.0, Vec3::Y).is_some());
        assert!(Intersection::new(0.0, Vec3::Y).is_some());
        assert!(Intersection::new(-1.0, Vec3::Y).is_none());
        assert!(Intersection::new(f32::INFINITY, Vec3::Y).is_none());
        assert!(Intersection::new(f32::NAN, Vec3::Y).is_none());
        assert!(Intersection::new(1.0, Vec3::ZERO).is_none());
        assert!(Intersection::new(1.0, Vec3::new(f32::NAN, 0.0, 0.0)).is_none());
    }
}
