//! Renderable scenes and the nearest-hit query.

use std::collections::HashMap;
use std::sync::Arc;

use crate::hittable::{Hittable, Intersection};
use crate::{Object, Plane, Sphere, Triangle};
use sol_core::{Light, Material, SceneDesc, SceneResult, ShapeDesc};
use sol_math::Ray;

/// What the shading code needs from a scene.
pub trait World: Send + Sync {
    /// Find the closest object hit by the ray.
    ///
    /// Ties keep the object encountered first.
    fn find_nearest(&self, ray: &Ray) -> Option<(&Object, Intersection)>;

    /// Point lights in scene order.
    fn lights(&self) -> &[Light];
}

/// An owned list of objects and lights, read-only while rendering.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<Object>,
    lights: Vec<Light>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene from prepared objects and lights.
    pub fn with_contents(objects: Vec<Object>, lights: Vec<Light>) -> Self {
        Self { objects, lights }
    }

    /// Add an object to the scene.
    pub fn push(&mut self, object: impl Into<Object>) {
        self.objects.push(object.into());
    }

    /// Add a light to the scene.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// Build a scene from its description.
    ///
    /// Shapes naming the same material share one `Arc<Material>`.
    pub fn from_desc(desc: &SceneDesc) -> SceneResult<Self> {
        let mut materials: HashMap<&str, Arc<Material>> = HashMap::new();
        let mut scene = Scene::new();

        for shape in &desc.objects {
            let name = shape.material_name();
            let material = match materials.get(name) {
                Some(material) => material.clone(),
                None => {
                    let material = Arc::new(desc.material(name)?);
                    materials.insert(name, material.clone());
                    material
                }
            };

            let object: Object = match shape {
                ShapeDesc::Triangle { vertices: [a, b, c], .. } => {
                    let triangle = Triangle::new(*a, *b, *c, material);
                    if triangle.is_degenerate() {
                        log::warn!("Degenerate triangle {:?} will never be hit", triangle.vertices());
                    }
                    triangle.into()
                }
                ShapeDesc::Plane { corners: [a, b, c, d], .. } => {
                    let plane = Plane::new(*a, *b, *c, *d, material);
                    if plane.triangles().iter().any(|t| t.is_degenerate()) {
                        log::warn!("Plane with corners {:?} has a degenerate half", [a, b, c, d]);
                    }
                    plane.into()
                }
                ShapeDesc::Sphere { center, radius, .. } => {
                    Sphere::new(*center, *radius, material).into()
                }
            };
            scene.push(object);
        }

        for light in &desc.lights {
            scene.add_light(*light);
        }

        log::debug!(
            "Built scene: {} objects, {} lights, {} materials",
            scene.objects.len(),
            scene.lights.len(),
            materials.len()
        );

        Ok(scene)
    }
}

impl World for Scene {
    fn find_nearest(&self, ray: &Ray) -> Option<(&Object, Intersection)> {
        let mut closest: Option<(&Object, Intersection)> = None;

        for object in &self.objects {
            if let Some(hit) = object.intersect(ray) {
                let closer = match closest {
                    Some((_, best)) => hit.distance < best.distance,
                    None => true,
                };
                if closer {
                    closest = Some((object, hit));
                }
            }
        }

        closest
    }

    fn lights(&self) -> &[Light] {
        &self.lights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use sol_math::Vec3;

    fn red() -> Arc<Material> {
        Arc::new(Material::red())
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = Scene::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));
        assert!(scene.find_nearest(&ray).is_none());
    }

    #[test]
    fn test_nearest_of_two_spheres() {
        let mut scene = Scene::new();
        scene.push(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, red()));
        scene.push(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, red()));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let (object, hit) = scene.find_nearest(&ray).unwrap();

        assert!((hit.distance - 4.0).abs() < 1e-5);
        match object {
            Object::Sphere(sphere) => assert_eq!(sphere.center(), Vec3::new(0.0, 0.0, -5.0)),
            other => panic!("expected sphere, got {other:?}"),
        }
    }

    #[test]
    fn test_tie_keeps_first() {
        let mut scene = Scene::new();
        scene.push(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, red()));
        scene.push(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, Arc::new(Material::blue())));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let (object, _) = scene.find_nearest(&ray).unwrap();
        assert_eq!(*object.material(), Material::red());
    }

    #[test]
    fn test_nearest_is_exhaustive() {
        let scene = Scene::from_desc(&SceneDesc::default_box()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let origin = Vec3::new(
                rng.gen_range(-4.5..4.5),
                rng.gen_range(-4.5..4.5),
                rng.gen_range(-4.5..4.5),
            );
            let direction = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            let ray = Ray::new(origin, direction);

            let nearest = scene.find_nearest(&ray).map(|(_, hit)| hit.distance);
            for object in scene.objects() {
                if let Some(hit) = object.intersect(&ray) {
                    let best = nearest.expect("an object was hit");
                    assert!(best <= hit.distance);
                }
            }
        }
    }

    #[test]
    fn test_normals_are_unit() {
        let scene = Scene::from_desc(&SceneDesc::default_box()).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..500 {
            let origin = Vec3::new(rng.gen_range(-4.0..4.0), rng.gen_range(-4.0..4.0), 0.0);
            let direction = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            let ray = Ray::new(origin, direction);

            for object in scene.objects() {
                if let Some(hit) = object.intersect(&ray) {
                    assert!((hit.normal.length() - 1.0).abs() < 1e-5);
                }
            }
        }
    }

    #[test]
    fn test_from_desc_shares_materials() {
        let desc = SceneDesc::default_box();
        let scene = Scene::from_desc(&desc).unwrap();

        assert_eq!(scene.objects().len(), desc.objects.len());
        assert_eq!(scene.lights().len(), 2);
        assert_eq!(*scene.objects()[0].material(), Material::blue());
        assert_eq!(*scene.objects()[6].material(), Material::red());

        // Walls 1..=5 all use "white" and point at the same allocation
        let white: Vec<&Material> = scene.objects()[1..6].iter().map(|o| o.material()).collect();
        assert!(white.windows(2).all(|pair| std::ptr::eq(pair[0], pair[1])));
    }

    #[test]
    fn test_from_desc_unknown_material() {
        let mut desc = SceneDesc::new();
        desc.objects.push(ShapeDesc::Sphere {
            center: Vec3::ZERO,
            radius: 1.0,
            material: Some("nope".to_string()),
        });
        assert!(Scene::from_desc(&desc).is_err());
    }
}
