//! Scene description types for SOL.
//!
//! A `SceneDesc` is the renderer-agnostic form of a scene: named materials,
//! shapes that refer to them by name, point lights and an optional camera.
//! It is what scene files deserialize into; the renderer turns it into
//! intersectable objects.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sol_math::Vec3;
use thiserror::Error;

use crate::material::{Color, Material};

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Invalid material '{name}': {reason}")]
    InvalidMaterial { name: String, reason: String },

    #[error("Invalid shape #{index}: {reason}")]
    InvalidShape { index: usize, reason: String },
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// A point light. No distance attenuation is applied.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec3,
    pub color: Color,
}

impl Light {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }
}

/// Pinhole camera placement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDesc {
    /// Eye position
    pub position: Vec3,
    /// Point the camera looks at
    pub look_at: Vec3,
    /// Approximate up direction
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            vfov: 90.0,
        }
    }
}

/// A primitive in a scene file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeDesc {
    /// Three vertices; the front face winds counter-clockwise.
    Triangle {
        vertices: [Vec3; 3],
        #[serde(default)]
        material: Option<String>,
    },
    /// A planar quad given as four corners in winding order.
    Plane {
        corners: [Vec3; 4],
        #[serde(default)]
        material: Option<String>,
    },
    Sphere {
        center: Vec3,
        radius: f32,
        #[serde(default)]
        material: Option<String>,
    },
}

impl ShapeDesc {
    /// Name of the material this shape uses, falling back to the
    /// per-shape default (`white` for flat shapes, `red` for spheres).
    pub fn material_name(&self) -> &str {
        match self {
            ShapeDesc::Triangle { material, .. } | ShapeDesc::Plane { material, .. } => {
                material.as_deref().unwrap_or("white")
            }
            ShapeDesc::Sphere { material, .. } => material.as_deref().unwrap_or("red"),
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            ShapeDesc::Triangle { vertices, .. } => {
                if vertices.iter().any(|v| !v.is_finite()) {
                    return Err("triangle vertex is not finite".to_string());
                }
            }
            ShapeDesc::Plane { corners, .. } => {
                if corners.iter().any(|v| !v.is_finite()) {
                    return Err("plane corner is not finite".to_string());
                }
            }
            ShapeDesc::Sphere { center, radius, .. } => {
                if !center.is_finite() {
                    return Err("sphere center is not finite".to_string());
                }
                if !radius.is_finite() || *radius <= 0.0 {
                    return Err(format!("sphere radius {radius} must be > 0"));
                }
            }
        }
        Ok(())
    }
}

/// A complete scene description.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDesc {
    /// Named materials. Preset names (`red`, `green`, `blue`, `white`)
    /// resolve even when absent and may be overridden here.
    pub materials: BTreeMap<String, Material>,

    /// Shapes in scene order. Order breaks ties in nearest-hit queries.
    pub objects: Vec<ShapeDesc>,

    /// Point lights in scene order.
    pub lights: Vec<Light>,

    /// Camera placement, if the file provides one.
    pub camera: Option<CameraDesc>,
}

impl SceneDesc {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a scene from a JSON string.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let scene: SceneDesc = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Load and validate a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let scene = Self::from_json_str(&json)?;

        log::info!(
            "Loaded scene {}: {} objects, {} lights",
            path.display(),
            scene.objects.len(),
            scene.lights.len()
        );
        Ok(scene)
    }

    /// Resolve a material name against this scene, then the presets.
    pub fn material(&self, name: &str) -> SceneResult<Material> {
        self.materials
            .get(name)
            .cloned()
            .or_else(|| Material::preset(name))
            .ok_or_else(|| SceneError::UnknownMaterial(name.to_string()))
    }

    /// Check materials, shapes and material references.
    pub fn validate(&self) -> SceneResult<()> {
        for (name, material) in &self.materials {
            material
                .validate()
                .map_err(|reason| SceneError::InvalidMaterial {
                    name: name.clone(),
                    reason,
                })?;
        }

        for (index, shape) in self.objects.iter().enumerate() {
            shape
                .validate()
                .map_err(|reason| SceneError::InvalidShape { index, reason })?;
            self.material(shape.material_name())?;
        }

        Ok(())
    }

    /// The demo scene: a box of six walls with two spheres and two lights.
    pub fn default_box() -> Self {
        let p = Vec3::new;
        let plane = |corners: [Vec3; 4], material: &str| ShapeDesc::Plane {
            corners,
            material: Some(material.to_string()),
        };
        let sphere = |center: Vec3, radius: f32, material: &str| ShapeDesc::Sphere {
            center,
            radius,
            material: Some(material.to_string()),
        };

        Self {
            materials: BTreeMap::new(),
            objects: vec![
                plane([p(-5.0, -5.0, 5.0), p(-5.0, 5.0, 5.0), p(5.0, 5.0, 5.0), p(5.0, -5.0, 5.0)], "blue"),
                plane([p(5.0, 5.0, -5.0), p(-5.0, 5.0, -5.0), p(-5.0, -5.0, -5.0), p(5.0, -5.0, -5.0)], "white"),
                plane([p(5.0, 5.0, 5.0), p(-5.0, 5.0, 5.0), p(-5.0, 5.0, -5.0), p(5.0, 5.0, -5.0)], "white"),
                plane([p(5.0, -5.0, -5.0), p(-5.0, -5.0, -5.0), p(-5.0, -5.0, 5.0), p(5.0, -5.0, 5.0)], "white"),
                plane([p(5.0, 5.0, 5.0), p(5.0, 5.0, -5.0), p(5.0, -5.0, -5.0), p(5.0, -5.0, 5.0)], "white"),
                plane([p(-5.0, -5.0, 5.0), p(-5.0, -5.0, -5.0), p(-5.0, 5.0, -5.0), p(-5.0, 5.0, 5.0)], "white"),
                sphere(p(2.5, 0.0, -3.0), 2.0, "red"),
                sphere(p(2.5, 0.0, 3.0), 2.0, "white"),
            ],
            lights: vec![
                Light::new(p(-3.0, -3.0, -3.0), Color::ONE),
                Light::new(p(3.0, 3.0, 3.0), Color::ONE),
            ],
            // Slightly jiggled off the axes so no ray runs exactly along a wall
            camera: Some(CameraDesc {
                position: p(-4.999, 0.001, 0.001),
                look_at: p(0.001, -0.01, -0.001),
                up: Vec3::Y,
                vfov: 90.0,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_box_is_valid() {
        let scene = SceneDesc::default_box();
        assert!(scene.validate().is_ok());
        assert_eq!(scene.objects.len(), 8);
        assert_eq!(scene.lights.len(), 2);
        assert!(scene.camera.is_some());
    }

    #[test]
    fn test_parse_scene_json() {
        let json = r#"{
            "materials": {
                "mirror": { "diffuse": [0.1, 0.1, 0.1], "reflectivity": 1.0 }
            },
            "objects": [
                { "type": "sphere", "center": [0, 0, 0], "radius": 1, "material": "mirror" },
                { "type": "triangle", "vertices": [[0, 0, -2], [1, 0, -2], [0, 1, -2]] },
                { "type": "plane", "corners": [[-1, -1, -3], [1, -1, -3], [1, 1, -3], [-1, 1, -3]], "material": "blue" }
            ],
            "lights": [ { "position": [0, 5, 0], "color": [1, 1, 1] } ],
            "camera": { "position": [0, 0, 5] }
        }"#;

        let scene = SceneDesc::from_json_str(json).unwrap();
        assert_eq!(scene.objects.len(), 3);
        assert_eq!(scene.objects[1].material_name(), "white");
        assert_eq!(scene.material("mirror").unwrap().reflectivity, 1.0);

        let camera = scene.camera.unwrap();
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(camera.vfov, 90.0);
        assert_eq!(camera.up, Vec3::Y);
    }

    #[test]
    fn test_sphere_defaults_to_red() {
        let shape = ShapeDesc::Sphere {
            center: Vec3::ZERO,
            radius: 1.0,
            material: None,
        };
        assert_eq!(shape.material_name(), "red");
    }

    #[test]
    fn test_unknown_material() {
        let json = r#"{
            "objects": [ { "type": "sphere", "center": [0, 0, 0], "radius": 1, "material": "gold" } ]
        }"#;

        match SceneDesc::from_json_str(json) {
            Err(SceneError::UnknownMaterial(name)) => assert_eq!(name, "gold"),
            other => panic!("expected unknown material, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_sphere_radius() {
        let json = r#"{
            "objects": [ { "type": "sphere", "center": [0, 0, 0], "radius": -2 } ]
        }"#;

        assert!(matches!(
            SceneDesc::from_json_str(json),
            Err(SceneError::InvalidShape { index: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_material_reflectivity() {
        let json = r#"{
            "materials": { "bad": { "reflectivity": 2.0 } }
        }"#;

        assert!(matches!(
            SceneDesc::from_json_str(json),
            Err(SceneError::InvalidMaterial { .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            SceneDesc::from_json_str("{ not json"),
            Err(SceneError::Json(_))
        ));
    }

    #[test]
    fn test_override_preset() {
        let mut scene = SceneDesc::new();
        let mut red = Material::red();
        red.reflectivity = 0.0;
        scene.materials.insert("red".to_string(), red.clone());

        assert_eq!(scene.material("red").unwrap(), red);
        assert_eq!(scene.material("blue").unwrap(), Material::blue());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            SceneDesc::load("/nonexistent/scene.json"),
            Err(SceneError::Io(_))
        ));
    }
}
