//! Blinn-Phong surface materials.

use serde::{Deserialize, Serialize};
use sol_math::Vec3;

/// Color type alias (RGB, unbounded until tone mapping)
pub type Color = Vec3;

/// A Blinn-Phong material with a mirror reflection term.
///
/// Materials are immutable once built and shared between every primitive
/// that uses them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Opacity (0=transparent, 1=opaque). Carried for scene files, not shaded.
    pub alpha: f32,

    /// Ambient color, scaled by each light's color
    pub ambient: Color,

    /// Diffuse color
    pub diffuse: Color,

    /// Specular color
    pub specular: Color,

    /// Blinn-Phong exponent applied to `dot(normal, half_vector)`
    pub shininess: f32,

    /// Weight of the mirror reflection term, in [0, 1]. Zero disables it.
    pub reflectivity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            ambient: Color::ZERO,
            diffuse: Color::ZERO,
            specular: Color::ZERO,
            shininess: 0.0,
            reflectivity: 0.0,
        }
    }
}

impl Material {
    /// Create a fully specified material.
    pub fn new(
        ambient: Color,
        diffuse: Color,
        specular: Color,
        shininess: f32,
        reflectivity: f32,
    ) -> Self {
        Self {
            alpha: 1.0,
            ambient,
            diffuse,
            specular,
            shininess,
            reflectivity,
        }
    }

    pub fn red() -> Self {
        Self::new(
            Color::new(0.1, 0.0, 0.0),
            Color::new(1.0, 0.0, 0.0),
            Color::splat(0.1),
            20.0,
            0.5,
        )
    }

    pub fn green() -> Self {
        Self::new(
            Color::new(0.1, 0.0, 0.0),
            Color::new(0.0, 1.0, 0.0),
            Color::splat(0.1),
            20.0,
            0.5,
        )
    }

    pub fn blue() -> Self {
        Self::new(
            Color::ZERO,
            Color::new(0.0, 0.0, 1.0),
            Color::splat(0.1),
            20.0,
            0.5,
        )
    }

    pub fn white() -> Self {
        Self::new(
            Color::splat(0.1),
            Color::ONE,
            Color::splat(0.1),
            20.0,
            0.1,
        )
    }

    /// Look up one of the built-in presets by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "red" => Some(Self::red()),
            "green" => Some(Self::green()),
            "blue" => Some(Self::blue()),
            "white" => Some(Self::white()),
            _ => None,
        }
    }

    /// Check if the reflection term contributes at all.
    pub fn is_reflective(&self) -> bool {
        self.reflectivity > 0.0
    }

    /// Check the material's numeric ranges.
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        let colors = [
            ("ambient", self.ambient),
            ("diffuse", self.diffuse),
            ("specular", self.specular),
        ];
        for (name, color) in colors {
            if !color.is_finite() {
                return Err(format!("{name} color is not finite"));
            }
        }
        if !(0.0..=1.0).contains(&self.reflectivity) {
            return Err(format!(
                "reflectivity {} is outside [0, 1]",
                self.reflectivity
            ));
        }
        if !self.shininess.is_finite() || self.shininess < 0.0 {
            return Err(format!("shininess {} must be >= 0", self.shininess));
        }
        if !self.alpha.is_finite() {
            return Err("alpha is not finite".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for name in ["red", "green", "blue", "white"] {
            let material = Material::preset(name).unwrap();
            assert!(material.validate().is_ok(), "{name} should validate");
        }
        assert!(Material::preset("chartreuse").is_none());
    }

    #[test]
    fn test_reflectivity_range() {
        let mut material = Material::white();
        material.reflectivity = 1.5;
        assert!(material.validate().is_err());

        material.reflectivity = -0.1;
        assert!(material.validate().is_err());

        material.reflectivity = 0.0;
        assert!(material.validate().is_ok());
        assert!(!material.is_reflective());
    }

    #[test]
    fn test_non_finite_color_rejected() {
        let mut material = Material::red();
        material.diffuse = Color::new(f32::NAN, 0.0, 0.0);
        assert!(material.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let material: Material = serde_json::from_str(r#"{ "diffuse": [1.0, 0.5, 0.0] }"#).unwrap();
        assert_eq!(material.diffuse, Color::new(1.0, 0.5, 0.0));
        assert_eq!(material.alpha, 1.0);
        assert_eq!(material.reflectivity, 0.0);
    }
}
