//! SOL Core - Scene description for the SOL ray tracer.
//!
//! This crate provides:
//!
//! - **Materials**: Blinn-Phong `Material` with a mirror reflection weight
//! - **Scene description**: `SceneDesc`, `ShapeDesc`, `Light`, `CameraDesc`
//! - **Loading**: JSON scene files with validation
//!
//! # Example
//!
//! ```ignore
//! use sol_core::SceneDesc;
//!
//! let scene = SceneDesc::load("scene.json")?;
//! println!("Loaded {} objects, {} lights",
//!     scene.objects.len(),
//!     scene.lights.len());
//! ```

pub mod material;
pub mod scene;

// Re-export commonly used types
pub use material::{Color, Material};
pub use scene::{CameraDesc, Light, SceneDesc, SceneError, SceneResult, ShapeDesc};
