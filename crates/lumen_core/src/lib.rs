//! Lumen Core - scene description for the sphere path tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Sphere`, `Material`, `Scene`
//! - **Presets**: the built-in test scenes and their animation
//!
//! # Example
//!
//! ```
//! use lumen_core::presets::{preset_scene, PresetSize};
//!
//! let scene = preset_scene(PresetSize::Small)?;
//! assert_eq!(scene.emissive().len(), 1);
//! # Ok::<(), lumen_core::SceneError>(())
//! ```

pub mod material;
pub mod presets;
pub mod scene;
pub mod sphere;

// Re-export commonly used types
pub use material::{Color, Material, MaterialKind};
pub use scene::{Scene, SceneError, SceneResult};
pub use sphere::Sphere;
