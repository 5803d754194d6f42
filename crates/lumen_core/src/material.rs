//! Surface materials.
//!
//! The set of material kinds is closed; every consumer matches on
//! [`MaterialKind`] exhaustively, so an unknown kind cannot reach the tracer.

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};

/// Color type alias (linear RGB, unbounded for emitters)
pub type Color = Vec3;

/// How a surface scatters light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MaterialKind {
    /// Ideal diffuse reflector.
    Lambert,
    /// Specular reflector, optionally blurred.
    Metal {
        /// 0.0 = perfect mirror, larger values blur the reflection
        roughness: f32,
    },
    /// Clear glass-like refractor.
    Dielectric {
        /// Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
        refractive_index: f32,
    },
}

/// A material record, index-aligned with the sphere it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub kind: MaterialKind,
    pub albedo: Color,
    /// Emitted radiance. Zero for everything except lights.
    #[serde(default)]
    pub emissive: Color,
}

impl Material {
    /// Create a Lambertian material with the given albedo.
    pub fn lambert(albedo: Color) -> Self {
        Self {
            kind: MaterialKind::Lambert,
            albedo,
            emissive: Color::ZERO,
        }
    }

    /// Create a metal material.
    pub fn metal(albedo: Color, roughness: f32) -> Self {
        Self {
            kind: MaterialKind::Metal { roughness },
            albedo,
            emissive: Color::ZERO,
        }
    }

    /// Create a dielectric material. Its albedo is unused by the tracer.
    pub fn dielectric(albedo: Color, refractive_index: f32) -> Self {
        Self {
            kind: MaterialKind::Dielectric { refractive_index },
            albedo,
            emissive: Color::ZERO,
        }
    }

    /// Turn this material into a light.
    pub fn with_emission(mut self, emissive: Color) -> Self {
        self.emissive = emissive;
        self
    }

    /// True iff any emissive channel is positive.
    pub fn has_emission(&self) -> bool {
        self.emissive.x > 0.0 || self.emissive.y > 0.0 || self.emissive.z > 0.0
    }

    pub fn is_lambert(&self) -> bool {
        matches!(self.kind, MaterialKind::Lambert)
    }
}
