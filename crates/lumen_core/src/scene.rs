//! Scene representation for the tracer.
//!
//! A scene is a pair of index-aligned arrays (spheres and their materials)
//! plus the list of sphere indices that emit light. Scenes are validated when
//! they are built, so the tracer never has to deal with a bad radius.

use lumen_math::{Aabb, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::material::{Material, MaterialKind};
use crate::sphere::Sphere;

/// Errors that can occur while building or editing a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("sphere {index} has invalid radius {radius}")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("{spheres} spheres but {materials} materials")]
    MaterialCountMismatch { spheres: usize, materials: usize },

    #[error("material {index} has invalid refractive index {value}")]
    InvalidRefractiveIndex { index: usize, value: f32 },

    #[error("material {index} has invalid roughness {value}")]
    InvalidRoughness { index: usize, value: f32 },

    #[error("sphere index {index} out of range (scene has {len})")]
    SphereIndexOutOfRange { index: usize, len: usize },
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// A validated sphere scene.
///
/// The tracer borrows a scene immutably for the whole of a frame. Animation
/// builds a new snapshot instead of editing one that is being rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SceneDesc", into = "SceneDesc")]
pub struct Scene {
    spheres: Vec<Sphere>,
    materials: Vec<Material>,
    emissive: Vec<usize>,
}

impl Scene {
    /// Build a scene from index-aligned spheres and materials.
    pub fn new(spheres: Vec<Sphere>, materials: Vec<Material>) -> SceneResult<Self> {
        if spheres.len() != materials.len() {
            return Err(SceneError::MaterialCountMismatch {
                spheres: spheres.len(),
                materials: materials.len(),
            });
        }
        for (index, sphere) in spheres.iter().enumerate() {
            validate_radius(index, sphere.radius())?;
        }
        for (index, material) in materials.iter().enumerate() {
            validate_material(index, material)?;
        }

        let emissive = materials
            .iter()
            .enumerate()
            .filter(|(_, m)| m.has_emission())
            .map(|(i, _)| i)
            .collect();
        let scene = Self {
            spheres,
            materials,
            emissive,
        };

        log::debug!(
            "Built scene: {} spheres, {} emissive",
            scene.len(),
            scene.emissive.len()
        );
        if scene.emissive.is_empty() {
            log::warn!("Scene has no emissive spheres; only the sky lights it");
        }

        Ok(scene)
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Indices of spheres whose material emits light.
    pub fn emissive(&self) -> &[usize] {
        &self.emissive
    }

    #[inline]
    pub fn sphere(&self, index: usize) -> &Sphere {
        &self.spheres[index]
    }

    #[inline]
    pub fn material(&self, index: usize) -> &Material {
        &self.materials[index]
    }

    /// Number of spheres.
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// Move a sphere.
    pub fn set_sphere_center(&mut self, index: usize, center: Vec3) -> SceneResult<()> {
        let len = self.spheres.len();
        let sphere = self
            .spheres
            .get_mut(index)
            .ok_or(SceneError::SphereIndexOutOfRange { index, len })?;
        sphere.center = center;
        Ok(())
    }

    /// Resize a sphere. Takes effect from the next frame rendered.
    pub fn set_sphere_radius(&mut self, index: usize, radius: f32) -> SceneResult<()> {
        validate_radius(index, radius)?;
        let len = self.spheres.len();
        let sphere = self
            .spheres
            .get_mut(index)
            .ok_or(SceneError::SphereIndexOutOfRange { index, len })?;
        sphere.set_radius(radius);
        Ok(())
    }

    /// Bounding box of all spheres.
    pub fn bounds(&self) -> Aabb {
        self.spheres
            .iter()
            .fold(Aabb::EMPTY, |acc, s| Aabb::surrounding(&acc, &s.bounding_box()))
    }
}

fn validate_radius(index: usize, radius: f32) -> SceneResult<()> {
    if radius > 0.0 && radius.is_finite() {
        Ok(())
    } else {
        Err(SceneError::InvalidRadius { index, radius })
    }
}

fn validate_material(index: usize, material: &Material) -> SceneResult<()> {
    match material.kind {
        MaterialKind::Lambert => Ok(()),
        MaterialKind::Metal { roughness } => {
            if roughness >= 0.0 && roughness.is_finite() {
                Ok(())
            } else {
                Err(SceneError::InvalidRoughness {
                    index,
                    value: roughness,
                })
            }
        }
        MaterialKind::Dielectric { refractive_index } => {
            if refractive_index > 0.0 && refractive_index.is_finite() {
                Ok(())
            } else {
                Err(SceneError::InvalidRefractiveIndex {
                    index,
                    value: refractive_index,
                })
            }
        }
    }
}

/// Serialized form of a scene; deserializing goes through validation.
#[derive(Serialize, Deserialize)]
struct SceneDesc {
    spheres: Vec<Sphere>,
    materials: Vec<Material>,
}

impl TryFrom<SceneDesc> for Scene {
    type Error = SceneError;

    fn try_from(desc: SceneDesc) -> SceneResult<Self> {
        Scene::new(desc.spheres, desc.materials)
    }
}

impl From<Scene> for SceneDesc {
    fn from(scene: Scene) -> Self {
        SceneDesc {
            spheres: scene.spheres,
            materials: scene.materials,
        }
    }
}
