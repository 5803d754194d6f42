//! Lumen math - vectors, rays and the small amount of optics the tracer needs.

// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod aabb;
mod interval;
mod ray;
mod vector;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use vector::{
    is_normalized, orthonormal_basis, reflect, refract, schlick, NORMALIZED_TOLERANCE,
};
